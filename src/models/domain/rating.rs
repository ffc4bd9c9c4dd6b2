use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How many submission keys a rating document remembers for duplicate detection.
pub const RECENT_SUBMISSION_WINDOW: usize = 20;

/// Who is taking the challenge. Only `Authenticated` callers ever reach persistence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identity {
    Authenticated(String),
    Guest,
}

impl Identity {
    pub fn is_guest(&self) -> bool {
        matches!(self, Identity::Guest)
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::Authenticated(user_id) => Some(user_id),
            Identity::Guest => None,
        }
    }
}

/// Persisted rating of an authenticated learner.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlayerRating {
    pub user_id: String,
    pub elo: i64,
    /// Incremented on every successful write; guards read-modify-write cycles.
    pub version: i64,
    pub games_played: i64,
    #[serde(default)]
    pub recent_submissions: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl PlayerRating {
    pub fn has_applied(&self, submission_key: &str) -> bool {
        self.recent_submissions.iter().any(|k| k == submission_key)
    }

    /// The document that results from applying one session on top of `previous`.
    pub fn next(
        user_id: &str,
        previous: Option<&PlayerRating>,
        elo: i64,
        submission_key: &str,
    ) -> Self {
        let mut recent_submissions = previous
            .map(|p| p.recent_submissions.clone())
            .unwrap_or_default();
        recent_submissions.push(submission_key.to_string());
        if recent_submissions.len() > RECENT_SUBMISSION_WINDOW {
            let overflow = recent_submissions.len() - RECENT_SUBMISSION_WINDOW;
            recent_submissions.drain(..overflow);
        }

        PlayerRating {
            user_id: user_id.to_string(),
            elo,
            version: previous.map(|p| p.version + 1).unwrap_or(1),
            games_played: previous.map(|p| p.games_played + 1).unwrap_or(1),
            recent_submissions,
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_accessors() {
        let user = Identity::Authenticated("user-1".to_string());
        assert!(!user.is_guest());
        assert_eq!(user.user_id(), Some("user-1"));

        assert!(Identity::Guest.is_guest());
        assert_eq!(Identity::Guest.user_id(), None);
    }

    #[test]
    fn test_first_rating_starts_at_version_one() {
        let rating = PlayerRating::next("user-1", None, 816, "key-1");
        assert_eq!(rating.version, 1);
        assert_eq!(rating.games_played, 1);
        assert!(rating.has_applied("key-1"));
    }

    #[test]
    fn test_next_increments_version_and_bounds_history() {
        let mut rating = PlayerRating::next("user-1", None, 800, "key-0");
        for i in 1..30 {
            rating = PlayerRating::next("user-1", Some(&rating), 800 + i, &format!("key-{}", i));
        }

        assert_eq!(rating.version, 30);
        assert_eq!(rating.recent_submissions.len(), RECENT_SUBMISSION_WINDOW);
        assert!(rating.has_applied("key-29"));
        assert!(!rating.has_applied("key-0"));
    }
}
