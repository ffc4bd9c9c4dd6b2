use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::challenge_session::ScoredAnswer;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBreakdown {
    pub question_id: u32,
    pub question: String,
    pub chosen_answer: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub points: u32,
    pub time_spent: f64,
}

impl From<&ScoredAnswer> for QuestionBreakdown {
    fn from(answer: &ScoredAnswer) -> Self {
        QuestionBreakdown {
            question_id: answer.question_id,
            question: answer.prompt.clone(),
            chosen_answer: answer.chosen.clone(),
            correct_answer: answer.correct_answer.clone(),
            is_correct: answer.is_correct,
            points: answer.points,
            time_spent: answer.elapsed_seconds,
        }
    }
}

/// Externally visible summary of one completed challenge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResult {
    pub challenge_id: String,
    pub score: u32,
    pub accuracy: f64,
    pub average_time: f64,
    pub correct_count: u32,
    pub total_questions: u32,
    pub max_streak: u32,
    pub elo_change: i64,
    pub new_elo: i64,
    pub rank: u64,
    pub total_players: u64,
    pub is_guest: bool,
    pub breakdown: Vec<QuestionBreakdown>,
}

/// History entry stored for authenticated learners.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChallengeResultRecord {
    pub id: String,
    pub user_id: String,
    pub challenge_id: String,
    pub submission_key: String,
    pub result: ChallengeResult,
    pub submitted_at: DateTime<Utc>,
    /// Sort key for history queries.
    pub submitted_at_ms: i64,
}

impl ChallengeResultRecord {
    pub fn new(user_id: &str, submission_key: &str, result: ChallengeResult) -> Self {
        let submitted_at = Utc::now();
        ChallengeResultRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            challenge_id: result.challenge_id.clone(),
            submission_key: submission_key.to_string(),
            result,
            submitted_at,
            submitted_at_ms: submitted_at.timestamp_millis(),
        }
    }
}
