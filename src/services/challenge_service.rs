use std::collections::HashSet;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::ChallengeSettings,
    errors::{AppError, AppResult},
    models::{
        domain::{
            ChallengeResult, ChallengeResultRecord, ChallengeSession, Identity, PlayerRating,
            Question, QuestionBreakdown, SubmittedAnswer, CHALLENGE_LENGTH,
        },
        dto::{
            request::SubmitChallengeRequest,
            response::{HistoryEntry, HistoryResponse, PaginationMetadata, RatingResponse},
        },
    },
    repositories::{ChallengeResultRepository, RatingRepository, RatingWrite},
    services::{
        question_bank::{Challenge, QuestionBank},
        rating_service::{RankEstimator, RatingEngine, RatingInput},
        scoring_service::ScoringService,
    },
};

/// Validates submissions, runs the scoring pipeline and keeps persistence at the edges.
pub struct ChallengeService {
    ratings: Arc<dyn RatingRepository>,
    results: Arc<dyn ChallengeResultRepository>,
    bank: &'static QuestionBank,
    engine: RatingEngine,
    ranks: RankEstimator,
    max_elapsed_seconds: f64,
    rating_write_attempts: u32,
}

impl ChallengeService {
    pub fn new(
        ratings: Arc<dyn RatingRepository>,
        results: Arc<dyn ChallengeResultRepository>,
        settings: &ChallengeSettings,
    ) -> Self {
        Self {
            ratings,
            results,
            bank: QuestionBank::global(),
            engine: RatingEngine::new(settings),
            ranks: RankEstimator::new(settings),
            max_elapsed_seconds: settings.max_elapsed_seconds,
            rating_write_attempts: settings.rating_write_retries.max(1),
        }
    }

    pub fn challenge(&self, challenge_id: &str) -> AppResult<&'static Challenge> {
        self.bank
            .get(challenge_id)
            .ok_or_else(|| AppError::NotFound(format!("Challenge '{}' not found", challenge_id)))
    }

    pub async fn current_rating(&self, identity: &Identity) -> RatingResponse {
        let default_rating = self.engine.default_rating();
        let Identity::Authenticated(user_id) = identity else {
            return RatingResponse {
                elo: default_rating,
                is_guest: true,
            };
        };

        let elo = match self.ratings.find_by_user_id(user_id).await {
            Ok(Some(rating)) => rating.elo,
            Ok(None) => default_rating,
            Err(err) => {
                log::warn!("Could not read rating for user {}: {}", user_id, err);
                default_rating
            }
        };

        RatingResponse {
            elo,
            is_guest: false,
        }
    }

    pub async fn history(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<HistoryResponse> {
        let (records, total) = self.results.list_for_user(user_id, offset, limit).await?;

        Ok(HistoryResponse {
            items: records.into_iter().map(HistoryEntry::from).collect(),
            pagination: PaginationMetadata::new(offset, limit, total),
        })
    }

    pub async fn submit(
        &self,
        identity: &Identity,
        request: SubmitChallengeRequest,
    ) -> AppResult<ChallengeResult> {
        request.validate()?;

        let challenge = self.bank.get(&request.challenge_id).ok_or_else(|| {
            AppError::InvalidRequest(format!("Unknown challenge '{}'", request.challenge_id))
        })?;
        let answers = request.submitted_answers();
        let pairs = self.pair_with_questions(challenge, &answers)?;
        let session = ScoringService::grade(&pairs);
        let total_players = self.total_players().await;

        let result = match identity {
            Identity::Guest => self.build_result(
                challenge,
                &session,
                self.engine.default_rating(),
                true,
                total_players,
            ),
            Identity::Authenticated(user_id) => {
                let key = Self::submission_key(user_id, &request);
                self.submit_for_user(user_id, key.as_deref(), challenge, &session, total_players)
                    .await
            }
        };

        log::info!(
            "Challenge '{}' scored for {}: score={}, accuracy={:.0}%, elo {} ({:+})",
            challenge.id(),
            identity.user_id().unwrap_or("guest"),
            result.score,
            result.accuracy,
            result.new_elo,
            result.elo_change
        );

        Ok(result)
    }

    /// Identifies one completed session of one user, so that replays never apply twice.
    /// Without a `sessionId` there is nothing to tell a replay from a new play, so no key.
    pub fn submission_key(user_id: &str, request: &SubmitChallengeRequest) -> Option<String> {
        let session_id = request.session_id.as_deref()?;

        let mut hasher = Sha256::new();
        hasher.update(user_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(request.challenge_id.as_bytes());
        hasher.update([0u8]);
        hasher.update(session_id.as_bytes());

        Some(format!("{:x}", hasher.finalize()))
    }

    fn pair_with_questions<'a>(
        &self,
        challenge: &'a Challenge,
        answers: &'a [SubmittedAnswer],
    ) -> AppResult<Vec<(&'a Question, &'a SubmittedAnswer)>> {
        if answers.len() != CHALLENGE_LENGTH || challenge.questions().len() != CHALLENGE_LENGTH {
            return Err(AppError::InvalidRequest(format!(
                "A challenge submission must contain exactly {} answers",
                CHALLENGE_LENGTH
            )));
        }

        let mut seen = HashSet::new();
        let mut pairs = Vec::with_capacity(answers.len());

        for answer in answers {
            let question = challenge.question(answer.question_id).ok_or_else(|| {
                AppError::InvalidRequest(format!(
                    "Question {} is not part of challenge '{}'",
                    answer.question_id,
                    challenge.id()
                ))
            })?;

            if !seen.insert(answer.question_id) {
                return Err(AppError::InvalidRequest(format!(
                    "Question {} was answered more than once",
                    answer.question_id
                )));
            }

            if !answer.time_spent.is_finite()
                || answer.time_spent < 0.0
                || answer.time_spent > self.max_elapsed_seconds
            {
                return Err(AppError::InvalidRequest(format!(
                    "timeSpent for question {} must be between 0 and {} seconds",
                    answer.question_id, self.max_elapsed_seconds
                )));
            }

            pairs.push((question, answer));
        }

        pairs.sort_by_key(|(question, _)| challenge.position(question.id));
        Ok(pairs)
    }

    async fn total_players(&self) -> u64 {
        let known = match self.ratings.count_players().await {
            Ok(count) => Some(count),
            Err(err) => {
                log::warn!("Could not count players, using configured minimum: {}", err);
                None
            }
        };
        self.ranks.total_players(known)
    }

    fn build_result(
        &self,
        challenge: &Challenge,
        session: &ChallengeSession,
        current_rating: i64,
        is_guest: bool,
        total_players: u64,
    ) -> ChallengeResult {
        let elo_change = self.engine.delta(&RatingInput {
            current_rating,
            accuracy: session.accuracy(),
            average_time: session.average_time(),
            opponent_rating: self.engine.opponent_rating(),
            is_guest,
        });
        let new_elo = RatingEngine::apply(current_rating, elo_change);

        ChallengeResult {
            challenge_id: challenge.id().to_string(),
            score: session.score(),
            accuracy: session.accuracy(),
            average_time: session.average_time(),
            correct_count: session.correct_count(),
            total_questions: session.total_questions(),
            max_streak: session.max_streak(),
            elo_change: new_elo - current_rating,
            new_elo,
            rank: self.ranks.rank(new_elo, total_players),
            total_players,
            is_guest,
            breakdown: session.answers().iter().map(QuestionBreakdown::from).collect(),
        }
    }

    /// Read-modify-write of the stored rating, guarded by the document version.
    async fn submit_for_user(
        &self,
        user_id: &str,
        replay_key: Option<&str>,
        challenge: &Challenge,
        session: &ChallengeSession,
        total_players: u64,
    ) -> ChallengeResult {
        // History outlives the rating's key window.
        if let Some(key) = replay_key {
            if let Some(record) = self.stored_result(user_id, key).await {
                log::info!("Duplicate submission from user {}, rating left unchanged", user_id);
                return record.result;
            }
        }

        let owned_key = replay_key
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let submission_key = owned_key.as_str();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let stored = match self.ratings.find_by_user_id(user_id).await {
                Ok(stored) => stored,
                Err(err) => {
                    log::warn!(
                        "Could not read rating for user {}, scoring from seed; result unsynced: {}",
                        user_id,
                        err
                    );
                    return self.build_result(
                        challenge,
                        session,
                        self.engine.default_rating(),
                        false,
                        total_players,
                    );
                }
            };

            if let Some(rating) = stored.as_ref().filter(|r| r.has_applied(submission_key)) {
                return self
                    .replay(user_id, submission_key, challenge, session, rating.elo, total_players)
                    .await;
            }

            let current = stored
                .as_ref()
                .map(|r| r.elo)
                .unwrap_or_else(|| self.engine.default_rating());
            let result = self.build_result(challenge, session, current, false, total_players);
            let next = PlayerRating::next(user_id, stored.as_ref(), result.new_elo, submission_key);

            match self
                .ratings
                .save_if_version(&next, stored.as_ref().map(|r| r.version))
                .await
            {
                Ok(RatingWrite::Applied) => {
                    self.record_history(user_id, submission_key, result.clone());
                    return result;
                }
                Ok(RatingWrite::Conflict) if attempt < self.rating_write_attempts => {
                    log::debug!(
                        "Rating of user {} changed concurrently, retrying ({}/{})",
                        user_id,
                        attempt,
                        self.rating_write_attempts
                    );
                }
                Ok(RatingWrite::Conflict) => {
                    log::warn!(
                        "Rating of user {} kept changing after {} attempts; result unsynced",
                        user_id,
                        attempt
                    );
                    return result;
                }
                Err(err) => {
                    log::error!(
                        "Failed to save rating for user {}; result unsynced: {}",
                        user_id,
                        err
                    );
                    return result;
                }
            }
        }
    }

    /// A submission whose delta was already applied. Prefer the stored result.
    async fn replay(
        &self,
        user_id: &str,
        submission_key: &str,
        challenge: &Challenge,
        session: &ChallengeSession,
        current_rating: i64,
        total_players: u64,
    ) -> ChallengeResult {
        log::info!("Duplicate submission from user {}, rating left unchanged", user_id);

        if let Some(record) = self.stored_result(user_id, submission_key).await {
            return record.result;
        }

        let mut result = self.build_result(challenge, session, current_rating, false, total_players);
        result.elo_change = 0;
        result.new_elo = current_rating;
        result.rank = self.ranks.rank(current_rating, total_players);
        result
    }

    async fn stored_result(
        &self,
        user_id: &str,
        submission_key: &str,
    ) -> Option<ChallengeResultRecord> {
        match self
            .results
            .find_by_submission_key(user_id, submission_key)
            .await
        {
            Ok(found) => found,
            Err(err) => {
                log::warn!("Could not load stored result for user {}: {}", user_id, err);
                None
            }
        }
    }

    fn record_history(&self, user_id: &str, submission_key: &str, result: ChallengeResult) {
        let results = Arc::clone(&self.results);
        let record = ChallengeResultRecord::new(user_id, submission_key, result);

        tokio::spawn(async move {
            if let Err(err) = results.append(record).await {
                log::warn!("Failed to append challenge history: {}", err);
            }
        });
    }
}
