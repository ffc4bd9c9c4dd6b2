#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use vocab_challenge_server::{
    errors::{AppError, AppResult},
    models::{
        domain::{ChallengeResultRecord, PlayerRating},
        dto::request::{AnswerInput, SubmitChallengeRequest},
    },
    repositories::{ChallengeResultRepository, RatingRepository, RatingWrite},
    services::{QuestionBank, DAILY_CHALLENGE_ID},
};

#[derive(Default)]
pub struct InMemoryRatingRepository {
    ratings: Arc<RwLock<HashMap<String, PlayerRating>>>,
}

impl InMemoryRatingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, user_id: &str) -> Option<PlayerRating> {
        self.ratings.read().await.get(user_id).cloned()
    }
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<PlayerRating>> {
        let ratings = self.ratings.read().await;
        Ok(ratings.get(user_id).cloned())
    }

    async fn save_if_version(
        &self,
        rating: &PlayerRating,
        expected_version: Option<i64>,
    ) -> AppResult<RatingWrite> {
        let mut ratings = self.ratings.write().await;
        let stored_version = ratings.get(&rating.user_id).map(|r| r.version);

        if stored_version != expected_version {
            return Ok(RatingWrite::Conflict);
        }

        ratings.insert(rating.user_id.clone(), rating.clone());
        Ok(RatingWrite::Applied)
    }

    async fn count_players(&self) -> AppResult<u64> {
        Ok(self.ratings.read().await.len() as u64)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryChallengeResultRepository {
    records: Arc<RwLock<Vec<ChallengeResultRecord>>>,
}

impl InMemoryChallengeResultRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ChallengeResultRepository for InMemoryChallengeResultRepository {
    async fn append(&self, record: ChallengeResultRecord) -> AppResult<()> {
        let mut records = self.records.write().await;
        if records
            .iter()
            .any(|r| r.user_id == record.user_id && r.submission_key == record.submission_key)
        {
            return Err(AppError::DatabaseError(format!(
                "Duplicate submission key for user '{}'",
                record.user_id
            )));
        }

        records.push(record);
        Ok(())
    }

    async fn find_by_submission_key(
        &self,
        user_id: &str,
        submission_key: &str,
    ) -> AppResult<Option<ChallengeResultRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.user_id == user_id && r.submission_key == submission_key)
            .cloned())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<ChallengeResultRecord>, i64)> {
        let records = self.records.read().await;
        let mut items: Vec<_> = records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.submitted_at_ms.cmp(&a.submitted_at_ms));

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let end = (start + limit.max(0) as usize).min(items.len());

        let page = if start >= items.len() {
            vec![]
        } else {
            items[start..end].to_vec()
        };

        Ok((page, total))
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Answers to the daily challenge: the first `correct` right, the rest wrong.
pub fn daily_answers(correct: usize, time_spent: f64) -> Vec<AnswerInput> {
    let challenge = QuestionBank::global()
        .get(DAILY_CHALLENGE_ID)
        .expect("daily challenge exists");

    challenge
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = if i < correct {
                q.correct_answer.clone()
            } else {
                q.options
                    .iter()
                    .find(|o| **o != q.correct_answer)
                    .cloned()
                    .expect("every question has a wrong option")
            };

            AnswerInput {
                question_id: q.id,
                answer: Some(answer),
                time_spent,
            }
        })
        .collect()
}

pub fn daily_request(correct: usize, session_id: Option<&str>) -> SubmitChallengeRequest {
    SubmitChallengeRequest {
        challenge_id: DAILY_CHALLENGE_ID.to_string(),
        session_id: session_id.map(str::to_string),
        answers: daily_answers(correct, 0.0),
    }
}
