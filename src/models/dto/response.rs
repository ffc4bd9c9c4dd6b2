use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    question::{Difficulty, PromptKind},
    ChallengeResult, ChallengeResultRecord, Question,
};
use crate::services::question_bank::Challenge;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub elo: i64,
    pub is_guest: bool,
}

/// A question as shown to the learner: no correct answer.
#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub id: u32,
    pub prompt: String,
    pub kind: PromptKind,
    pub difficulty: Difficulty,
    pub options: Vec<String>,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        QuestionView {
            id: question.id,
            prompt: question.prompt.clone(),
            kind: question.kind,
            difficulty: question.difficulty,
            options: question.options.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeView {
    pub id: String,
    pub title: String,
    pub total_questions: u32,
    pub questions: Vec<QuestionView>,
}

impl From<&Challenge> for ChallengeView {
    fn from(challenge: &Challenge) -> Self {
        ChallengeView {
            id: challenge.id().to_string(),
            title: challenge.title().to_string(),
            total_questions: challenge.questions().len() as u32,
            questions: challenge.questions().iter().map(QuestionView::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub challenge_id: String,
    pub submitted_at: DateTime<Utc>,
    pub result: ChallengeResult,
}

impl From<ChallengeResultRecord> for HistoryEntry {
    fn from(record: ChallengeResultRecord) -> Self {
        HistoryEntry {
            id: record.id,
            challenge_id: record.challenge_id,
            submitted_at: record.submitted_at,
            result: record.result,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
    pub has_more: bool,
}

impl PaginationMetadata {
    pub fn new(offset: i64, limit: i64, total: i64) -> Self {
        PaginationMetadata {
            offset,
            limit,
            total,
            has_more: offset + limit < total,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct HistoryResponse {
    pub items: Vec<HistoryEntry>,
    pub pagination: PaginationMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::question_bank::QuestionBank;

    #[test]
    fn test_rating_response_field_names() {
        let json = serde_json::to_value(RatingResponse {
            elo: 800,
            is_guest: true,
        })
        .expect("rating should serialize");

        assert_eq!(json["elo"], 800);
        assert_eq!(json["isGuest"], true);
    }

    #[test]
    fn test_challenge_view_hides_correct_answers() {
        let challenge = QuestionBank::global().get("daily").expect("daily challenge exists");
        let json = serde_json::to_string(&ChallengeView::from(challenge))
            .expect("view should serialize");

        assert!(!json.contains("correctAnswer"));
        assert!(!json.contains("correct_answer"));
    }

    #[test]
    fn test_pagination_has_more() {
        assert!(PaginationMetadata::new(0, 20, 21).has_more);
        assert!(!PaginationMetadata::new(20, 20, 40).has_more);
    }
}
