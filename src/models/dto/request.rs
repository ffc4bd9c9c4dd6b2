use async_graphql::InputObject;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::SubmittedAnswer;

static CHALLENGE_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]{0,63}$").expect("CHALLENGE_ID_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Serialize, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    pub question_id: u32,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub answer: Option<String>,
    pub time_spent: f64,
}

impl From<AnswerInput> for SubmittedAnswer {
    fn from(input: AnswerInput) -> Self {
        SubmittedAnswer {
            question_id: input.question_id,
            answer: input.answer,
            time_spent: input.time_spent,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
#[serde(rename_all = "camelCase")]
pub struct SubmitChallengeRequest {
    #[validate(regex(
        path = *CHALLENGE_ID_REGEX,
        message = "Challenge id must be lowercase alphanumeric"
    ))]
    pub challenge_id: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub session_id: Option<String>,

    #[validate(
        length(equal = 10, message = "A challenge submission must contain exactly 10 answers"),
        nested
    )]
    pub answers: Vec<AnswerInput>,
}

impl SubmitChallengeRequest {
    pub fn submitted_answers(&self) -> Vec<SubmittedAnswer> {
        self.answers.iter().cloned().map(SubmittedAnswer::from).collect()
    }
}

/// Out-of-range values are clamped, not rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(count: u32) -> Vec<AnswerInput> {
        (1..=count)
            .map(|i| AnswerInput {
                question_id: i,
                answer: Some("option".to_string()),
                time_spent: 2.5,
            })
            .collect()
    }

    fn request(count: u32) -> SubmitChallengeRequest {
        SubmitChallengeRequest {
            challenge_id: "daily".to_string(),
            session_id: Some("session-1".to_string()),
            answers: answers(count),
        }
    }

    #[test]
    fn test_valid_submission() {
        assert!(request(10).validate().is_ok());
    }

    #[test]
    fn test_wrong_answer_count_is_rejected() {
        assert!(request(9).validate().is_err());
        assert!(request(11).validate().is_err());
        assert!(request(0).validate().is_err());
    }

    #[test]
    fn test_invalid_challenge_id() {
        let mut req = request(10);
        req.challenge_id = "Daily Challenge!".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_deserializes_camel_case_payload() {
        let json = r#"{
            "challengeId": "daily",
            "answers": [{ "questionId": 3, "answer": null, "timeSpent": 4.2 }]
        }"#;

        let req: SubmitChallengeRequest = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(req.challenge_id, "daily");
        assert!(req.session_id.is_none());
        assert_eq!(req.answers[0].question_id, 3);
        assert!(req.answers[0].answer.is_none());
    }

    #[test]
    fn test_pagination_defaults_and_clamps() {
        let params = PaginationParams {
            offset: None,
            limit: Some(500),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 100);
        assert_eq!(PaginationParams::default().limit(), 20);
    }

    #[test]
    fn test_pagination_clamps_negative_offset_and_zero_limit() {
        let params: PaginationParams =
            serde_json::from_str(r#"{ "offset": -5, "limit": 0 }"#).expect("params should parse");
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 1);
    }
}
