use crate::services::question_bank::{Challenge, QuestionBank, DAILY_CHALLENGE_ID};

fn daily() -> &'static Challenge {
    QuestionBank::global()
        .get(DAILY_CHALLENGE_ID)
        .expect("daily challenge is always present")
}

#[cfg(test)]
pub mod fixtures {
    use serde_json::{json, Value};

    use super::daily;
    use crate::{app_state::AppState, models::dto::request::AnswerInput};

    /// Ten correct answers to the daily challenge, each given instantly.
    pub fn all_correct_answers() -> Vec<AnswerInput> {
        daily()
            .questions()
            .iter()
            .map(|q| AnswerInput {
                question_id: q.id,
                answer: Some(q.correct_answer.clone()),
                time_spent: 0.0,
            })
            .collect()
    }

    /// Ten wrong answers to the daily challenge, each given instantly.
    pub fn all_incorrect_answers() -> Vec<AnswerInput> {
        daily()
            .questions()
            .iter()
            .map(|q| AnswerInput {
                question_id: q.id,
                answer: q
                    .options
                    .iter()
                    .find(|o| **o != *q.correct_answer)
                    .cloned(),
                time_spent: 0.0,
            })
            .collect()
    }

    pub fn all_correct_answers_json() -> Value {
        let answers: Vec<Value> = all_correct_answers()
            .into_iter()
            .map(|a| json!({ "questionId": a.question_id, "answer": a.answer, "timeSpent": a.time_spent }))
            .collect();

        json!({ "challengeId": "daily", "answers": answers })
    }

    /// `Authorization` header value for `user_id`, signed with the state's secret.
    pub fn bearer_for(state: &AppState, user_id: &str) -> String {
        let token = state
            .jwt_service
            .issue_token(user_id, 1)
            .expect("test token should be issued");
        format!("Bearer {}", token)
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::test_helpers::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_fixture_answers_cover_the_daily_challenge() {
        assert_eq!(all_correct_answers().len(), 10);
        assert_eq!(all_incorrect_answers().len(), 10);
        assert!(all_incorrect_answers().iter().all(|a| a.answer.is_some()));
    }

    #[test]
    fn test_status_helpers() {
        assert_success_status(StatusCode::OK);
        assert_error_status(StatusCode::BAD_REQUEST);
        assert_error_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
