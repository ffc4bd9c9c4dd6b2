pub mod mutations;
pub mod queries;

use async_graphql::{EmptySubscription, Schema as GraphQLSchema};

use crate::app_state::AppState;

pub use mutations::MutationRoot;
pub use queries::QueryRoot;

pub type Schema = GraphQLSchema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn create_schema(app_state: AppState) -> Schema {
    GraphQLSchema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app_state)
        .limit_depth(8)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_graphql::{value, Request};

    use crate::{
        config::Config,
        models::domain::Identity,
        repositories::{MockChallengeResultRepository, MockRatingRepository},
    };

    fn schema_with(ratings: MockRatingRepository, results: MockChallengeResultRepository) -> Schema {
        create_schema(AppState::with_repositories(
            Config::test_config(),
            Arc::new(ratings),
            Arc::new(results),
        ))
    }

    #[tokio::test]
    async fn test_challenge_query_lists_questions() {
        let schema = schema_with(MockRatingRepository::new(), MockChallengeResultRepository::new());

        let response = schema
            .execute(r#"{ challenge(id: "daily") { id totalQuestions } }"#)
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data,
            value!({ "challenge": { "id": "daily", "totalQuestions": 10 } })
        );
    }

    #[tokio::test]
    async fn test_unknown_challenge_carries_error_code() {
        let schema = schema_with(MockRatingRepository::new(), MockChallengeResultRepository::new());

        let response = schema.execute(r#"{ challenge(id: "weekly") { id } }"#).await;

        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(value!("NOT_FOUND")));
    }

    #[tokio::test]
    async fn test_my_rating_defaults_to_guest() {
        let schema = schema_with(MockRatingRepository::new(), MockChallengeResultRepository::new());

        let response = schema.execute("{ myRating { elo isGuest } }").await;

        assert_eq!(
            response.data,
            value!({ "myRating": { "elo": 800, "isGuest": true } })
        );
    }

    #[tokio::test]
    async fn test_my_history_requires_user() {
        let schema = schema_with(MockRatingRepository::new(), MockChallengeResultRepository::new());

        let response = schema.execute("{ myHistory { pagination { total } } }").await;

        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(value!("UNAUTHORIZED")));
    }

    #[tokio::test]
    async fn test_my_history_for_user() {
        let mut results = MockChallengeResultRepository::new();
        results
            .expect_list_for_user()
            .withf(|user_id, offset, limit| user_id == "user-7" && *offset == 0 && *limit == 20)
            .returning(|_, _, _| Ok((vec![], 0)));
        let schema = schema_with(MockRatingRepository::new(), results);

        let request = Request::new("{ myHistory { items { id } pagination { total hasMore } } }")
            .data(Identity::Authenticated("user-7".to_string()));
        let response = schema.execute(request).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(
            response.data,
            value!({ "myHistory": { "items": [], "pagination": { "total": 0, "hasMore": false } } })
        );
    }

    #[tokio::test]
    async fn test_submit_rejects_short_submission() {
        let schema = schema_with(MockRatingRepository::new(), MockChallengeResultRepository::new());

        let response = schema
            .execute(
                r#"mutation {
                    submitChallenge(input: {
                        challengeId: "daily",
                        answers: [{ questionId: 1, answer: "x", timeSpent: 1.0 }]
                    }) { score }
                }"#,
            )
            .await;

        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(value!("INVALID_REQUEST")));
    }
}
