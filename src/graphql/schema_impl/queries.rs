use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::{
    app_state::AppState,
    auth::{identity_from_context, require_user_from_context},
    models::dto::{
        request::PaginationParams,
        response::{ChallengeView, HistoryResponse, RatingResponse},
    },
};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Questions of a challenge, without answers.
    async fn challenge(&self, ctx: &Context<'_>, id: String) -> Result<ChallengeView> {
        let state = ctx.data::<AppState>()?;

        let challenge = state
            .challenge_service
            .challenge(&id)
            .map_err(|e| e.extend())?;
        Ok(ChallengeView::from(challenge))
    }

    async fn my_rating(&self, ctx: &Context<'_>) -> Result<RatingResponse> {
        let state = ctx.data::<AppState>()?;
        let identity = identity_from_context(ctx);

        Ok(state.challenge_service.current_rating(&identity).await)
    }

    async fn my_history(
        &self,
        ctx: &Context<'_>,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<HistoryResponse> {
        let state = ctx.data::<AppState>()?;
        let user_id = require_user_from_context(ctx).map_err(|e| e.extend())?;

        let pagination = PaginationParams { offset, limit };
        state
            .challenge_service
            .history(&user_id, pagination.offset(), pagination.limit())
            .await
            .map_err(|e| e.extend())
    }
}
