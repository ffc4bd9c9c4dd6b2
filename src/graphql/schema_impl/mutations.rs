use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::{
    app_state::AppState,
    auth::identity_from_context,
    models::{domain::ChallengeResult, dto::request::SubmitChallengeRequest},
};

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn submit_challenge(
        &self,
        ctx: &Context<'_>,
        input: SubmitChallengeRequest,
    ) -> Result<ChallengeResult> {
        let state = ctx.data::<AppState>()?;
        let identity = identity_from_context(ctx);

        state
            .challenge_service
            .submit(&identity, input)
            .await
            .map_err(|e| e.extend())
    }
}
