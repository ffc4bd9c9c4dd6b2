use async_graphql::Context;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Identity,
};

/// Identity attached to a GraphQL request. Missing means guest.
pub fn identity_from_context(ctx: &Context<'_>) -> Identity {
    ctx.data_opt::<Identity>()
        .cloned()
        .unwrap_or(Identity::Guest)
}

pub fn require_user_from_context(ctx: &Context<'_>) -> AppResult<String> {
    match identity_from_context(ctx) {
        Identity::Authenticated(user_id) => Ok(user_id),
        Identity::Guest => Err(AppError::Unauthorized(
            "Authentication required".to_string(),
        )),
    }
}
