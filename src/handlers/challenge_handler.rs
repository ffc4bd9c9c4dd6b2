use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    auth::{AuthenticatedUser, CallerIdentity},
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{PaginationParams, SubmitChallengeRequest},
        response::ChallengeView,
    },
};

/// Malformed JSON bodies surface as `INVALID_REQUEST` rather than actix's plain-text 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::InvalidRequest(err.to_string()).into())
}

#[get("/api/challenges/{challenge_id}")]
async fn get_challenge(
    state: web::Data<AppState>,
    challenge_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let challenge = state.challenge_service.challenge(&challenge_id)?;
    Ok(HttpResponse::Ok().json(ChallengeView::from(challenge)))
}

#[post("/api/challenge/submit")]
async fn submit_challenge(
    req: HttpRequest,
    state: web::Data<AppState>,
    caller: CallerIdentity,
    request: web::Json<SubmitChallengeRequest>,
) -> Result<HttpResponse, AppError> {
    log::debug!(
        "[{}] submission for challenge '{}'",
        get_request_id(&req).unwrap_or_default(),
        request.challenge_id
    );

    let result = state
        .challenge_service
        .submit(&caller.0, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

#[post("/api/challenges/{challenge_id}/submissions")]
async fn submit_challenge_for(
    state: web::Data<AppState>,
    challenge_id: web::Path<String>,
    caller: CallerIdentity,
    request: web::Json<SubmitChallengeRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    if request.challenge_id != *challenge_id {
        return Err(AppError::InvalidRequest(
            "challengeId in body does not match the path".to_string(),
        ));
    }

    let result = state.challenge_service.submit(&caller.0, request).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[get("/api/challenge/rating")]
async fn get_rating(
    state: web::Data<AppState>,
    caller: CallerIdentity,
) -> Result<HttpResponse, AppError> {
    let rating = state.challenge_service.current_rating(&caller.0).await;
    Ok(HttpResponse::Ok().json(rating))
}

#[get("/api/challenge/history")]
async fn get_history(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let pagination = query.into_inner();
    let response = state
        .challenge_service
        .history(&auth.0, pagination.offset(), pagination.limit())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
