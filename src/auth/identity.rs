use std::future::{ready, Ready};

use actix_web::{http::header::Header, web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};

use crate::{app_state::AppState, errors::AppError, models::domain::Identity};

/// Resolves the caller from a bearer token. Anything unresolvable is a guest.
pub fn resolve_identity(req: &HttpRequest) -> Identity {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        return Identity::Guest;
    };

    let Ok(header) = Authorization::<Bearer>::parse(req) else {
        return Identity::Guest;
    };

    match state.jwt_service.validate_token(header.as_ref().token()) {
        Ok(claims) => Identity::Authenticated(claims.sub),
        Err(err) => {
            log::debug!("Treating caller as guest: {}", err);
            Identity::Guest
        }
    }
}

/// Extractor for routes open to guests.
pub struct CallerIdentity(pub Identity);

impl FromRequest for CallerIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(CallerIdentity(resolve_identity(req))))
    }
}

/// Extractor for routes that require a signed-in learner. Holds the user id.
pub struct AuthenticatedUser(pub String);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = match resolve_identity(req) {
            Identity::Authenticated(user_id) => Ok(AuthenticatedUser(user_id)),
            Identity::Guest => Err(AppError::Unauthorized("Authentication required".to_string())),
        };

        ready(user)
    }
}
