pub mod challenge_handler;
pub mod graphql_handler;
pub mod health_handler;

use actix_web::web;

pub use challenge_handler::{
    get_challenge, get_history, get_rating, json_config, query_config, submit_challenge,
    submit_challenge_for,
};
pub use graphql_handler::{graphiql, graphql};
pub use health_handler::{health_check, health_check_live, health_check_ready};

/// Registers every route. Callers provide `AppState` and `Schema` as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(health_check)
        .service(health_check_live)
        .service(health_check_ready)
        .service(get_challenge)
        .service(submit_challenge)
        .service(submit_challenge_for)
        .service(get_rating)
        .service(get_history)
        .service(
            web::resource("/graphql")
                .route(web::post().to(graphql))
                .route(web::get().to(graphql)),
        )
        .service(graphiql);
}
