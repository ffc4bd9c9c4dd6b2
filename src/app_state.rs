use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        ChallengeResultRepository, MongoChallengeResultRepository, MongoRatingRepository,
        RatingRepository,
    },
    services::ChallengeService,
};

#[derive(Clone)]
pub struct AppState {
    pub challenge_service: Arc<ChallengeService>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
    /// Absent when the state was assembled over non-Mongo repositories.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let rating_repository = Arc::new(MongoRatingRepository::new(&db, &config.ratings_collection));
        rating_repository.ensure_indexes().await?;

        let result_repository = Arc::new(MongoChallengeResultRepository::new(
            &db,
            &config.results_collection,
        ));
        result_repository.ensure_indexes().await?;

        let mut state = Self::with_repositories(config, rating_repository, result_repository);
        state.db = Some(db);
        Ok(state)
    }

    pub fn with_repositories(
        config: Config,
        ratings: Arc<dyn RatingRepository>,
        results: Arc<dyn ChallengeResultRepository>,
    ) -> Self {
        let challenge_service = Arc::new(ChallengeService::new(ratings, results, &config.challenge));
        let jwt_service = Arc::new(JwtService::new(&config.jwt_secret));

        Self {
            challenge_service,
            jwt_service,
            config: Arc::new(config),
            db: None,
        }
    }
}
