use std::env;
use std::str::FromStr;

use secrecy::SecretString;

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub ratings_collection: String,
    pub results_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub jwt_secret: SecretString,
    pub challenge: ChallengeSettings,
}

/// Tunables of the scoring and rating pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct ChallengeSettings {
    pub default_rating: i64,
    pub k_factor: f64,
    pub opponent_rating: i64,
    pub rank_mean_rating: f64,
    pub rank_scale: f64,
    pub min_total_players: u64,
    pub max_elapsed_seconds: f64,
    pub rating_write_retries: u32,
}

impl Default for ChallengeSettings {
    fn default() -> Self {
        Self {
            default_rating: 800,
            k_factor: 32.0,
            opponent_rating: 800,
            rank_mean_rating: 1000.0,
            rank_scale: 200.0,
            min_total_players: 1000,
            max_elapsed_seconds: 60.0,
            rating_write_retries: 3,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl ChallengeSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_rating: env_or("CHALLENGE_DEFAULT_RATING", defaults.default_rating),
            k_factor: env_or("CHALLENGE_K_FACTOR", defaults.k_factor),
            opponent_rating: env_or("CHALLENGE_OPPONENT_RATING", defaults.opponent_rating),
            rank_mean_rating: env_or("CHALLENGE_RANK_MEAN", defaults.rank_mean_rating),
            rank_scale: env_or("CHALLENGE_RANK_SCALE", defaults.rank_scale),
            min_total_players: env_or("CHALLENGE_MIN_TOTAL_PLAYERS", defaults.min_total_players),
            max_elapsed_seconds: env_or(
                "CHALLENGE_MAX_ELAPSED_SECONDS",
                defaults.max_elapsed_seconds,
            ),
            rating_write_retries: env_or(
                "CHALLENGE_RATING_WRITE_RETRIES",
                defaults.rating_write_retries,
            ),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "vocab-challenge-local".to_string()),
            ratings_collection: env::var("RATINGS_COLLECTION")
                .unwrap_or_else(|_| "player_ratings".to_string()),
            results_collection: env::var("RESULTS_COLLECTION")
                .unwrap_or_else(|_| "challenge_results".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env_or("WEB_SERVER_PORT", 8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            ),
            challenge: ChallengeSettings::from_env(),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            panic!(
                "FATAL: JWT_SECRET is using default value! Set JWT_SECRET environment variable to a secure random string."
            );
        }

        if jwt_secret.len() < 32 {
            panic!(
                "FATAL: JWT_SECRET is too short ({}). Must be at least 32 characters for security.",
                jwt_secret.len()
            );
        }

        if self.challenge.k_factor <= 0.0 || self.challenge.rank_scale <= 0.0 {
            panic!("FATAL: CHALLENGE_K_FACTOR and CHALLENGE_RANK_SCALE must be positive.");
        }
    }

    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "vocab-challenge-test".to_string(),
            ratings_collection: "player_ratings".to_string(),
            results_collection: "challenge_results".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: None,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            challenge: ChallengeSettings::default(),
        }
    }
}
