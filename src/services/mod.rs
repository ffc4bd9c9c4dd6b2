pub mod challenge_service;
pub mod question_bank;
pub mod rating_service;
pub mod scoring_service;

pub use challenge_service::ChallengeService;
pub use question_bank::{Challenge, QuestionBank, DAILY_CHALLENGE_ID};
pub use rating_service::{RankEstimator, RatingEngine, RatingInput};
pub use scoring_service::ScoringService;
