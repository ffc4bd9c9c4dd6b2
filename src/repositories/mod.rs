pub mod challenge_result_repository;
pub mod rating_repository;

pub use challenge_result_repository::{ChallengeResultRepository, MongoChallengeResultRepository};
pub use rating_repository::{MongoRatingRepository, RatingRepository, RatingWrite};

#[cfg(test)]
pub use challenge_result_repository::MockChallengeResultRepository;
#[cfg(test)]
pub use rating_repository::MockRatingRepository;
