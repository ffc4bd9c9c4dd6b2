pub mod challenge_result;
pub mod challenge_session;
pub mod question;
pub mod rating;
pub mod streak;
pub use challenge_result::{ChallengeResult, ChallengeResultRecord, QuestionBreakdown};
pub use challenge_session::{ChallengeSession, ScoredAnswer, SubmittedAnswer, CHALLENGE_LENGTH};
pub use question::{Difficulty, PromptKind, Question};
pub use rating::{Identity, PlayerRating, RECENT_SUBMISSION_WINDOW};
pub use streak::StreakTracker;
