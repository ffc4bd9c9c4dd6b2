use crate::models::domain::{
    question::Difficulty, ChallengeSession, Question, ScoredAnswer, StreakTracker, SubmittedAnswer,
};

const MAX_SPEED_BONUS: f64 = 50.0;
const SPEED_BONUS_DECAY_PER_SECOND: f64 = 10.0;
const STREAK_BONUS_PER_ANSWER: u32 = 10;

pub struct ScoringService;

impl ScoringService {
    /// Linear decay from 50 points at 0s to nothing at 5s.
    pub fn speed_bonus(elapsed_seconds: f64) -> u32 {
        if !elapsed_seconds.is_finite() {
            return 0;
        }
        let bonus = MAX_SPEED_BONUS - SPEED_BONUS_DECAY_PER_SECOND * elapsed_seconds.max(0.0);
        bonus.max(0.0).floor() as u32
    }

    pub fn streak_bonus(streak_before: u32) -> u32 {
        STREAK_BONUS_PER_ANSWER * streak_before
    }

    /// Points for one correct answer. Incorrect answers score nothing and never reach here.
    pub fn points(difficulty: Difficulty, elapsed_seconds: f64, streak_before: u32) -> u32 {
        difficulty.base_points()
            + Self::speed_bonus(elapsed_seconds)
            + Self::streak_bonus(streak_before)
    }

    /// Grade answers already paired with their questions and sorted in catalog order.
    pub fn grade(pairs: &[(&Question, &SubmittedAnswer)]) -> ChallengeSession {
        let mut streak = StreakTracker::new();

        let scored = pairs
            .iter()
            .map(|(question, submitted)| {
                let chosen = submitted
                    .answer
                    .as_deref()
                    .map(str::trim)
                    .filter(|a| !a.is_empty());
                let is_correct = question.is_correct(chosen);
                let streak_before = streak.record(is_correct);
                let points = if is_correct {
                    Self::points(question.difficulty, submitted.time_spent, streak_before)
                } else {
                    0
                };

                ScoredAnswer {
                    question_id: question.id,
                    prompt: question.prompt.clone(),
                    chosen: chosen.map(str::to_string),
                    correct_answer: question.correct_answer.clone(),
                    is_correct,
                    points,
                    elapsed_seconds: submitted.time_spent,
                    streak_before,
                }
            })
            .collect();

        ChallengeSession::from_scored(scored)
    }
}
