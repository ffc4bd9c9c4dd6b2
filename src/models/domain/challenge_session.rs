use serde::{Deserialize, Serialize};

use crate::models::domain::streak::StreakTracker;

/// Every challenge is exactly this many questions long.
pub const CHALLENGE_LENGTH: usize = 10;

/// One learner response as received, before grading.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: u32,
    pub answer: Option<String>,
    pub time_spent: f64,
}

/// A graded answer. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub question_id: u32,
    pub prompt: String,
    pub chosen: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub points: u32,
    pub elapsed_seconds: f64,
    pub streak_before: u32,
}

/// Write-once aggregate of one completed challenge.
#[derive(Clone, Debug, PartialEq)]
pub struct ChallengeSession {
    answers: Vec<ScoredAnswer>,
    score: u32,
    correct_count: u32,
    accuracy: f64,
    average_time: f64,
    max_streak: u32,
}

impl ChallengeSession {
    pub fn from_scored(answers: Vec<ScoredAnswer>) -> Self {
        let mut streak = StreakTracker::new();
        let mut score = 0u32;
        let mut correct_count = 0u32;
        let mut total_time = 0.0f64;

        for answer in &answers {
            streak.record(answer.is_correct);
            score += answer.points;
            total_time += answer.elapsed_seconds;
            if answer.is_correct {
                correct_count += 1;
            }
        }

        let (accuracy, average_time) = if answers.is_empty() {
            (0.0, 0.0)
        } else {
            let count = answers.len() as f64;
            (100.0 * correct_count as f64 / count, total_time / count)
        };

        ChallengeSession {
            answers,
            score,
            correct_count,
            accuracy,
            average_time,
            max_streak: streak.max(),
        }
    }

    pub fn answers(&self) -> &[ScoredAnswer] {
        &self.answers
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn total_questions(&self) -> u32 {
        self.answers.len() as u32
    }

    /// Percentage in `[0, 100]`.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn average_time(&self) -> f64 {
        self.average_time
    }

    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }
}
