use async_graphql::Enum;
use serde::{Deserialize, Serialize};

/// Number of answer options shown for every question.
pub const OPTION_COUNT: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Points awarded for a correct answer before speed and streak bonuses.
    pub fn base_points(self) -> u32 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 100,
            Difficulty::Hard => 150,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    WordToMeaning,
    MeaningToWord,
    Synonym,
    Antonym,
    FillBlank,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub kind: PromptKind,
    pub correct_answer: String,
    pub options: [String; OPTION_COUNT],
    pub difficulty: Difficulty,
}

impl Question {
    pub fn new(
        id: u32,
        prompt: &str,
        kind: PromptKind,
        difficulty: Difficulty,
        correct_answer: &str,
        options: [&str; OPTION_COUNT],
    ) -> Self {
        Question {
            id,
            prompt: prompt.to_string(),
            kind,
            correct_answer: correct_answer.to_string(),
            options: options.map(str::to_string),
            difficulty,
        }
    }

    /// A missing or blank choice is never correct.
    pub fn is_correct(&self, chosen: Option<&str>) -> bool {
        match chosen.map(str::trim) {
            Some(choice) if !choice.is_empty() => choice == self.correct_answer,
            _ => false,
        }
    }
}
