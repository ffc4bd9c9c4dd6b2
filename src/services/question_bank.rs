use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::domain::{
    question::{Difficulty, PromptKind},
    Question,
};

pub const DAILY_CHALLENGE_ID: &str = "daily";

/// A fixed, order-stable set of questions.
#[derive(Debug, Clone)]
pub struct Challenge {
    id: String,
    title: String,
    questions: Vec<Question>,
}

impl Challenge {
    pub fn new(id: &str, title: &str, questions: Vec<Question>) -> Self {
        Challenge {
            id: id.to_string(),
            title: title.to_string(),
            questions,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Catalog index of a question, used to restore catalog order.
    pub fn position(&self, id: u32) -> Option<usize> {
        self.questions.iter().position(|q| q.id == id)
    }
}

pub struct QuestionBank {
    challenges: HashMap<String, Challenge>,
}

static QUESTION_BANK: Lazy<QuestionBank> = Lazy::new(|| {
    let mut challenges = HashMap::new();
    let daily = daily_challenge();
    challenges.insert(daily.id().to_string(), daily);
    QuestionBank { challenges }
});

impl QuestionBank {
    pub fn global() -> &'static QuestionBank {
        &QUESTION_BANK
    }

    pub fn get(&self, challenge_id: &str) -> Option<&Challenge> {
        self.challenges.get(challenge_id)
    }

    pub fn challenge_ids(&self) -> impl Iterator<Item = &str> {
        self.challenges.keys().map(String::as_str)
    }
}

fn daily_challenge() -> Challenge {
    use Difficulty::{Easy, Hard, Medium};

    let questions = vec![
        Question::new(
            1,
            "Ephemeral",
            PromptKind::WordToMeaning,
            Medium,
            "Lasting for a very short time",
            [
                "Lasting for a very short time",
                "Extremely old and fragile",
                "Full of nervous energy",
                "Difficult to see clearly",
            ],
        ),
        Question::new(
            2,
            "A person who is excessively fond of or submissive to their spouse",
            PromptKind::MeaningToWord,
            Hard,
            "Uxorious",
            ["Obsequious", "Uxorious", "Sycophantic", "Querulous"],
        ),
        Question::new(
            3,
            "Benevolent",
            PromptKind::Synonym,
            Medium,
            "Kind",
            ["Hostile", "Kind", "Greedy", "Timid"],
        ),
        Question::new(
            4,
            "Ancient",
            PromptKind::Antonym,
            Easy,
            "Modern",
            ["Old", "Historic", "Modern", "Antique"],
        ),
        Question::new(
            5,
            "She was too ___ to speak in front of the whole class.",
            PromptKind::FillBlank,
            Easy,
            "shy",
            ["shy", "loud", "tall", "quick"],
        ),
        Question::new(
            6,
            "Meticulous",
            PromptKind::WordToMeaning,
            Medium,
            "Showing great attention to detail",
            [
                "Showing great attention to detail",
                "Acting without careful thought",
                "Speaking in a loud voice",
                "Easily made angry",
            ],
        ),
        Question::new(
            7,
            "Happy",
            PromptKind::Synonym,
            Easy,
            "Joyful",
            ["Gloomy", "Joyful", "Weary", "Angry"],
        ),
        Question::new(
            8,
            "Candid",
            PromptKind::Antonym,
            Medium,
            "Evasive",
            ["Frank", "Honest", "Evasive", "Open"],
        ),
        Question::new(
            9,
            "His ___ remarks only made the tense negotiation worse.",
            PromptKind::FillBlank,
            Hard,
            "truculent",
            ["truculent", "placid", "laconic", "affable"],
        ),
        Question::new(
            10,
            "Able to recover quickly from difficulties",
            PromptKind::MeaningToWord,
            Medium,
            "Resilient",
            ["Fragile", "Resilient", "Reluctant", "Rigid"],
        ),
    ];

    Challenge::new(DAILY_CHALLENGE_ID, "Daily Vocabulary Challenge", questions)
}
