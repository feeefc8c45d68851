pub mod explain;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const QUESTIONS_EN: &str = include_str!("../../assets/questions-en.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Antonyms,
    Synonyms,
}

pub const ALL_CATEGORIES: [Category; 2] = [Category::Antonyms, Category::Synonyms];

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Antonyms => "antonyms",
            Category::Synonyms => "synonyms",
        }
    }

    /// Singular form used in prompts ("What is the antonym of ...?").
    pub fn singular(self) -> &'static str {
        match self {
            Category::Antonyms => "antonym",
            Category::Synonyms => "synonym",
        }
    }

    pub fn other(self) -> Category {
        match self {
            Category::Antonyms => Category::Synonyms,
            Category::Synonyms => Category::Antonyms,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub word: String,
    pub meaning: String,
    pub options: Vec<String>,
    pub correct: usize,
}

impl Question {
    pub fn correct_answer(&self) -> &str {
        &self.options[self.correct]
    }

    pub fn prompt(&self, category: Category) -> String {
        format!("What is the {} of \"{}\"?", category.singular(), self.word)
    }
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no questions for category {category}")]
    EmptyCategory { category: Category },

    #[error("question \"{word}\" has fewer than two options")]
    TooFewOptions { word: String },

    #[error("question \"{word}\" marks option {correct} correct but only has {len} options")]
    CorrectIndexOutOfRange {
        word: String,
        correct: usize,
        len: usize,
    },
}

/// The full embedded question source, one list per category. Read-only after
/// load; sessions work on shuffled copies owned by a `QuestionPool`.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionBank {
    antonyms: Vec<Question>,
    synonyms: Vec<Question>,
}

impl QuestionBank {
    pub fn load() -> Result<Self, DatasetError> {
        Self::from_json(QUESTIONS_EN)
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let bank: QuestionBank = serde_json::from_str(json)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn questions(&self, category: Category) -> &[Question] {
        match category {
            Category::Antonyms => &self.antonyms,
            Category::Synonyms => &self.synonyms,
        }
    }

    fn validate(&self) -> Result<(), DatasetError> {
        for category in ALL_CATEGORIES {
            let questions = self.questions(category);
            if questions.is_empty() {
                return Err(DatasetError::EmptyCategory { category });
            }
            for q in questions {
                if q.options.len() < 2 {
                    return Err(DatasetError::TooFewOptions {
                        word: q.word.clone(),
                    });
                }
                if q.correct >= q.options.len() {
                    return Err(DatasetError::CorrectIndexOutOfRange {
                        word: q.word.clone(),
                        correct: q.correct,
                        len: q.options.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_bank_passes_validation() {
        let bank = QuestionBank::load().unwrap();
        for category in ALL_CATEGORIES {
            assert!(!bank.questions(category).is_empty());
        }
    }

    #[test]
    fn empty_category_is_rejected() {
        let json = r#"{"antonyms": [], "synonyms": []}"#;
        let err = QuestionBank::from_json(json).unwrap_err();
        assert!(matches!(err, DatasetError::EmptyCategory { .. }));
    }

    #[test]
    fn out_of_range_correct_index_is_rejected() {
        let json = r#"{
            "antonyms": [
                {"word": "w", "meaning": "m", "options": ["a", "b"], "correct": 5}
            ],
            "synonyms": [
                {"word": "w", "meaning": "m", "options": ["a", "b"], "correct": 0}
            ]
        }"#;
        let err = QuestionBank::from_json(json).unwrap_err();
        assert!(matches!(err, DatasetError::CorrectIndexOutOfRange { correct: 5, .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            QuestionBank::from_json("not json").unwrap_err(),
            DatasetError::Parse(_)
        ));
    }

    #[test]
    fn prompt_uses_singular_category() {
        let bank = QuestionBank::load().unwrap();
        let q = &bank.questions(Category::Antonyms)[0];
        assert!(q.prompt(Category::Antonyms).contains("antonym of"));
    }
}
