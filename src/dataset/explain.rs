use std::collections::HashMap;
use std::sync::OnceLock;

use crate::dataset::{Category, Question};

const ANTONYM_MEANINGS: &str = include_str!("../../assets/antonym-meanings.json");

/// Answer-word -> definition table shared by explanation text and the study
/// browser. Parsed once; a malformed asset degrades to the generic fallback.
fn antonym_meanings() -> &'static HashMap<String, String> {
    static TABLE: OnceLock<HashMap<String, String>> = OnceLock::new();
    TABLE.get_or_init(|| serde_json::from_str(ANTONYM_MEANINGS).unwrap_or_default())
}

pub fn antonym_meaning(answer: &str) -> Option<&'static str> {
    antonym_meanings().get(answer).map(String::as_str)
}

/// Human-readable sentence explaining why the correct answer is correct.
/// Pure: depends only on the question and its category.
pub fn answer_explanation(category: Category, question: &Question) -> String {
    let correct = question.correct_answer();
    match category {
        Category::Antonyms => {
            let opposite = antonym_meaning(correct).unwrap_or("the opposite concept");
            format!(
                "\"{}\" means {}, while its antonym \"{}\" means {}.",
                question.word, question.meaning, correct, opposite
            )
        }
        Category::Synonyms => format!(
            "Both \"{}\" and \"{}\" share similar meanings: {}",
            question.word, correct, question.meaning
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(word: &str, meaning: &str, options: &[&str], correct: usize) -> Question {
        Question {
            word: word.to_string(),
            meaning: meaning.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct,
        }
    }

    #[test]
    fn antonym_explanation_uses_lookup_table() {
        let q = question(
            "diminish",
            "to make or become less",
            &["intensify", "reduce"],
            0,
        );
        let text = answer_explanation(Category::Antonyms, &q);
        assert!(text.contains("\"diminish\" means to make or become less"));
        assert!(text.contains("to increase in strength or degree"));
    }

    #[test]
    fn antonym_explanation_falls_back_for_unknown_answer() {
        let q = question("up", "toward the sky", &["down", "left"], 0);
        let text = answer_explanation(Category::Antonyms, &q);
        assert!(text.contains("the opposite concept"));
    }

    #[test]
    fn synonym_explanation_cites_shared_meaning() {
        let q = question("happy", "feeling pleasure", &["joyful", "gloomy"], 0);
        let text = answer_explanation(Category::Synonyms, &q);
        assert!(text.contains("\"happy\""));
        assert!(text.contains("\"joyful\""));
        assert!(text.contains("feeling pleasure"));
    }
}
