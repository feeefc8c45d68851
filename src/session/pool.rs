use std::collections::HashSet;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::dataset::{Category, DatasetError, Question};

/// Per-session working copy of one category's questions.
///
/// Built by shuffling each question's options (tracking where the correct
/// answer lands) and then the question order itself, both with swap-based
/// Fisher-Yates. The shuffled copy is fixed for the pool's lifetime; only
/// `reshuffle` re-randomizes it, discarding consumption state.
///
/// Exhaustion policy: `next()` returns `None` once every question has been
/// served. The pool never wraps around, so a session cannot repeat a question.
#[derive(Debug)]
pub struct QuestionPool {
    category: Category,
    shuffled: Vec<Question>,
    consumed: HashSet<usize>,
    rng: SmallRng,
}

impl QuestionPool {
    pub fn new(category: Category, source: &[Question]) -> Result<Self, DatasetError> {
        Self::with_rng(category, source, SmallRng::from_entropy())
    }

    pub fn with_rng(
        category: Category,
        source: &[Question],
        rng: SmallRng,
    ) -> Result<Self, DatasetError> {
        if source.is_empty() {
            return Err(DatasetError::EmptyCategory { category });
        }
        let mut pool = Self {
            category,
            shuffled: Vec::new(),
            consumed: HashSet::new(),
            rng,
        };
        pool.randomize(source);
        Ok(pool)
    }

    /// Destructive re-randomization. Any in-progress consumption state is
    /// discarded, so only call between sessions or on an explicit user request.
    pub fn reshuffle(&mut self, source: &[Question]) {
        self.randomize(source);
    }

    fn randomize(&mut self, source: &[Question]) {
        let mut questions = source.to_vec();
        for q in &mut questions {
            shuffle_options(q, &mut self.rng);
        }
        fisher_yates(&mut questions, &mut self.rng);
        self.shuffled = questions;
        self.consumed.clear();
    }

    /// Serve a uniformly random unseen question, or `None` when exhausted.
    pub fn next(&mut self) -> Option<Question> {
        let available: Vec<usize> = (0..self.shuffled.len())
            .filter(|i| !self.consumed.contains(i))
            .collect();
        if available.is_empty() {
            return None;
        }
        let idx = available[self.rng.gen_range(0..available.len())];
        self.consumed.insert(idx);
        Some(self.shuffled[idx].clone())
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn len(&self) -> usize {
        self.shuffled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shuffled.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.shuffled.len() - self.consumed.len()
    }

    /// Questions in shuffled order, for the study browser.
    pub fn questions(&self) -> &[Question] {
        &self.shuffled
    }
}

/// Swap-based Fisher-Yates permutation, uniform over all orderings.
fn fisher_yates<T>(items: &mut [T], rng: &mut SmallRng) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle a question's options in place while tracking where the correct
/// answer moves, so `options[correct]` keeps denoting the same answer. Swap
/// tracking (rather than a post-shuffle value search) stays correct even when
/// two options share the same text.
fn shuffle_options(question: &mut Question, rng: &mut SmallRng) {
    for i in (1..question.options.len()).rev() {
        let j = rng.gen_range(0..=i);
        question.options.swap(i, j);
        if question.correct == i {
            question.correct = j;
        } else if question.correct == j {
            question.correct = i;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn sample_questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question {
                word: format!("word{i}"),
                meaning: format!("meaning{i}"),
                options: vec![
                    format!("right{i}"),
                    format!("wrong{i}a"),
                    format!("wrong{i}b"),
                    format!("wrong{i}c"),
                ],
                correct: 0,
            })
            .collect()
    }

    fn seeded_pool(n: usize, seed: u64) -> QuestionPool {
        QuestionPool::with_rng(
            Category::Antonyms,
            &sample_questions(n),
            SmallRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[test]
    fn empty_source_fails_at_initialize() {
        let err = QuestionPool::new(Category::Synonyms, &[]).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::EmptyCategory {
                category: Category::Synonyms
            }
        ));
    }

    #[test]
    fn serves_each_question_exactly_once_then_signals_exhaustion() {
        let mut pool = seeded_pool(8, 7);
        let mut words = HashSet::new();
        for _ in 0..8 {
            let q = pool.next().expect("pool has unseen questions");
            assert!(words.insert(q.word.clone()), "question repeated: {}", q.word);
        }
        assert_eq!(pool.remaining(), 0);
        assert!(pool.next().is_none());
        // Still exhausted on repeated calls
        assert!(pool.next().is_none());
    }

    #[test]
    fn shuffle_preserves_semantic_correct_answer() {
        for seed in 0..50 {
            let pool = seeded_pool(10, seed);
            for q in pool.questions() {
                assert!(
                    q.correct_answer().starts_with("right"),
                    "seed {seed}: correct index points at {}",
                    q.correct_answer()
                );
            }
        }
    }

    #[test]
    fn shuffle_tracks_duplicate_option_text() {
        let questions = vec![Question {
            word: "dup".to_string(),
            meaning: "m".to_string(),
            options: vec![
                "same".to_string(),
                "same".to_string(),
                "right".to_string(),
                "same".to_string(),
            ],
            correct: 2,
        }];
        for seed in 0..50 {
            let pool = QuestionPool::with_rng(
                Category::Antonyms,
                &questions,
                SmallRng::seed_from_u64(seed),
            )
            .unwrap();
            assert_eq!(pool.questions()[0].correct_answer(), "right");
        }
    }

    #[test]
    fn reshuffle_resets_consumption() {
        let mut pool = seeded_pool(5, 3);
        let source = sample_questions(5);
        for _ in 0..5 {
            pool.next().unwrap();
        }
        assert!(pool.next().is_none());

        pool.reshuffle(&source);
        assert_eq!(pool.remaining(), 5);
        assert!(pool.next().is_some());
    }

    #[test]
    fn question_order_varies_across_seeds() {
        let order = |seed: u64| -> Vec<String> {
            seeded_pool(10, seed)
                .questions()
                .iter()
                .map(|q| q.word.clone())
                .collect()
        };
        let baseline = order(0);
        // At least one of several seeds must differ from the baseline order.
        assert!((1..6).any(|seed| order(seed) != baseline));
    }
}
