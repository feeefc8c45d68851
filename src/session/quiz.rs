use std::fmt;

use crate::dataset::explain;
use crate::dataset::{Category, Question};
use crate::session::pool::QuestionPool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    InProgress,
    Finished,
}

/// What the user produced for a question. Mistake records keep this instead of
/// a bare string so skips and timeouts stay distinguishable from real choices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GivenAnswer {
    Choice(String),
    Skipped,
    TimedOut,
}

impl fmt::Display for GivenAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GivenAnswer::Choice(text) => f.write_str(text),
            GivenAnswer::Skipped => f.write_str("Skipped"),
            GivenAnswer::TimedOut => f.write_str("No answer (time ran out)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MistakeRecord {
    pub word: String,
    pub meaning: String,
    pub your_answer: GivenAnswer,
    pub correct_answer: String,
    pub category: Category,
}

#[derive(Clone, Debug)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

/// One quiz attempt: `Idle -> InProgress -> Finished`, with an
/// `Unanswered -> Answered` sub-state per question guarded by `is_answered`.
///
/// Every mutating operation checks the current state first and returns `None`
/// when the call arrives in the wrong state (answer after answer, timeout
/// after answer, load while a question is still open). The UI legitimately
/// races input against the countdown, so wrong-state calls are ignored rather
/// than surfaced as errors.
pub struct QuizSession {
    category: Category,
    phase: SessionPhase,
    score: u32,
    streak: u32,
    best_streak: u32,
    mistakes: Vec<MistakeRecord>,
    questions_answered: u32,
    skipped: u32,
    question_cap: usize,
    time_per_question: u32,
    time_remaining: u32,
    is_answered: bool,
    current: Option<Question>,
}

impl QuizSession {
    pub fn new(category: Category, time_per_question: u32, question_cap: usize) -> Self {
        Self {
            category,
            phase: SessionPhase::Idle,
            score: 0,
            streak: 0,
            best_streak: 0,
            mistakes: Vec::new(),
            questions_answered: 0,
            skipped: 0,
            question_cap,
            time_per_question,
            time_remaining: time_per_question,
            is_answered: false,
            current: None,
        }
    }

    /// Reset all counters, enter `InProgress`, and load the first question.
    pub fn start(&mut self, pool: &mut QuestionPool) -> Option<&Question> {
        self.phase = SessionPhase::InProgress;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.mistakes.clear();
        self.questions_answered = 0;
        self.skipped = 0;
        self.is_answered = false;
        self.current = None;
        self.load_next(pool)
    }

    /// Pull the next question from the pool. Finishes the session when the
    /// pool is exhausted or the per-session cap is reached. Ignored while a
    /// question is still open, so a double "next" cannot drop a question.
    pub fn load_next(&mut self, pool: &mut QuestionPool) -> Option<&Question> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        if self.current.is_some() && !self.is_answered {
            return None;
        }
        if self.questions_answered as usize >= self.question_cap {
            self.finish();
            return None;
        }
        match pool.next() {
            Some(question) => {
                self.current = Some(question);
                self.is_answered = false;
                self.time_remaining = self.time_per_question;
                self.current.as_ref()
            }
            None => {
                self.finish();
                None
            }
        }
    }

    /// Score the selected option. Exactly one scoring event per question: the
    /// second and later calls (or a call racing a fired timeout) return `None`
    /// and change nothing.
    pub fn record_answer(&mut self, selected: usize) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::InProgress || self.is_answered {
            return None;
        }
        let question = self.current.clone()?;
        if selected >= question.options.len() {
            return None;
        }
        self.is_answered = true;
        self.questions_answered += 1;

        let correct = selected == question.correct;
        if correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
        } else {
            self.streak = 0;
            self.mistakes.push(MistakeRecord {
                word: question.word.clone(),
                meaning: question.meaning.clone(),
                your_answer: GivenAnswer::Choice(question.options[selected].clone()),
                correct_answer: question.correct_answer().to_string(),
                category: self.category,
            });
        }
        Some(self.outcome(&question, correct))
    }

    /// The countdown reached zero: a scored miss, recorded like a wrong answer
    /// but with no chosen option. Same idempotency guard as `record_answer`.
    pub fn record_timeout(&mut self) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::InProgress || self.is_answered {
            return None;
        }
        let question = self.current.clone()?;
        self.is_answered = true;
        self.questions_answered += 1;
        self.streak = 0;
        self.mistakes.push(MistakeRecord {
            word: question.word.clone(),
            meaning: question.meaning.clone(),
            your_answer: GivenAnswer::TimedOut,
            correct_answer: question.correct_answer().to_string(),
            category: self.category,
        });
        Some(self.outcome(&question, false))
    }

    /// Pass on the current question without scoring it.
    pub fn record_skip(&mut self) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::InProgress || self.is_answered {
            return None;
        }
        let question = self.current.clone()?;
        self.is_answered = true;
        self.questions_answered += 1;
        self.streak = 0;
        self.skipped += 1;
        self.mistakes.push(MistakeRecord {
            word: question.word.clone(),
            meaning: question.meaning.clone(),
            your_answer: GivenAnswer::Skipped,
            correct_answer: question.correct_answer().to_string(),
            category: self.category,
        });
        Some(self.outcome(&question, false))
    }

    /// One-second countdown tick. Decrements only while a question is open;
    /// answering or leaving `InProgress` cancels the countdown implicitly.
    /// Returns the timeout outcome the tick that hits zero, `None` otherwise.
    pub fn tick_second(&mut self) -> Option<AnswerOutcome> {
        if self.phase != SessionPhase::InProgress || self.is_answered || self.current.is_none() {
            return None;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.record_timeout()
        } else {
            None
        }
    }

    /// End the session regardless of remaining questions.
    pub fn finish(&mut self) {
        self.phase = SessionPhase::Finished;
    }

    /// Final percentage, rounded; 0 when nothing was answered.
    pub fn percentage(&self) -> u32 {
        if self.questions_answered == 0 {
            return 0;
        }
        (100.0 * self.score as f64 / self.questions_answered as f64).round() as u32
    }

    /// Ordered mistakes, skips and timeouts included.
    pub fn mistakes(&self) -> &[MistakeRecord] {
        &self.mistakes
    }

    fn outcome(&self, question: &Question, correct: bool) -> AnswerOutcome {
        AnswerOutcome {
            correct,
            correct_answer: question.correct_answer().to_string(),
            explanation: explain::answer_explanation(self.category, question),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn questions_answered(&self) -> u32 {
        self.questions_answered
    }

    pub fn skipped_count(&self) -> u32 {
        self.skipped
    }

    pub fn question_cap(&self) -> usize {
        self.question_cap
    }

    pub fn time_per_question(&self) -> u32 {
        self.time_per_question
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_answered(&self) -> bool {
        self.is_answered
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }
}
