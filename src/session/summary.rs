use crate::dataset::Category;
use crate::session::quiz::QuizSession;

/// Final numbers for the results screen, frozen at finish time.
#[derive(Clone, Debug)]
pub struct SessionSummary {
    pub category: Category,
    pub score: u32,
    pub questions_answered: u32,
    pub skipped: u32,
    pub best_streak: u32,
    pub percentage: u32,
    pub mistake_count: usize,
}

impl SessionSummary {
    pub fn from_session(session: &QuizSession) -> Self {
        Self {
            category: session.category(),
            score: session.score(),
            questions_answered: session.questions_answered(),
            skipped: session.skipped_count(),
            best_streak: session.best_streak(),
            percentage: session.percentage(),
            mistake_count: session.mistakes().len(),
        }
    }

    pub fn message(&self) -> &'static str {
        match self.percentage {
            90.. => "Outstanding! You're a vocabulary master!",
            70..=89 => "Great job! Keep up the excellent work!",
            50..=69 => "Good effort! Practice makes perfect!",
            _ => "Keep practicing! You'll improve with time!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(percentage: u32) -> SessionSummary {
        SessionSummary {
            category: Category::Antonyms,
            score: 0,
            questions_answered: 0,
            skipped: 0,
            best_streak: 0,
            percentage,
            mistake_count: 0,
        }
    }

    #[test]
    fn message_tiers() {
        assert!(summary(100).message().contains("Outstanding"));
        assert!(summary(90).message().contains("Outstanding"));
        assert!(summary(89).message().contains("Great job"));
        assert!(summary(70).message().contains("Great job"));
        assert!(summary(50).message().contains("Good effort"));
        assert!(summary(49).message().contains("Keep practicing"));
        assert!(summary(0).message().contains("Keep practicing"));
    }
}
