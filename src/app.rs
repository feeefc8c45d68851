use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;

use crate::config::Config;
use crate::dataset::{Category, QuestionBank};
use crate::session::pool::QuestionPool;
use crate::session::quiz::{AnswerOutcome, QuizSession, SessionPhase};
use crate::session::summary::SessionSummary;
use crate::store::json_store::JsonStore;
use crate::store::schema::{RevisionEntry, RevisionListData};
use crate::ui::components::menu::Menu;
use crate::ui::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Welcome,
    Quiz,
    Results,
    Review,
    Study,
    Revision,
    Settings,
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub bank: QuestionBank,
    pub pool: Option<QuestionPool>,
    pub session: Option<QuizSession>,
    pub last_outcome: Option<AnswerOutcome>,
    pub chosen_option: Option<usize>,
    pub highlighted_option: usize,
    pub last_summary: Option<SessionSummary>,
    pub revision: RevisionListData,
    pub store: Option<JsonStore>,
    pub status: Option<String>,
    pub should_quit: bool,
    pub review_selected: usize,
    pub study_category: Category,
    pub study_selected: usize,
    pub revision_selected: usize,
    pub revision_confirm_clear: bool,
    pub settings_selected: usize,
    last_second_tick: Option<Instant>,
}

impl App {
    pub fn new() -> Result<Self> {
        let config = Config::load().unwrap_or_default();
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));
        let menu = Menu::new(theme);

        // An unusable question bank means no session can ever start.
        let bank = QuestionBank::load().context("loading embedded question bank")?;

        let store = JsonStore::new().ok();
        let revision = store
            .as_ref()
            .map(|s| s.load_revision_list())
            .unwrap_or_default();

        Ok(Self {
            screen: AppScreen::Welcome,
            menu,
            theme,
            config,
            bank,
            pool: None,
            session: None,
            last_outcome: None,
            chosen_option: None,
            highlighted_option: 0,
            last_summary: None,
            revision,
            store,
            status: None,
            should_quit: false,
            review_selected: 0,
            study_category: Category::Antonyms,
            study_selected: 0,
            revision_selected: 0,
            revision_confirm_clear: false,
            settings_selected: 0,
            last_second_tick: None,
        })
    }

    // ----- quiz flow -----

    pub fn start_quiz(&mut self, category: Category) {
        match QuestionPool::new(category, self.bank.questions(category)) {
            Ok(mut pool) => {
                let mut session = QuizSession::new(
                    category,
                    self.config.difficulty.time_per_question(),
                    self.config.questions_per_session,
                );
                session.start(&mut pool);
                self.pool = Some(pool);
                self.session = Some(session);
                self.last_outcome = None;
                self.chosen_option = None;
                self.highlighted_option = 0;
                self.last_summary = None;
                self.status = None;
                self.last_second_tick = Some(Instant::now());
                self.screen = AppScreen::Quiz;
            }
            Err(err) => {
                self.status = Some(format!("Cannot start quiz: {err}"));
            }
        }
    }

    /// Catch up the per-question countdown from wall-clock time. Called every
    /// event-loop iteration; ticks land only while a question is open, so an
    /// answer or a screen change cancels the countdown without bookkeeping.
    pub fn advance_clock(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if self.screen != AppScreen::Quiz
            || session.phase() != SessionPhase::InProgress
            || session.is_answered()
        {
            self.last_second_tick = None;
            return;
        }
        let now = Instant::now();
        let last = self.last_second_tick.get_or_insert(now);
        while now.duration_since(*last) >= Duration::from_secs(1) {
            *last += Duration::from_secs(1);
            if let Some(outcome) = session.tick_second() {
                self.last_outcome = Some(outcome);
                self.chosen_option = None;
                break;
            }
        }
    }

    pub fn select_answer(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(outcome) = session.record_answer(index) {
            self.chosen_option = Some(index);
            self.last_outcome = Some(outcome);
        }
    }

    pub fn skip_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(outcome) = session.record_skip() {
            self.chosen_option = None;
            self.last_outcome = Some(outcome);
        }
    }

    pub fn next_question(&mut self) {
        let (Some(session), Some(pool)) = (self.session.as_mut(), self.pool.as_mut()) else {
            return;
        };
        if !session.is_answered() {
            return;
        }
        self.last_outcome = None;
        self.chosen_option = None;
        self.highlighted_option = 0;
        if session.load_next(pool).is_none() {
            self.finish_quiz();
        } else {
            self.last_second_tick = Some(Instant::now());
        }
    }

    pub fn finish_quiz(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.finish();
        self.last_summary = Some(SessionSummary::from_session(session));
        self.review_selected = 0;
        self.screen = AppScreen::Results;
    }

    pub fn retry_quiz(&mut self) {
        if let Some(category) = self.session.as_ref().map(|s| s.category()) {
            self.start_quiz(category);
        }
    }

    /// Manual reshuffle from the welcome menu. A new session always shuffles
    /// on start; this additionally re-randomizes any held pool, discarding
    /// its consumption state.
    pub fn reshuffle_questions(&mut self) {
        if let Some(pool) = self.pool.as_mut() {
            let category = pool.category();
            pool.reshuffle(self.bank.questions(category));
        }
        self.status = Some("Questions reshuffled for a fresh challenge".to_string());
    }

    // ----- option highlight -----

    pub fn highlight_next(&mut self) {
        let Some(count) = self.option_count() else {
            return;
        };
        self.highlighted_option = (self.highlighted_option + 1) % count;
    }

    pub fn highlight_prev(&mut self) {
        let Some(count) = self.option_count() else {
            return;
        };
        self.highlighted_option = if self.highlighted_option == 0 {
            count - 1
        } else {
            self.highlighted_option - 1
        };
    }

    fn option_count(&self) -> Option<usize> {
        self.session
            .as_ref()
            .and_then(|s| s.current_question())
            .map(|q| q.options.len())
            .filter(|&n| n > 0)
    }

    // ----- revision list -----

    pub fn add_mistake_to_revision(&mut self) {
        let entry = {
            let Some(session) = self.session.as_ref() else {
                return;
            };
            let Some(mistake) = session.mistakes().get(self.review_selected) else {
                return;
            };
            RevisionEntry::from_mistake(mistake)
        };
        self.add_revision_entry(entry);
    }

    pub fn add_study_word_to_revision(&mut self) {
        let entry = {
            let questions = self.bank.questions(self.study_category);
            let Some(question) = questions.get(self.study_selected) else {
                return;
            };
            RevisionEntry {
                word: question.word.clone(),
                meaning: question.meaning.clone(),
                correct_answer: question.correct_answer().to_string(),
                category: self.study_category,
                added_at: Utc::now(),
            }
        };
        self.add_revision_entry(entry);
    }

    fn add_revision_entry(&mut self, entry: RevisionEntry) {
        let word = entry.word.clone();
        if self.revision.add(entry) {
            self.persist_revision();
            self.status = Some(format!("\"{word}\" added to revision list"));
        } else {
            self.status = Some(format!("\"{word}\" is already in the revision list"));
        }
    }

    pub fn remove_revision_entry(&mut self) {
        if self.revision.entries.is_empty() {
            return;
        }
        let index = self.revision_selected.min(self.revision.entries.len() - 1);
        let entry = self.revision.entries[index].clone();
        self.revision.remove(&entry.word, entry.category);
        self.persist_revision();
        self.status = Some(format!("\"{}\" removed", entry.word));
        if !self.revision.entries.is_empty() {
            self.revision_selected = self.revision_selected.min(self.revision.entries.len() - 1);
        } else {
            self.revision_selected = 0;
        }
    }

    pub fn clear_revision(&mut self) {
        self.revision.clear();
        self.persist_revision();
        self.revision_selected = 0;
        self.status = Some("Revision list cleared".to_string());
    }

    fn persist_revision(&mut self) {
        if let Some(store) = &self.store {
            if let Err(err) = store.save_revision_list(&self.revision) {
                self.status = Some(format!("Could not save revision list: {err}"));
            }
        }
    }

    pub fn export_revision(&mut self) {
        let Some(store) = &self.store else {
            self.status = Some("No data directory available for export".to_string());
            return;
        };
        let dest = PathBuf::from("lexiq-revision-export.json");
        match store.export_revision_list(&dest) {
            Ok(count) => {
                self.status = Some(format!("Exported {count} words to {}", dest.display()));
            }
            Err(err) => {
                self.status = Some(format!("Export failed: {err}"));
            }
        }
    }

    // ----- navigation -----

    pub fn go_to_welcome(&mut self) {
        self.screen = AppScreen::Welcome;
        self.status = None;
    }

    pub fn go_to_study(&mut self) {
        self.study_selected = 0;
        self.status = None;
        self.screen = AppScreen::Study;
    }

    pub fn toggle_study_category(&mut self) {
        self.study_category = self.study_category.other();
        self.study_selected = 0;
    }

    pub fn go_to_revision(&mut self) {
        self.revision_selected = 0;
        self.revision_confirm_clear = false;
        self.status = None;
        self.screen = AppScreen::Revision;
    }

    pub fn go_to_review(&mut self) {
        self.review_selected = 0;
        self.screen = AppScreen::Review;
    }

    pub fn go_to_settings(&mut self) {
        self.settings_selected = 0;
        self.status = None;
        self.screen = AppScreen::Settings;
    }

    // ----- settings -----

    pub fn settings_cycle_forward(&mut self) {
        match self.settings_selected {
            0 => {
                self.config.difficulty = self.config.difficulty.next();
            }
            1 => {
                self.config.questions_per_session =
                    (self.config.questions_per_session + 1).min(50);
            }
            2 => self.cycle_theme(1),
            _ => {}
        }
    }

    pub fn settings_cycle_backward(&mut self) {
        match self.settings_selected {
            0 => {
                self.config.difficulty = self.config.difficulty.prev();
            }
            1 => {
                self.config.questions_per_session =
                    self.config.questions_per_session.saturating_sub(1).max(1);
            }
            2 => self.cycle_theme(-1),
            _ => {}
        }
    }

    fn cycle_theme(&mut self, direction: i32) {
        let themes = Theme::available_themes();
        if themes.is_empty() {
            return;
        }
        let current = themes
            .iter()
            .position(|t| *t == self.config.theme)
            .unwrap_or(0);
        let next = if direction >= 0 {
            (current + 1) % themes.len()
        } else if current == 0 {
            themes.len() - 1
        } else {
            current - 1
        };
        self.config.theme = themes[next].clone();
        if let Some(new_theme) = Theme::load(&self.config.theme) {
            let theme: &'static Theme = Box::leak(Box::new(new_theme));
            self.theme = theme;
            self.menu.theme = theme;
        }
    }
}
