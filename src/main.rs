mod app;
mod config;
mod dataset;
mod event;
mod session;
mod store;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use app::{App, AppScreen};
use dataset::Category;
use event::{AppEvent, EventHandler};
use store::json_store::JsonStore;
use ui::components::question_card::QuestionCard;
use ui::components::results_panel::ResultsPanel;
use ui::components::review_list::ReviewList;
use ui::components::revision_panel::RevisionPanel;
use ui::components::study_browser::StudyBrowser;
use ui::components::timer_bar::TimerBar;
use ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "lexiq", version, about = "Terminal vocabulary quiz trainer")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(long, value_name = "FILE", help = "Export the revision list to FILE and exit")]
    export_revision: Option<PathBuf>,

    #[arg(long, value_name = "FILE", help = "Merge revision entries from FILE and exit")]
    import_revision: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Headless revision-list transfer, no terminal takeover.
    if let Some(path) = cli.export_revision.as_deref() {
        let store = JsonStore::new()?;
        let count = store.export_revision_list(path)?;
        println!("Exported {count} revision entries to {}", path.display());
        return Ok(());
    }
    if let Some(path) = cli.import_revision.as_deref() {
        let store = JsonStore::new()?;
        let added = store.import_revision_list(path)?;
        println!("Imported {added} new revision entries");
        return Ok(());
    }

    let mut app = App::new()?;

    if let Some(theme_name) = cli.theme {
        if let Some(theme) = ui::theme::Theme::load(&theme_name) {
            let theme: &'static ui::theme::Theme = Box::leak(Box::new(theme));
            app.theme = theme;
            app.menu.theme = theme;
        }
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        app.advance_clock();

        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            // Ticks only wake the loop so advance_clock runs without input.
            AppEvent::Tick => {}
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Welcome => handle_welcome_key(app, key),
        AppScreen::Quiz => handle_quiz_key(app, key),
        AppScreen::Results => handle_results_key(app, key),
        AppScreen::Review => handle_review_key(app, key),
        AppScreen::Study => handle_study_key(app, key),
        AppScreen::Revision => handle_revision_key(app, key),
        AppScreen::Settings => handle_settings_key(app, key),
    }
}

fn handle_welcome_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('1') => app.start_quiz(Category::Antonyms),
        KeyCode::Char('2') => app.start_quiz(Category::Synonyms),
        KeyCode::Char('3') => app.go_to_study(),
        KeyCode::Char('4') => app.go_to_revision(),
        KeyCode::Char('r') => app.reshuffle_questions(),
        KeyCode::Char('c') => app.go_to_settings(),
        KeyCode::Up | KeyCode::Char('k') => app.menu.prev(),
        KeyCode::Down | KeyCode::Char('j') => app.menu.next(),
        KeyCode::Enter => match app.menu.selected {
            0 => app.start_quiz(Category::Antonyms),
            1 => app.start_quiz(Category::Synonyms),
            2 => app.go_to_study(),
            3 => app.go_to_revision(),
            4 => app.reshuffle_questions(),
            5 => app.go_to_settings(),
            _ => {}
        },
        _ => {}
    }
}

fn handle_quiz_key(app: &mut App, key: KeyEvent) {
    let answered = app
        .session
        .as_ref()
        .is_some_and(|s| s.is_answered());

    if answered {
        match key.code {
            KeyCode::Enter | KeyCode::Char('n') | KeyCode::Char(' ') => app.next_question(),
            KeyCode::Esc => app.finish_quiz(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.finish_quiz(),
        KeyCode::Char('1') => app.select_answer(0),
        KeyCode::Char('2') => app.select_answer(1),
        KeyCode::Char('3') => app.select_answer(2),
        KeyCode::Char('4') => app.select_answer(3),
        KeyCode::Char('s') => app.skip_question(),
        KeyCode::Up | KeyCode::Char('k') => app.highlight_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.highlight_next(),
        KeyCode::Enter => app.select_answer(app.highlighted_option),
        _ => {}
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('r') => app.retry_quiz(),
        KeyCode::Char('v') => {
            let has_mistakes = app
                .session
                .as_ref()
                .is_some_and(|s| !s.mistakes().is_empty());
            if has_mistakes {
                app.go_to_review();
            }
        }
        KeyCode::Char('h') | KeyCode::Esc => app.go_to_welcome(),
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

fn handle_review_key(app: &mut App, key: KeyEvent) {
    let count = app
        .session
        .as_ref()
        .map(|s| s.mistakes().len())
        .unwrap_or(0);

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.screen = AppScreen::Results,
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 {
                app.review_selected = (app.review_selected + 1).min(count - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.review_selected = app.review_selected.saturating_sub(1);
        }
        KeyCode::Char('a') | KeyCode::Enter => app.add_mistake_to_revision(),
        _ => {}
    }
}

fn handle_study_key(app: &mut App, key: KeyEvent) {
    let count = app.bank.questions(app.study_category).len();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_welcome(),
        KeyCode::Tab => app.toggle_study_category(),
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 {
                app.study_selected = (app.study_selected + 1).min(count - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.study_selected = app.study_selected.saturating_sub(1);
        }
        KeyCode::Char('a') | KeyCode::Enter => app.add_study_word_to_revision(),
        _ => {}
    }
}

fn handle_revision_key(app: &mut App, key: KeyEvent) {
    // Confirmation dialog takes priority
    if app.revision_confirm_clear {
        match key.code {
            KeyCode::Char('y') => {
                app.clear_revision();
                app.revision_confirm_clear = false;
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                app.revision_confirm_clear = false;
            }
            _ => {}
        }
        return;
    }

    let count = app.revision.entries.len();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.go_to_welcome(),
        KeyCode::Char('j') | KeyCode::Down => {
            if count > 0 {
                app.revision_selected = (app.revision_selected + 1).min(count - 1);
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.revision_selected = app.revision_selected.saturating_sub(1);
        }
        KeyCode::Char('x') | KeyCode::Delete => app.remove_revision_entry(),
        KeyCode::Char('C') => {
            if count > 0 {
                app.revision_confirm_clear = true;
            }
        }
        KeyCode::Char('e') => app.export_revision(),
        _ => {}
    }
}

fn handle_settings_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            let _ = app.config.save();
            app.go_to_welcome();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if app.settings_selected > 0 {
                app.settings_selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.settings_selected < 2 {
                app.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
            app.settings_cycle_forward();
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.settings_cycle_backward();
        }
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Welcome => render_welcome(frame, app),
        AppScreen::Quiz => render_quiz(frame, app),
        AppScreen::Results => render_results(frame, app),
        AppScreen::Review => render_review(frame, app),
        AppScreen::Study => render_study(frame, app),
        AppScreen::Revision => render_revision(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn header_line(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, info: &str) {
    let colors = &app.theme.colors;
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " lexiq ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info.to_string(),
            Style::default().fg(colors.dim()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn footer_line(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hint: &str) {
    let colors = &app.theme.colors;
    let text = match &app.status {
        Some(status) => format!("{hint}  |  {status}"),
        None => hint.to_string(),
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(footer, area);
}

fn render_welcome(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    let info = format!(
        " Difficulty: {} | {} questions | {} words to revise",
        app.config.difficulty.as_str(),
        app.config.questions_per_session,
        app.revision.entries.len(),
    );
    header_line(frame, app, layout.header, &info);

    let menu_area = ui::layout::centered_rect(50, 90, layout.main);
    frame.render_widget(&app.menu, menu_area);

    footer_line(
        frame,
        app,
        layout.footer,
        " [1-4] Select  [r] Reshuffle  [c] Settings  [q] Quit ",
    );
}

fn render_quiz(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let layout = AppLayout::new(frame.area());

    let current = session.questions_answered() + if session.is_answered() { 0 } else { 1 };
    let info = format!(
        " {} | Question {}/{} | Score {} | Streak {}",
        session.category(),
        current.max(1),
        session.question_cap(),
        session.score(),
        session.streak(),
    );
    header_line(frame, app, layout.header, &info);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(layout.main);

    let timer = TimerBar::new(
        session.time_remaining(),
        session.time_per_question(),
        app.theme,
    );
    frame.render_widget(timer, main_layout[0]);

    let card = QuestionCard {
        session,
        highlighted: app.highlighted_option,
        chosen: app.chosen_option,
        outcome: app.last_outcome.as_ref(),
        theme: app.theme,
    };
    frame.render_widget(card, main_layout[1]);

    let hint = if session.is_answered() {
        " [Enter] Next question  [ESC] Finish "
    } else {
        " [1-4] Answer  [s] Skip  [ESC] Finish "
    };
    footer_line(frame, app, layout.footer, hint);
}

fn render_results(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    if let Some(summary) = app.last_summary.as_ref() {
        let centered = ui::layout::centered_rect(60, 70, area);
        let panel = ResultsPanel::new(summary, app.theme);
        frame.render_widget(panel, centered);
    }
}

fn render_review(frame: &mut ratatui::Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let layout = AppLayout::new(frame.area());

    header_line(frame, app, layout.header, " Mistake review");

    let list = ReviewList {
        mistakes: session.mistakes(),
        selected: app.review_selected,
        theme: app.theme,
    };
    frame.render_widget(list, layout.main);

    footer_line(
        frame,
        app,
        layout.footer,
        " [j/k] Move  [a] Add to revision list  [ESC] Back ",
    );
}

fn render_study(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    header_line(frame, app, layout.header, " Study mode");

    let browser = StudyBrowser {
        category: app.study_category,
        questions: app.bank.questions(app.study_category),
        selected: app.study_selected,
        theme: app.theme,
    };
    frame.render_widget(browser, layout.main);

    footer_line(
        frame,
        app,
        layout.footer,
        " [Tab] Switch category  [j/k] Move  [a] Add to revision list  [ESC] Home ",
    );
}

fn render_revision(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());

    header_line(frame, app, layout.header, " Revision list");

    let panel = RevisionPanel {
        entries: &app.revision.entries,
        selected: app.revision_selected,
        confirm_clear: app.revision_confirm_clear,
        theme: app.theme,
    };
    frame.render_widget(panel, layout.main);

    footer_line(
        frame,
        app,
        layout.footer,
        " [j/k] Move  [x] Remove  [C] Clear  [e] Export  [ESC] Home ",
    );
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let centered = ui::layout::centered_rect(60, 80, area);

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(colors.accent()))
        .style(Style::default().bg(colors.bg()));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let fields: Vec<(String, String)> = vec![
        (
            "Difficulty".to_string(),
            format!(
                "{} ({}s per question)",
                app.config.difficulty.as_str(),
                app.config.difficulty.time_per_question()
            ),
        ),
        (
            "Questions per session".to_string(),
            format!("{}", app.config.questions_per_session),
        ),
        ("Theme".to_string(), app.config.theme.clone()),
    ];

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(fields.len() as u16 * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Use arrows to navigate, Enter/Right to change, ESC to save & exit",
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(header, layout[0]);

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            fields
                .iter()
                .map(|_| Constraint::Length(3))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    for (i, (label, value)) in fields.iter().enumerate() {
        let is_selected = i == app.settings_selected;
        let indicator = if is_selected { ">" } else { " " };

        let lines = vec![
            Line::from(Span::styled(
                format!(" {indicator} {label}"),
                Style::default()
                    .fg(if is_selected { colors.accent() } else { colors.fg() })
                    .add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
            )),
            Line::from(Span::styled(
                format!("     {value}"),
                Style::default().fg(colors.dim()),
            )),
        ];

        if i < field_layout.len() {
            frame.render_widget(Paragraph::new(lines), field_layout[i]);
        }
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  Changes apply immediately",
        Style::default().fg(colors.dim()),
    )));
    frame.render_widget(footer, layout[3]);
}
