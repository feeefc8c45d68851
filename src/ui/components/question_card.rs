use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::quiz::{AnswerOutcome, QuizSession};
use crate::ui::theme::Theme;

/// The quiz question with its options. Before an answer, the highlighted
/// option follows the cursor; afterwards the correct option is marked and,
/// on a miss, the chosen one as well, with meaning and explanation below.
pub struct QuestionCard<'a> {
    pub session: &'a QuizSession,
    pub highlighted: usize,
    pub chosen: Option<usize>,
    pub outcome: Option<&'a AnswerOutcome>,
    pub theme: &'a Theme,
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let Some(question) = self.session.current_question() else {
            return;
        };

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let option_rows = question.options.len() as u16;
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(option_rows),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let prompt = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(" {}", question.prompt(self.session.category())),
                Style::default()
                    .fg(colors.fg())
                    .add_modifier(Modifier::BOLD),
            )),
        ]);
        prompt.render(layout[0], buf);

        let answered = self.session.is_answered();
        let mut option_lines: Vec<Line> = Vec::with_capacity(question.options.len());
        for (i, option) in question.options.iter().enumerate() {
            let marker = if !answered && i == self.highlighted {
                ">"
            } else {
                " "
            };
            let style = if answered {
                if i == question.correct {
                    Style::default()
                        .fg(colors.correct())
                        .add_modifier(Modifier::BOLD)
                } else if Some(i) == self.chosen {
                    Style::default()
                        .fg(colors.incorrect())
                        .add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(colors.dim())
                }
            } else if i == self.highlighted {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            option_lines.push(Line::from(Span::styled(
                format!(" {marker} [{}] {option}", i + 1),
                style,
            )));
        }
        Paragraph::new(option_lines).render(layout[1], buf);

        if answered {
            let mut detail: Vec<Line> = vec![Line::from(Span::styled(
                format!(" \"{}\" means: {}", question.word, question.meaning),
                Style::default().fg(colors.fg()),
            ))];
            if let Some(outcome) = self.outcome {
                let verdict = if outcome.correct {
                    Span::styled(
                        " Correct!",
                        Style::default()
                            .fg(colors.correct())
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(
                        format!(" The answer was \"{}\"", outcome.correct_answer),
                        Style::default()
                            .fg(colors.incorrect())
                            .add_modifier(Modifier::BOLD),
                    )
                };
                detail.push(Line::from(verdict));
                detail.push(Line::from(Span::styled(
                    format!(" {}", outcome.explanation),
                    Style::default().fg(colors.dim()),
                )));
            }
            Paragraph::new(detail)
                .wrap(Wrap { trim: false })
                .render(layout[3], buf);
        }
    }
}
