use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::dataset::{Category, Question, explain};
use crate::ui::theme::Theme;

/// Study mode: every word of a category with its meaning and correct answer.
/// For antonyms the answer's own definition is shown when the shared lookup
/// table has one.
pub struct StudyBrowser<'a> {
    pub category: Category,
    pub questions: &'a [Question],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl Widget for StudyBrowser<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(
                " Study: {} ({} words) ",
                self.category,
                self.questions.len()
            ))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows_per_item: u16 = 3;
        let visible = (inner.height / rows_per_item).max(1) as usize;
        let first = self.selected.saturating_sub(visible.saturating_sub(1));

        let item_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                (0..visible)
                    .map(|_| Constraint::Length(rows_per_item))
                    .collect::<Vec<_>>(),
            )
            .split(inner);

        for (row, (i, question)) in self
            .questions
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };
            let answer = question.correct_answer();

            let answer_note = match self.category {
                Category::Antonyms => explain::antonym_meaning(answer)
                    .map(|m| format!(" ({m})"))
                    .unwrap_or_default(),
                Category::Synonyms => String::new(),
            };

            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!(" {indicator} {}", question.word),
                        Style::default()
                            .fg(if is_selected { colors.accent() } else { colors.fg() })
                            .add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ),
                    Span::styled(
                        format!("  -> {answer}{answer_note}"),
                        Style::default().fg(colors.correct()),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("     {}", question.meaning),
                    Style::default().fg(colors.dim()),
                )),
            ];

            if row < item_layout.len() {
                Paragraph::new(lines).render(item_layout[row], buf);
            }
        }
    }
}
