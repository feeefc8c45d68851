use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::quiz::MistakeRecord;
use crate::ui::theme::Theme;

/// Mistake review: every miss (wrong answer, skip, timeout) with the given
/// and correct answers. The selected row can be added to the revision list.
pub struct ReviewList<'a> {
    pub mistakes: &'a [MistakeRecord],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl Widget for ReviewList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Review ({} to go over) ", self.mistakes.len()))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.mistakes.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "  Nothing to review - perfect run!",
                Style::default().fg(colors.correct()),
            )));
            empty.render(inner, buf);
            return;
        }

        // 4 rows per record; keep the selected one in view.
        let rows_per_item: u16 = 4;
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

        for (row, (i, mistake)) in self
            .mistakes
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let header_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            let lines = vec![
                Line::from(Span::styled(
                    format!(
                        " {indicator} Question {}: {} of \"{}\"",
                        i + 1,
                        mistake.category.singular(),
                        mistake.word
                    ),
                    header_style,
                )),
                Line::from(Span::styled(
                    format!("     Meaning: {}", mistake.meaning),
                    Style::default().fg(colors.dim()),
                )),
                Line::from(vec![
                    Span::styled(
                        format!("     Your answer: {}", mistake.your_answer),
                        Style::default().fg(colors.incorrect()),
                    ),
                    Span::styled(
                        format!("   Correct: {}", mistake.correct_answer),
                        Style::default().fg(colors.correct()),
                    ),
                ]),
            ];

            if row < item_layout.len() {
                Paragraph::new(lines).render(item_layout[row], buf);
            }
        }
    }
}
