use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::store::schema::RevisionEntry;
use crate::ui::theme::Theme;

pub struct RevisionPanel<'a> {
    pub entries: &'a [RevisionEntry],
    pub selected: usize,
    pub confirm_clear: bool,
    pub theme: &'a Theme,
}

impl Widget for RevisionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Revision List ({} words) ", self.entries.len()))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.confirm_clear {
            let prompt = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Clear the entire revision list?",
                    Style::default()
                        .fg(colors.warning())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "  [y] Yes  [n] No",
                    Style::default().fg(colors.fg()),
                )),
            ]);
            prompt.render(inner, buf);
            return;
        }

        if self.entries.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  No words saved yet.",
                    Style::default().fg(colors.dim()),
                )),
                Line::from(Span::styled(
                    "  Add words from study mode or the mistake review screen.",
                    Style::default().fg(colors.dim()),
                )),
            ]);
            empty.render(inner, buf);
            return;
        }

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

        for (row, (i, entry)) in self
            .entries
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!(" {indicator} {}", entry.word),
                        Style::default()
                            .fg(if is_selected { colors.accent() } else { colors.fg() })
                            .add_modifier(if is_selected {
                                Modifier::BOLD
                            } else {
                                Modifier::empty()
                            }),
                    ),
                    Span::styled(
                        format!("  [{}]", entry.category),
                        Style::default().fg(colors.dim()),
                    ),
                    Span::styled(
                        format!("  added {}", entry.added_at.format("%Y-%m-%d")),
                        Style::default().fg(colors.dim()),
                    ),
                ]),
                Line::from(vec![
                    Span::styled(
                        format!("     {}", entry.meaning),
                        Style::default().fg(colors.dim()),
                    ),
                    Span::styled(
                        format!("  -> {}", entry.correct_answer),
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
