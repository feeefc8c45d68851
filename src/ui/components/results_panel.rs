use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::session::summary::SessionSummary;
use crate::ui::theme::Theme;

pub struct ResultsPanel<'a> {
    pub summary: &'a SessionSummary,
    pub theme: &'a Theme,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(summary: &'a SessionSummary, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for ResultsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let summary = self.summary;

        let block = Block::bordered()
            .title(" Quiz Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(2),
            ])
            .split(inner);

        let title = Paragraph::new(Line::from(Span::styled(
            format!("{} results", summary.category),
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        title.render(layout[0], buf);

        let score_line = Line::from(vec![
            Span::styled("  Score:       ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}/{}", summary.score, summary.questions_answered),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}%)", summary.percentage),
                Style::default().fg(colors.dim()),
            ),
        ]);
        Paragraph::new(score_line).render(layout[1], buf);

        let streak_line = Line::from(vec![
            Span::styled("  Best streak: ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}", summary.best_streak),
                Style::default().fg(colors.warning()),
            ),
        ]);
        Paragraph::new(streak_line).render(layout[2], buf);

        let skipped_line = Line::from(vec![
            Span::styled("  Skipped:     ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}", summary.skipped),
                Style::default().fg(colors.dim()),
            ),
        ]);
        Paragraph::new(skipped_line).render(layout[3], buf);

        let mistakes_line = Line::from(vec![
            Span::styled("  To review:   ", Style::default().fg(colors.fg())),
            Span::styled(
                format!("{}", summary.mistake_count),
                Style::default().fg(if summary.mistake_count > 0 {
                    colors.incorrect()
                } else {
                    colors.correct()
                }),
            ),
        ]);
        Paragraph::new(mistakes_line).render(layout[4], buf);

        let message = Paragraph::new(Line::from(Span::styled(
            summary.message(),
            Style::default().fg(colors.fg()),
        )))
        .alignment(Alignment::Center);
        message.render(layout[5], buf);

        let hint = if summary.mistake_count > 0 {
            "  [r] Retry  [v] Review mistakes  [h] Home  [q] Quit"
        } else {
            "  [r] Retry  [h] Home  [q] Quit"
        };
        let footer = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(colors.dim()),
        )));
        footer.render(layout[6], buf);
    }
}
