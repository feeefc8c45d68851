use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Per-question countdown bar. Shifts to the warning color under 10 seconds
/// and to the incorrect color under 5, matching the urgency cues of the
/// original quiz.
pub struct TimerBar<'a> {
    pub remaining: u32,
    pub total: u32,
    pub theme: &'a Theme,
}

impl<'a> TimerBar<'a> {
    pub fn new(remaining: u32, total: u32, theme: &'a Theme) -> Self {
        Self {
            remaining,
            total,
            theme,
        }
    }
}

impl Widget for TimerBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let fill_color = if self.remaining <= 5 {
            colors.incorrect()
        } else if self.remaining <= 10 {
            colors.warning()
        } else {
            colors.bar_filled()
        };

        let block = Block::bordered()
            .title(" Time ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let ratio = if self.total == 0 {
            0.0
        } else {
            (self.remaining as f64 / self.total as f64).clamp(0.0, 1.0)
        };
        let filled_width = (ratio * inner.width as f64) as u16;
        let label = format!("{}s", self.remaining);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(fill_color)
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}
