use crate::app::state::NotificationSlot;
use crate::app::util::text::wrap_line;
use crate::app::view::theme::ui_colors;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::constants::NOTIFICATION_WIDTH;

/// Toast in the top-right corner of `area`, drawn over whatever is below it.
pub(super) fn render_notification(f: &mut Frame, slot: &NotificationSlot, area: Rect) {
    if !slot.is_visible() || area.width < 4 || area.height < 3 {
        return;
    }
    let width = NOTIFICATION_WIDTH.min(area.width);
    let text_width = width.saturating_sub(2) as usize;
    let lines: Vec<Line> = wrap_line(slot.text(), text_width)
        .into_iter()
        .map(Line::from)
        .collect();
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = Rect::new(area.x + area.width - width, area.y, width, height);

    let color = ui_colors().notice(slot.severity());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(" Esc ");
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}
