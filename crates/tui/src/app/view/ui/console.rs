use crate::app::view::theme::ui_colors;
use crate::app::AppState;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::layout::toggle_label;
use super::transcript::{cached_wrap_transcript, log_lines_to_lines};

pub(super) fn render_divider(f: &mut Frame, app: &AppState) {
    let colors = ui_colors();
    let layout = app.layout;
    if layout.toggle_label.width > 0 {
        let label = Paragraph::new(Line::from(Span::styled(
            toggle_label(app.console.is_collapsed()),
            Style::default()
                .fg(colors.divider_active_fg)
                .bg(colors.console_bg)
                .add_modifier(Modifier::BOLD),
        )));
        f.render_widget(label, layout.toggle_label);
    }
    if layout.resize_bar.width > 0 {
        let bar_style = if app.console.is_dragging() {
            Style::default().fg(colors.divider_active_fg)
        } else {
            Style::default().fg(colors.divider_fg)
        };
        let glyph = if app.console.is_collapsed() { "─" } else { "━" };
        let bar = glyph.repeat(layout.resize_bar.width as usize);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(bar, bar_style))),
            layout.resize_bar,
        );
    }
}

/// Draws the newest transcript rows that fit, offset by the panel's scroll position.
pub(super) fn render_console(f: &mut Frame, app: &mut AppState, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let padding = app.console.padding().min(area.width / 2);
    let inner = Rect::new(
        area.x + padding,
        area.y,
        area.width - padding * 2,
        area.height,
    );
    let viewport = inner.height as usize;

    let total = cached_wrap_transcript(app, inner.width as usize).len();
    app.console.clamp_scroll(total.saturating_sub(viewport));
    let end = total.saturating_sub(app.console.scroll_from_bottom());
    let start = end.saturating_sub(viewport);
    let wrapped = cached_wrap_transcript(app, inner.width as usize);
    let lines = log_lines_to_lines(&wrapped[start..end]);

    let background = Style::default().bg(ui_colors().console_bg);
    f.render_widget(Paragraph::new("").style(background), area);
    f.render_widget(Paragraph::new(lines).style(background), inner);
}
