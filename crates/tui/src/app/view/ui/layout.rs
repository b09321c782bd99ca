use crate::app::state::ConsolePanel;
use crate::app::ScreenLayout;
use ratatui::layout::Rect;

use super::constants::{DIVIDER_HEIGHT, MIN_BODY_HEIGHT};
use super::text::visual_width;

pub(super) fn toggle_label(collapsed: bool) -> String {
    let arrow = if collapsed { '▲' } else { '▼' };
    format!(" Transcript {arrow} ")
}

/// Splits the frame into the screen body, the console divider and the console itself. The
/// console gets at most what is left after the divider and a minimal body; its stored height
/// is left alone so a terminal that shrinks for a moment does not lose it.
pub(super) fn split_screen(area: Rect, console: &ConsolePanel) -> ScreenLayout {
    if area.height == 0 || area.width == 0 {
        return ScreenLayout::default();
    }
    let max_console = area
        .height
        .saturating_sub(DIVIDER_HEIGHT + MIN_BODY_HEIGHT);
    let console_height = console.rendered_height().min(max_console);
    let divider_height = DIVIDER_HEIGHT.min(area.height);
    let body_height = area
        .height
        .saturating_sub(divider_height)
        .saturating_sub(console_height);

    let body = Rect::new(area.x, area.y, area.width, body_height);
    let divider_y = area.y + body_height;
    let label_width = (visual_width(&toggle_label(console.is_collapsed())) as u16).min(area.width);
    let toggle_label = Rect::new(area.x, divider_y, label_width, divider_height);
    let resize_bar = Rect::new(
        area.x + label_width,
        divider_y,
        area.width - label_width,
        divider_height,
    );
    let console_area = Rect::new(
        area.x,
        divider_y + divider_height,
        area.width,
        console_height,
    );

    ScreenLayout {
        body,
        toggle_label,
        resize_bar,
        console: console_area,
    }
}
