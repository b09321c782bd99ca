use crate::app::AppState;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::Instant;

pub(super) const SCROLL_STEP: usize = 3;

fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Divider clicks, resize drags and wheel scrolling. Returns true when a redraw is needed.
pub(super) fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent, now: Instant) -> bool {
    let layout = app.layout;
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if hit(layout.toggle_label, column, row) => {
            app.console.toggle();
            true
        }
        MouseEventKind::Down(MouseButton::Left) if hit(layout.resize_bar, column, row) => {
            app.console.settle_height(layout.console.height);
            app.console.begin_drag(row)
        }
        MouseEventKind::Drag(MouseButton::Left) => app.console.drag_to(row, now),
        MouseEventKind::Up(MouseButton::Left) => {
            let dragging = app.console.is_dragging();
            app.console.end_drag(now) || dragging
        }
        MouseEventKind::ScrollUp if hit(layout.console, column, row) => {
            app.console.scroll_up(SCROLL_STEP);
            true
        }
        MouseEventKind::ScrollDown if hit(layout.console, column, row) => {
            app.console.scroll_down(SCROLL_STEP);
            true
        }
        MouseEventKind::ScrollUp if hit(layout.body, column, row) => {
            app.mailbox.scroll_up(SCROLL_STEP as u16);
            true
        }
        MouseEventKind::ScrollDown if hit(layout.body, column, row) => {
            app.mailbox.scroll_down(SCROLL_STEP as u16);
            true
        }
        _ => false,
    }
}
