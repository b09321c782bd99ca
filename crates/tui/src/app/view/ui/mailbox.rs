use crate::app::state::{MailboxView, SessionState};
use crate::app::util::text::{sanitize_for_tui, split_lines, wrap_line};
use crate::app::view::theme::ui_colors;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::constants::{MAIL_ITEM_HEIGHT, MAIL_LIST_WIDTH};
use super::text::{truncate_to_width, visual_width};

const HEADER_HINTS: &str = "r refresh · x log out · F2 transcript";

fn render_header(f: &mut Frame, session: &SessionState, area: Rect) {
    let colors = ui_colors();
    let width = area.width as usize;
    let who = format!(" {}@{}", session.username(), session.server_address());
    let hints = format!("{HEADER_HINTS} ");
    let gap = width.saturating_sub(visual_width(&who) + visual_width(&hints));
    let line = if gap == 0 {
        Line::from(truncate_to_width(&who, width))
    } else {
        Line::from(vec![
            Span::styled(who, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" ".repeat(gap)),
            Span::raw(hints),
        ])
    };
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(colors.header_bg)),
        area,
    );
}

/// Index of the first listing drawn so that the selection stays on screen.
fn first_visible(selected: usize, rows: usize) -> usize {
    let per_page = (rows / MAIL_ITEM_HEIGHT as usize).max(1);
    selected.saturating_sub(per_page - 1)
}

fn render_list(f: &mut Frame, view: &MailboxView, fetching: bool, area: Rect) {
    let colors = ui_colors();
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(colors.divider_fg));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let muted = Style::default().fg(colors.muted_fg);
    if view.listings.is_empty() {
        let text = if fetching { "Loading…" } else { "No mail" };
        f.render_widget(Paragraph::new(Span::styled(text, muted)), inner);
        return;
    }

    let width = inner.width as usize;
    let start = first_visible(view.selected, inner.height as usize);
    let mut lines = Vec::new();
    for (offset, listing) in view.listings.iter().enumerate().skip(start) {
        let selected = offset == view.selected;
        let base = if selected {
            Style::default().bg(colors.selection_bg)
        } else {
            Style::default()
        };
        let mut title = format!(" Mail #{}", listing.index);
        if view.pending_fetch == Some(listing.index) {
            title.push_str(" …");
        }
        let size = format!(" {} bytes", listing.size_bytes);
        let pad = |text: String| {
            let text = truncate_to_width(&text, width);
            let fill = width.saturating_sub(visual_width(&text));
            format!("{text}{}", " ".repeat(fill))
        };
        lines.push(Line::from(Span::styled(
            pad(title),
            base.add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(pad(size), base.fg(colors.muted_fg))));
    }
    if fetching {
        lines.push(Line::from(Span::styled(" Refreshing…", muted)));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

fn tab_strip(view: &MailboxView) -> Line<'static> {
    let colors = ui_colors();
    let mut spans = Vec::new();
    for (index, tab) in view.tabs.iter().enumerate() {
        let style = if index == view.tab {
            Style::default()
                .fg(colors.focus_fg)
                .bg(colors.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.muted_fg)
        };
        spans.push(Span::styled(format!(" {} ", tab.label), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn render_mail(f: &mut Frame, view: &mut MailboxView, area: Rect) {
    let colors = ui_colors();
    let inner = Rect::new(
        area.x + 1,
        area.y,
        area.width.saturating_sub(1),
        area.height,
    );
    let muted = Style::default().fg(colors.muted_fg);

    let Some(mail) = view.mail.as_ref() else {
        let text = match view.pending_fetch {
            Some(index) => format!("Fetching mail #{index}…"),
            None => "Select a mail and press Enter".to_string(),
        };
        f.render_widget(Paragraph::new(Span::styled(text, muted)), inner);
        return;
    };

    let label = Style::default().fg(colors.muted_fg);
    let mut lines = Vec::new();
    for (name, value) in [
        ("Subject", &mail.subject),
        ("From", &mail.from),
        ("To", &mail.to),
        ("Date", &mail.time),
    ] {
        lines.push(Line::from(vec![
            Span::styled(format!("{name:<8}"), label),
            Span::raw(sanitize_for_tui(value)),
        ]));
    }
    lines.push(tab_strip(view));
    lines.push(Line::default());

    let width = inner.width as usize;
    let body_rows: Vec<String> = view
        .tab_body()
        .map(|body| {
            split_lines(&body)
                .into_iter()
                .flat_map(|line| wrap_line(&sanitize_for_tui(line), width))
                .collect()
        })
        .unwrap_or_default();
    let body_height = (inner.height as usize).saturating_sub(lines.len());
    let max_scroll = body_rows.len().saturating_sub(body_height);
    view.scroll = view.scroll.min(max_scroll.min(u16::MAX as usize) as u16);

    lines.extend(
        body_rows
            .into_iter()
            .skip(view.scroll as usize)
            .take(body_height)
            .map(Line::from),
    );
    f.render_widget(Paragraph::new(lines), inner);
}

pub(super) fn render_mailbox(
    f: &mut Frame,
    session: &SessionState,
    view: &mut MailboxView,
    fetching: bool,
    area: Rect,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    render_header(f, session, Rect::new(area.x, area.y, area.width, 1));
    let rest = Rect::new(
        area.x,
        area.y + 1,
        area.width,
        area.height.saturating_sub(1),
    );
    let list_width = MAIL_LIST_WIDTH.min(rest.width / 2);
    render_list(
        f,
        view,
        fetching,
        Rect::new(rest.x, rest.y, list_width, rest.height),
    );
    render_mail(
        f,
        view,
        Rect::new(
            rest.x + list_width,
            rest.y,
            rest.width - list_width,
            rest.height,
        ),
    );
}
