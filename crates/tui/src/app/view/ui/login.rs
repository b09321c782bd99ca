use crate::app::runtime::LoginField;
use crate::app::state::{InputState, LoginFocus, LoginForm};
use crate::app::view::theme::ui_colors;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::constants::LOGIN_FORM_WIDTH;
use super::text::scroll_to_cursor;

const FIELDS: [(LoginField, &str); 3] = [
    (LoginField::Address, "Server address"),
    (LoginField::Username, "Username"),
    (LoginField::Password, "Password"),
];
const FORM_HEIGHT: u16 = 14;
const INPUT_PREFIX: &str = "› ";

pub(super) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn field_lines(
    form: &LoginForm,
    field: LoginField,
    label: &str,
    width: usize,
) -> ([Line<'static>; 3], Option<usize>) {
    let colors = ui_colors();
    let focused = form.focus == LoginFocus::from(field) && !form.submitting;
    let label_style = if focused {
        Style::default()
            .fg(colors.focus_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors.muted_fg)
    };

    let masked;
    let input: &InputState = if field == LoginField::Password {
        masked = form.password.masked_clone('*');
        &masked
    } else {
        form.input(field)
    };
    let available = width.saturating_sub(INPUT_PREFIX.chars().count());
    let (visible, cursor_col) = scroll_to_cursor(&input.buffer, input.cursor, available);

    let error = form
        .error(field)
        .map(|message| {
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(colors.field_error_fg),
            ))
        })
        .unwrap_or_default();

    let lines = [
        Line::from(Span::styled(label.to_string(), label_style)),
        Line::from(vec![
            Span::styled(INPUT_PREFIX, label_style),
            Span::raw(visible),
        ]),
        error,
    ];
    let cursor = focused.then_some(INPUT_PREFIX.chars().count() + cursor_col);
    (lines, cursor)
}

pub(super) fn render_login(f: &mut Frame, form: &LoginForm, area: Rect) {
    if area.width < 4 || area.height < 3 {
        return;
    }
    let colors = ui_colors();
    let outer = centered(area, LOGIN_FORM_WIDTH, FORM_HEIGHT);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" POP3 login ")
        .border_style(Style::default().fg(colors.divider_fg));
    let inner = block.inner(outer);
    f.render_widget(block, outer);

    let mut lines = Vec::with_capacity(12);
    let mut cursor = None;
    for (field, label) in FIELDS {
        let row = lines.len();
        let (field_rows, field_cursor) = field_lines(form, field, label, inner.width as usize);
        if let Some(col) = field_cursor {
            cursor = Some((col, row + 1));
        }
        lines.extend(field_rows);
    }

    let toggle_style = if form.focus == LoginFocus::Tls {
        Style::default()
            .fg(colors.focus_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let check = if form.use_tls { "[x]" } else { "[ ]" };
    lines.push(Line::from(Span::styled(
        format!("{check} Use TLS"),
        toggle_style,
    )));
    lines.push(Line::default());

    let submit = if form.submitting {
        Line::from(Span::styled(
            "Logging in…",
            Style::default().fg(colors.muted_fg),
        ))
    } else {
        let mut style = Style::default().add_modifier(Modifier::BOLD);
        if form.focus == LoginFocus::Submit {
            style = style.bg(colors.selection_bg).fg(colors.focus_fg);
        }
        Line::from(Span::styled("[ Log in ]", style))
    };
    lines.push(submit);

    f.render_widget(Paragraph::new(lines), inner);

    if let Some((col, row)) = cursor {
        let x = inner.x + (col as u16).min(inner.width.saturating_sub(1));
        let y = inner.y + row as u16;
        if y < inner.y + inner.height {
            f.set_cursor_position((x, y));
        }
    }
}
