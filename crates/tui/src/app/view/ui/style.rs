use crate::app::state::{LogKind, LogSpan};
use crate::app::view::theme::ui_colors;
use ratatui::style::{Modifier, Style};

pub(super) fn style_for(span: &LogSpan) -> Style {
    style_for_kind(span.kind)
}

fn style_for_kind(kind: LogKind) -> Style {
    let colors = ui_colors();
    match kind {
        LogKind::NetworkError => Style::default()
            .fg(colors.network_error_fg)
            .add_modifier(Modifier::BOLD),
        LogKind::NetworkInfo => Style::default()
            .fg(colors.network_info_fg)
            .add_modifier(Modifier::BOLD),
        LogKind::CommandPrefix => Style::default().fg(colors.command_prefix_fg),
        LogKind::ResponsePrefix => Style::default().fg(colors.response_prefix_fg),
        LogKind::ErrMarker => Style::default()
            .fg(colors.err_marker_fg)
            .add_modifier(Modifier::BOLD),
        LogKind::OkMarker => Style::default()
            .fg(colors.ok_marker_fg)
            .add_modifier(Modifier::BOLD),
        LogKind::Body => Style::default(),
    }
}
