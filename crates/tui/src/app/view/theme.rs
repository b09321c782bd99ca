use crate::app::state::NotificationSeverity;
use ratatui::style::Color;

#[derive(Clone, Copy)]
pub(crate) struct UiColors {
    pub(crate) network_error_fg: Color,
    pub(crate) network_info_fg: Color,
    pub(crate) command_prefix_fg: Color,
    pub(crate) response_prefix_fg: Color,
    pub(crate) err_marker_fg: Color,
    pub(crate) ok_marker_fg: Color,
    pub(crate) console_bg: Color,
    pub(crate) divider_fg: Color,
    pub(crate) divider_active_fg: Color,
    pub(crate) header_bg: Color,
    pub(crate) selection_bg: Color,
    pub(crate) focus_fg: Color,
    pub(crate) muted_fg: Color,
    pub(crate) field_error_fg: Color,
    pub(crate) notice_info: Color,
    pub(crate) notice_warning: Color,
    pub(crate) notice_error: Color,
    pub(crate) notice_success: Color,
}

const DEFAULT_UI: UiColors = UiColors {
    network_error_fg: Color::Rgb(255, 149, 158),
    network_info_fg: Color::Rgb(160, 160, 160),
    command_prefix_fg: Color::Rgb(229, 192, 123),
    response_prefix_fg: Color::Rgb(88, 175, 239),
    err_marker_fg: Color::Rgb(255, 97, 110),
    ok_marker_fg: Color::Rgb(165, 224, 117),
    console_bg: Color::Rgb(30, 30, 30),
    divider_fg: Color::Rgb(90, 90, 90),
    divider_active_fg: Color::Rgb(204, 204, 204),
    header_bg: Color::Rgb(25, 118, 210),
    selection_bg: Color::Rgb(50, 60, 80),
    focus_fg: Color::Rgb(124, 193, 255),
    muted_fg: Color::Rgb(130, 130, 130),
    field_error_fg: Color::Rgb(255, 97, 110),
    notice_info: Color::Rgb(88, 175, 239),
    notice_warning: Color::Rgb(229, 192, 123),
    notice_error: Color::Rgb(255, 97, 110),
    notice_success: Color::Rgb(165, 224, 117),
};

pub(crate) fn ui_colors() -> UiColors {
    DEFAULT_UI
}

impl UiColors {
    pub(crate) fn notice(&self, severity: NotificationSeverity) -> Color {
        match severity {
            NotificationSeverity::Info => self.notice_info,
            NotificationSeverity::Warning => self.notice_warning,
            NotificationSeverity::Error => self.notice_error,
            NotificationSeverity::Success => self.notice_success,
        }
    }
}
