use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(6000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationSeverity {
    Info,
    Warning,
    Error,
    Success,
}

/// Single-slot alert. A new notification replaces whatever is showing.
#[derive(Debug)]
pub struct NotificationSlot {
    visible: bool,
    text: String,
    severity: NotificationSeverity,
    shown_at: Option<Instant>,
    timeout: Duration,
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self {
            visible: false,
            text: String::new(),
            severity: NotificationSeverity::Info,
            shown_at: None,
            timeout: NOTIFICATION_TIMEOUT,
        }
    }
}

impl NotificationSlot {
    pub fn show(&mut self, text: impl Into<String>, severity: NotificationSeverity, now: Instant) {
        self.text = text.into();
        self.severity = severity;
        self.visible = true;
        self.shown_at = Some(now);
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.shown_at = None;
    }

    /// Hides the notification once it has been visible for the timeout. Returns true when
    /// this call dismissed it.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(shown_at) = self.shown_at else {
            return false;
        };
        if self.visible && now.saturating_duration_since(shown_at) >= self.timeout {
            self.close();
            return true;
        }
        false
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn severity(&self) -> NotificationSeverity {
        self.severity
    }
}

pub type SharedNotification = Arc<Mutex<NotificationSlot>>;
