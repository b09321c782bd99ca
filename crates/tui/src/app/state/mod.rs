pub(crate) mod console;
pub(crate) mod input;
pub(crate) mod log;
pub(crate) mod login;
pub(crate) mod mailbox;
pub(crate) mod notification;
pub(crate) mod render;
pub(crate) mod session;
pub(crate) mod transcript;

pub(crate) use console::ConsolePanel;
pub(crate) use input::InputState;
pub(crate) use log::{LogKind, LogLine, LogSpan};
pub(crate) use login::{LoginFocus, LoginForm};
pub(crate) use mailbox::MailboxView;
pub(crate) use notification::{NotificationSeverity, NotificationSlot, SharedNotification};
pub(crate) use render::WrappedLogCache;
pub(crate) use session::{ActivityFlag, SessionState, SharedSession};
pub(crate) use transcript::{Channel, Severity, SharedTranscript, TranscriptMessage};
