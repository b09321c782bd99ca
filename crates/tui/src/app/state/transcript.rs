use parking_lot::Mutex;
use std::sync::Arc;

/// Where a transcript entry came from. The renderer matches on this exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Network,
    Command,
    Response,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One classified console entry. Entries never change after they are appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptMessage {
    channel: Channel,
    severity: Severity,
    text: String,
}

impl TranscriptMessage {
    pub fn new(channel: Channel, severity: Severity, text: impl Into<String>) -> Self {
        Self {
            channel,
            severity,
            text: text.into(),
        }
    }

    pub fn info(channel: Channel, text: impl Into<String>) -> Self {
        Self::new(channel, Severity::Info, text)
    }

    pub fn error(channel: Channel, text: impl Into<String>) -> Self {
        Self::new(channel, Severity::Error, text)
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only record of every command and response of the session, in display order.
///
/// `version` bumps on every append so views can cache wrapped output and notice new entries
/// without diffing the message list.
#[derive(Debug, Default)]
pub struct TranscriptLog {
    messages: Vec<TranscriptMessage>,
    version: u64,
}

impl TranscriptLog {
    pub fn append(&mut self, message: TranscriptMessage) {
        self.messages.push(message);
        self.version = self.version.wrapping_add(1);
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&TranscriptMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

pub type SharedTranscript = Arc<Mutex<TranscriptLog>>;

#[cfg(test)]
mod tests {
    use super::{Channel, Severity, TranscriptLog, TranscriptMessage};

    #[test]
    fn append_preserves_order_and_bumps_version() {
        let mut log = TranscriptLog::default();
        assert!(log.is_empty());

        log.append(TranscriptMessage::info(Channel::Network, "connected"));
        log.append(TranscriptMessage::info(Channel::Command, "USER alice"));
        log.append(TranscriptMessage::error(Channel::Response, "no such user"));

        assert_eq!(log.len(), 3);
        assert_eq!(log.version(), 3);
        let channels: Vec<Channel> = log.messages().iter().map(|m| m.channel()).collect();
        assert_eq!(
            channels,
            vec![Channel::Network, Channel::Command, Channel::Response]
        );
        let last = log.last().expect("last message");
        assert_eq!(last.severity(), Severity::Error);
        assert_eq!(last.text(), "no such user");
    }
}
