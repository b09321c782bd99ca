use crate::app::util::text::sanitize_for_tui;

/// Visual role of a rendered transcript fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogKind {
    NetworkInfo,
    NetworkError,
    CommandPrefix,
    ResponsePrefix,
    OkMarker,
    ErrMarker,
    Body,
}

#[derive(Clone, Debug)]
pub struct LogSpan {
    pub kind: LogKind,
    pub text: String,
}

impl LogSpan {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        let raw = text.into();
        Self {
            kind,
            text: sanitize_for_tui(&raw),
        }
    }
}

/// One physical console row, possibly made of several styled spans.
#[derive(Clone, Debug)]
pub struct LogLine {
    pub spans: Vec<LogSpan>,
}

impl LogLine {
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            spans: vec![LogSpan::new(kind, text)],
        }
    }

    pub fn new_with_spans(spans: Vec<LogSpan>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[LogSpan] {
        &self.spans
    }

    pub fn kind(&self) -> LogKind {
        self.spans
            .first()
            .map(|span| span.kind)
            .unwrap_or(LogKind::Body)
    }

    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}
