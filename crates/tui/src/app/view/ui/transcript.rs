use crate::app::state::{
    Channel, LogKind, LogLine, LogSpan, Severity, TranscriptMessage, WrappedLogCache,
};
use crate::app::util::text::{char_width, split_lines};
use crate::app::AppState;
use ratatui::text::{Line, Span};

use super::style::style_for;

/// Continuation rows of prefixed entries line up under the text after "C: " / "S: ".
const HANGING_INDENT: &str = "   ";

fn take_spans_until_width(spans: &[LogSpan], width: usize) -> (Vec<LogSpan>, usize) {
    let mut taken = Vec::new();
    let mut consumed = 0usize;
    let mut consumed_width = 0usize;

    for span in spans {
        if consumed_width >= width {
            break;
        }
        let mut part = String::new();
        let mut part_width = 0usize;

        for ch in span.text.chars() {
            let ch_width = char_width(ch);
            if consumed_width + part_width + ch_width > width {
                break;
            }
            part.push(ch);
            part_width += ch_width;
        }

        if part.is_empty() {
            if span.text.is_empty() {
                continue;
            }
            break;
        }

        let taken_chars = part.chars().count();
        let span_chars = span.text.chars().count();
        consumed += taken_chars;
        consumed_width += part_width;

        let mut next = span.clone();
        next.text = part;
        taken.push(next);

        if taken_chars < span_chars {
            break;
        }
    }

    (taken, consumed)
}

fn trim_spans_front(spans: &[LogSpan], chars_to_trim: usize) -> Vec<LogSpan> {
    if chars_to_trim == 0 {
        return spans.to_vec();
    }

    let mut remaining_trim = chars_to_trim;
    let mut out = Vec::new();

    for span in spans {
        if remaining_trim == 0 {
            out.push(span.clone());
            continue;
        }

        let span_chars = span.text.chars().count();
        if remaining_trim >= span_chars {
            remaining_trim -= span_chars;
            continue;
        }

        let tail: String = span.text.chars().skip(remaining_trim).collect();
        remaining_trim = 0;
        let mut next = span.clone();
        next.text = tail;
        out.push(next);
    }

    out
}

/// Leading spans of the first row and the style of the text that follows them.
fn message_head(message: &TranscriptMessage) -> (Vec<LogSpan>, LogKind) {
    match (message.channel(), message.severity()) {
        (Channel::Network, Severity::Error) => (Vec::new(), LogKind::NetworkError),
        (Channel::Network, Severity::Info | Severity::Warning) => {
            (Vec::new(), LogKind::NetworkInfo)
        }
        (Channel::Command, _) => (
            vec![LogSpan::new(LogKind::CommandPrefix, "C: ")],
            LogKind::Body,
        ),
        (Channel::Response, Severity::Error) => (
            vec![
                LogSpan::new(LogKind::ResponsePrefix, "S: "),
                LogSpan::new(LogKind::ErrMarker, "+ERR "),
            ],
            LogKind::Body,
        ),
        (Channel::Response, Severity::Info | Severity::Warning) => (
            vec![
                LogSpan::new(LogKind::ResponsePrefix, "S: "),
                LogSpan::new(LogKind::OkMarker, "+OK "),
            ],
            LogKind::Body,
        ),
        (Channel::Other, _) => (Vec::new(), LogKind::Body),
    }
}

/// First visible character as a span of its own, for rows too narrow to hold it.
fn take_first_char(spans: &[LogSpan]) -> (Vec<LogSpan>, usize) {
    spans
        .iter()
        .find_map(|span| {
            let ch = span.text.chars().next()?;
            let mut next = span.clone();
            next.text = ch.to_string();
            Some((vec![next], 1))
        })
        .unwrap_or_default()
}

fn push_wrapped(spans: Vec<LogSpan>, width: usize, indent: bool, out: &mut Vec<LogLine>) {
    // No hanging indent when it would leave no room for text.
    let indent = indent && width > HANGING_INDENT.len();
    let indent_width = if indent { HANGING_INDENT.len() } else { 0 };
    let mut remaining = spans;
    let mut first = true;
    let mut pushed = false;

    while remaining.iter().any(|span| !span.text.is_empty()) {
        let available = if first {
            width
        } else {
            width - indent_width
        };
        let (mut chunk, mut consumed_chars) = take_spans_until_width(&remaining, available);
        if chunk.is_empty() {
            // A wide character on a row narrower than it still gets a row.
            (chunk, consumed_chars) = take_first_char(&remaining);
        }
        let mut row = Vec::with_capacity(chunk.len() + 1);
        if !first && indent {
            row.push(LogSpan::new(LogKind::Body, HANGING_INDENT));
        }
        row.extend(chunk);
        out.push(LogLine::new_with_spans(row));
        pushed = true;
        remaining = trim_spans_front(&remaining, consumed_chars);
        first = false;
    }

    if !pushed {
        out.push(LogLine::new(LogKind::Body, ""));
    }
}

/// Renders one transcript entry into console rows no wider than `width`.
pub(super) fn wrap_message(message: &TranscriptMessage, width: usize) -> Vec<LogLine> {
    let (head, body_kind) = message_head(message);
    let indent = !head.is_empty() && width > HANGING_INDENT.len();
    let mut out = Vec::new();

    for (index, text) in split_lines(message.text()).into_iter().enumerate() {
        let mut spans = if index == 0 {
            head.clone()
        } else if indent {
            vec![LogSpan::new(LogKind::Body, HANGING_INDENT)]
        } else {
            Vec::new()
        };
        spans.push(LogSpan::new(body_kind, text));
        push_wrapped(spans, width, indent, &mut out);
    }
    out
}

pub(super) fn cached_wrap_transcript(app: &mut AppState, width: usize) -> &[LogLine] {
    if width == 0 {
        return &[];
    }
    let transcript = app.transcript.lock();
    let version = transcript.version();
    let cache_hit = matches!(
        app.wrapped_log_cache.as_ref(),
        Some(cache) if cache.is_valid_for(width, version)
    );
    if !cache_hit {
        let wrapped = transcript
            .messages()
            .iter()
            .flat_map(|message| wrap_message(message, width))
            .collect();
        app.wrapped_log_cache = Some(WrappedLogCache {
            width,
            log_version: version,
            wrapped,
        });
    }
    drop(transcript);
    app.wrapped_log_cache
        .as_ref()
        .map(|cache| cache.wrapped.as_slice())
        .unwrap_or(&[])
}

pub(super) fn log_lines_to_lines(lines: &[LogLine]) -> Vec<Line<'static>> {
    lines
        .iter()
        .map(|line| {
            let styled = line
                .spans()
                .iter()
                .map(|span| Span::styled(span.text.clone(), style_for(span)))
                .collect::<Vec<_>>();
            Line::from(styled)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{log_lines_to_lines, wrap_message};
    use crate::app::view::ui::text::visual_width;
    use crate::app::state::{Channel, LogKind, Severity, TranscriptMessage};
    use ratatui::style::Modifier;

    #[test]
    fn response_error_gets_prefix_and_bold_err_marker() {
        let message = TranscriptMessage::error(Channel::Response, "mailbox locked");
        let lines = log_lines_to_lines(&wrap_message(&message, 80));

        assert_eq!(lines.len(), 1);
        let spans = &lines[0].spans;
        assert_eq!(spans[0].content, "S: ");
        assert_eq!(spans[1].content, "+ERR ");
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(spans[2].content, "mailbox locked");
    }

    #[test]
    fn response_info_gets_ok_marker() {
        let message = TranscriptMessage::info(Channel::Response, "user accepted");
        let rows = wrap_message(&message, 80);
        assert_eq!(rows[0].plain_text(), "S: +OK user accepted");
        assert_eq!(rows[0].spans()[1].kind, LogKind::OkMarker);
    }

    #[test]
    fn multi_line_response_uses_hanging_indent() {
        let message = TranscriptMessage::info(
            Channel::Response,
            "scan listing follows\r\n1 120\r\n2 200\r\n.\r\n",
        );
        let rows: Vec<String> = wrap_message(&message, 80)
            .iter()
            .map(|row| row.plain_text())
            .collect();
        assert_eq!(
            rows,
            vec!["S: +OK scan listing follows", "   1 120", "   2 200", "   ."]
        );
    }

    #[test]
    fn long_command_wraps_under_its_text() {
        let message = TranscriptMessage::info(Channel::Command, "RETR 12345678");
        let rows: Vec<String> = wrap_message(&message, 10)
            .iter()
            .map(|row| row.plain_text())
            .collect();
        assert_eq!(rows, vec!["C: RETR 12", "   345678"]);
    }

    #[test]
    fn narrow_console_never_overflows_or_drops_text() {
        let message = TranscriptMessage::info(Channel::Command, "RETR 1\nok");
        for width in 1..=4 {
            let rows = wrap_message(&message, width);
            let text: String = rows.iter().map(|row| row.plain_text()).collect();
            assert_eq!(text.replace(' ', ""), "C:RETR1ok", "width {width}");
            for row in &rows {
                assert!(visual_width(&row.plain_text()) <= width, "width {width}");
            }
        }
    }

    #[test]
    fn wide_character_on_one_column_still_gets_a_row() {
        let message = TranscriptMessage::new(Channel::Other, Severity::Info, "日本");
        let rows: Vec<String> = wrap_message(&message, 1)
            .iter()
            .map(|row| row.plain_text())
            .collect();
        assert_eq!(rows, vec!["日", "本"]);
    }

    #[test]
    fn network_entries_are_single_styled_span() {
        let error = wrap_message(
            &TranscriptMessage::error(Channel::Network, "connection closed by remote"),
            80,
        );
        assert_eq!(error[0].kind(), LogKind::NetworkError);
        assert_eq!(error[0].spans().len(), 1);

        let info = wrap_message(
            &TranscriptMessage::info(Channel::Network, "Connected to pop.example.org"),
            80,
        );
        assert_eq!(info[0].kind(), LogKind::NetworkInfo);
    }

    #[test]
    fn other_entries_are_unstyled_and_keep_blank_lines() {
        let message = TranscriptMessage::new(Channel::Other, Severity::Warning, "a\n\nb");
        let rows = wrap_message(&message, 80);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.kind() == LogKind::Body));
        assert_eq!(rows[1].plain_text(), "");
    }
}
