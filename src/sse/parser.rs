//! Stateful SSE line parser.
//!
//! Follows the event-stream interpretation rules browsers use: `data:` lines
//! accumulate, a blank line dispatches, a message with no data is dropped,
//! `retry:` only accepts ASCII digits, and an `id:` containing NUL is ignored.

use std::time::Duration;

use crate::sse::events::{SseFrame, SseLine, SseMessage, DEFAULT_EVENT_TYPE};

/// Parse a single SSE line (without its line terminator).
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(comment) = line.strip_prefix(':') {
        return SseLine::Comment(comment.trim().to_string());
    }

    match line.split_once(':') {
        Some((name, value)) => SseLine::Field {
            name: name.to_string(),
            value: value.strip_prefix(' ').unwrap_or(value).to_string(),
        },
        None => SseLine::Field {
            name: line.to_string(),
            value: String::new(),
        },
    }
}

/// Stateful SSE parser that accumulates lines and emits complete frames
#[derive(Debug, Default)]
pub struct SseParser {
    /// Event type of the message being accumulated
    event_type: Option<String>,
    /// Data lines of the message being accumulated
    data_buffer: Vec<String>,
    /// Survives dispatch, like the browser's last-event-id buffer
    last_event_id: Option<String>,
}

impl SseParser {
    /// Create a new SSE parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the parser.
    ///
    /// Returns:
    /// - `Some(SseFrame::Message(_))` - a blank line completed a message
    /// - `Some(SseFrame::Retry(_))` - a valid `retry:` field was seen
    /// - `None` - the line was consumed
    pub fn feed_line(&mut self, line: &str) -> Option<SseFrame> {
        match parse_sse_line(line) {
            SseLine::Empty => self.dispatch(),
            SseLine::Comment(_) => None,
            SseLine::Field { name, value } => self.apply_field(&name, value),
        }
    }

    /// Clear the pending message. The last event id is kept.
    pub fn reset(&mut self) {
        self.event_type = None;
        self.data_buffer.clear();
    }

    /// Last event id received on this stream.
    pub fn last_event_id(&self) -> Option<&str> {
        self.last_event_id.as_deref()
    }

    fn apply_field(&mut self, name: &str, value: String) -> Option<SseFrame> {
        match name {
            "event" => {
                self.event_type = Some(value);
                None
            }
            "data" => {
                self.data_buffer.push(value);
                None
            }
            "id" => {
                if !value.contains('\0') {
                    self.last_event_id = Some(value);
                }
                None
            }
            "retry" => {
                if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
                    value
                        .parse::<u64>()
                        .ok()
                        .map(|ms| SseFrame::Retry(Duration::from_millis(ms)))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn dispatch(&mut self) -> Option<SseFrame> {
        if self.data_buffer.is_empty() {
            self.reset();
            return None;
        }

        let event = self
            .event_type
            .take()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_EVENT_TYPE.to_string());
        let data = self.data_buffer.join("\n");
        self.data_buffer.clear();

        Some(SseFrame::Message(SseMessage {
            event,
            data,
            last_event_id: self.last_event_id.clone(),
        }))
    }
}
