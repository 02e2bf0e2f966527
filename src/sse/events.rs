//! SSE line and frame types.

use std::time::Duration;

/// Event type used when a message carries no `event:` field.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// One classified line of an SSE stream.
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Blank line, dispatches the pending message
    Empty,
    /// `: text` comment, used by servers as keepalive padding
    Comment(String),
    /// `name: value` field (value has at most one leading space removed)
    Field { name: String, value: String },
}

/// A complete server-sent message.
#[derive(Debug, Clone, PartialEq)]
pub struct SseMessage {
    /// Event type, `"message"` unless the server named it
    pub event: String,
    /// Data lines joined with `\n`
    pub data: String,
    /// Last event id seen on the stream, if any
    pub last_event_id: Option<String>,
}

impl SseMessage {
    /// Build an unnamed message, the kind delivered to `onmessage` handlers.
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            event: DEFAULT_EVENT_TYPE.to_string(),
            data: data.into(),
            last_event_id: None,
        }
    }

    /// Whether this message has the default `message` type.
    pub fn is_default_type(&self) -> bool {
        self.event == DEFAULT_EVENT_TYPE
    }
}

/// Output of the SSE parser.
#[derive(Debug, Clone, PartialEq)]
pub enum SseFrame {
    /// A dispatched message
    Message(SseMessage),
    /// The server changed the reconnection delay
    Retry(Duration),
}
