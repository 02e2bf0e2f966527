//! Log events received on the stream.
//!
//! Decoding is parse-or-skip: anything that is not a usable event comes back
//! as `None` and is never surfaced to the operator.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Level used when an event has no (or an empty) level.
pub const DEFAULT_LEVEL: &str = "info";

/// One log line pushed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Timestamp label, shown verbatim
    #[serde(default)]
    pub time: String,
    /// Severity, `None` means [`DEFAULT_LEVEL`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub message: String,
    /// Keepalive marker, never rendered
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub heartbeat: bool,
}

impl LogEvent {
    /// Create an event with an explicit level.
    pub fn new(time: impl Into<String>, level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            level: Some(level.into()),
            message: message.into(),
            heartbeat: false,
        }
    }

    /// A keepalive event.
    pub fn heartbeat() -> Self {
        Self {
            time: String::new(),
            level: None,
            message: String::new(),
            heartbeat: true,
        }
    }

    /// Effective level, falling back to `"info"`.
    pub fn level(&self) -> &str {
        match self.level.as_deref() {
            Some(level) if !level.is_empty() => level,
            _ => DEFAULT_LEVEL,
        }
    }

    /// Decode a raw stream payload.
    ///
    /// Returns `None` when the text is not JSON, is not an object, or lacks a
    /// string `message` (heartbeats excepted). Truthiness of `heartbeat` and
    /// `level` follows JavaScript rules, which is what the backend's other
    /// consumers apply.
    pub fn decode(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        Self::from_value(&value)
    }

    /// Decode an already-parsed JSON value. See [`LogEvent::decode`].
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        if obj.get("heartbeat").is_some_and(is_truthy) {
            return Some(Self::heartbeat());
        }

        let message = obj.get("message")?.as_str()?.to_string();
        let level = decode_level(obj)?;
        let time = obj.get("time").map(label_text).unwrap_or_default();

        Some(Self {
            time,
            level,
            message,
            heartbeat: false,
        })
    }
}

/// `Some(None)` for a falsy level, `None` for an unusable one.
fn decode_level(obj: &Map<String, Value>) -> Option<Option<String>> {
    match obj.get("level") {
        None => Some(None),
        Some(v) if !is_truthy(v) => Some(None),
        Some(Value::String(s)) => Some(Some(s.clone())),
        Some(_) => None,
    }
}

fn label_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Input to the feed: either raw stream text or an already-built event.
#[derive(Debug, Clone, PartialEq)]
pub enum IncomingLog {
    Raw(String),
    Event(LogEvent),
}

impl IncomingLog {
    /// Resolve to an event, or `None` if the raw text does not decode.
    pub fn into_event(self) -> Option<LogEvent> {
        match self {
            IncomingLog::Raw(raw) => LogEvent::decode(&raw),
            IncomingLog::Event(event) => Some(event),
        }
    }
}

impl From<&str> for IncomingLog {
    fn from(raw: &str) -> Self {
        IncomingLog::Raw(raw.to_string())
    }
}

impl From<String> for IncomingLog {
    fn from(raw: String) -> Self {
        IncomingLog::Raw(raw)
    }
}

impl From<LogEvent> for IncomingLog {
    fn from(event: LogEvent) -> Self {
        IncomingLog::Event(event)
    }
}
