//! Status endpoint payload and the values shown in the header.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Placeholder for a missing status or uptime.
pub const PLACEHOLDER: &str = "—";

/// Status text shown when the status endpoint cannot be read.
pub const OFFLINE: &str = "offline";

/// Body of `GET /status`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusSnapshot {
    #[serde(default, deserialize_with = "text_or_number")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub uptime: Option<String>,
    #[serde(default, deserialize_with = "user_count")]
    pub users: Option<u64>,
}

impl StatusSnapshot {
    pub fn new(status: &str, uptime: &str, users: u64) -> Self {
        Self {
            status: Some(status.to_string()),
            uptime: Some(uptime.to_string()),
            users: Some(users),
        }
    }
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

fn user_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(count), _) => Ok(Some(count)),
            (None, Some(f)) if f.is_finite() && f >= 0.0 => Ok(Some(f as u64)),
            _ => Err(serde::de::Error::custom("user count out of range")),
        },
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a user count, got {}",
            other
        ))),
    }
}

/// The three header values as currently displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusDisplay {
    pub status: String,
    pub uptime: String,
    pub users: String,
}

impl Default for StatusDisplay {
    fn default() -> Self {
        Self {
            status: PLACEHOLDER.to_string(),
            uptime: PLACEHOLDER.to_string(),
            users: PLACEHOLDER.to_string(),
        }
    }
}

impl StatusDisplay {
    /// Overwrite all three values from a successful fetch.
    pub fn apply(&mut self, snapshot: &StatusSnapshot) {
        self.status = non_empty_or_placeholder(snapshot.status.as_deref());
        self.uptime = non_empty_or_placeholder(snapshot.uptime.as_deref());
        self.users = snapshot.users.unwrap_or(0).to_string();
    }

    /// A failed fetch only touches the status value.
    pub fn mark_offline(&mut self) {
        self.status = OFFLINE.to_string();
    }

    pub fn is_offline(&self) -> bool {
        self.status == OFFLINE
    }
}

fn non_empty_or_placeholder(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}
