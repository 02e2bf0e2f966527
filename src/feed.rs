//! The live log feed.
//!
//! Newest entry first, bounded by a fixed capacity. The bound is enforced on
//! every insertion so the feed never exceeds it, even transiently.

use std::collections::VecDeque;

use tracing::trace;

use crate::models::{IncomingLog, LogEvent};

/// Number of entries kept in the feed.
pub const FEED_CAPACITY: usize = 200;

/// Escape `&`, `<` and `>` in a log message.
///
/// This is not a full sanitizer: quotes pass through unchanged. Control
/// characters other than tab and newline are replaced with U+FFFD so a message
/// cannot smuggle terminal escape sequences into the UI.
pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' | '\n' => out.push(c),
            c if c.is_control() => out.push('\u{fffd}'),
            c => out.push(c),
        }
    }
    out
}

/// Replace control characters other than tab and newline with U+FFFD.
///
/// Used for plain-text output, where markup needs no escaping.
pub fn neutralize_controls(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' | '\n' => c,
            c if c.is_control() => '\u{fffd}',
            c => c,
        })
        .collect()
}

/// Display category of a level, used for badge colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warn,
    Error,
    Admin,
    Other,
}

impl LogLevel {
    pub fn from_level(level: &str) -> Self {
        match level.to_ascii_lowercase().as_str() {
            "debug" | "trace" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "success" | "ok" => LogLevel::Success,
            "warn" | "warning" => LogLevel::Warn,
            "error" | "critical" | "fatal" => LogLevel::Error,
            "admin" => LogLevel::Admin,
            _ => LogLevel::Other,
        }
    }
}

/// A rendered feed line.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEntry {
    /// Timestamp label as received
    pub time: String,
    /// Uppercased level
    pub badge: String,
    pub level: LogLevel,
    /// Escaped message text
    pub message: String,
}

impl FeedEntry {
    pub fn from_event(event: &LogEvent) -> Self {
        let level = event.level();
        Self {
            time: escape_markup(&event.time),
            badge: level.to_uppercase(),
            level: LogLevel::from_level(level),
            message: escape_markup(&event.message),
        }
    }
}

/// Bounded, newest-first list of feed entries.
#[derive(Debug, Clone)]
pub struct Feed {
    entries: VecDeque<FeedEntry>,
    capacity: usize,
}

impl Default for Feed {
    fn default() -> Self {
        Self::new()
    }
}

impl Feed {
    /// Create a feed holding [`FEED_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(FEED_CAPACITY)
    }

    /// Create a feed with a custom bound (at least one entry).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Handle an incoming log event.
    ///
    /// Raw text is decoded first; undecodable text and heartbeats are skipped
    /// without error. Returns whether an entry was added.
    pub fn push(&mut self, incoming: impl Into<IncomingLog>) -> bool {
        let Some(event) = incoming.into().into_event() else {
            trace!("Dropping undecodable stream payload");
            return false;
        };
        if event.heartbeat {
            return false;
        }

        self.entries.push_front(FeedEntry::from_event(&event));
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
        true
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &FeedEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FeedEntry> {
        self.entries.get(index)
    }

    pub fn newest(&self) -> Option<&FeedEntry> {
        self.entries.front()
    }

    pub fn oldest(&self) -> Option<&FeedEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
