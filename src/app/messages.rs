//! AppMessage enum for async communication within the application.

use crate::models::{ActionCommand, LogEvent, StatusSnapshot};
use crate::sse::SseMessage;

/// Messages sent from background tasks to the UI loop.
///
/// Producers never mutate application state themselves; every change goes
/// through [`crate::app::App::handle_message`].
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// The stream request was accepted by the server
    StreamOpened,
    /// A complete server-sent message arrived
    StreamMessage(SseMessage),
    /// The stream failed or ended; a reconnect is scheduled
    StreamError(String),
    /// Status fetch succeeded
    StatusUpdated(StatusSnapshot),
    /// Status fetch failed
    StatusFailed(String),
    /// An admin command finished; `event` is the feed line describing it
    ActionFinished { cmd: ActionCommand, event: LogEvent },
}
