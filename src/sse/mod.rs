//! Server-Sent Events support for the log stream.
//!
//! # Module structure
//! - `events` - line, message and frame types
//! - `parser` - stateful line parser
//! - `stream` - adapter from a chunked response body to parsed frames

mod events;
mod parser;
mod stream;

pub use events::{SseFrame, SseLine, SseMessage, DEFAULT_EVENT_TYPE};
pub use parser::{parse_sse_line, SseParser};
pub use stream::{sse_frames, SseFrameStream, MAX_LINE_BYTES};
