//! Byte stream → SSE frame stream adapter.

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use std::pin::Pin;

use crate::sse::events::SseFrame;
use crate::sse::parser::SseParser;
use crate::traits::{ByteStream, HttpError};

/// Boxed stream of parsed frames, as returned to the subscriber.
pub type SseFrameStream = Pin<Box<dyn Stream<Item = Result<SseFrame, HttpError>> + Send>>;

/// Longest line accepted before the stream is treated as broken.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

const BOM: &[u8] = b"\xef\xbb\xbf";

struct LineReader {
    body: ByteStream,
    parser: SseParser,
    buffer: Vec<u8>,
    /// Leading BOM not yet ruled out
    at_start: bool,
    finished: bool,
}

impl LineReader {
    /// Take the next complete line off the buffer.
    ///
    /// Lines end with CRLF, LF or a bare CR. A CR at the very end of the
    /// buffer waits for more input, since the LF may arrive in the next chunk.
    fn next_line(&mut self) -> Option<String> {
        let pos = self.buffer.iter().position(|&b| b == b'\n' || b == b'\r')?;
        let terminator_len = match (self.buffer[pos], self.buffer.get(pos + 1)) {
            (b'\r', Some(b'\n')) => 2,
            (b'\r', None) if !self.finished => return None,
            _ => 1,
        };
        let line = String::from_utf8_lossy(&self.buffer[..pos]).into_owned();
        self.buffer.drain(..pos + terminator_len);
        Some(line)
    }

    /// Drop a leading UTF-8 BOM once enough bytes are known.
    fn strip_bom(&mut self) {
        if !self.at_start {
            return;
        }
        let known = self.buffer.len().min(BOM.len());
        if self.buffer[..known] != BOM[..known] {
            self.at_start = false;
        } else if known == BOM.len() {
            self.buffer.drain(..BOM.len());
            self.at_start = false;
        } else if self.finished {
            self.at_start = false;
        }
    }
}

/// Split a chunked response body into lines and run them through an
/// [`SseParser`].
///
/// Lines are split on raw bytes before decoding, so a multi-byte character
/// cut across two chunks survives intact. Invalid UTF-8 is replaced rather
/// than dropped. A trailing line without terminator is fed when the body
/// ends, but a message is only dispatched by a blank line, as in the browser.
/// A line longer than [`MAX_LINE_BYTES`] ends the stream with an error.
pub fn sse_frames(body: ByteStream) -> impl Stream<Item = Result<SseFrame, HttpError>> + Send {
    let reader = LineReader {
        body,
        parser: SseParser::new(),
        buffer: Vec::new(),
        at_start: true,
        finished: false,
    };

    stream::unfold(reader, |mut reader| async move {
        loop {
            reader.strip_bom();
            if !reader.at_start {
                if let Some(line) = reader.next_line() {
                    if let Some(frame) = reader.parser.feed_line(&line) {
                        return Some((Ok(frame), reader));
                    }
                    continue;
                }
            }

            if reader.finished {
                if reader.buffer.is_empty() {
                    return None;
                }
                let line = String::from_utf8_lossy(&reader.buffer).into_owned();
                reader.buffer.clear();
                if let Some(frame) = reader.parser.feed_line(&line) {
                    return Some((Ok(frame), reader));
                }
                return None;
            }

            if reader.buffer.len() > MAX_LINE_BYTES {
                reader.finished = true;
                reader.buffer.clear();
                let err = HttpError::Io(format!(
                    "event stream line exceeds {} bytes",
                    MAX_LINE_BYTES
                ));
                return Some((Err(err), reader));
            }

            match reader.body.next().await {
                Some(Ok(chunk)) => reader.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    reader.finished = true;
                    reader.buffer.clear();
                    return Some((Err(e), reader));
                }
                None => reader.finished = true,
            }
        }
    })
}
