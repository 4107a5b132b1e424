//! Protocol pieces shared by the word game server and its terminal client.
//!
//! The wire format is plain text: every line a client sends ends with CR LF.
//! Server output is mostly CR LF terminated too, except the name prompts which
//! leave the cursor on the same line.

use thiserror::Error;

/// Port the server listens on unless told otherwise
pub const DEFAULT_PORT: u16 = 52505;
/// Line terminator used in both directions
pub const LINE_TERMINATOR: &str = "\r\n";
/// Maximum number of bytes a session may buffer while waiting for a terminator
pub const LINE_BUFFER_CAPACITY: usize = 256;
/// Longest display name accepted; longer names are truncated
pub const MAX_NAME_LEN: usize = 29;

/// Appends the protocol terminator to a line of user input.
///
/// Any trailing `\n` or `\r\n` already present is stripped first so lines read
/// from a terminal are not terminated twice.
pub fn encode_line(line: &str) -> String {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    format!("{}{}", trimmed, LINE_TERMINATOR)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("line exceeds buffer capacity of {capacity} bytes")]
    Overflow { capacity: usize },
}

/// A complete line taken out of a [`LineBuffer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Line contents without the terminator
    pub line: String,
    /// Bytes that followed the terminator in the same buffer and were dropped
    pub discarded: usize,
}

/// Fixed-capacity accumulation buffer for CR LF framed input
///
/// Bytes are appended at the cursor until a terminator shows up. At that
/// point the first line is handed out and the cursor returns to the start
/// of the buffer, dropping whatever followed the terminator. Running out of
/// room before a terminator is reported as [`FrameError::Overflow`], which is
/// distinct from the `Ok(None)` "keep waiting" result.
#[derive(Debug)]
pub struct LineBuffer {
    buf: Box<[u8]>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::with_capacity(LINE_BUFFER_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of buffered bytes not yet consumed as a line
    pub fn pending(&self) -> usize {
        self.cursor
    }

    /// Appends freshly read bytes and extracts a line if one is complete.
    ///
    /// Only as many bytes as still fit are taken from `data`; a terminator
    /// among them completes the line and the rest of `data` is counted as
    /// discarded. Overflow is reported only when the buffer fills up without
    /// a terminator. The buffer is cleared in that case so the caller can
    /// decide what to do with the connection without stale data lingering.
    pub fn push(&mut self, data: &[u8]) -> Result<Option<Frame>, FrameError> {
        let taken = data.len().min(self.capacity() - self.cursor);
        let end = self.cursor + taken;
        self.buf[self.cursor..end].copy_from_slice(&data[..taken]);
        self.cursor = end;

        let filled = &self.buf[..self.cursor];
        let Some(pos) = filled.windows(2).position(|w| w == b"\r\n") else {
            if taken < data.len() {
                self.clear();
                return Err(FrameError::Overflow {
                    capacity: self.capacity(),
                });
            }
            return Ok(None);
        };

        let line = String::from_utf8_lossy(&filled[..pos]).into_owned();
        let discarded = (self.cursor - (pos + 2)) + (data.len() - taken);
        self.clear();

        Ok(Some(Frame { line, discarded }))
    }

    /// Forgets any buffered partial line
    pub fn clear(&mut self) {
        self.cursor = 0;
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_line_is_buffered() {
        let mut buffer = LineBuffer::new();

        assert_eq!(buffer.push(b"hel").unwrap(), None);
        assert_eq!(buffer.pending(), 3);
    }

    #[test]
    fn test_line_completed_across_reads() {
        let mut buffer = LineBuffer::new();

        assert_eq!(buffer.push(b"ali").unwrap(), None);
        let frame = buffer.push(b"ce\r\n").unwrap().unwrap();

        assert_eq!(frame.line, "alice");
        assert_eq!(frame.discarded, 0);
        assert_eq!(buffer.pending(), 0);
    }

    #[test]
    fn test_terminator_split_between_reads() {
        let mut buffer = LineBuffer::new();

        assert_eq!(buffer.push(b"c\r").unwrap(), None);
        let frame = buffer.push(b"\n").unwrap().unwrap();

        assert_eq!(frame.line, "c");
    }

    #[test]
    fn test_bare_newline_is_not_a_terminator() {
        let mut buffer = LineBuffer::new();

        assert_eq!(buffer.push(b"c\n").unwrap(), None);
    }

    #[test]
    fn test_trailing_bytes_are_discarded() {
        let mut buffer = LineBuffer::new();

        let frame = buffer.push(b"a\r\nb\r\n").unwrap().unwrap();

        assert_eq!(frame.line, "a");
        assert_eq!(frame.discarded, 3);
        assert_eq!(buffer.pending(), 0);
    }

    #[test]
    fn test_empty_line() {
        let mut buffer = LineBuffer::new();

        let frame = buffer.push(b"\r\n").unwrap().unwrap();
        assert_eq!(frame.line, "");
    }

    #[test]
    fn test_overflow_is_reported_and_clears() {
        let mut buffer = LineBuffer::with_capacity(8);

        assert_eq!(buffer.push(b"abcdef").unwrap(), None);
        assert_eq!(
            buffer.push(b"ghi"),
            Err(FrameError::Overflow { capacity: 8 })
        );
        assert_eq!(buffer.pending(), 0);
    }

    #[test]
    fn test_short_line_followed_by_a_full_read() {
        let mut buffer = LineBuffer::new();
        let mut chunk = b"ce\r\n".to_vec();
        chunk.resize(LINE_BUFFER_CAPACITY, b'x');

        assert_eq!(buffer.push(b"ali").unwrap(), None);
        let frame = buffer.push(&chunk).unwrap().unwrap();

        assert_eq!(frame.line, "alice");
        assert_eq!(frame.discarded, LINE_BUFFER_CAPACITY - 4);
        assert_eq!(buffer.pending(), 0);
    }

    #[test]
    fn test_full_buffer_without_terminator_overflows_on_next_read() {
        let mut buffer = LineBuffer::with_capacity(4);

        assert_eq!(buffer.push(b"abcd").unwrap(), None);
        assert_eq!(
            buffer.push(b"\r\n"),
            Err(FrameError::Overflow { capacity: 4 })
        );
    }

    #[test]
    fn test_exact_capacity_line_fits() {
        let mut buffer = LineBuffer::with_capacity(4);

        let frame = buffer.push(b"ab\r\n").unwrap().unwrap();
        assert_eq!(frame.line, "ab");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut buffer = LineBuffer::new();

        let frame = buffer.push(&[0xff, b'a', b'\r', b'\n']).unwrap().unwrap();
        assert_eq!(frame.line, "\u{fffd}a");
    }

    #[test]
    fn test_encode_line() {
        assert_eq!(encode_line("bob"), "bob\r\n");
        assert_eq!(encode_line("bob\n"), "bob\r\n");
        assert_eq!(encode_line("bob\r\n"), "bob\r\n");
        assert_eq!(encode_line(""), "\r\n");
    }
}
