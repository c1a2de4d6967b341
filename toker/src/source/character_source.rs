//! Buffered, lookahead-capable character reader

use super::SourceError;
use crate::config::compile_time::source::{
    INITIAL_LINE_COUNT, MAX_UTF8_SEQUENCE_LENGTH, UTF8_BOM,
};
use crate::logging::codes;
use crate::{log_error, log_success};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::Path;

/// Character reader with on-demand lookahead.
///
/// Characters are decoded from UTF-8 one at a time. `peek(n)` reads ahead only
/// as far as position `n`; consuming through the iterator drains that
/// lookahead before touching the stream again. Every consumed `'\n'` bumps the
/// line counter, which starts at 1.
///
/// `end()` reports whether the underlying *stream* is exhausted. It does not
/// look at the lookahead queue, so it can be true while peeked characters are
/// still waiting to be consumed.
pub struct CharacterSource {
    reader: Option<Box<dyn BufRead + Send>>,
    origin: Option<String>,
    lookahead: VecDeque<char>,
    line_count: usize,
    stream_ended: bool,
}

impl CharacterSource {
    /// Create a source with nothing open; it behaves as already exhausted
    pub fn new() -> Self {
        Self {
            reader: None,
            origin: None,
            lookahead: VecDeque::new(),
            line_count: INITIAL_LINE_COUNT,
            stream_ended: true,
        }
    }

    /// Open a file, reporting failure as `false`
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> bool {
        self.try_open(path).is_ok()
    }

    /// Open a file, keeping the cause of a failure
    pub fn try_open<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SourceError> {
        let path = path.as_ref();
        self.close();

        let result = open_file(path);
        match result {
            Ok(file) => {
                self.attach(Box::new(BufReader::new(file)), path.display().to_string());
                Ok(())
            }
            Err(error) => {
                log_error!(error.error_code(), "Failed to open source",
                    "path" => path.display(),
                    "error" => &error
                );
                Err(error)
            }
        }
    }

    /// Open in-memory text with the same lookahead and line semantics as a file
    pub fn open_text(&mut self, text: &str) {
        self.open_reader(Cursor::new(text.as_bytes().to_vec()), "<text>");
    }

    /// Open any buffered reader producing UTF-8
    pub fn open_reader<R>(&mut self, reader: R, origin: &str)
    where
        R: BufRead + Send + 'static,
    {
        self.close();
        self.attach(Box::new(reader), origin.to_string());
    }

    fn attach(&mut self, reader: Box<dyn BufRead + Send>, origin: String) {
        log_success!(codes::success::SOURCE_OPENED, "Source opened", "origin" => &origin);
        self.reader = Some(reader);
        self.origin = Some(origin);
        self.stream_ended = false;
        self.line_count = INITIAL_LINE_COUNT;
        self.lookahead.clear();
        self.refresh_stream_state();

        if self.peek(0) == Some(UTF8_BOM) {
            self.lookahead.pop_front();
        }
    }

    /// Release the underlying reader; safe to call more than once
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            if let Some(origin) = self.origin.take() {
                log_success!(codes::success::SOURCE_CLOSED, "Source closed",
                    "origin" => origin,
                    "lines" => self.line_count
                );
            }
        }
        self.lookahead.clear();
        self.stream_ended = true;
    }

    pub fn is_open(&self) -> bool {
        self.reader.is_some()
    }

    /// Path or label of the open source
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Newlines consumed so far, plus one
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Character `n` positions ahead of the cursor, without consuming it.
    ///
    /// Reads from the stream only as many characters as needed to reach `n`.
    /// Returns `None` when the stream ends first.
    pub fn peek(&mut self, n: usize) -> Option<char> {
        while self.lookahead.len() <= n {
            if self.stream_ended {
                return None;
            }
            let ch = self.read_char()?;
            self.lookahead.push_back(ch);
        }
        self.lookahead.get(n).copied()
    }

    /// Whether the underlying stream has no more characters to read.
    ///
    /// Characters already pulled into the lookahead queue by `peek` are not
    /// taken into account.
    pub fn end(&self) -> bool {
        self.stream_ended
    }

    /// Whether every character, buffered or not, has been consumed
    pub fn is_exhausted(&self) -> bool {
        self.stream_ended && self.lookahead.is_empty()
    }

    fn read_char(&mut self) -> Option<char> {
        let reader = self.reader.as_mut()?;
        let decoded = match decode_char(reader.as_mut()) {
            Ok(decoded) => decoded,
            Err(error) => {
                log_error!(codes::source::IO_ERROR, "Read failed, treating as end of input",
                    "origin" => self.origin.as_deref().unwrap_or("<unknown>"),
                    "error" => error
                );
                None
            }
        };

        if decoded.is_none() {
            self.stream_ended = true;
        } else {
            self.refresh_stream_state();
        }
        decoded
    }

    /// A read error here ends the stream, like one met while decoding
    fn refresh_stream_state(&mut self) {
        let Some(reader) = self.reader.as_mut() else {
            self.stream_ended = true;
            return;
        };

        self.stream_ended = match reader.fill_buf() {
            Ok(bytes) => bytes.is_empty(),
            Err(error) => {
                log_error!(codes::source::IO_ERROR, "Read failed, treating as end of input",
                    "origin" => self.origin.as_deref().unwrap_or("<unknown>"),
                    "error" => error
                );
                true
            }
        };
    }
}

impl Default for CharacterSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Consuming read: the next character, preferring the lookahead queue.
/// `None` is the end-of-input sentinel.
impl Iterator for CharacterSource {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let ch = match self.lookahead.pop_front() {
            Some(ch) => ch,
            None if self.stream_ended => return None,
            None => self.read_char()?,
        };

        if ch == '\n' {
            self.line_count += 1;
        }
        Some(ch)
    }
}

impl std::fmt::Debug for CharacterSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CharacterSource")
            .field("origin", &self.origin)
            .field("lookahead", &self.lookahead)
            .field("line_count", &self.line_count)
            .field("stream_ended", &self.stream_ended)
            .finish()
    }
}

fn open_file(path: &Path) -> Result<File, SourceError> {
    if path.as_os_str().is_empty() {
        return Err(SourceError::InvalidPath(String::new()));
    }

    let metadata =
        std::fs::metadata(path).map_err(|e| SourceError::from_io(path.to_path_buf(), e))?;
    if !metadata.is_file() {
        return Err(SourceError::NotAFile(path.to_path_buf()));
    }

    File::open(path).map_err(|e| SourceError::from_io(path.to_path_buf(), e))
}

/// Number of bytes in the UTF-8 sequence introduced by `lead_byte`
fn utf8_sequence_length(lead_byte: u8) -> Option<usize> {
    match lead_byte {
        0x00..=0x7F => Some(1),
        0xC0..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF7 => Some(4),
        _ => None,
    }
}

/// Decode one character; malformed sequences become U+FFFD
fn decode_char(reader: &mut dyn BufRead) -> io::Result<Option<char>> {
    let Some(lead_byte) = reader.fill_buf()?.first().copied() else {
        return Ok(None);
    };
    reader.consume(1);

    let Some(length) = utf8_sequence_length(lead_byte) else {
        return Ok(Some(char::REPLACEMENT_CHARACTER));
    };

    let mut bytes = [0u8; MAX_UTF8_SEQUENCE_LENGTH];
    bytes[0] = lead_byte;
    for slot in bytes.iter_mut().take(length).skip(1) {
        match reader.fill_buf()?.first().copied() {
            Some(byte) if byte & 0xC0 == 0x80 => {
                *slot = byte;
                reader.consume(1);
            }
            _ => return Ok(Some(char::REPLACEMENT_CHARACTER)),
        }
    }

    Ok(Some(
        std::str::from_utf8(&bytes[..length])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER),
    ))
}
