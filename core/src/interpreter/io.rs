//! Program input
//!
//! The VM reads through [`InputSource`] so tests can feed in-memory input and
//! the CLI can hand over stdin. Output goes to any `std::io::Write`.

use std::io::{self, BufRead};

/// Blocking supplier of characters and integers
pub trait InputSource {
    /// Read one character
    fn read_char(&mut self) -> io::Result<char>;

    /// Read one whitespace-delimited decimal integer
    fn read_number(&mut self) -> io::Result<i64>;
}

fn end_of_input() -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, "end of input")
}

/* ===================== Reader Input ===================== */

/// [`InputSource`] over any buffered reader
///
/// The reader is kept for the whole run, so bytes buffered by one read are
/// still there for the next.
pub struct ReaderInput<R> {
    reader: R,
}

impl<R: BufRead> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.reader.fill_buf()?.first().copied())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }
}

/// Length of a UTF-8 sequence from its lead byte
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: BufRead> InputSource for ReaderInput<R> {
    /// Invalid UTF-8 reads as U+FFFD
    fn read_char(&mut self) -> io::Result<char> {
        let lead = self.read_byte()?.ok_or_else(end_of_input)?;
        let Some(width) = utf8_width(lead) else {
            return Ok(char::REPLACEMENT_CHARACTER);
        };

        let mut bytes = [lead, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            *slot = self.read_byte()?.ok_or_else(end_of_input)?;
        }

        Ok(std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn read_number(&mut self) -> io::Result<i64> {
        while let Some(byte) = self.peek_byte()? {
            if !byte.is_ascii_whitespace() {
                break;
            }
            self.reader.consume(1);
        }

        let mut word = Vec::new();
        while let Some(byte) = self.peek_byte()? {
            if byte.is_ascii_whitespace() {
                break;
            }
            word.push(byte);
            self.reader.consume(1);
        }

        if word.is_empty() {
            return Err(end_of_input());
        }

        let text = String::from_utf8_lossy(&word);
        text.parse::<i64>().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("expected an integer, found {:?}: {}", text, err),
            )
        })
    }
}
