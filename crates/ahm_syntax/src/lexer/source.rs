//! Code point sources with one code point of lookahead.
//!
//! The lexer only ever needs to look at the next code point before deciding whether to consume it,
//! so a source is anything that can `peek` one code point and then hand it out with `next_char`.

use std::io::{self, BufRead, BufReader, Read};
use std::iter::Peekable;
use std::str::Chars;

/// A sequence of code points with single code point lookahead.
///
/// `Ok(None)` signals the end of input. Read failures are reported as `io::Error`s.
pub trait CharSource {
    /// Return the next code point without consuming it.
    fn peek(&mut self) -> io::Result<Option<char>>;

    /// Consume and return the next code point.
    fn next_char(&mut self) -> io::Result<Option<char>>;
}

/// Source over an in-memory string.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> StrSource<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
        }
    }
}

impl<'a> From<&'a str> for StrSource<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}

impl CharSource for StrSource<'_> {
    fn peek(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.peek().copied())
    }

    fn next_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.chars.next())
    }
}

/// Source decoding UTF-8 from a buffered reader, one code point at a time.
#[derive(Debug)]
pub struct ReadSource<R> {
    reader: R,
    peeked: Option<Option<char>>,
}

impl<R: BufRead> ReadSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, peeked: None }
    }

    fn read_char(&mut self) -> io::Result<Option<char>> {
        let Some(lead) = self.read_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(lead).ok_or_else(|| invalid_utf8(format!("invalid leading byte 0x{lead:02x}")))?;

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            *slot = self
                .read_byte()?
                .ok_or_else(|| invalid_utf8("input ends inside a UTF-8 sequence".to_string()))?;
        }

        let decoded = std::str::from_utf8(&buf[..width]).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(decoded.chars().next())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let byte = loop {
            match self.reader.fill_buf() {
                Ok(buf) => break buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        if byte.is_some() {
            self.reader.consume(1);
        }
        Ok(byte)
    }
}

impl<R: Read> ReadSource<BufReader<R>> {
    /// Wrap an unbuffered reader.
    pub fn from_read(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }
}

impl<R: BufRead> CharSource for ReadSource<R> {
    fn peek(&mut self) -> io::Result<Option<char>> {
        if let Some(peeked) = self.peeked {
            return Ok(peeked);
        }
        let next = self.read_char()?;
        self.peeked = Some(next);
        Ok(next)
    }

    fn next_char(&mut self) -> io::Result<Option<char>> {
        match self.peeked.take() {
            Some(peeked) => Ok(peeked),
            None => self.read_char(),
        }
    }
}

/// Byte length of a UTF-8 sequence given its first byte.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

fn invalid_utf8(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &mut impl CharSource) -> String {
        let mut out = String::new();
        while let Some(c) = source.next_char().unwrap() {
            out.push(c);
        }
        out
    }

    #[test]
    fn test_str_source_peek_does_not_consume() {
        let mut source = StrSource::new("ab");
        assert_eq!(source.peek().unwrap(), Some('a'));
        assert_eq!(source.peek().unwrap(), Some('a'));
        assert_eq!(source.next_char().unwrap(), Some('a'));
        assert_eq!(source.next_char().unwrap(), Some('b'));
        assert_eq!(source.next_char().unwrap(), None);
        assert_eq!(source.peek().unwrap(), None);
    }

    #[test]
    fn test_read_source_decodes_multibyte() {
        let text = "zażółć @gęślą\n\tjaźń ✓ 🦀";
        let mut source = ReadSource::from_read(text.as_bytes());
        assert_eq!(source.peek().unwrap(), Some('z'));
        assert_eq!(drain(&mut source), text);
    }

    #[test]
    fn test_read_source_peek_then_next() {
        let mut source = ReadSource::new("é".as_bytes());
        assert_eq!(source.peek().unwrap(), Some('é'));
        assert_eq!(source.next_char().unwrap(), Some('é'));
        assert_eq!(source.peek().unwrap(), None);
    }

    #[test]
    fn test_read_source_rejects_invalid_utf8() {
        let bytes: &[u8] = &[b'a', 0xff, b'b'];
        let mut source = ReadSource::new(bytes);
        assert_eq!(source.next_char().unwrap(), Some('a'));
        let err = source.next_char().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_source_rejects_truncated_sequence() {
        let bytes: &[u8] = &[0xc5];
        let mut source = ReadSource::new(bytes);
        let err = source.peek().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
