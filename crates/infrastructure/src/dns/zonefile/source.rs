use emdns_domain::ParseError;
use std::io::BufRead;
use std::str::Chars;

/// A stream of characters fed to the master-file parser.
///
/// `Ok(None)` marks the end of the stream.
pub trait CharSource {
    fn next_char(&mut self) -> Result<Option<char>, ParseError>;
}

/// In-memory zone text.
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn next_char(&mut self) -> Result<Option<char>, ParseError> {
        Ok(self.chars.next())
    }
}

/// Any buffered reader: a file, standard input, a socket.
///
/// Input is pulled one line at a time, so a stream that stops producing
/// blocks the parse.
pub struct ReaderSource<R> {
    reader: R,
    line: String,
    pos: usize,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            pos: 0,
        }
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> Result<Option<char>, ParseError> {
        if self.pos >= self.line.len() {
            self.line.clear();
            self.pos = 0;
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|e| ParseError::Io(e.to_string()))?;
            if read == 0 {
                return Ok(None);
            }
        }
        let c = self.line[self.pos..].chars().next();
        if let Some(c) = c {
            self.pos += c.len_utf8();
        }
        Ok(c)
    }
}
