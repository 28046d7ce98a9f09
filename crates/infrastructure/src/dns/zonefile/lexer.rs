//! Character filtering and tokenizing for master files.
//!
//! The filter removes `;` comments, swallows the parentheses of a
//! multi-line group together with the newlines inside it, and is switched
//! off while a quoted string is being read.

use super::source::CharSource;
use emdns_domain::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub text: String,
    pub quoted: bool,
}

impl Token {
    /// Only unquoted tokens can act as keywords or numbers.
    pub fn is_bare(&self) -> bool {
        !self.quoted
    }
}

pub(crate) struct Lexer<S> {
    source: S,
    current: Option<char>,
    in_parens: bool,
    in_comment: bool,
    quoted: bool,
    line: u32,
}

impl<S: CharSource> Lexer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: None,
            in_parens: false,
            in_comment: false,
            quoted: false,
            line: 1,
        }
    }

    pub fn current(&self) -> Option<char> {
        self.current
    }

    /// One plus the number of newlines consumed so far.
    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn advance(&mut self) -> Result<(), ParseError> {
        loop {
            let Some(c) = self.source.next_char()? else {
                self.current = None;
                return Ok(());
            };
            if c == '\n' {
                self.line += 1;
            }

            if self.quoted {
                self.current = Some(c);
                return Ok(());
            }
            if self.in_comment {
                if c != '\n' {
                    continue;
                }
                self.in_comment = false;
            }

            match c {
                ';' => {
                    self.in_comment = true;
                    continue;
                }
                '(' if !self.in_parens => {
                    self.in_parens = true;
                    continue;
                }
                ')' if self.in_parens => {
                    self.in_parens = false;
                    continue;
                }
                '\n' if self.in_parens => continue,
                _ => {}
            }

            self.current = Some(c);
            return Ok(());
        }
    }

    /// Skips spaces and tabs; returns whether any were skipped.
    pub fn skip_blanks(&mut self) -> Result<bool, ParseError> {
        let mut skipped = false;
        while matches!(self.current, Some(' ' | '\t' | '\r')) {
            skipped = true;
            self.advance()?;
        }
        Ok(skipped)
    }

    pub fn at_line_end(&self) -> bool {
        matches!(self.current, None | Some('\n'))
    }

    /// Skips blanks and reports whether the line is finished.
    pub fn expect_line_end(&mut self) -> Result<bool, ParseError> {
        self.skip_blanks()?;
        Ok(self.at_line_end())
    }

    /// Steps over the newline that ends the current line, if any.
    pub fn finish_line(&mut self) -> Result<(), ParseError> {
        if self.current == Some('\n') {
            self.advance()?;
        }
        Ok(())
    }

    /// Reads the next token on this line, or `None` at the end of the line.
    pub fn read_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_blanks()?;
        match self.current {
            None | Some('\n') => Ok(None),
            Some('"') => self.read_quoted().map(Some),
            Some(_) => Ok(Some(Token {
                text: self.read_word()?,
                quoted: false,
            })),
        }
    }

    /// Reads characters up to the next blank or line end, starting at the
    /// current character without skipping anything first.
    pub fn read_word(&mut self) -> Result<String, ParseError> {
        let mut word = String::new();
        while let Some(c) = self.current {
            if matches!(c, ' ' | '\t' | '\r' | '\n') {
                break;
            }
            word.push(c);
            self.advance()?;
        }
        Ok(word)
    }

    /// Reads a double-quoted string; the current character is the opening
    /// quote. Everything up to the closing quote is kept verbatim, so a
    /// backslash is an ordinary character.
    pub fn read_quoted(&mut self) -> Result<Token, ParseError> {
        self.quoted = true;
        let mut text = String::new();
        self.advance()?;
        loop {
            match self.current {
                None => {
                    self.quoted = false;
                    return Err(ParseError::UnterminatedString);
                }
                Some('"') => break,
                Some(c) => text.push(c),
            }
            self.advance()?;
        }
        self.quoted = false;
        self.advance()?;
        Ok(Token { text, quoted: true })
    }

    /// Reads the rest of the line as one string, trailing blanks dropped.
    pub fn read_to_line_end(&mut self) -> Result<String, ParseError> {
        self.skip_blanks()?;
        let mut text = String::new();
        while let Some(c) = self.current {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.advance()?;
        }
        Ok(text.trim_end_matches([' ', '\t', '\r']).to_string())
    }
}
