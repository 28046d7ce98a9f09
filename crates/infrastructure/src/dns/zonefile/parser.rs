//! Master-file state machine.
//!
//! Input is read line by line through five states: INIT decides what a line
//! holds, COMMAND dispatches `$` directives, ORIGIN and TTL apply them, and
//! RECORD parses `[name] [ttl] [class] type rdata` and hands the result to
//! the zone.

use super::lexer::{Lexer, Token};
use super::source::CharSource;
use crate::dns::zone::{class_support_enabled, Zone};
use emdns_domain::{ParseError, RecordClass, RecordType, ZoneFileError};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    Command,
    Origin,
    Ttl,
    /// `indented` is set when the line began with blanks.
    Record { indented: bool },
}

/// Loads master-file text into a [`Zone`].
///
/// The parser only holds the starting origin and default TTL; everything a
/// file changes with `$ORIGIN` or `$TTL` lives for one [`parse`] call.
///
/// [`parse`]: ZoneFileParser::parse
#[derive(Debug, Clone, Default)]
pub struct ZoneFileParser {
    origin: String,
    default_ttl: u32,
}

impl ZoneFileParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_default_ttl(mut self, ttl: u32) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Parses the whole stream and returns the number of records added.
    ///
    /// Stops at the first error. Records from earlier lines stay in `zone`
    /// and their count is reported in the error.
    pub fn parse<S: CharSource>(&self, zone: &mut Zone, source: S) -> Result<u32, ZoneFileError> {
        let mut run = ParseRun {
            lexer: Lexer::new(source),
            zone,
            origin: self.origin.clone(),
            default_ttl: self.default_ttl,
            last_name: None,
            records_added: 0,
            statement_line: 1,
        };

        match run.run() {
            Ok(()) => {
                info!(records = run.records_added, "Zone file parsed");
                Ok(run.records_added)
            }
            Err(error) => Err(ZoneFileError {
                error,
                line: run.statement_line,
                records_added: run.records_added,
            }),
        }
    }
}

/// State of a single parse.
struct ParseRun<'z, S> {
    lexer: Lexer<S>,
    zone: &'z mut Zone,
    origin: String,
    default_ttl: u32,
    last_name: Option<String>,
    records_added: u32,
    statement_line: u32,
}

impl<S: CharSource> ParseRun<'_, S> {
    fn run(&mut self) -> Result<(), ParseError> {
        self.lexer.advance()?;
        let mut state = State::Init;

        loop {
            state = match state {
                State::Init => {
                    let indented = self.lexer.skip_blanks()?;
                    match self.lexer.current() {
                        None => return Ok(()),
                        Some('\n') => {
                            self.lexer.advance()?;
                            State::Init
                        }
                        Some('$') => {
                            self.statement_line = self.lexer.line();
                            self.lexer.advance()?;
                            State::Command
                        }
                        Some(_) => {
                            self.statement_line = self.lexer.line();
                            State::Record { indented }
                        }
                    }
                }
                State::Command => self.command()?,
                State::Origin => {
                    self.origin()?;
                    State::Init
                }
                State::Ttl => {
                    self.ttl()?;
                    State::Init
                }
                State::Record { indented } => {
                    self.record(indented)?;
                    State::Init
                }
            };
        }
    }

    fn command(&mut self) -> Result<State, ParseError> {
        let directive = self.lexer.read_word()?;
        match directive.to_ascii_uppercase().as_str() {
            "ORIGIN" => Ok(State::Origin),
            "TTL" => Ok(State::Ttl),
            "INCLUDE" => Err(ParseError::UnsupportedDirective(directive)),
            _ => Err(ParseError::UnknownDirective(directive)),
        }
    }

    fn origin(&mut self) -> Result<(), ParseError> {
        let token = self
            .lexer
            .read_token()?
            .ok_or_else(|| ParseError::UnexpectedToken("$ORIGIN without a domain".to_string()))?;
        self.origin = self.absolute(&token.text);
        debug!(origin = %self.origin, "Origin set");
        self.end_directive()
    }

    fn ttl(&mut self) -> Result<(), ParseError> {
        let token = self.lexer.read_token()?;
        let text = token.map(|t| t.text).unwrap_or_default();
        if !is_numeric(&text) {
            return Err(ParseError::InvalidTtl(text));
        }
        self.default_ttl = parse_ttl(&text)?;
        debug!(ttl = self.default_ttl, "Default TTL set");
        self.end_directive()
    }

    fn end_directive(&mut self) -> Result<(), ParseError> {
        if !self.lexer.expect_line_end()? {
            return Err(ParseError::ExpectedNewline);
        }
        self.lexer.finish_line()
    }

    fn record(&mut self, indented: bool) -> Result<(), ParseError> {
        let first = self
            .lexer
            .read_token()?
            .ok_or_else(|| ParseError::UnexpectedToken("empty record".to_string()))?;

        // A keyword (or, on an indented line, a TTL) in the name position
        // means the owner was left out.
        let omitted = first.is_bare()
            && (self.class_keyword(&first.text).is_some()
                || RecordType::from_mnemonic(&first.text).is_some()
                || (indented && is_numeric(&first.text)));

        let (owner, mut next) = if omitted {
            let owner = self
                .last_name
                .clone()
                .unwrap_or_else(|| self.origin.clone());
            (owner, Some(first))
        } else {
            let owner = self.absolute(&first.text);
            self.last_name = Some(owner.clone());
            (owner, self.lexer.read_token()?)
        };

        let mut ttl = None;
        let mut class = None;
        while let Some(token) = next.as_ref().filter(|t| t.is_bare()) {
            if ttl.is_none() && is_numeric(&token.text) {
                ttl = Some(parse_ttl(&token.text)?);
            } else if let (None, Some(keyword)) = (class, self.class_keyword(&token.text)) {
                class = Some(keyword);
            } else {
                break;
            }
            next = self.lexer.read_token()?;
        }

        let type_token =
            next.ok_or_else(|| ParseError::UnknownType("missing record type".to_string()))?;
        let record_type = type_token
            .is_bare()
            .then(|| RecordType::from_mnemonic(&type_token.text))
            .flatten()
            .ok_or_else(|| ParseError::UnknownType(type_token.text.clone()))?;

        let rdata = self.rdata(record_type)?;

        if !self.lexer.expect_line_end()? {
            let extra = self.lexer.read_token()?.map(|t| t.text).unwrap_or_default();
            return Err(ParseError::UnexpectedToken(extra));
        }

        let class = class.unwrap_or_default();
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.zone.add(&owner, record_type, class, &rdata, ttl)?;
        self.records_added += 1;

        self.lexer.finish_line()
    }

    /// Collects the presentation RDATA for `record_type`, with embedded
    /// domain names made absolute.
    fn rdata(&mut self, record_type: RecordType) -> Result<String, ParseError> {
        let fields = match record_type {
            RecordType::A | RecordType::PTR => self.fields(record_type, 1)?,
            RecordType::NS | RecordType::CNAME => {
                let mut fields = self.fields(record_type, 1)?;
                fields[0] = self.absolute(&fields[0]);
                fields
            }
            RecordType::MX => {
                let mut fields = self.fields(record_type, 2)?;
                fields[1] = self.absolute(&fields[1]);
                fields
            }
            RecordType::SOA => {
                let mut fields = self.fields(record_type, 7)?;
                fields[0] = self.absolute(&fields[0]);
                fields[1] = self.absolute(&fields[1]);
                fields
            }
            RecordType::TXT => return self.text(),
        };
        Ok(fields.join(" "))
    }

    /// Reads exactly `count` RDATA fields. A quoted token contributes each
    /// of its whitespace-separated words as a field and must be the last
    /// thing on the line.
    fn fields(&mut self, record_type: RecordType, count: usize) -> Result<Vec<String>, ParseError> {
        let mut fields = Vec::with_capacity(count);
        while fields.len() < count {
            let Some(Token { text, quoted }) = self.lexer.read_token()? else {
                break;
            };
            if quoted {
                fields.extend(text.split_whitespace().map(str::to_string));
                break;
            }
            fields.push(text);
        }
        if fields.len() != count {
            return Err(ParseError::MalformedRdata(format!(
                "{} expects {} fields, got {}",
                record_type,
                count,
                fields.len()
            )));
        }
        Ok(fields)
    }

    /// TXT data: one quoted string, or the rest of the line.
    fn text(&mut self) -> Result<String, ParseError> {
        self.lexer.skip_blanks()?;
        if self.lexer.current() == Some('"') {
            return Ok(self.lexer.read_quoted()?.text);
        }
        let text = self.lexer.read_to_line_end()?;
        if text.is_empty() {
            return Err(ParseError::MalformedRdata("TXT without data".to_string()));
        }
        Ok(text)
    }

    fn class_keyword(&self, token: &str) -> Option<RecordClass> {
        let class = RecordClass::from_mnemonic(token)?;
        if class_support_enabled() || class == RecordClass::IN {
            Some(class)
        } else {
            None
        }
    }

    /// `@` is the origin; names without a trailing dot are relative to it.
    fn absolute(&self, name: &str) -> String {
        if name == "@" {
            return self.origin.clone();
        }
        if name.ends_with('.') {
            return name.to_string();
        }
        match self.origin.as_str() {
            "" | "." => format!("{}.", name),
            origin => format!("{}.{}", name, origin),
        }
    }
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn parse_ttl(text: &str) -> Result<u32, ParseError> {
    text.parse()
        .map_err(|_| ParseError::InvalidTtl(text.to_string()))
}
