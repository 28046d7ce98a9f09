use crate::dns_record::RecordClass;
use thiserror::Error;

/// Failures of the wire-format primitives and RDATA encoders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("Domain name too long (63-byte label or 255-byte name limit): {0}")]
    NameTooLong(String),

    #[error("Empty label in domain name: {0}")]
    EmptyLabel(String),

    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("Malformed RDATA: {0}")]
    MalformedRdata(String),

    #[error("Character string exceeds 255 bytes ({0} bytes)")]
    TextTooLong(usize),

    #[error("Message truncated at offset {0}")]
    Truncated(usize),

    #[error("Compressed name at offset {0} is not supported")]
    CompressionUnsupported(usize),

    #[error("Buffer overflow: need {needed} bytes, {remaining} remaining")]
    BufferOverflow { needed: usize, remaining: usize },
}

/// Failures of adding a record to a zone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddError {
    #[error("Out of memory while growing the zone")]
    OutOfMemory,

    #[error("Invalid owner name: {0}")]
    InvalidName(WireError),

    #[error("Records cannot be stored under class {0}")]
    UnsupportedClass(RecordClass),

    #[error("Malformed RDATA: {0}")]
    MalformedRdata(WireError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown directive: ${0}")]
    UnknownDirective(String),

    #[error("Unsupported directive: ${0}")]
    UnsupportedDirective(String),

    #[error("Expected end of line after directive")]
    ExpectedNewline,

    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    #[error("Unknown record type: {0}")]
    UnknownType(String),

    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),

    #[error("Malformed RDATA: {0}")]
    MalformedRdata(String),

    #[error("Unterminated quoted string")]
    UnterminatedString,

    #[error("Zone rejected record: {0}")]
    Store(AddError),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<AddError> for ParseError {
    fn from(err: AddError) -> Self {
        match err {
            AddError::MalformedRdata(e) => ParseError::MalformedRdata(e.to_string()),
            other => ParseError::Store(other),
        }
    }
}

/// A master-file parse that stopped early.
///
/// Records added before the failing line stay in the zone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {error} ({records_added} records added before failure)")]
pub struct ZoneFileError {
    pub error: ParseError,

    pub line: u32,

    pub records_added: u32,
}
