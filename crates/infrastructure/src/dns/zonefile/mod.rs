//! Master-file (zone file) loading.

mod lexer;
mod parser;
pub mod source;

pub use parser::ZoneFileParser;
pub use source::{CharSource, ReaderSource, StrSource};

use super::zone::Zone;
use emdns_domain::ZoneFileError;
use std::io::BufRead;

/// Parses in-memory zone text with an empty origin and zero default TTL.
pub fn parse_str(zone: &mut Zone, text: &str) -> Result<u32, ZoneFileError> {
    ZoneFileParser::new().parse(zone, StrSource::new(text))
}

/// Parses zone text from a buffered reader with an empty origin and zero
/// default TTL.
pub fn parse_reader<R: BufRead>(zone: &mut Zone, reader: R) -> Result<u32, ZoneFileError> {
    ZoneFileParser::new().parse(zone, ReaderSource::new(reader))
}
