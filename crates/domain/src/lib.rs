//! emdns domain layer: protocol vocabulary, errors and configuration.
pub mod config;
pub mod dns_header;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_header::{DnsHeader, HeaderFlags, ResponseCode, HEADER_LEN};
pub use dns_record::{DnsRecord, RecordClass, RecordType};
pub use errors::{AddError, ParseError, WireError, ZoneFileError};
