pub mod rdata;
pub mod resolver;
pub mod wire;
pub mod zone;
pub mod zonefile;

pub use resolver::{resolve, Question};
pub use wire::{decode_name, encode_name, WireReader, WireWriter};
pub use zone::{class_support_enabled, RecordHandle, Zone};
pub use zonefile::{CharSource, ReaderSource, StrSource, ZoneFileParser};
