//! Stateless query answering.
//!
//! One call per datagram: decode the header and first question, look the
//! key up in the [`Zone`], and build the response directly into the
//! caller's buffer without ever writing past its capacity.

use super::wire::{WireReader, WireWriter};
use super::zone::{class_support_enabled, Zone};
use emdns_domain::{
    DnsHeader, DnsRecord, RecordClass, RecordType, ResponseCode, WireError, HEADER_LEN,
};
use tracing::{debug, warn};

/// The first question of a query, name kept as raw wire bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question<'a> {
    pub name: &'a [u8],
    pub qtype: u16,
    pub qclass: u16,
}

impl<'a> Question<'a> {
    /// Reads the question that follows the header. Questions beyond the
    /// first are never looked at.
    pub fn parse(request: &'a [u8]) -> Result<Self, WireError> {
        let mut reader = WireReader::at(request, HEADER_LEN);
        let name = reader.read_name_bytes()?;
        let qtype = reader.read_u16()?;
        let qclass = reader.read_u16()?;
        Ok(Self {
            name,
            qtype,
            qclass,
        })
    }
}

/// Answers `request` into `response` and returns the response length.
///
/// At most `capacity` bytes (clamped to `response.len()`) are written. When
/// the matching answers do not all fit, the answers that do fit are sent and
/// `ancount` counts only those. A query with no answers, or a request too
/// short to hold a header and question, gets a header-only NameError reply.
/// Returns 0 only when the capacity cannot hold a header.
pub fn resolve(zone: &Zone, request: &[u8], response: &mut [u8], capacity: u16) -> u16 {
    let mut writer = WireWriter::new(response, capacity as usize);
    if writer.capacity() < HEADER_LEN {
        warn!(
            capacity = writer.capacity(),
            "Response buffer cannot hold a DNS header"
        );
        return 0;
    }

    let id = match DnsHeader::parse(request) {
        Some(header) => header.id,
        None => {
            debug!(len = request.len(), "Request shorter than a DNS header");
            let id = match request {
                [hi, lo, ..] => u16::from_be_bytes([*hi, *lo]),
                _ => 0,
            };
            return name_error(&mut writer, DnsHeader::authoritative_response(id));
        }
    };

    let mut header = DnsHeader::authoritative_response(id);
    if writer.put_slice(&header.to_bytes()).is_err() {
        return 0;
    }

    let question = match Question::parse(request) {
        Ok(question) => question,
        Err(e) => {
            debug!(id, error = %e, "Malformed question");
            return name_error(&mut writer, header);
        }
    };

    let answers = match lookup_key(&question) {
        Some((record_type, class)) => {
            write_answers(zone, &question, record_type, class, &mut writer)
        }
        None => 0,
    };

    debug!(
        id,
        qtype = question.qtype,
        qclass = question.qclass,
        answers,
        "Query resolved"
    );

    if answers == 0 {
        return name_error(&mut writer, header);
    }

    header.ancount = answers;
    finish(&mut writer, header)
}

/// Maps the question onto a store key, or `None` when nothing can match.
fn lookup_key(question: &Question<'_>) -> Option<(RecordType, RecordClass)> {
    let record_type = RecordType::from_u16(question.qtype)?;
    let class = RecordClass::from_u16(question.qclass)?;
    if class_support_enabled() || class == RecordClass::IN {
        Some((record_type, class))
    } else {
        None
    }
}

fn write_answers(
    zone: &Zone,
    question: &Question<'_>,
    record_type: RecordType,
    class: RecordClass,
    writer: &mut WireWriter<'_>,
) -> u16 {
    let mut written: u16 = 0;
    for record in zone.matching(question.name, record_type, class) {
        if written == u16::MAX {
            break;
        }
        if let Err(e) = write_answer(question.name, record, writer) {
            debug!(written, error = %e, "Answer set truncated to fit response buffer");
            break;
        }
        written += 1;
    }
    written
}

/// Appends one answer RR, writing nothing at all if it does not fit.
///
/// `name` is the question's name, which matched `record.domain` byte for
/// byte.
fn write_answer(
    name: &[u8],
    record: &DnsRecord,
    writer: &mut WireWriter<'_>,
) -> Result<(), WireError> {
    writer.ensure(record.wire_len())?;
    writer.put_slice(name)?;
    writer.put_u16(record.record_type.to_u16())?;
    writer.put_u16(record.class.to_u16())?;
    writer.put_u32(record.ttl)?;
    writer.put_u16(record.rdlength())?;
    writer.put_slice(&record.rdata)
}

fn name_error(writer: &mut WireWriter<'_>, header: DnsHeader) -> u16 {
    writer.truncate(0);
    let header = header.with_rcode(ResponseCode::NameError);
    match writer.put_slice(&header.to_bytes()) {
        Ok(()) => writer.position() as u16,
        Err(_) => 0,
    }
}

/// Rewrites the placeholder header once the answer count is known.
fn finish(writer: &mut WireWriter<'_>, header: DnsHeader) -> u16 {
    match writer.overwrite(0, &header.to_bytes()) {
        Ok(()) => writer.position() as u16,
        Err(_) => 0,
    }
}
