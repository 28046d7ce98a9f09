//! Type-specific RDATA encoders.
//!
//! Each encoder turns the presentation form of a record's data into the
//! exact bytes placed after RDLENGTH in an answer.

use super::wire::encode_name;
use emdns_domain::{RecordType, WireError};

pub const MAX_TEXT_LEN: usize = 255;

pub fn encode_rdata(record_type: RecordType, text: &str) -> Result<Vec<u8>, WireError> {
    match record_type {
        RecordType::A => encode_a(text),
        RecordType::NS | RecordType::CNAME | RecordType::PTR => encode_name(text.trim()),
        RecordType::MX => encode_mx(text),
        RecordType::SOA => encode_soa(text),
        RecordType::TXT => encode_txt(text),
    }
}

/// Dotted quad to four bytes in network order.
///
/// Each octet is one to three decimal digits no greater than 255; leading
/// zeros are accepted, so `010` is ten.
pub fn encode_a(text: &str) -> Result<Vec<u8>, WireError> {
    let invalid = || WireError::InvalidAddress(text.to_string());
    let octets: Vec<&str> = text.trim().split('.').collect();
    if octets.len() != 4 {
        return Err(invalid());
    }
    octets
        .into_iter()
        .map(|octet| {
            if octet.is_empty() || octet.len() > 3 || !octet.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            octet.parse::<u8>().map_err(|_| invalid())
        })
        .collect()
}

/// `"<preference> <exchange>"`
pub fn encode_mx(text: &str) -> Result<Vec<u8>, WireError> {
    let fields = split_fields(text, 2, "MX")?;
    let preference: u16 = fields[0].parse().map_err(|_| {
        WireError::MalformedRdata(format!("MX preference is not a number: {}", fields[0]))
    })?;

    let exchange = encode_name(fields[1])?;
    let mut rdata = Vec::with_capacity(2 + exchange.len());
    rdata.extend_from_slice(&preference.to_be_bytes());
    rdata.extend_from_slice(&exchange);
    Ok(rdata)
}

/// `"<mname> <rname> <serial> <refresh> <retry> <expire> <minimum>"`
pub fn encode_soa(text: &str) -> Result<Vec<u8>, WireError> {
    let fields = split_fields(text, 7, "SOA")?;
    let mname = encode_name(fields[0])?;
    let rname = encode_name(fields[1])?;

    let mut rdata = Vec::with_capacity(mname.len() + rname.len() + 20);
    rdata.extend_from_slice(&mname);
    rdata.extend_from_slice(&rname);
    for field in &fields[2..] {
        let value: u32 = field.parse().map_err(|_| {
            WireError::MalformedRdata(format!("SOA field is not a number: {}", field))
        })?;
        rdata.extend_from_slice(&value.to_be_bytes());
    }
    Ok(rdata)
}

/// A single character-string: one length byte and the raw text.
pub fn encode_txt(text: &str) -> Result<Vec<u8>, WireError> {
    let bytes = text.as_bytes();
    if bytes.len() > MAX_TEXT_LEN {
        return Err(WireError::TextTooLong(bytes.len()));
    }
    let mut rdata = Vec::with_capacity(bytes.len() + 1);
    rdata.push(bytes.len() as u8);
    rdata.extend_from_slice(bytes);
    Ok(rdata)
}

/// Splits on whitespace and requires exactly `count` fields; a trailing
/// extra token is rejected rather than ignored.
fn split_fields<'a>(text: &'a str, count: usize, kind: &str) -> Result<Vec<&'a str>, WireError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != count {
        return Err(WireError::MalformedRdata(format!(
            "{} expects {} fields, got {}: {}",
            kind,
            count,
            fields.len(),
            text
        )));
    }
    Ok(fields)
}
