use super::{RecordClass, RecordType};

/// One resource record as stored in a zone.
///
/// `domain` and `rdata` are kept in wire format so answers can be copied
/// straight into a response. A record is never mutated once stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub domain: Vec<u8>,

    pub record_type: RecordType,

    pub class: RecordClass,

    pub ttl: u32,

    pub rdata: Vec<u8>,
}

impl DnsRecord {
    pub fn new(
        domain: Vec<u8>,
        record_type: RecordType,
        class: RecordClass,
        ttl: u32,
        rdata: Vec<u8>,
    ) -> Self {
        Self {
            domain,
            record_type,
            class,
            ttl,
            rdata,
        }
    }

    /// RDATA length as written into the RDLENGTH field.
    ///
    /// Encoders cap RDATA well below `u16::MAX`, so the length always fits.
    pub fn rdlength(&self) -> u16 {
        self.rdata.len() as u16
    }

    pub fn matches_key(&self, domain: &[u8], record_type: RecordType, class: RecordClass) -> bool {
        self.record_type == record_type && self.class == class && self.domain == domain
    }

    /// Size of this record in the answer section of a response.
    pub fn wire_len(&self) -> usize {
        self.domain.len() + 10 + self.rdata.len()
    }
}
