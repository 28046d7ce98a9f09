#![allow(dead_code)]
use emdns_domain::{DnsHeader, RecordClass, RecordType, HEADER_LEN};
use emdns_infrastructure::dns::{decode_name, resolve, WireReader, Zone};

/// Hand-assembled query datagrams.
pub struct QueryBuilder {
    id: u16,
    flags: u16,
    name: String,
    qtype: u16,
    qclass: u16,
}

impl QueryBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            id: 0x1234,
            flags: 0x0100,
            name: name.to_string(),
            qtype: RecordType::A.to_u16(),
            qclass: RecordClass::IN.to_u16(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn record_type(mut self, record_type: RecordType) -> Self {
        self.qtype = record_type.to_u16();
        self
    }

    pub fn qtype(mut self, qtype: u16) -> Self {
        self.qtype = qtype;
        self
    }

    pub fn class(mut self, class: RecordClass) -> Self {
        self.qclass = class.to_u16();
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
        for label in self.name.split('.').filter(|l| !l.is_empty()) {
            buf.push(label.len() as u8);
            buf.extend_from_slice(label.as_bytes());
        }
        buf.push(0x00);
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_be_bytes());
        buf
    }
}

/// One decoded answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub name: String,
    pub rtype: u16,
    pub class: u16,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

/// Splits a response into header and answers, panicking on anything the
/// resolver should never produce.
pub fn parse_response(buf: &[u8]) -> (DnsHeader, Vec<Answer>) {
    let header = DnsHeader::parse(buf).expect("response shorter than a header");
    assert_eq!(header.qdcount, 0, "question section is not echoed");

    let mut reader = WireReader::at(buf, HEADER_LEN);
    let mut answers = Vec::new();
    for _ in 0..header.ancount {
        let (name, _) = decode_name(buf, reader.position()).unwrap();
        reader.read_name_bytes().unwrap();
        let rtype = reader.read_u16().unwrap();
        let class = reader.read_u16().unwrap();
        let ttl = reader.read_u32().unwrap();
        let rdlength = reader.read_u16().unwrap() as usize;
        let rdata = reader.read_slice(rdlength).unwrap().to_vec();
        answers.push(Answer {
            name,
            rtype,
            class,
            ttl,
            rdata,
        });
    }
    assert_eq!(reader.remaining(), 0, "trailing bytes after answers");
    (header, answers)
}

/// Resolves `query` against `zone` with the given capacity.
pub fn ask(zone: &Zone, query: &[u8], capacity: u16) -> Vec<u8> {
    let mut response = vec![0u8; capacity as usize];
    let len = resolve(zone, query, &mut response, capacity);
    response.truncate(len as usize);
    response
}

/// Zone with the sample records the responder ships with.
pub fn sample_zone() -> Zone {
    let mut zone = Zone::new();
    zone.add("domain.com", RecordType::A, RecordClass::IN, "12.34.56.78", 300)
        .unwrap();
    zone.add("www.domain.com", RecordType::A, RecordClass::IN, "12.34.56.79", 300)
        .unwrap();
    zone.add("domain.com", RecordType::MX, RecordClass::IN, "10 mail.domain.com", 3600)
        .unwrap();
    zone.add("domain.com", RecordType::MX, RecordClass::IN, "20 mail2.domain.com", 3600)
        .unwrap();
    zone.add("domain.com", RecordType::TXT, RecordClass::IN, "v=spf1 mx -all", 60)
        .unwrap();
    zone
}
