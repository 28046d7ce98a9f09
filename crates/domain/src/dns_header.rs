use std::fmt;

/// Size of the fixed message header.
pub const HEADER_LEN: usize = 12;

/// Bits of the header flags word.
pub struct HeaderFlags;

impl HeaderFlags {
    pub const QR: u16 = 0x8000;
    pub const AA: u16 = 0x0400;
    pub const TC: u16 = 0x0200;
    pub const RD: u16 = 0x0100;
    pub const RA: u16 = 0x0080;
    pub const OPCODE_MASK: u16 = 0x7800;
    pub const RCODE_MASK: u16 = 0x000F;

    pub fn opcode(flags: u16) -> u8 {
        ((flags & Self::OPCODE_MASK) >> 11) as u8
    }

    pub fn rcode(flags: u16) -> Option<ResponseCode> {
        ResponseCode::from_u16(flags & Self::RCODE_MASK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
}

impl ResponseCode {
    pub fn to_u16(&self) -> u16 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormatError => 1,
            ResponseCode::ServerFailure => 2,
            ResponseCode::NameError => 3,
            ResponseCode::NotImplemented => 4,
            ResponseCode::Refused => 5,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            0 => Some(ResponseCode::NoError),
            1 => Some(ResponseCode::FormatError),
            2 => Some(ResponseCode::ServerFailure),
            3 => Some(ResponseCode::NameError),
            4 => Some(ResponseCode::NotImplemented),
            5 => Some(ResponseCode::Refused),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormatError => "FORMERR",
            ResponseCode::ServerFailure => "SERVFAIL",
            ResponseCode::NameError => "NXDOMAIN",
            ResponseCode::NotImplemented => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The fixed 12-byte message header, all fields big-endian on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DnsHeader {
    pub id: u16,
    pub flags: u16,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl DnsHeader {
    /// Returns `None` when `buf` is shorter than [`HEADER_LEN`].
    pub fn parse(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_LEN {
            return None;
        }
        let field = |i: usize| u16::from_be_bytes([buf[i], buf[i + 1]]);
        Some(Self {
            id: field(0),
            flags: field(2),
            qdcount: field(4),
            ancount: field(6),
            nscount: field(8),
            arcount: field(10),
        })
    }

    /// An authoritative response header for `id` with all counts zeroed.
    pub fn authoritative_response(id: u16) -> Self {
        Self {
            id,
            flags: HeaderFlags::QR | HeaderFlags::AA,
            ..Self::default()
        }
    }

    pub fn with_rcode(mut self, rcode: ResponseCode) -> Self {
        self.flags = (self.flags & !HeaderFlags::RCODE_MASK) | rcode.to_u16();
        self
    }

    pub fn rcode(&self) -> Option<ResponseCode> {
        HeaderFlags::rcode(self.flags)
    }

    pub fn is_response(&self) -> bool {
        self.flags & HeaderFlags::QR != 0
    }

    pub fn is_authoritative(&self) -> bool {
        self.flags & HeaderFlags::AA != 0
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        let fields = [
            self.id,
            self.flags,
            self.qdcount,
            self.ancount,
            self.nscount,
            self.arcount,
        ];
        for (i, value) in fields.iter().enumerate() {
            buf[i * 2..i * 2 + 2].copy_from_slice(&value.to_be_bytes());
        }
        buf
    }
}
