use emdns_domain::{DnsHeader, HeaderFlags, ResponseCode, HEADER_LEN};

#[test]
fn test_header_parse_layout() {
    let buf = [
        0x12, 0x34, // ID
        0x81, 0x80, // flags
        0x00, 0x01, // QDCOUNT
        0x00, 0x02, // ANCOUNT
        0x00, 0x03, // NSCOUNT
        0x00, 0x04, // ARCOUNT
        0xFF, // trailing byte is ignored
    ];
    let header = DnsHeader::parse(&buf).unwrap();
    assert_eq!(header.id, 0x1234);
    assert_eq!(header.flags, 0x8180);
    assert_eq!(
        (header.qdcount, header.ancount, header.nscount, header.arcount),
        (1, 2, 3, 4)
    );
    assert_eq!(header.to_bytes(), buf[..HEADER_LEN]);
}

#[test]
fn test_header_too_short() {
    assert!(DnsHeader::parse(&[0u8; 11]).is_none());
}

#[test]
fn test_authoritative_response() {
    let header = DnsHeader::authoritative_response(0xABCD);
    assert_eq!(header.flags, 0x8400);
    assert!(header.is_response());
    assert!(header.is_authoritative());
    assert_eq!(header.rcode(), Some(ResponseCode::NoError));
    assert_eq!(header.to_bytes()[4..], [0u8; 8]);
}

#[test]
fn test_with_rcode_replaces_previous_code() {
    let header = DnsHeader::authoritative_response(1)
        .with_rcode(ResponseCode::Refused)
        .with_rcode(ResponseCode::NameError);
    assert_eq!(header.flags, HeaderFlags::QR | HeaderFlags::AA | 3);
    assert_eq!(header.rcode(), Some(ResponseCode::NameError));
}

#[test]
fn test_flag_bits() {
    assert_eq!(HeaderFlags::opcode(0x7800), 15);
    assert_eq!(HeaderFlags::opcode(0x0100), 0);
    assert_eq!(HeaderFlags::rcode(0x8183), Some(ResponseCode::NameError));
    assert_eq!(HeaderFlags::rcode(0x000F), None);
}

#[test]
fn test_response_codes() {
    let codes = [
        ResponseCode::NoError,
        ResponseCode::FormatError,
        ResponseCode::ServerFailure,
        ResponseCode::NameError,
        ResponseCode::NotImplemented,
        ResponseCode::Refused,
    ];
    for (value, code) in codes.iter().enumerate() {
        assert_eq!(code.to_u16(), value as u16);
        assert_eq!(ResponseCode::from_u16(value as u16), Some(*code));
    }
}
