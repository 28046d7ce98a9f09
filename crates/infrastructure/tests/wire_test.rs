use emdns_domain::{RecordType, WireError};
use emdns_infrastructure::dns::rdata::{encode_a, encode_mx, encode_rdata, encode_soa, encode_txt};
use emdns_infrastructure::dns::{decode_name, encode_name};

#[test]
fn test_encode_name_layout() {
    assert_eq!(
        encode_name("www.domain.com").unwrap(),
        b"\x03www\x06domain\x03com\x00".to_vec()
    );
}

#[test]
fn test_trailing_dot_is_root_label() {
    assert_eq!(
        encode_name("domain.com.").unwrap(),
        encode_name("domain.com").unwrap()
    );
    assert_eq!(encode_name("").unwrap(), vec![0]);
    assert_eq!(encode_name(".").unwrap(), vec![0]);
}

#[test]
fn test_name_round_trip() {
    let long_label = "a".repeat(63);
    let near_limit = [long_label.as_str(); 3].join(".") + "." + &"b".repeat(61);
    for name in [
        "domain.com",
        "a.b.c.d.e.f",
        "mail2.domain.com",
        long_label.as_str(),
        near_limit.as_str(),
    ] {
        let wire = encode_name(name).unwrap();
        let (decoded, consumed) = decode_name(&wire, 0).unwrap();
        assert_eq!(decoded, name);
        assert_eq!(consumed, wire.len());
    }
}

#[test]
fn test_decode_at_offset() {
    let mut buf = vec![0xAA, 0xBB];
    buf.extend_from_slice(&encode_name("x.org").unwrap());
    buf.push(0xCC);
    let (name, consumed) = decode_name(&buf, 2).unwrap();
    assert_eq!(name, "x.org");
    assert_eq!(consumed, 7);
}

#[test]
fn test_label_over_63_is_name_too_long() {
    let name = format!("{}.com", "a".repeat(64));
    assert!(matches!(encode_name(&name), Err(WireError::NameTooLong(_))));
}

#[test]
fn test_name_over_255_is_name_too_long() {
    let label = "a".repeat(63);
    let name = [label.as_str(); 4].join(".");
    assert!(matches!(encode_name(&name), Err(WireError::NameTooLong(_))));
}

#[test]
fn test_empty_interior_label_rejected() {
    assert!(matches!(
        encode_name("domain..com"),
        Err(WireError::EmptyLabel(_))
    ));
}

#[test]
fn test_decode_rejects_compression() {
    let buf = [0xC0, 0x0C];
    assert_eq!(
        decode_name(&buf, 0),
        Err(WireError::CompressionUnsupported(0))
    );
}

#[test]
fn test_encode_a() {
    assert_eq!(encode_a("1.2.3.4").unwrap(), vec![1, 2, 3, 4]);
    assert_eq!(encode_a("255.0.0.1").unwrap(), vec![255, 0, 0, 1]);
}

#[test]
fn test_encode_a_rejects_bad_addresses() {
    for text in ["1.2.3", "1.2.3.256", "a.b.c.d", ""] {
        assert!(
            matches!(encode_a(text), Err(WireError::InvalidAddress(_))),
            "{:?} should be rejected",
            text
        );
    }
}

#[test]
fn test_encode_a_accepts_zero_padded_octets() {
    assert_eq!(encode_a("192.168.001.010").unwrap(), vec![192, 168, 1, 10]);
    assert_eq!(encode_a("010.0.0.1").unwrap(), vec![10, 0, 0, 1]);
    assert!(matches!(
        encode_a("1.2.3.0256"),
        Err(WireError::InvalidAddress(_))
    ));
    assert!(matches!(
        encode_a("1..2.3"),
        Err(WireError::InvalidAddress(_))
    ));
    assert!(matches!(
        encode_a("1.2.3.+4"),
        Err(WireError::InvalidAddress(_))
    ));
}

#[test]
fn test_encode_mx() {
    let rdata = encode_mx("10 mail.domain.com").unwrap();
    assert_eq!(&rdata[..2], &[0x00, 0x0A]);
    assert_eq!(&rdata[2..], encode_name("mail.domain.com").unwrap().as_slice());
}

#[test]
fn test_encode_mx_malformed() {
    assert!(matches!(
        encode_mx("ten mail.domain.com"),
        Err(WireError::MalformedRdata(_))
    ));
    assert!(matches!(encode_mx("10"), Err(WireError::MalformedRdata(_))));
    assert!(matches!(
        encode_mx("70000 mail.domain.com"),
        Err(WireError::MalformedRdata(_))
    ));
    assert!(matches!(
        encode_mx("10 mail.domain.com extra"),
        Err(WireError::MalformedRdata(_))
    ));
}

#[test]
fn test_encode_soa() {
    let rdata = encode_soa("ns1.domain.com admin.domain.com 1 7200 3600 1209600 300").unwrap();
    let mname = encode_name("ns1.domain.com").unwrap();
    let rname = encode_name("admin.domain.com").unwrap();

    assert_eq!(rdata.len(), mname.len() + rname.len() + 20);
    assert_eq!(&rdata[..mname.len()], mname.as_slice());
    let numbers = &rdata[mname.len() + rname.len()..];
    let values: Vec<u32> = numbers
        .chunks(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    assert_eq!(values, vec![1, 7200, 3600, 1209600, 300]);
}

#[test]
fn test_encode_soa_malformed() {
    assert!(matches!(
        encode_soa("ns1 admin 1 2 3 4"),
        Err(WireError::MalformedRdata(_))
    ));
    assert!(matches!(
        encode_soa("ns1 admin 1 2 x 4 5"),
        Err(WireError::MalformedRdata(_))
    ));
    assert!(matches!(
        encode_soa("ns1 admin 1 2 3 4 5 6"),
        Err(WireError::MalformedRdata(_))
    ));
}

#[test]
fn test_encode_txt() {
    let rdata = encode_txt("v=spf1 mx -all").unwrap();
    assert_eq!(rdata[0], 14);
    assert_eq!(&rdata[1..], b"v=spf1 mx -all");
    assert_eq!(encode_txt("").unwrap(), vec![0]);
}

#[test]
fn test_encode_txt_limit() {
    assert_eq!(encode_txt(&"x".repeat(255)).unwrap().len(), 256);
    assert_eq!(
        encode_txt(&"x".repeat(256)),
        Err(WireError::TextTooLong(256))
    );
}

#[test]
fn test_name_bearing_types_share_encoding() {
    let expected = encode_name("ns1.domain.com").unwrap();
    for record_type in [RecordType::NS, RecordType::CNAME, RecordType::PTR] {
        assert_eq!(encode_rdata(record_type, "ns1.domain.com").unwrap(), expected);
    }
}
