use dnswire::name::{encode_name, read_name};
use dnswire::*;
use pretty_assertions::assert_eq;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_encode_example_query() {
    init();

    let q = Question::new("example.com", Type::A, Class::Internet);

    assert_eq!(
        q.to_vec().unwrap(),
        hex::decode("076578616d706c6503636f6d0000010001").unwrap()
    );
}

#[test]
fn test_encode_example_header() {
    init();

    let h = Header {
        id: 0x1234,
        flags: 0x0100,
        qd_count: 1,
        ..Default::default()
    };

    assert_eq!(
        h.to_bytes().to_vec(),
        hex::decode("123401000001000000000000").unwrap()
    );
    assert_eq!(h, Header::query(0x1234));
}

#[test]
fn test_encode_full_query() {
    init();

    let m = Message::query(0x1234, "example.com", Type::A, Class::Internet);

    assert_eq!(
        m.to_vec().unwrap(),
        hex::decode("123401000001000000000000076578616d706c6503636f6d0000010001").unwrap()
    );
}

#[test]
fn test_header_round_trip() {
    init();

    let ids = [0, 1, 0x1234, 0x8000, 0xffff];
    let flags = [0, 0x0100, 0x8180, 0x8583, 0xffff];

    for id in ids.iter() {
        for flags in flags.iter() {
            let h = Header {
                id: *id,
                flags: *flags,
                qd_count: *id,
                an_count: *flags,
                ns_count: id ^ flags,
                ar_count: !id,
            };
            assert_eq!(Header::from_slice(&h.to_bytes()), Ok(h));
        }
    }
}

#[test]
fn test_name_round_trip() {
    init();

    // Every label length from 1 to 63.
    for len in 1..=63 {
        let name = format!("{}.example", "a".repeat(len));
        let buf = encode_name(&name).unwrap();

        assert_eq!(buf.len(), len + 10);
        assert_eq!(read_name(&buf, 0), Ok((buf.len(), name)));
    }
}

#[test]
fn test_compression_pointer() {
    init();

    let mut buf = encode_name("mail.example.com").unwrap();
    let ptr = buf.len();
    buf.extend_from_slice(&[0xc0, 0x00]);

    let direct = read_name(&buf, 0).unwrap();
    let pointed = read_name(&buf, ptr).unwrap();

    assert_eq!(pointed.1, direct.1);
    assert_eq!(pointed.0, ptr + 2);
}

#[test]
fn test_record_with_pointer_to_question() {
    init();

    let mut buf = Message::query(1, "example.com", Type::A, Class::Internet)
        .to_vec()
        .unwrap();

    let start = buf.len();
    buf.extend_from_slice(&[
        0xc0, 12, // Pointer to "example.com"
        0, 1, // Type A
        0, 1, // Class IN
        0, 0, 0, 60, // TTL
        0, 4, // RDLength
        127, 0, 0, 1, // RDATA
    ]);

    let (name_end, name) = read_name(&buf, start).unwrap();
    assert_eq!(name, "example.com");
    assert_eq!(name_end, start + 2);

    let (next, r) = Record::from_slice(&buf, start).unwrap();
    assert_eq!(next, buf.len());
    assert_eq!(next, start + 2 + 10 + 4);
    assert_eq!(r.name, "example.com");
    assert_eq!(r.ttl, 60);
    assert_eq!(r.rdata, vec![127, 0, 0, 1]);
}

#[test]
fn test_short_buffers() {
    init();

    let buf = Message::query(1, "example.com", Type::A, Class::Internet)
        .to_vec()
        .unwrap();

    for len in 0..Header::LEN {
        assert!(
            matches!(
                Message::from_slice(&buf[..len]),
                Err(Error::TruncatedInput { .. })
            ),
            "len {}",
            len
        );
    }
}

#[test]
fn test_count_mismatch() {
    init();

    let mut buf = Message::query(1, "example.com", Type::A, Class::Internet)
        .to_vec()
        .unwrap();
    buf[5] = 2; // Claim two questions.

    match Message::from_slice(&buf) {
        Err(Error::SectionCountMismatch {
            section: Section::Question,
            declared: 2,
            found: 1,
        }) => (),
        Err(Error::TruncatedInput { .. }) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_unknown_types_are_kept() {
    init();

    let q = Question {
        name: "example.com".to_string(),
        r#type: 65280,
        class: 7,
    };
    let buf = q.to_vec().unwrap();

    let (_, got) = Question::from_slice(&buf, 0).unwrap();
    assert_eq!(got, q);
    assert_eq!(got.type_name(), "Unknown Type 65280");
    assert_eq!(got.class_name(), "Unknown Class 7");
}

#[test]
fn test_rcode_gate() {
    init();

    let mut m = Message::query(9, "nope.example", Type::A, Class::Internet);
    m.header.flags = 0x8183; // Response, NXDomain

    let buf = m.to_vec().unwrap();
    match Message::from_slice(&buf) {
        Err(Error::NonZeroResponseCode { rcode, header }) => {
            assert_eq!(rcode, 3);
            assert_eq!(header.id, 9);
            assert_eq!(header.response_code(), Some(Rcode::NXDomain));
        }
        other => panic!("unexpected result: {:?}", other),
    }

    let options = ParseOptions {
        allow_error_rcode: true,
        ..Default::default()
    };
    assert_eq!(Message::from_slice_with(&buf, options), Ok(m));
}
