#![cfg(feature = "udp")]

use dnswire::clients::{random_id, ClientError, Exchanger, UdpClient};
use dnswire::*;
use pretty_assertions::assert_eq;
use std::net::UdpSocket;
use std::thread;
use std::time::Duration;

/// Starts a server that answers a single query, letting `respond` turn the
/// query into a response. Returns the address it listens on.
fn serve_once<F>(respond: F) -> (String, thread::JoinHandle<()>)
where
    F: FnOnce(Message) -> Message + Send + 'static,
{
    let socket = UdpSocket::bind("127.0.0.1:0").expect("couldn't bind to address");
    let addr = socket.local_addr().unwrap().to_string();

    let handle = thread::spawn(move || {
        let mut buf = [0; 512];
        let (len, src) = socket.recv_from(&mut buf).expect("no query");

        let query = Message::from_slice(&buf[0..len]).expect("invalid query");
        let resp = respond(query).to_vec().expect("failed to write response");

        socket.send_to(&resp, src).expect("could not send response");
    });

    (addr, handle)
}

fn answer(mut m: Message) -> Message {
    m.header.flags = 0x8180;
    m.answers.push(Record {
        name: m.questions[0].name.clone(),
        r#type: Type::A.into(),
        class: Class::Internet.into(),
        ttl: 60,
        rdata: vec![127, 0, 0, 1],
    });
    m
}

fn client(addr: &str) -> UdpClient {
    let mut client = UdpClient::new(addr).unwrap();
    client.read_timeout = Some(Duration::from_secs(5));
    client
}

#[test]
fn test_exchange() {
    let _ = env_logger::builder().is_test(true).try_init();

    let (addr, handle) = serve_once(answer);

    let query = Message::query(random_id(), "example.com", Type::A, Class::Internet);
    let resp = client(&addr).exchange(&query).unwrap();
    handle.join().unwrap();

    assert_eq!(resp.header.id, query.header.id);
    assert_eq!(resp.header.qr(), QR::Response);
    assert_eq!(resp.questions, query.questions);
    assert_eq!(resp.answers.len(), 1);
    assert_eq!(resp.answers[0].rdata_display(), "127.0.0.1");
}

#[test]
fn test_exchange_id_mismatch() {
    let (addr, handle) = serve_once(|m| {
        let mut m = answer(m);
        m.header.id = m.header.id.wrapping_add(1);
        m
    });

    let query = Message::query(0x1000, "example.com", Type::A, Class::Internet);
    let err = client(&addr).exchange(&query).unwrap_err();
    handle.join().unwrap();

    match err {
        ClientError::IdMismatch { expected, got } => {
            assert_eq!(expected, 0x1000);
            assert_eq!(got, 0x1001);
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_exchange_error_rcode() {
    let nxdomain = |mut m: Message| {
        m.header.flags = 0x8183;
        m
    };

    let query = Message::query(0x2000, "nope.example", Type::A, Class::Internet);

    // Rejected by default.
    let (addr, handle) = serve_once(nxdomain);
    let err = client(&addr).exchange(&query).unwrap_err();
    handle.join().unwrap();

    match err {
        ClientError::Codec(Error::NonZeroResponseCode { rcode: 3, .. }) => (),
        other => panic!("unexpected error: {}", other),
    }

    // But can be inspected when asked for.
    let (addr, handle) = serve_once(nxdomain);
    let mut c = client(&addr);
    c.parse_options.allow_error_rcode = true;
    let resp = c.exchange(&query).unwrap();
    handle.join().unwrap();

    assert_eq!(resp.header.response_code(), Some(Rcode::NXDomain));
    assert!(resp.answers.is_empty());
}

#[test]
fn test_no_servers() {
    let servers: &[std::net::SocketAddr] = &[];
    assert!(matches!(
        UdpClient::new(servers),
        Err(ClientError::NoServers)
    ));
}
