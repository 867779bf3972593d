use crate::clients::{ClientError, Exchanger};
use crate::{Header, Message, ParseOptions};
use log::debug;
use std::net::SocketAddr;
use std::net::ToSocketAddrs;
use std::net::UdpSocket;
use std::time::Duration;

pub const GOOGLE_IPV4_PRIMARY: &str = "8.8.8.8:53";
pub const GOOGLE_IPV4_SECONDARY: &str = "8.8.4.4:53";
pub const GOOGLE_IPV6_PRIMARY: &str = "[2001:4860:4860::8888]:53";
pub const GOOGLE_IPV6_SECONDARY: &str = "[2001:4860:4860::8844]:53";

pub const GOOGLE: [&str; 4] = [
    GOOGLE_IPV4_PRIMARY,
    GOOGLE_IPV4_SECONDARY,
    GOOGLE_IPV6_PRIMARY,
    GOOGLE_IPV6_SECONDARY,
];

/// A UDP DNS Client.
///
/// Sends a single datagram and waits for a single reply, there are no
/// retries. The reply must carry the same transaction ID as the query.
///
/// # Example
///
/// ```rust,no_run
/// use dnswire::clients::{random_id, Exchanger, UdpClient};
/// use dnswire::{Class, Message, Type};
///
/// fn main() -> Result<(), dnswire::clients::ClientError> {
///     let query = Message::query(random_id(), "example.com", Type::A, Class::Internet);
///
///     let response = UdpClient::new("8.8.8.8:53")?.exchange(&query)?;
///
///     println!("{}", response);
///     Ok(())
/// }
/// ```
///
/// See <https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1>
pub struct UdpClient {
    servers: Vec<SocketAddr>,

    /// How long to wait for the reply. None waits forever.
    pub read_timeout: Option<Duration>,

    /// Replies longer than this are cut short, and will most likely fail to decode.
    pub recv_buffer_size: usize,

    /// Options used to decode the reply.
    pub parse_options: ParseOptions,
}

impl Default for UdpClient {
    fn default() -> Self {
        UdpClient {
            servers: Vec::default(),
            read_timeout: Some(Duration::new(5, 0)),
            recv_buffer_size: 4096,
            parse_options: ParseOptions::default(),
        }
    }
}

impl UdpClient {
    /// Creates a new UdpClient bound to the specific servers. The servers
    /// should be IP addresses, not hostnames, to avoid a recursive lookup.
    pub fn new<A: ToSocketAddrs>(servers: A) -> Result<Self, ClientError> {
        let servers: Vec<SocketAddr> = servers.to_socket_addrs()?.collect();
        if servers.is_empty() {
            return Err(ClientError::NoServers);
        }

        Ok(Self {
            servers,

            ..Default::default()
        })
    }

    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }
}

impl Exchanger for UdpClient {
    /// Sends the query [`Message`] to the first reachable server via UDP and
    /// returns the result.
    fn exchange(&self, query: &Message) -> Result<Message, ClientError> {
        let local = match self.servers.first() {
            Some(SocketAddr::V4(_)) => "0.0.0.0:0",
            Some(SocketAddr::V6(_)) => "[::]:0",
            None => return Err(ClientError::NoServers),
        };

        let socket = UdpSocket::bind(local)?;
        socket.set_read_timeout(self.read_timeout)?;

        // Connect us to the server, meaning recv will only receive directly
        // from the server.
        socket.connect(self.servers.as_slice())?;

        let req = query.to_vec()?;

        debug!(
            "sending {} byte query id {} to {}",
            req.len(),
            query.header.id,
            socket.peer_addr()?
        );
        socket.send(&req)?;

        let mut buf = vec![0; self.recv_buffer_size];
        let len = socket.recv(&mut buf)?;
        let buf = &buf[0..len];

        debug!("received {} byte response", len);

        // Match the ID before anything else, so a stray reply is never
        // reported as a decode error.
        let header = Header::from_slice(buf)?;
        if header.id != query.header.id {
            return Err(ClientError::IdMismatch {
                expected: query.header.id,
                got: header.id,
            });
        }

        Ok(Message::from_slice_with(buf, self.parse_options)?)
    }
}
