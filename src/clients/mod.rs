//! Sending queries and receiving responses.
//!
//! The codec itself never touches the network; these are the collaborators
//! that move encoded messages to and from a DNS server.

use crate::Message;
use std::io;
use thiserror::Error;

#[cfg(feature = "udp")]
pub use self::udp::UdpClient;

#[cfg(feature = "udp")]
pub mod udp;

/// Errors returned by an [`Exchanger`].
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Codec(#[from] crate::Error),

    /// The server answered with a different transaction ID than was asked.
    #[error("response id {got} does not match query id {expected}")]
    IdMismatch { expected: u16, got: u16 },

    #[error("no servers were given")]
    NoServers,
}

/// Exchanger takes a query and returns a response.
pub trait Exchanger {
    fn exchange(&self, query: &Message) -> Result<Message, ClientError>;
}

/// Returns a new random transaction ID.
///
/// Uses the thread local cryptographically secure RNG, so IDs can't be
/// predicted by an off-path attacker.
pub fn random_id() -> u16 {
    rand::random()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_id() {
        // 32 draws from 65536 values all being the same is vanishingly unlikely.
        let ids: Vec<u16> = (0..32).map(|_| random_id()).collect();
        assert!(ids.iter().any(|id| *id != ids[0]));
    }
}
