//! A DNS message wire format codec, as defined by [rfc1035].
//!
//! Decodes UDP payloads into a [`Message`] (header, questions and resource
//! records, following name compression pointers) and encodes messages back
//! into bytes ready to send. RDATA is kept as opaque bytes.
//!
//! ```rust
//! use dnswire::{Class, Message, Type};
//!
//! let query = Message::query(0x1234, "example.com", Type::A, Class::Internet);
//! let buf = query.to_vec().unwrap();
//!
//! assert_eq!(Message::from_slice(&buf).unwrap(), query);
//! ```
//!
//! [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035

pub mod display;
mod dns;
mod errors;
mod io;
pub mod name;
pub mod types;

#[cfg(feature = "clients")]
pub mod clients;

#[macro_use]
extern crate num_derive;

pub use crate::errors::{Error, Result, Section};
pub use crate::types::*;

// Pull up the various types that should be on the front page of the docs.
#[doc(inline)]
pub use crate::types::Header;
#[doc(inline)]
pub use crate::types::Message;
#[doc(inline)]
pub use crate::types::Question;
#[doc(inline)]
pub use crate::types::Record;
