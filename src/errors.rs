use crate::types::Header;
use strum_macros::Display;
use thiserror::Error;

/// A simple type alias so as to DRY.
pub type Result<T> = std::result::Result<T, Error>;

/// The sections of a DNS message, in wire order.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
pub enum Section {
    #[strum(serialize = "question")]
    Question,
    #[strum(serialize = "answer")]
    Answer,
    #[strum(serialize = "authority")]
    Authority,
    #[strum(serialize = "additional")]
    Additional,
}

/// Errors returned while encoding or decoding DNS messages.
///
/// Decoding stops at the first error; no partially filled structure is ever
/// returned alongside one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The buffer ended before a field was complete.
    #[error("truncated input: needed {needed} bytes at offset {offset}, but only {available} remain")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A label length byte (or the pointer it starts) could not be accepted.
    #[error("invalid label at offset {offset}: {reason}")]
    InvalidLabelLength { offset: usize, reason: &'static str },

    /// The encoder was given an empty label, or one over 63 bytes.
    #[error("label '{label}' must be between 1 and 63 bytes long")]
    LabelTooLong { label: String },

    /// The encoder was given a name that would take more than 255 bytes on the wire.
    #[error("domain name is {len} bytes long, longer than 255")]
    NameTooLong { len: usize },

    /// The encoder was given RDATA that does not fit a 16-bit length.
    #[error("rdata is {len} bytes long, longer than 65535")]
    RdataTooLong { len: usize },

    /// The header counts disagree with what the buffer contains.
    #[error("{section} section declared {declared} entries, but found {found}")]
    SectionCountMismatch {
        section: Section,
        declared: usize,
        found: usize,
    },

    /// The response carried a non-zero RCODE. The decoded header is kept so
    /// callers can still inspect it.
    #[error("response code {rcode} is not NoError")]
    NonZeroResponseCode { rcode: u8, header: Header },
}

impl Error {
    pub(crate) fn truncated(offset: usize, needed: usize, len: usize) -> Error {
        Error::TruncatedInput {
            offset,
            needed,
            available: len.saturating_sub(offset),
        }
    }
}
