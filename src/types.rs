use num_traits::FromPrimitive;
use strum_macros::{Display, EnumIter, EnumString};

/// The fixed 12 byte header found at the start of every DNS message.
///
/// The flags are kept as the raw 16-bit value, so a header always encodes back
/// to exactly the bytes it was decoded from. Use the accessors to pick the
/// individual fields out of the bitfield.
///
/// ```text
///   0  1  2  3  4  5  6  7  8  9 10 11 12 13 14 15
/// +--+-----------+--+--+--+--+--------+-----------+
/// |QR|  Opcode   |AA|TC|RD|RA|   Z    |   RCODE   |
/// +--+-----------+--+--+--+--+--------+-----------+
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// 16-bit identifier assigned by the program that generates the query.
    /// This identifier is copied into the corresponding reply and is used by
    /// the requester to match up replies to outstanding queries.
    pub id: u16,

    /// The raw flags bitfield.
    pub flags: u16,

    /// Number of entries in the question section.
    pub qd_count: u16,

    /// Number of resource records in the answer section.
    pub an_count: u16,

    /// Number of name server resource records in the authority section.
    pub ns_count: u16,

    /// Number of resource records in the additional records section.
    pub ar_count: u16,
}

impl Header {
    const QR: u16 = 0b1000_0000_0000_0000;
    const OPCODE: u16 = 0b0111_1000_0000_0000;
    const AA: u16 = 0b0000_0100_0000_0000;
    const TC: u16 = 0b0000_0010_0000_0000;
    const RD: u16 = 0b0000_0001_0000_0000;
    const RA: u16 = 0b0000_0000_1000_0000;
    const Z: u16 = 0b0000_0000_0111_0000;
    const RCODE: u16 = 0b0000_0000_0000_1111;

    /// Returns the header of a standard query with Recursion Desired set.
    pub fn query(id: u16) -> Header {
        Header {
            id,
            flags: Header::RD,
            qd_count: 1,

            ..Default::default()
        }
    }

    /// Specifies whether this message is a query, or a response.
    pub fn qr(&self) -> QR {
        QR::from_bool(self.flags & Header::QR != 0)
    }

    /// Kind of query in this message, or None if the opcode is unassigned.
    pub fn opcode(&self) -> Option<Opcode> {
        FromPrimitive::from_u16((self.flags & Header::OPCODE) >> 11)
    }

    /// Authoritative Answer.
    pub fn aa(&self) -> bool {
        self.flags & Header::AA != 0
    }

    /// Truncation.
    pub fn tc(&self) -> bool {
        self.flags & Header::TC != 0
    }

    /// Recursion Desired.
    pub fn rd(&self) -> bool {
        self.flags & Header::RD != 0
    }

    /// Recursion Available.
    pub fn ra(&self) -> bool {
        self.flags & Header::RA != 0
    }

    /// The three reserved bits.
    pub fn z(&self) -> u8 {
        ((self.flags & Header::Z) >> 4) as u8
    }

    /// The raw 4 bit response code.
    pub fn rcode(&self) -> u8 {
        (self.flags & Header::RCODE) as u8
    }

    /// The response code, or None if it is unassigned.
    pub fn response_code(&self) -> Option<Rcode> {
        FromPrimitive::from_u8(self.rcode())
    }
}

#[derive(Copy, Clone, Debug, Display, EnumString, PartialEq, Eq)]
pub enum QR {
    Query = 0,
    Response = 1,
}

impl Default for QR {
    fn default() -> Self {
        QR::Query
    }
}

impl QR {
    pub fn from_bool(b: bool) -> QR {
        match b {
            false => QR::Query,
            true => QR::Response,
        }
    }

    pub fn to_bool(self) -> bool {
        match self {
            QR::Query => false,
            QR::Response => true,
        }
    }
}

/// Specifies kind of query in this message. See [rfc1035] and [rfc6895].
///
/// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
/// [rfc6895]: https://datatracker.ietf.org/doc/html/rfc6895
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[repr(u8)] // Really only 4 bits
pub enum Opcode {
    Query = 0,

    /// Inverse Query (OBSOLETE).
    IQuery = 1,
    Status = 2,
    Notify = 4,
    Update = 5,

    /// DNS Stateful Operations (DSO).
    DSO = 6,
    // 3 and 7-15 Remain unassigned.
}

/// Response Codes that fit in the 4 bit header field.
/// See [rfc1035] and <https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6>
///
/// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
#[derive(Copy, Clone, Debug, Display, EnumString, FromPrimitive, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u8)]
pub enum Rcode {
    /// No Error
    NoError = 0,

    /// Format Error
    FormErr = 1,

    /// Server Failure
    ServFail = 2,

    /// Non-Existent Domain
    NXDomain = 3,

    /// Not Implemented
    NotImp = 4,

    /// Query Refused
    Refused = 5,

    YXDomain = 6,
    YXRRSet = 7,
    NXRRSet = 8,
    NotAuth = 9,
    NotZone = 10,
    DSOTYPENI = 11,
    // 12-15 Unassigned
}

/// Well known Resource Record Types.
///
/// Questions and records store the raw 16-bit value, so unknown types decode
/// just fine. This enum only gives the common ones a name.
#[derive(
    Copy, Clone, Debug, Display, EnumIter, EnumString, FromPrimitive, PartialEq, Eq, Hash,
)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u16)]
pub enum Type {
    /// IPv4 Address.
    A = 1,
    NS = 2,
    CNAME = 5,
    SOA = 6,

    /// Domain name pointer.
    PTR = 12,

    /// Mail exchange.
    MX = 15,

    /// Text strings.
    TXT = 16,

    /// IPv6 Address.
    AAAA = 28,

    /// Server Selection
    SRV = 33,
}

impl Default for Type {
    fn default() -> Self {
        Type::A
    }
}

impl From<Type> for u16 {
    fn from(t: Type) -> u16 {
        t as u16
    }
}

impl Type {
    /// Returns the well known Type for this code, if there is one.
    pub fn from_code(code: u16) -> Option<Type> {
        FromPrimitive::from_u16(code)
    }
}

/// Well known Resource Record Classes, for example Internet.
#[derive(
    Copy, Clone, Debug, Display, EnumIter, EnumString, FromPrimitive, PartialEq, Eq, Hash,
)]
#[repr(u16)]
pub enum Class {
    /// The Internet (IN), see [rfc1035].
    ///
    /// [rfc1035]: https://datatracker.ietf.org/doc/html/rfc1035
    #[strum(serialize = "IN")]
    Internet = 1,

    /// CSNET (CS), obsolete.
    #[strum(serialize = "CS")]
    CsNet = 2,

    /// Chaosnet (CH).
    #[strum(serialize = "CH")]
    Chaos = 3,

    /// Hesiod (HS).
    #[strum(serialize = "HS")]
    Hesiod = 4,

    /// NONE [RFC2136]
    #[strum(serialize = "NONE")]
    None = 254,
}

impl Default for Class {
    fn default() -> Self {
        Class::Internet
    }
}

impl From<Class> for u16 {
    fn from(c: Class) -> u16 {
        c as u16
    }
}

impl Class {
    /// Returns the well known Class for this code, if there is one.
    pub fn from_code(code: u16) -> Option<Class> {
        FromPrimitive::from_u16(code)
    }
}

/// DNS Question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Question {
    /// Dot separated domain name, without a trailing dot.
    pub name: String,
    pub r#type: u16,
    pub class: u16,
}

impl Question {
    pub fn new<T: Into<u16>, C: Into<u16>>(name: &str, r#type: T, class: C) -> Question {
        Question {
            name: name.to_string(),
            r#type: r#type.into(),
            class: class.into(),
        }
    }
}

/// Resource Record (RR)
///
/// The RDATA is kept as the opaque bytes found on the wire. See
/// [`Record::rdata_display`] for a human readable rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub name: String,

    pub r#type: u16,
    pub class: u16,

    /// The number of seconds that the resource record may be cached
    /// before the source of the information should again be consulted.
    /// Zero is interpreted to mean that the RR can only be used for the
    /// transaction in progress.
    pub ttl: u32,

    pub rdata: Vec<u8>,
}

impl Record {
    /// The RDLENGTH field, the number of bytes of RDATA.
    pub fn rd_len(&self) -> usize {
        self.rdata.len()
    }
}

/// DNS Message that serves as the root of all DNS requests and responses.
///
/// # Examples
///
/// For constructing a query and encoding it:
///
/// ```rust
/// use dnswire::{Class, Message, Type};
///
/// let m = Message::query(0x1234, "example.com", Type::A, Class::Internet);
/// let req = m.to_vec().expect("failed to encode DNS request");
///
/// assert_eq!(&req[0..4], &[0x12, 0x34, 0x01, 0x00]);
///
/// let m = Message::from_slice(&req).expect("invalid message");
/// assert_eq!(m.questions[0].name, "example.com");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    /// The header. When encoding, the section counts are taken from the
    /// section vectors below, not from here.
    pub header: Header,

    /// The questions.
    pub questions: Vec<Question>,

    /// The answer records.
    pub answers: Vec<Record>,

    /// The authoritive records.
    pub authorities: Vec<Record>,

    /// The additional records.
    pub additionals: Vec<Record>,
}

/// Controls how strict [`Message::from_slice_with`] is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Parse the sections of responses with a non-zero RCODE (for example
    /// NXDomain), instead of failing with
    /// [`Error::NonZeroResponseCode`](crate::Error::NonZeroResponseCode).
    pub allow_error_rcode: bool,

    /// Ignore bytes left over after the last declared section.
    pub allow_trailing_bytes: bool,
}
