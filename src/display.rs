//! Implements the Display trait for the various types, so they output
//! in `dig` style.
//!
//! Nothing in here is used when decoding; the type and class tables only give
//! names to the raw numbers carried by [`Question`] and [`Record`].
// Refer to https://github.com/tigeli/bind-utils/blob/master/bin/dig/dig.c for reference.

use crate::types::*;
use lazy_static::lazy_static;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use strum::IntoEnumIterator;

/// Which lookup table [`name_of`] should use.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    Type,
    Class,
}

lazy_static! {
    static ref TYPE_NAMES: HashMap<u16, String> =
        Type::iter().map(|t| (t.into(), t.to_string())).collect();
    static ref CLASS_NAMES: HashMap<u16, String> =
        Class::iter().map(|c| (c.into(), c.to_string())).collect();
}

/// Returns the mnemonic for a TYPE or CLASS code, for example `A` or `IN`,
/// or `Unknown Type 99` if the code is not a well known one.
///
/// ```rust
/// use dnswire::display::{name_of, Kind};
///
/// assert_eq!(name_of(Kind::Type, 28), "AAAA");
/// assert_eq!(name_of(Kind::Class, 1), "IN");
/// assert_eq!(name_of(Kind::Class, 7), "Unknown Class 7");
/// ```
pub fn name_of(kind: Kind, code: u16) -> Cow<'static, str> {
    let (names, label) = match kind {
        Kind::Type => (&*TYPE_NAMES, "Type"),
        Kind::Class => (&*CLASS_NAMES, "Class"),
    };

    match names.get(&code) {
        Some(name) => Cow::Borrowed(name.as_str()),
        None => Cow::Owned(format!("Unknown {} {}", label, code)),
    }
}

/// Renders bytes as their decimal values joined by dots, for example
/// `93.184.216.34`. This is a debugging aid, it does not imply the bytes are
/// an address.
pub fn dotted_decimal(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<String>>()
        .join(".")
}

// Names are stored without the trailing dot, but dig shows them fully qualified.
fn fqdn(name: &str) -> String {
    format!("{}.", name)
}

impl Question {
    pub fn type_name(&self) -> Cow<'static, str> {
        name_of(Kind::Type, self.r#type)
    }

    pub fn class_name(&self) -> Cow<'static, str> {
        name_of(Kind::Class, self.class)
    }
}

impl Record {
    pub fn type_name(&self) -> Cow<'static, str> {
        name_of(Kind::Type, self.r#type)
    }

    pub fn class_name(&self) -> Cow<'static, str> {
        name_of(Kind::Class, self.class)
    }

    /// Renders the RDATA for humans.
    ///
    /// Internet A and AAAA records of the right length are shown as
    /// addresses, everything else uses the generic `\# <length> <hex>` form
    /// from [rfc3597].
    ///
    /// [rfc3597]: https://datatracker.ietf.org/doc/html/rfc3597#section-5
    pub fn rdata_display(&self) -> String {
        let rdata = &self.rdata;

        match (Type::from_code(self.r#type), Class::from_code(self.class)) {
            (Some(Type::A), Some(Class::Internet)) if rdata.len() == 4 => {
                Ipv4Addr::new(rdata[0], rdata[1], rdata[2], rdata[3]).to_string()
            }
            (Some(Type::AAAA), Some(Class::Internet)) if rdata.len() == 16 => {
                let mut octets = [0; 16];
                octets.copy_from_slice(rdata);
                Ipv6Addr::from(octets).to_string()
            }
            _ if rdata.is_empty() => "\\# 0".to_string(),
            _ => {
                let hex: String = rdata.iter().map(|b| format!("{:02x}", b)).collect();
                format!("\\# {} {}", rdata.len(), hex)
            }
        }
    }
}

/// Displays this message in a format resembling `dig` output.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_header(f)?;

        // Always display the question section, but optionally
        // display the other sections.
        writeln!(f, ";; QUESTION SECTION:")?;
        for question in &self.questions {
            write!(f, "{}", question)?;
        }
        writeln!(f)?;

        let sections = [
            ("ANSWER", &self.answers),
            ("AUTHORITY", &self.authorities),
            ("ADDITIONAL", &self.additionals),
        ];

        for (title, records) in sections.iter() {
            if records.is_empty() {
                continue;
            }

            writeln!(f, ";; {} SECTION:", title)?;
            for record in records.iter() {
                write!(f, "{}", record)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl Message {
    fn fmt_header(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.header)?;

        let mut flags = String::new();

        let bits = [
            (self.header.qr().to_bool(), " qr"),
            (self.header.aa(), " aa"),
            (self.header.tc(), " tc"),
            (self.header.rd(), " rd"),
            (self.header.ra(), " ra"),
        ];
        for (set, name) in bits.iter() {
            if *set {
                flags.push_str(name)
            }
        }

        writeln!(f, ";; flags:{flags}; QUERY: {qd_count}, ANSWER: {an_count}, AUTHORITY: {ns_count}, ADDITIONAL: {ar_count}",
            flags = flags,
            qd_count = self.questions.len(),
            an_count = self.answers.len(),
            ns_count = self.authorities.len(),
            ar_count = self.additionals.len(),
        )?;

        writeln!(f)
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let opcode = match self.opcode() {
            Some(opcode) => opcode.to_string(),
            None => format!("Opcode{}", (self.flags >> 11) & 0xf),
        };
        let rcode = match self.response_code() {
            Some(rcode) => rcode.to_string(),
            None => format!("Rcode{}", self.rcode()),
        };

        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {opcode}, status: {rcode}, id: {id}",
            opcode = opcode,
            rcode = rcode,
            id = self.id,
        )
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            ";{name:<23} {class:4} {type:6}",
            name = fqdn(&self.name),
            class = self.class_name(),
            r#type = self.type_name(),
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{name:<20} {ttl:>4} {class:4} {type:6} {rdata}",
            name = fqdn(&self.name),
            ttl = self.ttl,
            class = self.class_name(),
            r#type = self.type_name(),
            rdata = self.rdata_display(),
        )
    }
}
