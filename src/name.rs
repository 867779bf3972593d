//! Reading and writing domain names in their wire format.
//!
//! On the wire a name is a sequence of length prefixed labels, ending with
//! the zero length root label, or ending with a compression pointer back to
//! a name seen earlier in the message. See [rfc1035#section-4.1.4].
//!
//! [rfc1035#section-4.1.4]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.4

use crate::errors::{Error, Result};
use log::trace;

/// Restricts the length of a domain label to 63 characters. [RFC1034]
pub const MAX_LABEL_LEN: usize = 63;

/// Maximum length of a name on the wire, including the length bytes and the
/// root label. [RFC1035]
pub const MAX_NAME_LEN: usize = 255;

const POINTER: u8 = 0b1100_0000;

/// Reads the name starting at `offset` within the message `buf`.
///
/// Returns the offset immediately after the name, and the name as dot
/// separated labels (the root name is the empty string). When the name ends
/// in a compression pointer, the returned offset is just after the two
/// pointer bytes, not after the name it points to.
///
/// # Errors
///
/// * [`Error::TruncatedInput`] if a label or pointer runs past the end of `buf`.
/// * [`Error::InvalidLabelLength`] for the reserved `01` and `10` label types,
///   for a pointer that does not point strictly backwards, or if the name is
///   longer than 255 bytes.
///
/// # Example
///
/// ```rust
/// use dnswire::name::read_name;
///
/// let buf = b"\x07example\x03com\x00\xc0\x00";
///
/// assert_eq!(read_name(buf, 0).unwrap(), (13, "example.com".to_string()));
/// assert_eq!(read_name(buf, 13).unwrap(), (15, "example.com".to_string()));
/// ```
pub fn read_name(buf: &[u8], offset: usize) -> Result<(usize, String)> {
    let mut labels = Vec::new();
    let mut pos = offset;

    // Where the name ends in the original stream, once a pointer is followed.
    let mut next = None;

    // Pointers may only jump before the start of the labels currently being
    // read. Each jump lowers this, so following pointers always terminates.
    let mut limit = offset;

    // The length of the name as it would be written uncompressed.
    let mut wire_len = 0;

    loop {
        let len = match buf.get(pos) {
            Some(len) => *len,
            None => return Err(Error::truncated(pos, 1, buf.len())),
        };

        match len & POINTER {
            // No compression
            0x00 => {
                wire_len += len as usize + 1;
                if wire_len > MAX_NAME_LEN {
                    return Err(Error::InvalidLabelLength {
                        offset: pos,
                        reason: "name is longer than 255 bytes",
                    });
                }

                if len == 0 {
                    let next = next.unwrap_or(pos + 1);
                    return Ok((next, labels.join(".")));
                }

                let start = pos + 1;
                let end = start + len as usize;
                let label = match buf.get(start..end) {
                    Some(label) => label,
                    None => return Err(Error::truncated(start, len.into(), buf.len())),
                };

                // Really this is meant to be ASCII.
                labels.push(String::from_utf8_lossy(label).into_owned());
                pos = end;
            }

            // Compression
            POINTER => {
                let b2 = match buf.get(pos + 1) {
                    Some(b2) => *b2 as usize,
                    None => return Err(Error::truncated(pos, 2, buf.len())),
                };
                let ptr = ((len & !POINTER) as usize) << 8 | b2;

                // Make sure we don't get into a loop.
                if ptr >= limit {
                    return Err(Error::InvalidLabelLength {
                        offset: pos,
                        reason: "compression pointer does not point backwards",
                    });
                }

                trace!("following compression pointer at {} to {}", pos, ptr);

                if next.is_none() {
                    next = Some(pos + 2);
                }
                limit = ptr;
                pos = ptr;
            }

            // 0b01 and 0b10 are reserved (and obsolete).
            _ => {
                return Err(Error::InvalidLabelLength {
                    offset: pos,
                    reason: "unsupported label type",
                })
            }
        }
    }
}

/// Writes the dot separated `name` to the end of `buf`, uncompressed.
///
/// A single trailing dot is accepted, and both `""` and `"."` are written as
/// the root name. `buf` is left untouched on error.
///
/// # Errors
///
/// * [`Error::LabelTooLong`] if a label is empty (for example `"a..b"`) or is
///   longer than 63 bytes.
/// * [`Error::NameTooLong`] if the encoded name would be over 255 bytes.
pub fn write_name(buf: &mut Vec<u8>, name: &str) -> Result<()> {
    let name = name.strip_suffix('.').unwrap_or(name);
    let mut out = Vec::with_capacity(name.len() + 2);

    if !name.is_empty() {
        for label in name.split('.') {
            if label.is_empty() || label.len() > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong {
                    label: label.to_string(),
                });
            }

            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
    }
    out.push(0);

    if out.len() > MAX_NAME_LEN {
        return Err(Error::NameTooLong { len: out.len() });
    }

    buf.extend_from_slice(&out);
    Ok(())
}

/// Returns the dot separated `name` in its uncompressed wire format.
/// See [`write_name`].
pub fn encode_name(name: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_name(&mut buf, name)?;
    Ok(buf)
}
