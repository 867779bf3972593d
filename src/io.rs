//! Bounds checked reads over a DNS message.

use crate::errors::{Error, Result};
use crate::name;
use byteorder::{ReadBytesExt, BE};
use std::io::Cursor;
use std::io::Read;

/// All reads go through a cursor over the whole message, so compression
/// pointers can always be followed back to earlier bytes.
pub(crate) type MessageCursor<'a> = Cursor<&'a [u8]>;

pub(crate) trait SeekExt {
    /// Returns the number of bytes remaining to be consumed.
    /// This is used as a way to check for malformed input.
    fn remaining_len(&self) -> usize;

    /// Fails with TruncatedInput unless `len` more bytes are available.
    /// Returns the current offset.
    fn ensure(&self, len: usize) -> Result<usize>;
}

impl<'a> SeekExt for MessageCursor<'a> {
    fn remaining_len(&self) -> usize {
        let len = self.get_ref().len();
        len.saturating_sub(self.offset())
    }

    fn ensure(&self, len: usize) -> Result<usize> {
        let offset = self.offset();
        if self.remaining_len() < len {
            return Err(Error::truncated(offset, len, self.get_ref().len()));
        }
        Ok(offset)
    }
}

/// Extensions to Cursor to add some DNS specific types.
///
/// Every method checks the remaining length before reading, so a malformed
/// message can never cause a read past the end of the buffer.
pub(crate) trait DNSReadExt {
    fn offset(&self) -> usize;

    fn read_be_u16(&mut self) -> Result<u16>;
    fn read_be_u32(&mut self) -> Result<u32>;

    /// Reads exactly `len` bytes.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Reads a (possibly compressed) domain name, leaving the cursor just
    /// after the name in the original stream.
    fn read_qname(&mut self) -> Result<String>;
}

impl<'a> DNSReadExt for MessageCursor<'a> {
    fn offset(&self) -> usize {
        self.position() as usize
    }

    fn read_be_u16(&mut self) -> Result<u16> {
        let offset = self.ensure(2)?;
        self.read_u16::<BE>()
            .map_err(|_| Error::truncated(offset, 2, self.get_ref().len()))
    }

    fn read_be_u32(&mut self) -> Result<u32> {
        let offset = self.ensure(4)?;
        self.read_u32::<BE>()
            .map_err(|_| Error::truncated(offset, 4, self.get_ref().len()))
    }

    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let offset = self.ensure(len)?;
        let mut buf = vec![0; len];
        self.read_exact(&mut buf)
            .map_err(|_| Error::truncated(offset, len, self.get_ref().len()))?;
        Ok(buf)
    }

    fn read_qname(&mut self) -> Result<String> {
        let (next, qname) = name::read_name(self.get_ref(), self.offset())?;
        self.set_position(next as u64);
        Ok(qname)
    }
}
