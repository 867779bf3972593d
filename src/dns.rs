use crate::errors::{Error, Result, Section};
use crate::io::{DNSReadExt, MessageCursor, SeekExt};
use crate::name::write_name;
use crate::types::*;
use log::{debug, trace};
use std::convert::TryFrom;
use std::io::Cursor;

impl Header {
    /// Length of the header on the wire.
    pub const LEN: usize = 12;

    /// Decodes the header from the first 12 bytes of `buf`. Any further bytes
    /// are ignored.
    pub fn from_slice(buf: &[u8]) -> Result<Header> {
        Header::parse(&mut Cursor::new(buf))
    }

    fn parse(cur: &mut MessageCursor) -> Result<Header> {
        cur.ensure(Header::LEN)?;

        Ok(Header {
            id: cur.read_be_u16()?,
            flags: cur.read_be_u16()?,
            qd_count: cur.read_be_u16()?,
            an_count: cur.read_be_u16()?,
            ns_count: cur.read_be_u16()?,
            ar_count: cur.read_be_u16()?,
        })
    }

    /// Returns the header in its 12 byte wire format.
    pub fn to_bytes(&self) -> [u8; Header::LEN] {
        let mut buf = [0; Header::LEN];
        let fields = [
            self.id,
            self.flags,
            self.qd_count,
            self.an_count,
            self.ns_count,
            self.ar_count,
        ];

        for (chunk, field) in buf.chunks_exact_mut(2).zip(fields.iter()) {
            chunk.copy_from_slice(&field.to_be_bytes());
        }

        buf
    }
}

impl Question {
    /// Smallest possible encoding: the root name, type and class.
    pub(crate) const MIN_LEN: usize = 1 + 4;

    /// Decodes the question starting at `offset` within the message `buf`.
    /// Returns the offset of the byte after the question, and the question.
    pub fn from_slice(buf: &[u8], offset: usize) -> Result<(usize, Question)> {
        let mut cur = Cursor::new(buf);
        cur.set_position(offset as u64);

        let q = Question::parse(&mut cur)?;
        Ok((cur.offset(), q))
    }

    fn parse(cur: &mut MessageCursor) -> Result<Question> {
        let name = cur.read_qname()?;
        cur.ensure(4)?;

        Ok(Question {
            name,
            r#type: cur.read_be_u16()?,
            class: cur.read_be_u16()?,
        })
    }

    /// Appends this question, in its wire format, to `buf`.
    pub fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        write_name(buf, &self.name)?;
        buf.extend_from_slice(&self.r#type.to_be_bytes());
        buf.extend_from_slice(&self.class.to_be_bytes());

        Ok(())
    }

    /// Returns this question in its wire format.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.name.len() + 6);
        self.write(&mut buf)?;
        Ok(buf)
    }
}

impl Record {
    /// Smallest possible encoding: the root name, fixed fields and no RDATA.
    pub(crate) const MIN_LEN: usize = 1 + 10;

    /// Decodes the resource record starting at `offset` within the message
    /// `buf`. Returns the offset of the byte after the record's RDATA, and the
    /// record.
    pub fn from_slice(buf: &[u8], offset: usize) -> Result<(usize, Record)> {
        let mut cur = Cursor::new(buf);
        cur.set_position(offset as u64);

        let r = Record::parse(&mut cur)?;
        Ok((cur.offset(), r))
    }

    fn parse(cur: &mut MessageCursor) -> Result<Record> {
        let name = cur.read_qname()?;

        // Type(2) + Class(2) + TTL(4) + RDLength(2)
        cur.ensure(10)?;
        let r#type = cur.read_be_u16()?;
        let class = cur.read_be_u16()?;
        let ttl = cur.read_be_u32()?;
        let rd_len = cur.read_be_u16()?;

        let rdata = cur.read_bytes(rd_len.into())?;

        Ok(Record {
            name,
            r#type,
            class,
            ttl,
            rdata,
        })
    }

    /// Appends this record, in its wire format, to `buf`.
    pub fn write(&self, buf: &mut Vec<u8>) -> Result<()> {
        let rd_len = match u16::try_from(self.rdata.len()) {
            Ok(len) => len,
            Err(_) => {
                return Err(Error::RdataTooLong {
                    len: self.rdata.len(),
                })
            }
        };

        write_name(buf, &self.name)?;
        buf.extend_from_slice(&self.r#type.to_be_bytes());
        buf.extend_from_slice(&self.class.to_be_bytes());
        buf.extend_from_slice(&self.ttl.to_be_bytes());
        buf.extend_from_slice(&rd_len.to_be_bytes());
        buf.extend_from_slice(&self.rdata);

        Ok(())
    }

    /// Returns this record in its wire format.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.name.len() + 12 + self.rdata.len());
        self.write(&mut buf)?;
        Ok(buf)
    }
}

// A helper class to hold state while the parsing is happening.
struct MessageParser<'a> {
    cur: MessageCursor<'a>,
    options: ParseOptions,
}

impl<'a> MessageParser<'a> {
    fn new(buf: &'a [u8], options: ParseOptions) -> MessageParser<'a> {
        MessageParser {
            cur: Cursor::new(buf),
            options,
        }
    }

    /// Consume the MessageParser and return the resulting Message.
    fn parse(mut self) -> Result<Message> {
        let header = Header::parse(&mut self.cur)?;

        let rcode = header.rcode();
        if rcode != 0 && !self.options.allow_error_rcode {
            debug!("rejecting message {} with rcode {}", header.id, rcode);
            return Err(Error::NonZeroResponseCode { rcode, header });
        }

        let questions = self.read_questions(header.qd_count)?;
        let answers = self.read_records(header.an_count, Section::Answer)?;
        let authorities = self.read_records(header.ns_count, Section::Authority)?;
        let additionals = self.read_records(header.ar_count, Section::Additional)?;

        let remaining = self.cur.remaining_len();
        if remaining > 0 && !self.options.allow_trailing_bytes {
            debug!(
                "message {} has {} bytes left over after the last section",
                header.id, remaining
            );
            let declared = usize::from(header.ar_count);
            return Err(Error::SectionCountMismatch {
                section: Section::Additional,
                declared,
                found: declared + 1,
            });
        }

        Ok(Message {
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// Fails with SectionCountMismatch if the message ended cleanly before
    /// all `declared` entries of `section` were read.
    fn expect_more(&self, section: Section, declared: u16, found: usize) -> Result<()> {
        if self.cur.remaining_len() == 0 {
            return Err(Error::SectionCountMismatch {
                section,
                declared: declared.into(),
                found,
            });
        }
        Ok(())
    }

    fn read_questions(&mut self, count: u16) -> Result<Vec<Question>> {
        let capacity = section_capacity(count, self.cur.remaining_len(), Question::MIN_LEN);
        let mut questions = Vec::with_capacity(capacity);

        for i in 0..usize::from(count) {
            self.expect_more(Section::Question, count, i)?;
            trace!("reading question {} at {}", i, self.cur.offset());

            questions.push(Question::parse(&mut self.cur)?);
        }

        Ok(questions)
    }

    fn read_records(&mut self, count: u16, section: Section) -> Result<Vec<Record>> {
        let capacity = section_capacity(count, self.cur.remaining_len(), Record::MIN_LEN);
        let mut records = Vec::with_capacity(capacity);

        for i in 0..usize::from(count) {
            self.expect_more(section, count, i)?;
            trace!("reading {} record {} at {}", section, i, self.cur.offset());

            records.push(Record::parse(&mut self.cur)?);
        }

        Ok(records)
    }
}

/// The number of entries worth reserving for a section. The count comes
/// straight off the wire, so never reserve more than `remaining` bytes could hold.
fn section_capacity(count: u16, remaining: usize, min_len: usize) -> usize {
    usize::from(count).min(remaining / min_len)
}

impl Message {
    /// Returns a query for a single question, with Recursion Desired set.
    ///
    /// The `id` should come from a cryptographically secure source, for
    /// example [`random_id`](crate::clients::random_id).
    pub fn query<T: Into<u16>, C: Into<u16>>(
        id: u16,
        name: &str,
        r#type: T,
        class: C,
    ) -> Message {
        let mut m = Message {
            header: Header::query(id),
            ..Default::default()
        };
        m.add_question(name, r#type, class);
        m
    }

    pub fn add_question<T: Into<u16>, C: Into<u16>>(&mut self, name: &str, r#type: T, class: C) {
        self.questions.push(Question::new(name, r#type, class));
    }

    /// Decodes a DNS message, as defined by [rfc1035](https://datatracker.ietf.org/doc/html/rfc1035).
    ///
    /// The header counts must match the sections found exactly, and a
    /// response with a non-zero RCODE is rejected with
    /// [`Error::NonZeroResponseCode`]. See [`Message::from_slice_with`] to
    /// relax this.
    pub fn from_slice(buf: &[u8]) -> Result<Message> {
        Message::from_slice_with(buf, ParseOptions::default())
    }

    /// Decodes a DNS message, with the given options.
    pub fn from_slice_with(buf: &[u8], options: ParseOptions) -> Result<Message> {
        MessageParser::new(buf, options).parse()
    }

    /// Returns this DNS Message as a Vec<u8> ready to be sent, as defined by [rfc1035](https://datatracker.ietf.org/doc/html/rfc1035).
    ///
    /// The section counts in the header are replaced by the number of
    /// entries in each section.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut req = Vec::<u8>::with_capacity(512);

        let header = Header {
            qd_count: section_len(Section::Question, self.questions.len())?,
            an_count: section_len(Section::Answer, self.answers.len())?,
            ns_count: section_len(Section::Authority, self.authorities.len())?,
            ar_count: section_len(Section::Additional, self.additionals.len())?,

            ..self.header
        };
        req.extend_from_slice(&header.to_bytes());

        for question in &self.questions {
            question.write(&mut req)?;
        }

        for record in self
            .answers
            .iter()
            .chain(&self.authorities)
            .chain(&self.additionals)
        {
            record.write(&mut req)?;
        }

        Ok(req)
    }
}

fn section_len(section: Section, len: usize) -> Result<u16> {
    match u16::try_from(len) {
        Ok(len) => Ok(len),
        Err(_) => Err(Error::SectionCountMismatch {
            section,
            declared: u16::MAX.into(),
            found: len,
        }),
    }
}
