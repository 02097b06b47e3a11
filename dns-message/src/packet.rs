use crate::{Header, MessageError, Question, ResourceRecord, Result};
use std::fmt;
use tracing::{instrument, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl Packet {
    /// Reads the u8 buffer and parses the DNS message from it.
    ///
    /// The header counts decide how many entries each section gets, and the
    /// sections are read back to back. Compression pointers are followed as
    /// each name is read. Bytes left over after the additional section are
    /// ignored.
    #[instrument(skip(buf))]
    pub fn from_bytes(buf: &[u8]) -> Result<Packet> {
        trace!("reading packet of {} bytes", buf.len());
        let (header, mut offset) = Header::from_bytes(buf, 0)?;

        let mut questions = Vec::new();
        for _ in 0..header.qd_count {
            let (question, next) = Question::from_bytes(buf, offset)?;
            offset = next;
            questions.push(question);
        }

        let (answers, offset) = read_records(buf, offset, header.an_count)?;
        let (authorities, offset) = read_records(buf, offset, header.ns_count)?;
        let (additionals, offset) = read_records(buf, offset, header.ar_count)?;

        if offset < buf.len() {
            trace!("Ignoring {} trailing bytes", buf.len() - offset);
        }

        let packet = Packet {
            header,
            questions,
            answers,
            authorities,
            additionals,
        };

        trace!("Read input as: {}", packet);

        Ok(packet)
    }

    /// The first record of the answer section.
    pub fn first_answer(&self) -> Result<&ResourceRecord> {
        self.answers.first().ok_or(MessageError::NoAnswer)
    }
}

fn read_records(buf: &[u8], offset: usize, count: u16) -> Result<(Vec<ResourceRecord>, usize)> {
    let mut records = Vec::new();
    let mut offset = offset;
    for _ in 0..count {
        let (record, next) = ResourceRecord::from_bytes(buf, offset)?;
        offset = next;
        records.push(record);
    }
    Ok((records, offset))
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Packet(id:{}) - ", self.header.id)?;
        write!(f, "Query [")?;
        for (i, q) in self.questions.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}({})", q.q_name, q.q_type)?;
        }
        write!(f, "]")?;
        if self.header.qr() {
            write!(f, " - Response [")?;
            for (i, a) in self.answers.iter().enumerate() {
                if i != 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} => {}", a.name, a.data)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}
