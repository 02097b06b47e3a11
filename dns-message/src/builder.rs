use crate::header::RECURSION_DESIRED;
use crate::{Class, Header, IdGenerator, Question, Result, Type};
use tracing::{instrument, trace};

/// Assembles a single question query message.
#[derive(Debug)]
pub struct QueryBuilder {
    id: u16,
    rd: bool,
    question: Question,
}

impl QueryBuilder {
    /// A recursive query for the A record of `name`, with transaction id 0.
    pub fn new(name: &str) -> Self {
        Self {
            id: 0,
            rd: true,
            question: Question::new(name, Type::A),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn rd(mut self, rd: bool) -> Self {
        self.rd = rd;
        self
    }

    pub fn q_type(mut self, t: Type) -> Self {
        self.question.q_type = t;
        self
    }

    pub fn class(mut self, cls: Class) -> Self {
        self.question.q_class = cls;
        self
    }

    /// The header followed by the question, ready to send.
    #[instrument]
    pub fn build(self) -> Result<Vec<u8>> {
        let header = Header {
            id: self.id,
            flags: if self.rd { RECURSION_DESIRED } else { 0 },
            qd_count: 1,
            ..Default::default()
        };

        let mut buf = Vec::with_capacity(512);
        let mut byte_count = header.to_bytes(&mut buf);
        byte_count += self.question.to_bytes(&mut buf)?;

        trace!("Wrote {} bytes", byte_count);

        Ok(buf)
    }
}

/// Builds a recursive query for `name` in the Internet class, drawing the
/// transaction id from `ids`.
pub fn build_query<G: IdGenerator>(name: &str, q_type: Type, ids: &mut G) -> Result<Vec<u8>> {
    QueryBuilder::new(name)
        .id(ids.next_id())
        .q_type(q_type)
        .build()
}
