use crate::name::{decode_name, encode_name};
use crate::parser::read_at;
use crate::Result;
use bytes::BufMut;
use nom::number::complete::be_u16;
use nom::sequence::pair;
use std::fmt;
use tracing::{instrument, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
/// The question section is used to carry the "question" in most queries, i.e.,
/// the parameters that define what is being asked.
pub struct Question {
    /// RFC1035 - the domain name being asked about, in dotted form without a
    /// trailing dot.
    pub q_name: String,

    /// RFC1035 - a two octet code which specifies the type of the query.
    pub q_type: Type,

    /// RFC1035 - a two octet code that specifies the [`Class`] of the query.
    pub q_class: Class,
}

impl Question {
    /// A question for `name` in the Internet class.
    pub fn new(name: &str, q_type: Type) -> Self {
        Question {
            q_name: name.to_string(),
            q_type,
            q_class: Class::IN,
        }
    }

    #[instrument(skip(buf))]
    pub fn to_bytes(&self, buf: &mut Vec<u8>) -> Result<usize> {
        let byte_count = encode_name(&self.q_name, buf)? + 4;
        buf.put_u16(self.q_type.into());
        buf.put_u16(self.q_class.into());

        trace!("Wrote {} bytes", byte_count);

        Ok(byte_count)
    }

    /// Reads the question at `offset`, returning it with the offset following
    /// it.
    #[instrument(skip(buf))]
    pub fn from_bytes(buf: &[u8], offset: usize) -> Result<(Question, usize)> {
        trace!("reading question");
        let (q_name, offset) = decode_name(buf, offset)?;
        let ((q_type, q_class), next) = read_at(buf, offset, pair(be_u16, be_u16))?;

        Ok((
            Question {
                q_name,
                q_type: Type::from(q_type),
                q_class: Class::from(q_class),
            },
            next,
        ))
    }
}

#[derive(Debug, Clone, Copy)]
/// Record types. Only [`Type::A`] has its data interpreted; the others are
/// named so they read well in logs and errors.
///
/// Types compare by their wire code, so `Type::Unknown(1) == Type::A`.
pub enum Type {
    /// RFC1035 - (1) a host address.
    A,

    /// RFC1035 - (2) an authoritative name server.
    NS,

    /// RFC1035 - (5) the canonical name for an alias.
    CNAME,

    /// RFC1035 - (6) marks the start of a zone of authority.
    SOA,

    /// RFC1035 - (12) a domain name pointer.
    PTR,

    /// RFC1035 - (15) mail exchange.
    MX,

    /// RFC1035 - (16) text strings.
    TXT,

    /// RFC3596 - (28) a single IPv6 address.
    AAAA,

    /// RFC6891 - (41) the EDNS0 pseudo record.
    OPT,

    /// Any other type - the value is contained within. Decoding never
    /// produces this for a code that has a named variant.
    Unknown(u16),
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        u16::from(*self) == u16::from(*other)
    }
}

impl Eq for Type {}

impl From<u16> for Type {
    fn from(val: u16) -> Self {
        match val {
            1 => Type::A,
            2 => Type::NS,
            5 => Type::CNAME,
            6 => Type::SOA,
            12 => Type::PTR,
            15 => Type::MX,
            16 => Type::TXT,
            28 => Type::AAAA,
            41 => Type::OPT,
            _ => Type::Unknown(val),
        }
    }
}

impl From<Type> for u16 {
    fn from(t: Type) -> u16 {
        match t {
            Type::A => 1,
            Type::NS => 2,
            Type::CNAME => 5,
            Type::SOA => 6,
            Type::PTR => 12,
            Type::MX => 15,
            Type::TXT => 16,
            Type::AAAA => 28,
            Type::OPT => 41,
            Type::Unknown(i) => i,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::A => write!(f, "A"),
            Type::NS => write!(f, "NS"),
            Type::CNAME => write!(f, "CNAME"),
            Type::SOA => write!(f, "SOA"),
            Type::PTR => write!(f, "PTR"),
            Type::MX => write!(f, "MX"),
            Type::TXT => write!(f, "TXT"),
            Type::AAAA => write!(f, "AAAA"),
            Type::OPT => write!(f, "OPT"),
            Type::Unknown(i) => match Type::from(*i) {
                // RFC3597 presentation of unknown types.
                Type::Unknown(i) => write!(f, "TYPE{}", i),
                named => fmt::Display::fmt(&named, f),
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
/// The class of the query - you will want [`Class::IN`] 99.99% of the time.
pub enum Class {
    /// RFC1035 - 1 the Internet.
    IN,

    /// RFC1035 - 3 the CHAOS class.
    CH,

    /// RFC1035 - 4 Hesiod [Dyer 87].
    HS,

    /// RFC1035 - 255 any class.
    STAR,

    /// An unknown class - contained within. Compares equal to the named
    /// class with the same code.
    Unknown(u16),
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        u16::from(*self) == u16::from(*other)
    }
}

impl Eq for Class {}

impl Default for Class {
    fn default() -> Self {
        Class::IN
    }
}

impl From<u16> for Class {
    fn from(val: u16) -> Self {
        match val {
            1 => Class::IN,
            3 => Class::CH,
            4 => Class::HS,
            255 => Class::STAR,
            _ => Class::Unknown(val),
        }
    }
}

impl From<Class> for u16 {
    fn from(c: Class) -> u16 {
        match c {
            Class::IN => 1,
            Class::CH => 3,
            Class::HS => 4,
            Class::STAR => 255,
            Class::Unknown(i) => i,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Class::IN => write!(f, "IN"),
            Class::CH => write!(f, "CH"),
            Class::HS => write!(f, "HS"),
            Class::STAR => write!(f, "*"),
            Class::Unknown(i) => match Class::from(*i) {
                Class::Unknown(i) => write!(f, "CLASS{}", i),
                named => fmt::Display::fmt(&named, f),
            },
        }
    }
}
