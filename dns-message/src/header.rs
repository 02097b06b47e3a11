use crate::parser::read_at;
use crate::Result;
use bytes::BufMut;
use nom::number::complete::be_u16;
use nom::sequence::tuple;
use tracing::{instrument, trace};

/// Size of the fixed header on the wire.
pub const HEADER_LEN: usize = 12;

/// RFC1035 - QR, set in responses.
pub const QR: u16 = 1 << 15;

/// RFC1035 - Authoritative Answer.
pub const AUTHORITATIVE_ANSWER: u16 = 1 << 10;

/// RFC1035 - TrunCation.
pub const TRUNCATION: u16 = 1 << 9;

/// RFC1035 - Recursion Desired. If set in a query, it directs the name server
/// to pursue the query recursively.
pub const RECURSION_DESIRED: u16 = 1 << 8;

/// RFC1035 - Recursion Available.
pub const RECURSION_AVAILABLE: u16 = 1 << 7;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
/// The DNS Message Header as per RFC1035.
///
/// The flags are kept as the raw 16 bit value from the wire; the accessor
/// methods decode the individual fields.
pub struct Header {
    /// RFC1035 - A 16 bit identifier assigned by the program that generates any
    /// kind of query. This identifier is copied the corresponding reply and
    /// can be used by the requester to match up replies to outstanding queries.
    pub id: u16,

    /// QR, Opcode, AA, TC, RD, RA, Z and RCODE packed as on the wire.
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
    #[instrument(skip(buf))]
    pub fn to_bytes(&self, buf: &mut Vec<u8>) -> usize {
        buf.put_u16(self.id);
        buf.put_u16(self.flags);
        buf.put_u16(self.qd_count);
        buf.put_u16(self.an_count);
        buf.put_u16(self.ns_count);
        buf.put_u16(self.ar_count);

        trace!("Wrote {} bytes", HEADER_LEN);

        HEADER_LEN
    }

    /// Reads the header at `offset`, returning it with the offset following
    /// it. No validation is applied to the flags.
    #[instrument(skip(buf))]
    pub fn from_bytes(buf: &[u8], offset: usize) -> Result<(Header, usize)> {
        trace!("reading header");
        let ((id, flags, qd_count, an_count, ns_count, ar_count), next) = read_at(
            buf,
            offset,
            tuple((be_u16, be_u16, be_u16, be_u16, be_u16, be_u16)),
        )?;

        Ok((
            Header {
                id,
                flags,
                qd_count,
                an_count,
                ns_count,
                ar_count,
            },
            next,
        ))
    }

    pub fn qr(&self) -> bool {
        self.flags & QR != 0
    }

    pub fn opcode(&self) -> OpCode {
        OpCode::from(((self.flags >> 11) & 0xf) as u8)
    }

    pub fn aa(&self) -> bool {
        self.flags & AUTHORITATIVE_ANSWER != 0
    }

    pub fn tc(&self) -> bool {
        self.flags & TRUNCATION != 0
    }

    pub fn rd(&self) -> bool {
        self.flags & RECURSION_DESIRED != 0
    }

    pub fn ra(&self) -> bool {
        self.flags & RECURSION_AVAILABLE != 0
    }

    pub fn rcode(&self) -> RCode {
        RCode::from((self.flags & 0xf) as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A four bit field that specifies kind of query in this message.  This value
/// is set by the originator of a query and copied into the response.
pub enum OpCode {
    /// A standard query.
    Query,

    /// An inverse query.
    IQuery,

    /// A server status request.
    Status,

    /// An unknown OpCode (contained within).
    Unknown(u8),
}

impl From<u8> for OpCode {
    fn from(val: u8) -> Self {
        match val {
            0 => OpCode::Query,
            1 => OpCode::IQuery,
            2 => OpCode::Status,
            n => OpCode::Unknown(n),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Response code - this 4 bit field is set as part of responses.
pub enum RCode {
    /// No error condition.
    NoError,

    /// Format error - The name server was unable to interpret the query.
    FormatError,

    /// Server failure - The name server was unable to process this query due to
    /// a problem with the name server.
    ServerFailure,

    /// Name Error - the domain name referenced in the query does not exist.
    NameError,

    /// Not Implemented - The name server does not support the requested kind of
    /// query.
    NotImplemented,

    /// Refused - The name server refuses to perform the specified operation for
    /// policy reasons.
    Refused,

    /// The response code was unknown (contained within).
    Unknown(u8),
}

impl From<u8> for RCode {
    fn from(val: u8) -> Self {
        match val {
            0 => RCode::NoError,
            1 => RCode::FormatError,
            2 => RCode::ServerFailure,
            3 => RCode::NameError,
            4 => RCode::NotImplemented,
            5 => RCode::Refused,
            x => RCode::Unknown(x),
        }
    }
}
