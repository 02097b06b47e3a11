use crate::name::decode_name;
use crate::parser::{read_at, read_bytes};
use crate::{Class, MessageError, Result, Type};
use nom::number::complete::{be_u16, be_u32};
use nom::sequence::tuple;
use std::fmt;
use std::net::Ipv4Addr;
use tracing::{instrument, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
/// The answer, authority and additional sections all share the same format,
/// that is a variable number of [`ResourceRecord`]s.
pub struct ResourceRecord {
    /// A domain name to which this resource record pertains.
    pub name: String,

    /// The type and data of the resource record.
    pub data: RData,

    /// The class of the data in the `data` field.
    pub class: Class,

    /// RFC1035 - a 32 bit unsigned integer that specifies the time interval (in
    /// seconds) that the resource record may be cached before it should be
    /// discarded.
    pub ttl: u32,
}

impl ResourceRecord {
    pub fn r_type(&self) -> Type {
        self.data.r_type()
    }

    /// The address carried by an A record.
    pub fn address(&self) -> Result<Ipv4Addr> {
        match &self.data {
            RData::A(addr) => Ok(*addr),
            RData::Unknown {
                r_type: Type::A,
                data,
            } if data.len() != 4 => Err(MessageError::InvalidAddressLength(data.len())),
            RData::Unknown { r_type, .. } => Err(MessageError::UnsupportedRecordType(*r_type)),
        }
    }

    /// Reads the record at `offset`, returning it with the offset following
    /// its data.
    #[instrument(skip(buf))]
    pub fn from_bytes(buf: &[u8], offset: usize) -> Result<(ResourceRecord, usize)> {
        trace!("reading resource record");
        let (name, offset) = decode_name(buf, offset)?;
        let ((r_type, class, ttl, rdlength), offset) =
            read_at(buf, offset, tuple((be_u16, be_u16, be_u32, be_u16)))?;

        trace!("Found rdata of length: {}", rdlength);

        let (rdata, next) = read_bytes(buf, offset, rdlength as usize)?;
        let class = Class::from(class);
        let data = RData::from_wire(Type::from(r_type), class, rdata);

        trace!("Parsed rdata as {}", data);

        Ok((
            ResourceRecord {
                name,
                data,
                class,
                ttl,
            },
            next,
        ))
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name,
            self.ttl,
            self.class,
            self.r_type(),
            self.data
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The [`ResourceRecord`] data.
pub enum RData {
    /// RFC1035 - (1) a host address.
    A(Ipv4Addr),

    /// Any other type, kept as the raw bytes from the wire.
    Unknown { r_type: Type, data: Vec<u8> },
}

impl RData {
    /// Only an Internet class A record with four bytes of data is an address.
    /// Anything else, a malformed A record included, is kept raw so one odd
    /// record does not fail the whole message.
    fn from_wire(r_type: Type, class: Class, data: &[u8]) -> RData {
        match (r_type, <[u8; 4]>::try_from(data)) {
            (Type::A, Ok(octets)) if class == Class::IN => RData::A(Ipv4Addr::from(octets)),
            (r_type, _) => RData::Unknown {
                r_type,
                data: data.to_vec(),
            },
        }
    }

    pub fn r_type(&self) -> Type {
        match self {
            RData::A(_) => Type::A,
            RData::Unknown { r_type, .. } => *r_type,
        }
    }
}

impl fmt::Display for RData {
    /// Addresses render in dotted decimal. Anything else uses the RFC3597
    /// generic form, `\# <length> <hex>`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RData::A(v4) => write!(f, "{}", v4),
            RData::Unknown { data, .. } => {
                write!(f, "\\# {}", data.len())?;
                if !data.is_empty() {
                    write!(f, " ")?;
                    for b in data {
                        write!(f, "{:02x}", b)?;
                    }
                }
                Ok(())
            }
        }
    }
}
