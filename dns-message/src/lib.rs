//! Encoding of DNS queries and decoding of DNS responses (RFC1035).
//!
//! Every decoder takes the whole message buffer plus an offset and returns
//! the decoded value together with the offset just past it, so the caller
//! threads a single cursor through the message. All reads are bounds
//! checked.

mod builder;
mod error;
mod header;
mod id;
mod name;
mod packet;
mod parser;
mod question;
mod resource_record;

pub use builder::{build_query, QueryBuilder};
pub use error::MessageError;
pub use header::{Header, OpCode, RCode, HEADER_LEN, RECURSION_DESIRED};
pub use id::{IdGenerator, RandomId};
pub use name::{decode_name, encode_name, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use packet::Packet;
pub use question::{Class, Question, Type};
pub use resource_record::{RData, ResourceRecord};

pub type Result<T> = std::result::Result<T, MessageError>;
