use crate::Transport;
use dns_message::{IdGenerator, Packet, QueryBuilder, Type};
use std::fmt;
use std::net::Ipv4Addr;
use tracing::{debug, info, instrument, warn};

type Result<T> = anyhow::Result<T>;

/// The first answer of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub name: String,
    pub address: Ipv4Addr,
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.address)
    }
}

/// Sends one A query for `domain` over `transport` and returns the address
/// carried by the first answer record of the reply.
///
/// Fails with [`dns_message::MessageError::NoAnswer`] when the answer section
/// is empty and with [`dns_message::MessageError::UnsupportedRecordType`] when
/// the first answer is not an A record.
#[instrument(skip(transport, ids))]
pub async fn lookup<T, G>(transport: &mut T, ids: &mut G, domain: &str) -> Result<Answer>
where
    T: Transport + ?Sized,
    G: IdGenerator,
{
    let id = ids.next_id();
    let query = QueryBuilder::new(domain).id(id).q_type(Type::A).build()?;
    debug!("Query {} for {}", id, domain);

    let (from, reply) = transport.exchange(&query).await?;
    let packet = Packet::from_bytes(&reply)?;
    info!("Got back from {}: {}", from, packet);

    if packet.header.id != id {
        warn!(
            "Reply id {} does not match query id {}",
            packet.header.id, id
        );
    }

    let answer = packet.first_answer()?;
    Ok(Answer {
        name: answer.name.clone(),
        address: answer.address()?,
    })
}
