//! A one shot DNS client: send a single A query to a resolver and report the
//! first address in the reply.

mod config;
mod lookup;
mod transport;

pub use config::{init_logging, Cli, DEFAULT_RESOLVER};
pub use lookup::{lookup, Answer};
pub use transport::{Transport, UdpTransport};
