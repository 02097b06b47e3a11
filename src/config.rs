use clap::Parser;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// Resolver used when none is configured.
pub const DEFAULT_RESOLVER: &str = "8.8.8.8:53";

#[derive(Debug, Parser)]
#[command(name = "dns-lookup")]
#[command(version)]
#[command(about = "Look up the IPv4 address of a domain name")]
pub struct Cli {
    /// Domain name to resolve
    pub domain: String,

    /// Upstream resolver address
    #[arg(short, long, env = "DNS_LOOKUP_SERVER", default_value = DEFAULT_RESOLVER)]
    pub server: SocketAddr,

    /// Log level (trace, debug, info, warn, error), overrides RUST_LOG
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Installs the stderr log subscriber. Without an explicit level `RUST_LOG`
/// is honoured, falling back to `warn`.
pub fn init_logging(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
