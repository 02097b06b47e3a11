use clap::Parser;
use dns_lookup::{init_logging, lookup, Cli, UdpTransport};
use dns_message::RandomId;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    tracing::info!("Resolving {} via {}", cli.domain, cli.server);

    let mut transport = UdpTransport::new(cli.server);
    let answer = lookup(&mut transport, &mut RandomId, &cli.domain).await?;

    println!("{}", answer);

    Ok(())
}
