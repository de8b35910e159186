//! Main entry point for a blackboard node.
//!
//! Usage mirrors the vessel layout: `blackboard <NODE_ID> <VESSEL_COUNT>`
//! starts vessel `NODE_ID` of `VESSEL_COUNT`, with vessel `i` reachable at
//! `<subnet>.<i>:<port>`.

use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use blackboard::config::{DEFAULT_PORT, DEFAULT_SUBNET};
use blackboard::{Node, NodeConfig, server};

/// Command-line arguments for a blackboard node.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run one node of the replicated blackboard")]
struct Args {
    /// Id of this vessel, in 1..=VESSEL_COUNT
    node_id: u32,

    /// Total number of vessels
    vessel_count: u32,

    /// Port every vessel listens on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// First three octets of the vessel addresses
    #[arg(long, default_value = DEFAULT_SUBNET)]
    subnet: String,

    /// Socket to bind instead of 0.0.0.0:<port>
    #[arg(long)]
    listen: Option<SocketAddr>,

    /// Comma-separated peer addresses (host:port), replacing the derived vessel list
    #[arg(long, value_delimiter = ',')]
    peer: Vec<String>,

    /// Timeout for a single send to a peer, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn build_config(args: Args) -> blackboard::Result<NodeConfig> {
    let mut config =
        NodeConfig::for_vessels(args.node_id, args.vessel_count, &args.subnet, args.port)?
            .with_timeout(Duration::from_secs(args.timeout_secs));

    if let Some(listen) = args.listen {
        config.bind_addr = listen;
    }
    if !args.peer.is_empty() {
        config.peers = args.peer;
    }
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for ctrl-c: {}", e);
    }
    info!("Stopping server");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = build_config(Args::parse())?;
    let bind_addr = config.bind_addr;
    let node = Node::new(config)?;

    let listener = TcpListener::bind(bind_addr).await?;
    info!(
        "Vessel {} listening on http://{} (reachable as {})",
        node.identity(),
        listener.local_addr()?,
        node.address()
    );
    info!("Peers: {:?}", node.registry().peers());

    server::serve(listener, node, shutdown_signal()).await?;
    Ok(())
}
