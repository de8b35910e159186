//! Node configuration.
//!
//! A node needs its identity, the address peers reach it on, the socket to
//! bind, and the full list of node addresses. The original deployment places
//! vessel `i` at `<subnet>.<i>` on a shared port; [`NodeConfig::for_vessels`]
//! derives that layout from a node id and a vessel count.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{BoardError, Result};
use crate::types::NodeId;

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_SUBNET: &str = "10.1.0";
pub const DEFAULT_PROPAGATION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    pub node_id: NodeId,
    /// Address peers use to reach this node (`host:port`)
    pub address: String,
    pub bind_addr: SocketAddr,
    /// Every known node address; may include `address`, which the registry drops
    pub peers: Vec<String>,
    /// Upper bound on a single send to a peer
    pub propagation_timeout: Duration,
}

impl NodeConfig {
    /// A node with an explicit peer list, listening on `bind_addr`.
    pub fn new(node_id: NodeId, bind_addr: SocketAddr, peers: Vec<String>) -> Self {
        Self {
            node_id,
            address: bind_addr.to_string(),
            bind_addr,
            peers,
            propagation_timeout: DEFAULT_PROPAGATION_TIMEOUT,
        }
    }

    /// Derives the vessel topology: nodes `1..=vessel_count` at `<subnet>.<i>:<port>`.
    pub fn for_vessels(
        node_id: NodeId,
        vessel_count: u32,
        subnet: &str,
        port: u16,
    ) -> Result<Self> {
        if vessel_count == 0 {
            return Err(BoardError::Config(
                "vessel count must be at least 1".to_string(),
            ));
        }
        if node_id == 0 || node_id > vessel_count {
            return Err(BoardError::Config(format!(
                "node id {node_id} is outside 1..={vessel_count}"
            )));
        }

        let peers = (1..=vessel_count)
            .map(|i| vessel_address(subnet, i, port))
            .collect();

        Ok(Self {
            node_id,
            address: vessel_address(subnet, node_id, port),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            peers,
            propagation_timeout: DEFAULT_PROPAGATION_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.propagation_timeout = timeout;
        self
    }
}

fn vessel_address(subnet: &str, id: NodeId, port: u16) -> String {
    format!("{subnet}.{id}:{port}")
}
