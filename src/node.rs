//! Node definition: the unit of replication.
//!
//! A node binds one identity and address to a store, the peer registry built
//! from its configuration, and the router that applies requests and forwards
//! client mutations through the propagator.

use std::sync::Arc;
use tracing::info;

use crate::board::Store;
use crate::config::NodeConfig;
use crate::error::Result;
use crate::propagator::Propagator;
use crate::registry::PeerRegistry;
use crate::router::MutationRouter;
use crate::types::NodeId;

/// One participant in the replicated set.
///
/// Created once at process start and dropped on shutdown; nothing is persisted.
pub struct Node {
    identity: NodeId,
    address: String,
    store: Arc<Store>,
    registry: Arc<PeerRegistry>,
    router: MutationRouter,
}

impl Node {
    pub fn new(config: NodeConfig) -> Result<Arc<Self>> {
        let registry = Arc::new(PeerRegistry::new(config.peers, &config.address));
        let store = Arc::new(Store::new());
        let propagator = Propagator::new(Arc::clone(&registry), config.propagation_timeout)?;
        let router = MutationRouter::new(Arc::clone(&store), propagator);

        info!(
            "node {} at {} with {} peers",
            config.node_id,
            config.address,
            registry.len()
        );

        Ok(Arc::new(Self {
            identity: config.node_id,
            address: config.address,
            store,
            registry,
            router,
        }))
    }

    pub fn identity(&self) -> NodeId {
        self.identity
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    pub fn router(&self) -> &MutationRouter {
        &self.router
    }
}
