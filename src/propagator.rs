//! Best-effort fan-out of local mutations to every known peer.
//!
//! Each mutation is delivered from one detached task. Within that task every
//! peer gets exactly one `POST /board` attempt, bounded by the configured
//! timeout. A failed peer is logged and skipped; it never stops delivery to
//! the others and never rolls back the local mutation.

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{BoardError, Result};
use crate::registry::PeerRegistry;
use crate::types::{BoardForm, Mutation};

/// Per-peer outcome of one fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Peers that acknowledged with a success status
    pub delivered: Vec<String>,
    /// One `PeerUnreachable` per peer that did not
    pub failed: Vec<BoardError>,
}

impl DeliveryReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Forwards mutations to the peers of a [`PeerRegistry`].
#[derive(Debug, Clone)]
pub struct Propagator {
    registry: Arc<PeerRegistry>,
    client: reqwest::Client,
}

impl Propagator {
    pub fn new(registry: Arc<PeerRegistry>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BoardError::Config(format!("failed to build peer client: {e}")))?;

        Ok(Self { registry, client })
    }

    /// Starts delivering `mutation` to every peer and returns immediately.
    ///
    /// Returns `None` when there is nobody to deliver to, or when called
    /// outside a tokio runtime (the mutation is then only applied locally).
    pub fn propagate(&self, mutation: Mutation) -> Option<JoinHandle<DeliveryReport>> {
        if self.registry.is_empty() {
            return None;
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                warn!(
                    "no runtime available, {} of entry {} not propagated",
                    mutation.action(),
                    mutation.key()
                );
                return None;
            }
        };

        let registry = Arc::clone(&self.registry);
        let client = self.client.clone();
        Some(runtime.spawn(async move { deliver(&client, &registry, &mutation).await }))
    }
}

async fn deliver(
    client: &reqwest::Client,
    registry: &PeerRegistry,
    mutation: &Mutation,
) -> DeliveryReport {
    let form = mutation.to_form();
    let sends = registry
        .peers()
        .iter()
        .map(|peer| send_to_peer(client, peer, &form));
    let results = join_all(sends).await;

    let mut report = DeliveryReport::default();
    for (peer, result) in registry.peers().iter().zip(results) {
        match result {
            Ok(()) => {
                debug!(
                    "[PROPAGATE] {} of entry {} delivered to {}",
                    mutation.action(),
                    mutation.key(),
                    peer
                );
                report.delivered.push(peer.clone());
            }
            Err(e) => {
                warn!(
                    "[PROPAGATE] {} of entry {} not delivered: {}",
                    mutation.action(),
                    mutation.key(),
                    e
                );
                report.failed.push(e);
            }
        }
    }
    report
}

async fn send_to_peer(client: &reqwest::Client, peer: &str, form: &BoardForm) -> Result<()> {
    client
        .post(peer_url(peer))
        .form(form)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|e| BoardError::peer_unreachable(peer, &e))?;
    Ok(())
}

fn peer_url(peer: &str) -> String {
    if peer.starts_with("http://") || peer.starts_with("https://") {
        format!("{}/board", peer.trim_end_matches('/'))
    } else {
        format!("http://{peer}/board")
    }
}
