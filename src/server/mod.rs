//! Web server module for the blackboard.
//!
//! This module contains the Axum route table and the helpers that run it on a
//! bound listener.

pub mod routes;

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::node::Node;

// Re-export main server functionality
pub use routes::*;

/// Serves `node` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    node: Arc<Node>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    axum::serve(listener, create_router(node))
        .with_graceful_shutdown(shutdown)
        .await
}
