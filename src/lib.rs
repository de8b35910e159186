//! # Blackboard - a replicated shared board
//!
//! A set of independent peer nodes each hold a local copy of an ordered
//! collection of text entries. Every mutation a client makes on one node is
//! applied locally first and then forwarded, best effort, to all other known
//! nodes over the same HTTP request the client used.
//!
//! ## Features
//!
//! - **Local-first**: clients are acknowledged as soon as their node's store is updated
//! - **Shared identities**: replicated creates keep the id assigned by the origin node
//! - **One hop**: forwarded mutations are tagged `origin=peer` and never forwarded again
//! - **Failure isolation**: an unreachable peer only produces a log line
//!
//! Consistency is weak by design of the protocol: a peer that misses a
//! forwarded mutation stays diverged, and there is no reconciliation.
//!
//! ## Example
//!
//! ```rust
//! use blackboard::{BoardRequest, Node, NodeConfig, Outcome};
//!
//! let config = NodeConfig::for_vessels(1, 1, "10.1.0", 80).unwrap();
//! let node = Node::new(config).unwrap();
//!
//! let outcome = node.router().dispatch(BoardRequest::create("hello")).unwrap();
//! assert_eq!(outcome, Outcome::Created(0));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod node;
pub mod propagator;
pub mod registry;
pub mod render;
pub mod router;
pub mod server;
pub mod types;

pub use board::{Entry, Store};
pub use config::NodeConfig;
pub use error::{BoardError, Result};
pub use node::Node;
pub use propagator::{DeliveryReport, Propagator};
pub use registry::PeerRegistry;
pub use router::{MutationRouter, Outcome};
pub use types::{BoardForm, BoardRequest, EntryId, Mutation, NodeId, Operation, Origin};
