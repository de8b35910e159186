//! Board storage.
//!
//! This module contains the entry type and the per-node store that holds the
//! local copy of the board.

pub mod entry;
pub mod store;

pub use entry::Entry;
pub use store::Store;
