//! Entry definition for the blackboard.
//!
//! An entry is a single text record posted to the board. Its id is assigned
//! once, either locally by the store or by the node where the entry was first
//! created, and never changes afterwards.

use serde::{Deserialize, Serialize};

use crate::types::EntryId;

/// A single text record on the board.
///
/// Only the content can change after creation, and only through an explicit
/// update. Replicas agree on an entry's identity through its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Identity of the entry, shared by every replica holding it
    pub id: EntryId,
    /// The posted text
    pub content: String,
}

impl Entry {
    /// Creates a new entry with the given id and content.
    pub fn new(id: EntryId, content: impl Into<String>) -> Self {
        Entry {
            id,
            content: content.into(),
        }
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id
            .cmp(&other.id)
            .then_with(|| self.content.cmp(&other.content))
    }
}
