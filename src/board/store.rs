//! In-memory entry store owned by a single node.
//!
//! The store is the node's authoritative local copy of the board. Every
//! operation, reads included, runs under one mutex scoped to the store
//! instance, so concurrent creates can never observe the same `next_id` and a
//! listing never sees a half-applied mutation.

use parking_lot::Mutex;
use std::collections::BTreeMap;

use crate::board::entry::Entry;
use crate::types::EntryId;

/// Ordered collection of entries plus the counter used for local id allocation.
///
/// # Id allocation
///
/// - Local creates take `next_id` and then increment it, so ids are never
///   reused even after the entry is deleted.
/// - Replicated creates keep the id chosen by the origin node. If that id is at
///   or beyond the local counter, the counter moves to `id + 1`.
///
/// The lock is held only for the in-memory mutation and never across I/O.
#[derive(Debug, Default)]
pub struct Store {
    inner: Mutex<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    entries: BTreeMap<EntryId, Entry>,
    next_id: EntryId,
}

impl StoreInner {
    fn advance_past(&mut self, id: EntryId) {
        if id >= self.next_id {
            self.next_id = id.saturating_add(1);
        }
    }
}

impl Store {
    /// Creates an empty store with `next_id` at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry under a freshly allocated local id and returns that id.
    ///
    /// Returns `None` once the id space is used up; `EntryId::MAX` is never
    /// handed out, so the counter cannot wrap back onto live ids.
    pub fn create(&self, content: impl Into<String>) -> Option<EntryId> {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id = id.checked_add(1)?;
        inner.entries.insert(id, Entry::new(id, content));
        Some(id)
    }

    /// Installs an entry under an id chosen by another node.
    ///
    /// Any entry already stored at `id` is overwritten (last write wins).
    /// Callers reject `EntryId::MAX` before getting here.
    pub fn create_at(&self, id: EntryId, content: impl Into<String>) {
        let mut inner = self.inner.lock();
        inner.entries.insert(id, Entry::new(id, content));
        inner.advance_past(id);
    }

    /// Replaces the content of an existing entry.
    ///
    /// Returns `false` and leaves the store untouched when `id` is absent.
    pub fn update(&self, id: EntryId, content: impl Into<String>) -> bool {
        let mut inner = self.inner.lock();
        match inner.entries.get_mut(&id) {
            Some(entry) => {
                entry.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Removes an entry, returning whether anything was removed.
    pub fn delete(&self, id: EntryId) -> bool {
        self.inner.lock().entries.remove(&id).is_some()
    }

    /// Returns a snapshot of all entries in ascending id order.
    pub fn list(&self) -> Vec<Entry> {
        self.inner.lock().entries.values().cloned().collect()
    }

    /// Looks up a single entry.
    pub fn get(&self, id: EntryId) -> Option<Entry> {
        self.inner.lock().entries.get(&id).cloned()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// The id the next local create will receive.
    pub fn next_id(&self) -> EntryId {
        self.inner.lock().next_id
    }
}
