//! Mutation routing.
//!
//! Turns a decoded [`BoardRequest`] into exactly one store call and, for
//! mutations that came from a client, hands the result to the propagator. The
//! store lock is released before propagation starts, and propagation is never
//! awaited here.

use std::sync::Arc;
use tracing::{debug, info};

use crate::board::{Entry, Store};
use crate::error::{BoardError, Result};
use crate::propagator::Propagator;
use crate::types::{BoardRequest, EntryId, Mutation, Operation, Origin};

/// Typed result of a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(EntryId),
    Updated(EntryId),
    /// `removed` is false when the id was already absent (a no-op, not an error)
    Deleted { id: EntryId, removed: bool },
    Listed(Vec<Entry>),
}

pub struct MutationRouter {
    store: Arc<Store>,
    propagator: Propagator,
}

impl MutationRouter {
    pub fn new(store: Arc<Store>, propagator: Propagator) -> Self {
        Self { store, propagator }
    }

    /// Applies `request` to the local store and schedules propagation.
    ///
    /// Peer-origin requests keep the origin's id on create and are never
    /// forwarded again, so a mutation travels exactly one hop.
    pub fn dispatch(&self, request: BoardRequest) -> Result<Outcome> {
        let BoardRequest { operation, origin } = request;

        let (outcome, mutation) = match operation {
            Operation::Create { key, content } => {
                let id = match (origin, key) {
                    (Origin::Peer, Some(id)) if id == EntryId::MAX => {
                        return Err(BoardError::Validation(format!(
                            "replicated key {} leaves no room for local ids",
                            EntryId::MAX
                        )));
                    }
                    (Origin::Peer, Some(id)) => {
                        self.store.create_at(id, content.clone());
                        id
                    }
                    (Origin::Peer, None) => {
                        return Err(BoardError::Validation(
                            "replicated create without 'key'".to_string(),
                        ));
                    }
                    (Origin::Client, _) => self
                        .store
                        .create(content.clone())
                        .ok_or(BoardError::IdSpaceExhausted)?,
                };
                (
                    Outcome::Created(id),
                    Some(Mutation::Create {
                        key: id,
                        value: content,
                    }),
                )
            }
            Operation::Update { key, content } => {
                if !self.store.update(key, content.clone()) {
                    return Err(BoardError::NotFound(key));
                }
                (
                    Outcome::Updated(key),
                    Some(Mutation::Update {
                        key,
                        value: content,
                    }),
                )
            }
            Operation::Delete { key } => {
                let removed = self.store.delete(key);
                if !removed {
                    debug!("delete of absent entry {} ignored", key);
                }
                (
                    Outcome::Deleted { id: key, removed },
                    Some(Mutation::Delete { key }),
                )
            }
            Operation::List => (Outcome::Listed(self.entries()), None),
        };

        if let Some(mutation) = mutation {
            match origin {
                Origin::Client => {
                    info!("applied client {} of entry {}", mutation.action(), mutation.key());
                    // Detached: the caller is acknowledged for the local apply only.
                    let _ = self.propagator.propagate(mutation);
                }
                Origin::Peer => {
                    debug!("applied replicated {} of entry {}", mutation.action(), mutation.key());
                }
            }
        }

        Ok(outcome)
    }

    /// Current entries in ascending id order. Read-only, never propagated.
    pub fn entries(&self) -> Vec<Entry> {
        self.store.list()
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PeerRegistry;
    use std::time::Duration;

    fn standalone() -> MutationRouter {
        let propagator =
            Propagator::new(Arc::new(PeerRegistry::default()), Duration::from_secs(1)).unwrap();
        MutationRouter::new(Arc::new(Store::new()), propagator)
    }

    fn peer_create(key: EntryId, content: &str) -> BoardRequest {
        BoardRequest::new(
            Operation::Create {
                key: Some(key),
                content: content.to_string(),
            },
            Origin::Peer,
        )
    }

    #[test]
    fn test_client_create_allocates_ids() {
        let router = standalone();

        assert_eq!(router.dispatch(BoardRequest::create("a")), Ok(Outcome::Created(0)));
        assert_eq!(router.dispatch(BoardRequest::create("b")), Ok(Outcome::Created(1)));
    }

    #[test]
    fn test_peer_create_keeps_origin_id() {
        let router = standalone();

        assert_eq!(router.dispatch(peer_create(42, "remote")), Ok(Outcome::Created(42)));
        assert_eq!(router.store().get(42), Some(Entry::new(42, "remote")));
        assert_eq!(router.dispatch(BoardRequest::create("local")), Ok(Outcome::Created(43)));
    }

    #[test]
    fn test_peer_create_without_key_is_rejected() {
        let router = standalone();
        let request = BoardRequest::new(
            Operation::Create {
                key: None,
                content: "x".to_string(),
            },
            Origin::Peer,
        );

        assert!(matches!(router.dispatch(request), Err(BoardError::Validation(_))));
        assert!(router.store().is_empty());
    }

    #[test]
    fn test_peer_create_at_max_key_is_rejected() {
        let router = standalone();

        assert!(matches!(
            router.dispatch(peer_create(EntryId::MAX, "remote")),
            Err(BoardError::Validation(_))
        ));
        assert!(router.store().is_empty());
        assert_eq!(router.store().next_id(), 0);

        // Local creates keep working afterwards.
        assert_eq!(router.dispatch(BoardRequest::create("local")), Ok(Outcome::Created(0)));

        assert_eq!(
            router.dispatch(peer_create(EntryId::MAX - 1, "edge")),
            Ok(Outcome::Created(EntryId::MAX - 1))
        );
        assert_eq!(router.store().next_id(), EntryId::MAX);

        assert_eq!(
            router.dispatch(BoardRequest::create("no room")),
            Err(BoardError::IdSpaceExhausted)
        );
        assert_eq!(router.store().len(), 2);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let router = standalone();

        assert_eq!(
            router.dispatch(BoardRequest::update(999, "x")),
            Err(BoardError::NotFound(999))
        );
        assert!(router.store().is_empty());
    }

    #[test]
    fn test_delete_is_tolerant() {
        let router = standalone();
        router.dispatch(BoardRequest::create("a")).unwrap();

        assert_eq!(
            router.dispatch(BoardRequest::delete(0)),
            Ok(Outcome::Deleted { id: 0, removed: true })
        );
        assert_eq!(
            router.dispatch(BoardRequest::delete(0)),
            Ok(Outcome::Deleted { id: 0, removed: false })
        );
    }

    #[test]
    fn test_list_reflects_gaps() {
        let router = standalone();
        for content in ["a", "b", "c"] {
            router.dispatch(BoardRequest::create(content)).unwrap();
        }
        router.dispatch(BoardRequest::delete(1)).unwrap();

        assert_eq!(
            router.dispatch(BoardRequest::list()),
            Ok(Outcome::Listed(vec![Entry::new(0, "a"), Entry::new(2, "c")]))
        );
        assert_eq!(router.entries(), vec![Entry::new(0, "a"), Entry::new(2, "c")]);
    }
}
