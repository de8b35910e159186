//! Fundamental type definitions for the blackboard.
//!
//! This module contains the identifiers shared across nodes, the typed form of
//! an inbound request, the mutations forwarded between peers, and the
//! url-encoded form that carries both over the wire.

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};

/// Identity of an entry. Unique within a node's store at any instant.
pub type EntryId = u64;

/// Identity of a node (the original topology calls them vessels).
pub type NodeId = u32;

/// Where a request came from.
///
/// Client requests are applied with local id allocation and forwarded to every
/// peer. Peer requests are already-forwarded mutations: they keep the origin's
/// id and are never forwarded again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Client,
    Peer,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Client => "client",
            Origin::Peer => "peer",
        }
    }

    fn parse(raw: Option<&str>) -> Result<Self> {
        match raw {
            None | Some("") | Some("client") => Ok(Origin::Client),
            Some("peer") => Ok(Origin::Peer),
            Some(other) => Err(BoardError::Validation(format!(
                "unknown origin '{other}'"
            ))),
        }
    }
}

/// The single store call a request maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Post a new entry. `key` is only set for replicated creates.
    Create {
        key: Option<EntryId>,
        content: String,
    },
    Update {
        key: EntryId,
        content: String,
    },
    Delete {
        key: EntryId,
    },
    List,
}

/// A decoded request, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRequest {
    pub operation: Operation,
    pub origin: Origin,
}

impl BoardRequest {
    pub fn new(operation: Operation, origin: Origin) -> Self {
        Self { operation, origin }
    }

    /// A client create of `content`.
    pub fn create(content: impl Into<String>) -> Self {
        Self::new(
            Operation::Create {
                key: None,
                content: content.into(),
            },
            Origin::Client,
        )
    }

    pub fn update(key: EntryId, content: impl Into<String>) -> Self {
        Self::new(
            Operation::Update {
                key,
                content: content.into(),
            },
            Origin::Client,
        )
    }

    pub fn delete(key: EntryId) -> Self {
        Self::new(Operation::Delete { key }, Origin::Client)
    }

    pub fn list() -> Self {
        Self::new(Operation::List, Origin::Client)
    }
}

/// A completed local mutation, as forwarded to peers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Create { key: EntryId, value: String },
    Update { key: EntryId, value: String },
    Delete { key: EntryId },
}

impl Mutation {
    /// Name of the action, used in logs.
    pub fn action(&self) -> &'static str {
        match self {
            Mutation::Create { .. } => "create",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
        }
    }

    pub fn key(&self) -> EntryId {
        match self {
            Mutation::Create { key, .. }
            | Mutation::Update { key, .. }
            | Mutation::Delete { key } => *key,
        }
    }

    /// Encodes the mutation in the client-facing form shape, marked as
    /// coming from a peer.
    pub fn to_form(&self) -> BoardForm {
        let origin = Some(Origin::Peer.as_str().to_string());
        match self {
            Mutation::Create { key, value } => BoardForm {
                entry: Some(value.clone()),
                key: Some(key.to_string()),
                origin,
                ..Default::default()
            },
            Mutation::Update { key, value } => BoardForm {
                delete: Some("0".to_string()),
                key: Some(key.to_string()),
                value: Some(value.clone()),
                origin,
                ..Default::default()
            },
            Mutation::Delete { key } => BoardForm {
                delete: Some("1".to_string()),
                key: Some(key.to_string()),
                origin,
                ..Default::default()
            },
        }
    }
}

/// Url-encoded body of `POST /board`.
///
/// - `entry=<text>` creates an entry.
/// - `delete=1&key=<id>` deletes an entry.
/// - `delete=0&key=<id>&value=<text>` updates an entry.
///
/// Peers add `origin=peer` (and `key` on creates).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

fn parse_key(raw: Option<&str>) -> Result<EntryId> {
    let raw = raw.ok_or_else(|| BoardError::Validation("missing 'key'".to_string()))?;
    raw.trim()
        .parse()
        .map_err(|_| BoardError::Validation(format!("'key' is not a non-negative integer: '{raw}'")))
}

/// The id of a replicated create. `EntryId::MAX` is refused: installing it
/// would leave no id for the next local create.
fn parse_replicated_key(raw: Option<&str>) -> Result<EntryId> {
    let key = parse_key(raw)?;
    if key == EntryId::MAX {
        return Err(BoardError::Validation(format!(
            "'key' {key} is out of range for a replicated entry"
        )));
    }
    Ok(key)
}

impl TryFrom<BoardForm> for BoardRequest {
    type Error = BoardError;

    fn try_from(form: BoardForm) -> Result<Self> {
        let origin = Origin::parse(form.origin.as_deref())?;

        let operation = match form.delete.as_deref() {
            Some(flag) => {
                let key = parse_key(form.key.as_deref())?;
                match flag {
                    "1" => Operation::Delete { key },
                    "0" => {
                        let content = form.value.ok_or_else(|| {
                            BoardError::Validation("missing 'value' for update".to_string())
                        })?;
                        Operation::Update { key, content }
                    }
                    other => {
                        return Err(BoardError::Validation(format!(
                            "'delete' must be 0 or 1, got '{other}'"
                        )));
                    }
                }
            }
            None => {
                let content = form
                    .entry
                    .ok_or_else(|| BoardError::Validation("missing 'entry'".to_string()))?;
                let key = match origin {
                    Origin::Peer => Some(parse_replicated_key(form.key.as_deref())?),
                    Origin::Client => None,
                };
                Operation::Create { key, content }
            }
        };

        Ok(BoardRequest { operation, origin })
    }
}
