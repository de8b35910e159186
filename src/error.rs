//! Error taxonomy for the blackboard.
//!
//! Validation and not-found errors are returned to the caller as client
//! errors. Peer delivery failures are only ever logged: by the time they
//! happen the local mutation has been applied and acknowledged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::types::EntryId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    #[error("No entry ids left on this node")]
    IdSpaceExhausted,

    #[error("Peer {peer} unreachable: {reason}")]
    PeerUnreachable { peer: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;

impl BoardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::NotFound(_) => StatusCode::NOT_FOUND,
            BoardError::IdSpaceExhausted => StatusCode::INSUFFICIENT_STORAGE,
            BoardError::PeerUnreachable { .. } => StatusCode::BAD_GATEWAY,
            BoardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classifies a failed peer send.
    pub fn peer_unreachable(peer: &str, err: &reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else if let Some(status) = err.status() {
            format!("returned {status}")
        } else {
            err.to_string()
        };
        BoardError::PeerUnreachable {
            peer: peer.to_string(),
            reason,
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
