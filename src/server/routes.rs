//! Route handlers for the blackboard web server.
//!
//! Clients and peers share the same surface: a peer's forwarded mutation is a
//! regular `POST /board` carrying `origin=peer`.

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, Json},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::board::Entry;
use crate::error::BoardError;
use crate::node::Node;
use crate::render::{render_board, render_page};
use crate::types::{BoardForm, BoardRequest, NodeId};

/// Shared application state
pub type AppState = Arc<Node>;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: NodeId,
    pub peers: usize,
    pub entries: usize,
}

/// GET / - header, board and footer
pub async fn index(State(node): State<AppState>) -> Html<String> {
    let entries = node.router().entries();
    Html(render_page(&entries, node.identity(), node.registry().peers()))
}

/// GET /board - the entry list only
pub async fn board(State(node): State<AppState>) -> Html<String> {
    let entries = node.router().entries();
    Html(render_board(&entries, node.identity()))
}

/// POST /board - create, update or delete an entry
///
/// Answers once the local store has been updated; propagation to peers
/// continues in the background.
pub async fn update_board(
    State(node): State<AppState>,
    Form(form): Form<BoardForm>,
) -> Result<StatusCode, BoardError> {
    let request = BoardRequest::try_from(form)?;
    node.router().dispatch(request)?;
    Ok(StatusCode::OK)
}

/// GET /entries - the entry list as JSON
pub async fn entries(State(node): State<AppState>) -> Json<Vec<Entry>> {
    Json(node.router().entries())
}

/// Basic health check endpoint
pub async fn health(State(node): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        node_id: node.identity(),
        peers: node.registry().len(),
        entries: node.store().len(),
    })
}

/// Creates and configures the main application router
pub fn create_router(node: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/board", get(board).post(update_board))
        .route("/entries", get(entries))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(node)
}
