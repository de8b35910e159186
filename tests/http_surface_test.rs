//! Integration tests for the HTTP surface of a single node.
//!
//! These tests drive the Axum router directly, without sockets, and check
//! status codes and store effects for every route.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use blackboard::server::create_router;
use blackboard::{Entry, Node, NodeConfig};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn standalone_node() -> Arc<Node> {
    Node::new(NodeConfig::for_vessels(1, 1, "10.1.0", 80).unwrap()).unwrap()
}

async fn post_board(app: &Router, body: &str) -> StatusCode {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/board")
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_create_then_list() {
    let node = standalone_node();
    let app = create_router(Arc::clone(&node));

    assert_eq!(post_board(&app, "entry=first").await, StatusCode::OK);
    assert_eq!(post_board(&app, "entry=second+post").await, StatusCode::OK);

    let (status, body) = get_text(&app, "/entries").await;
    assert_eq!(status, StatusCode::OK);
    let entries: Vec<Entry> = serde_json::from_str(&body).unwrap();
    assert_eq!(
        entries,
        vec![Entry::new(0, "first"), Entry::new(1, "second post")]
    );
}

#[tokio::test]
async fn test_update_existing_and_missing() {
    let node = standalone_node();
    let app = create_router(Arc::clone(&node));
    post_board(&app, "entry=draft").await;

    assert_eq!(
        post_board(&app, "delete=0&key=0&value=final").await,
        StatusCode::OK
    );
    assert_eq!(node.store().get(0), Some(Entry::new(0, "final")));

    assert_eq!(
        post_board(&app, "delete=0&key=999&value=x").await,
        StatusCode::NOT_FOUND
    );
    assert!(node.store().get(999).is_none());
    assert_eq!(node.store().len(), 1);
}

#[tokio::test]
async fn test_delete_absent_id_succeeds() {
    let node = standalone_node();
    let app = create_router(Arc::clone(&node));
    post_board(&app, "entry=a").await;

    assert_eq!(post_board(&app, "delete=1&key=0").await, StatusCode::OK);
    assert_eq!(post_board(&app, "delete=1&key=0").await, StatusCode::OK);
    assert_eq!(post_board(&app, "delete=1&key=42").await, StatusCode::OK);
    assert!(node.store().is_empty());
}

#[tokio::test]
async fn test_validation_errors_are_client_errors() {
    let node = standalone_node();
    let app = create_router(Arc::clone(&node));

    for body in [
        "",
        "value=orphan",
        "delete=1",
        "delete=1&key=abc",
        "delete=0&key=1",
        "delete=7&key=1",
        "entry=x&origin=stranger",
        "entry=x&origin=peer",
    ] {
        assert_eq!(
            post_board(&app, body).await,
            StatusCode::BAD_REQUEST,
            "body {body:?}"
        );
    }
    assert!(node.store().is_empty());
}

#[tokio::test]
async fn test_peer_create_uses_supplied_key() {
    let node = standalone_node();
    let app = create_router(Arc::clone(&node));

    assert_eq!(
        post_board(&app, "entry=remote&key=5&origin=peer").await,
        StatusCode::OK
    );
    assert_eq!(node.store().get(5), Some(Entry::new(5, "remote")));

    post_board(&app, "entry=local").await;
    assert_eq!(node.store().get(6), Some(Entry::new(6, "local")));
}

#[tokio::test]
async fn test_board_and_index_render_entries() {
    let node = standalone_node();
    let app = create_router(Arc::clone(&node));
    post_board(&app, "entry=%3Cb%3Ehi%3C%2Fb%3E").await;

    let (status, board) = get_text(&app, "/board").await;
    assert_eq!(status, StatusCode::OK);
    assert!(board.contains("&lt;b&gt;hi&lt;/b&gt;"));
    assert!(!board.contains("<html>"));

    let (status, page) = get_text(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<html>"));
    assert!(page.contains("&lt;b&gt;hi&lt;/b&gt;"));
}

#[tokio::test]
async fn test_health_reports_node() {
    let node = standalone_node();
    let app = create_router(Arc::clone(&node));
    post_board(&app, "entry=a").await;

    let (status, body) = get_text(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        health,
        serde_json::json!({"status": "ok", "node_id": 1, "peers": 0, "entries": 1})
    );
}
