//! Integration tests against a real Postgres database.
//!
//! These tests require DB_USER and DB_NAME (and usually DB_HOST/DB_PASS)
//! to point at a database the tests may write to.
//! Run with: cargo test --test integration -- --ignored

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::Value;
use tower::ServiceExt;

use secret_message::api::{create_router, AppState};
use secret_message::config::Config;
use secret_message::metrics::detached_handle;
use secret_message::store::{MessageStore, PgMessageStore};

/// Connect a store from environment, or None if the database is not configured.
async fn test_store() -> Option<PgMessageStore> {
    let config = match Config::load_validated() {
        Ok(c) => c,
        Err(e) => {
            println!("Skipping: {}", e);
            return None;
        }
    };

    let store = PgMessageStore::connect(&config)
        .await
        .expect("database configured but unreachable");
    store.ensure_schema().await.expect("failed to create table");
    Some(store)
}

async fn send(app: &axum::Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Insert then read back through the store.
#[tokio::test]
#[ignore = "requires a Postgres database"]
async fn test_insert_and_get_by_id() {
    let Some(store) = test_store().await else {
        return;
    };

    let id = store.insert("integration hello").await.unwrap();
    let row = store.get_by_id(id).await.unwrap();

    assert_eq!(row.map(|r| r.message), Some("integration hello".to_string()));
}

/// Listed rows include every id returned by insert.
#[tokio::test]
#[ignore = "requires a Postgres database"]
async fn test_list_contains_inserted_rows() {
    let Some(store) = test_store().await else {
        return;
    };

    let a = store.insert("list a").await.unwrap();
    let b = store.insert("list b").await.unwrap();
    let rows = store.list_all().await.unwrap();

    assert!(rows.iter().any(|r| r.id == a && r.message == "list a"));
    assert!(rows.iter().any(|r| r.id == b && r.message == "list b"));
}

/// Unknown ids are absent.
#[tokio::test]
#[ignore = "requires a Postgres database"]
async fn test_get_missing_id_returns_none() {
    let Some(store) = test_store().await else {
        return;
    };

    assert!(store.get_by_id(i64::MAX).await.unwrap().is_none());
    assert!(store.ping().await.is_ok());
}

/// Full HTTP round trip backed by Postgres.
#[tokio::test]
#[ignore = "requires a Postgres database"]
async fn test_http_round_trip() {
    let Some(store) = test_store().await else {
        return;
    };
    let app = create_router(AppState::new(Arc::new(store), detached_handle()));

    let (status, created) = send(&app, Method::POST, "/secrets", r#"{"message":"over http"}"#).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/secret?id={}", created["id"]);
    let (status, fetched) = send(&app, Method::GET, &uri, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = send(&app, Method::GET, "/secret?id=-42", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
