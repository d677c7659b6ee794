use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use membership_backend::config::MapSource;
use membership_backend::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

const UNREACHABLE: &str = "http://127.0.0.1:9";

fn offline_app() -> axum::Router {
    let state = AppState::with_provider_bases(Arc::new(MapSource::new()), UNREACHABLE, UNREACHABLE)
        .unwrap();
    app(state)
}

#[tokio::test]
async fn root_responds_ok() {
    let response = offline_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    assert_eq!(body, "Membership API".as_bytes());
}

#[tokio::test]
async fn billing_history_is_stubbed() {
    let response = offline_app()
        .oneshot(
            Request::builder()
                .uri("/api/billing/history")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["invoices"], json!([]));
}

#[tokio::test]
async fn billing_sync_echoes_payload() {
    let response = offline_app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/billing/sync")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"member_id":"m_42"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let value: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(value["synced"], json!(false));
    assert_eq!(value["metadata"]["member_id"], json!("m_42"));
}
