// tests/router_tests.rs

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use coaching_backend::{config::Config, routes, state::AppState, store::MemoryStore};
use tower::ServiceExt;

fn app() -> axum::Router {
    routes::create_router(AppState {
        store: Arc::new(MemoryStore::new()),
        config: Config::in_memory(),
    })
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/admin/test-results")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "content-type"
    );
}

#[tokio::test]
async fn malformed_submission_body_is_rejected() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tests/1/submit")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"answers": {}}"#))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    // studentId is required
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn empty_result_list_for_unknown_student() {
    let request = Request::builder()
        .uri("/api/students/77/test-results")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!([]));
}
