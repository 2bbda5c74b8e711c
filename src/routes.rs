// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{health, test_results, test_submission},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (tests, students, admin, results).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store handle and config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let test_routes = Router::new()
        .route("/{test_id}", get(test_submission::get_test_paper))
        .route("/{test_id}/submit", post(test_submission::submit_test));

    let student_routes =
        Router::new().route("/{id}/test-results", get(test_results::list_student_results));

    let admin_routes = Router::new().route("/test-results", get(test_results::list_all_results));

    let result_routes = Router::new().route("/{id}", get(test_results::get_result));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/tests", test_routes)
        .nest("/api/students", student_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/test-results", result_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
