//! Error responses and the outer middleware stack.
//!
//! Nothing here needs a running database: failures are produced by a pool
//! that points at a closed port.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS, ORIGIN};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use common::{
    body_text, build_test_app, build_test_app_with, build_test_app_with_cache, get, silent_pool,
    test_config, unreachable_pool,
};
use tower::ServiceExt;

use pmdx_api::cache::MemoryCache;
use pmdx_api::config::ServerConfig;
use pmdx_api::error::{AppError, INTERNAL_ERROR_MESSAGE};
use pmdx_core::error::CoreError;
use pmdx_core::search::SearchKey;
use pmdx_db::DbError;

// ---------------------------------------------------------------------------
// AppError -> response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_is_plain_text_404() {
    let err = AppError::Core(CoreError::NotFound {
        resource: "pokemon",
        key: SearchKey::Id(9999),
    });

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_text(response).await,
        "resource of type 'pokemon' with ID '9999' not found"
    );
}

#[tokio::test]
async fn not_found_from_repository_is_still_404() {
    let err = AppError::from(DbError::Core(CoreError::NotFound {
        resource: "camp",
        key: SearchKey::Name("Nowhere".into()),
    }));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Nowhere"));
}

#[tokio::test]
async fn database_failure_is_generic_500() {
    let err = AppError::from(DbError::Query {
        query: "pokemon moves",
        source: sqlx::Error::PoolTimedOut,
    });

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, INTERNAL_ERROR_MESSAGE);
}

// ---------------------------------------------------------------------------
// Through the full router
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_database_yields_500_and_is_not_cached() {
    let memory = Arc::new(MemoryCache::new());
    let app = build_test_app_with_cache(unreachable_pool(), memory.clone());

    let response = get(app, "/v1/pokemon/25").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, INTERNAL_ERROR_MESSAGE);
    assert!(memory.is_empty());
}

#[tokio::test]
async fn slow_database_runs_to_completion_without_a_timeout() {
    let app = build_test_app(silent_pool(Duration::from_millis(1500)).await);

    let response = get(app, "/v1/pokemon/25").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, INTERNAL_ERROR_MESSAGE);
}

#[tokio::test]
async fn configured_timeout_cuts_off_a_slow_request() {
    let config = ServerConfig {
        request_timeout_secs: Some(1),
        ..test_config()
    };
    let memory = Arc::new(MemoryCache::new());
    let pool = silent_pool(Duration::from_secs(5)).await;
    let app = build_test_app_with(pool, config, memory.clone());

    let response = get(app, "/v1/pokemon/25").await;

    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(memory.is_empty());
}

#[tokio::test]
async fn list_with_unreachable_database_yields_500() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/v1/abilities?sort=name_desc").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_reports_unreachable_database() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn response_carries_request_id() {
    let app = build_test_app(unreachable_pool());
    let response = get(app, "/this-route-does-not-exist").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

#[tokio::test]
async fn cors_allows_any_origin_and_exposes_link() {
    let app = build_test_app(unreachable_pool());
    let request = Request::builder()
        .uri("/this-route-does-not-exist")
        .header(ORIGIN, "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let exposed = response.headers()[ACCESS_CONTROL_EXPOSE_HEADERS]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    assert!(exposed.contains("link"), "{exposed}");
}
