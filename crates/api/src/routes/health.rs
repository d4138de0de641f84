use axum::extract::State;
use axum::{routing::get, Json, Router};
use pmdx_db::DbError;
use serde::Serialize;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    pmdx_db::health_check(&state.pool)
        .await
        .map_err(DbError::from)?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /health`, outside the cached `/v1` tree.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
