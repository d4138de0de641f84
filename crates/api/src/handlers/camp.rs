//! Handlers for `/v1/camps`.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::Response;
use pmdx_core::search::SearchKey;
use pmdx_db::repositories::CampRepo;

use super::log_db_latency;
use crate::error::AppResult;
use crate::params::{Fields, ListQuery, RequestUrl};
use crate::render::{self, CAMPS};
use crate::state::AppState;

/// GET /v1/camps
///
/// Page through every camp.
pub async fn list_camps(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let started = Instant::now();
    let page = CampRepo::list(&state.pool, &params).await?;
    log_db_latency(CAMPS, "list", started);

    Ok(render::list_response(&url, CAMPS, &params.pagination, &page, &fields))
}

/// GET /v1/camps/{search}
pub async fn get_camp(
    State(state): State<AppState>,
    Path(search): Path<String>,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let key = SearchKey::parse(&search);
    let started = Instant::now();
    let detail = CampRepo::find(&state.pool, &key).await?;
    log_db_latency(CAMPS, "find", started);

    Ok(render::object_response(
        render::camp_detail(&url.host, &detail),
        &fields,
    ))
}
