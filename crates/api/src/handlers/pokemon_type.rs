//! Handlers for `/v1/types`.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::Response;
use pmdx_core::search::SearchKey;
use pmdx_db::repositories::TypeRepo;

use super::log_db_latency;
use crate::error::AppResult;
use crate::params::{Fields, ListQuery, RequestUrl};
use crate::render::{self, TYPES};
use crate::state::AppState;

/// GET /v1/types
///
/// Page through every type.
pub async fn list_types(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let started = Instant::now();
    let page = TypeRepo::list(&state.pool, &params).await?;
    log_db_latency(TYPES, "list", started);

    Ok(render::list_response(&url, TYPES, &params.pagination, &page, &fields))
}

/// GET /v1/types/{search}
///
/// Includes how this type's attacks fare against each defending type.
pub async fn get_type(
    State(state): State<AppState>,
    Path(search): Path<String>,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let key = SearchKey::parse(&search);
    let started = Instant::now();
    let detail = TypeRepo::find(&state.pool, &key).await?;
    log_db_latency(TYPES, "find", started);

    Ok(render::object_response(
        render::type_detail(&url.host, &detail),
        &fields,
    ))
}
