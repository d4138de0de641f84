//! Handlers for `/v1/moves`.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::Response;
use pmdx_core::search::SearchKey;
use pmdx_db::repositories::MoveRepo;

use super::log_db_latency;
use crate::error::AppResult;
use crate::params::{Fields, ListQuery, RequestUrl};
use crate::render::{self, MOVES};
use crate::state::AppState;

/// GET /v1/moves
///
/// Page through every move.
pub async fn list_moves(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let started = Instant::now();
    let page = MoveRepo::list(&state.pool, &params).await?;
    log_db_latency(MOVES, "list", started);

    Ok(render::list_response(&url, MOVES, &params.pagination, &page, &fields))
}

/// GET /v1/moves/{search}
///
/// `search` is an ID or a name.
pub async fn get_move(
    State(state): State<AppState>,
    Path(search): Path<String>,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let key = SearchKey::parse(&search);
    let started = Instant::now();
    let detail = MoveRepo::find(&state.pool, &key).await?;
    log_db_latency(MOVES, "find", started);

    Ok(render::object_response(
        render::move_detail(&url.host, &detail),
        &fields,
    ))
}
