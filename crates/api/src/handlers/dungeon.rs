//! Handlers for `/v1/dungeons`.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::Response;
use pmdx_core::search::SearchKey;
use pmdx_db::repositories::DungeonRepo;

use super::log_db_latency;
use crate::error::AppResult;
use crate::params::{Fields, ListQuery, RequestUrl};
use crate::render::{self, DUNGEONS};
use crate::state::AppState;

/// GET /v1/dungeons
///
/// Page through every dungeon.
pub async fn list_dungeons(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let started = Instant::now();
    let page = DungeonRepo::list(&state.pool, &params).await?;
    log_db_latency(DUNGEONS, "list", started);

    Ok(render::list_response(&url, DUNGEONS, &params.pagination, &page, &fields))
}

/// GET /v1/dungeons/{search}
///
/// `search` is an ID or a name.
pub async fn get_dungeon(
    State(state): State<AppState>,
    Path(search): Path<String>,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let key = SearchKey::parse(&search);
    let started = Instant::now();
    let detail = DungeonRepo::find(&state.pool, &key).await?;
    log_db_latency(DUNGEONS, "find", started);

    Ok(render::object_response(
        render::dungeon_detail(&url.host, &detail),
        &fields,
    ))
}
