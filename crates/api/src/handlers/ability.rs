//! Handlers for `/v1/abilities`.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::Response;
use pmdx_core::search::SearchKey;
use pmdx_db::repositories::AbilityRepo;

use super::log_db_latency;
use crate::error::AppResult;
use crate::params::{Fields, ListQuery, RequestUrl};
use crate::render::{self, ABILITIES};
use crate::state::AppState;

/// GET /v1/abilities
///
/// Page through every ability.
pub async fn list_abilities(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let started = Instant::now();
    let page = AbilityRepo::list(&state.pool, &params).await?;
    log_db_latency(ABILITIES, "list", started);

    Ok(render::list_response(&url, ABILITIES, &params.pagination, &page, &fields))
}

/// GET /v1/abilities/{search}
///
/// `search` is an ID or a name.
pub async fn get_ability(
    State(state): State<AppState>,
    Path(search): Path<String>,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let key = SearchKey::parse(&search);
    let started = Instant::now();
    let detail = AbilityRepo::find(&state.pool, &key).await?;
    log_db_latency(ABILITIES, "find", started);

    Ok(render::object_response(
        render::ability_detail(&url.host, &detail),
        &fields,
    ))
}
