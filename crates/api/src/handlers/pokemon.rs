//! Handlers for `/v1/pokemon`.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::response::Response;
use pmdx_core::search::SearchKey;
use pmdx_db::repositories::PokemonRepo;

use super::log_db_latency;
use crate::error::AppResult;
use crate::params::{Fields, ListQuery, RequestUrl};
use crate::render::{self, POKEMON};
use crate::state::AppState;

/// GET /v1/pokemon
///
/// Page through every pokemon, in dex order unless sorted.
pub async fn list_pokemon(
    State(state): State<AppState>,
    ListQuery(params): ListQuery,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let started = Instant::now();
    let page = PokemonRepo::list(&state.pool, &params).await?;
    log_db_latency(POKEMON, "list", started);

    Ok(render::list_response(&url, POKEMON, &params.pagination, &page, &fields))
}

/// GET /v1/pokemon/{search}
///
/// `search` is a dex number or a name (`mr. mime` finds `Mr. Mime`).
/// The four sub-queries behind the detail view run concurrently; any
/// failure fails the whole request.
pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(search): Path<String>,
    Fields(fields): Fields,
    url: RequestUrl,
) -> AppResult<Response> {
    let key = SearchKey::parse(&search);
    let started = Instant::now();
    let detail = PokemonRepo::find(&state.pool, &key).await?;
    log_db_latency(POKEMON, "find", started);

    Ok(render::object_response(
        render::pokemon_detail(&url.host, &detail),
        &fields,
    ))
}
