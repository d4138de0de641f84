pub mod health;

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::cache::middleware::cache_response;
use crate::cache::SharedCache;
use crate::handlers::{ability, attack_move, camp, dungeon, pokemon, pokemon_type};
use crate::state::AppState;

/// Build the `/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /v1/abilities                  list
/// /v1/abilities/{search}         detail by ID or name
/// /v1/camps                      list
/// /v1/camps/{search}             detail
/// /v1/dungeons                   list
/// /v1/dungeons/{search}          detail
/// /v1/moves                      list
/// /v1/moves/{search}             detail
/// /v1/pokemon                    list
/// /v1/pokemon/{search}           detail
/// /v1/types                      list
/// /v1/types/{search}             detail
/// ```
///
/// Every route sits behind the response cache. Routes are registered with
/// their full path so the cache middleware sees the URI as the client sent
/// it.
pub fn api_routes(cache: SharedCache) -> Router<AppState> {
    Router::new()
        .route("/v1/abilities", get(ability::list_abilities))
        .route("/v1/abilities/{search}", get(ability::get_ability))
        .route("/v1/camps", get(camp::list_camps))
        .route("/v1/camps/{search}", get(camp::get_camp))
        .route("/v1/dungeons", get(dungeon::list_dungeons))
        .route("/v1/dungeons/{search}", get(dungeon::get_dungeon))
        .route("/v1/moves", get(attack_move::list_moves))
        .route("/v1/moves/{search}", get(attack_move::get_move))
        .route("/v1/pokemon", get(pokemon::list_pokemon))
        .route("/v1/pokemon/{search}", get(pokemon::get_pokemon))
        .route("/v1/types", get(pokemon_type::list_types))
        .route("/v1/types/{search}", get(pokemon_type::get_type))
        .route_layer(middleware::from_fn_with_state(cache, cache_response))
}
