//! JSON rendering of repository results.
//!
//! Foreign keys are rendered as `{"name": ..., "url": ...}` references
//! where the URL is `<host>/v1/<resource>/<id>`. Objects are built as
//! ordered [`JsonObject`]s so field limiting can run on them before
//! serialization.

use axum::http::header::LINK;
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pmdx_core::fields::{limit_fields, FieldFilter};
use pmdx_core::links::pagination_links;
use pmdx_core::listing::Pagination;
use pmdx_core::types::{DbId, JsonObject};
use pmdx_db::models::ability::AbilityDetail;
use pmdx_db::models::attack_move::MoveDetail;
use pmdx_db::models::camp::CampDetail;
use pmdx_db::models::dungeon::DungeonDetail;
use pmdx_db::models::named::NamedResource;
use pmdx_db::models::pokemon::PokemonDetail;
use pmdx_db::models::pokemon_type::TypeDetail;
use pmdx_db::repositories::Page;
use serde_json::{json, Value};

use crate::params::RequestUrl;

/// URL path segments of the six resources.
pub const ABILITIES: &str = "abilities";
pub const CAMPS: &str = "camps";
pub const DUNGEONS: &str = "dungeons";
pub const MOVES: &str = "moves";
pub const POKEMON: &str = "pokemon";
pub const TYPES: &str = "types";

pub fn resource_url(host: &str, resource: &str, id: DbId) -> String {
    format!("{host}/v1/{resource}/{id}")
}

/// `{"name": ..., "url": ...}`
pub fn named(host: &str, resource: &str, item: &NamedResource) -> Value {
    json!({
        "name": item.name,
        "url": resource_url(host, resource, item.id),
    })
}

pub fn named_list(host: &str, resource: &str, items: &[NamedResource]) -> Value {
    Value::Array(items.iter().map(|item| named(host, resource, item)).collect())
}

fn object<const N: usize>(entries: [(&str, Value); N]) -> JsonObject {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Apply `fields` and serialize as `application/json`.
pub fn object_response(mut body: JsonObject, fields: &FieldFilter) -> Response {
    limit_fields(&mut body, fields);
    Json(body).into_response()
}

/// `{count, results}` for one page of a list endpoint, with the pagination
/// `Link` header.
pub fn list_response(
    url: &RequestUrl,
    resource: &str,
    pagination: &Pagination,
    page: &Page<NamedResource>,
    fields: &FieldFilter,
) -> Response {
    let body = object([
        ("count", json!(page.total)),
        ("results", named_list(&url.host, resource, &page.items)),
    ]);
    let mut response = object_response(body, fields);

    let links = pagination_links(pagination, page.total, &url.link_base());
    match HeaderValue::from_str(&links.header_value()) {
        Ok(value) => {
            response.headers_mut().insert(LINK, value);
        }
        Err(err) => tracing::warn!(error = %err, "Pagination links are not a valid header value"),
    }
    response
}

// ---------------------------------------------------------------------------
// Detail objects
// ---------------------------------------------------------------------------

pub fn ability_detail(host: &str, detail: &AbilityDetail) -> JsonObject {
    let ability = &detail.parent;
    object([
        ("id", json!(ability.id)),
        ("name", json!(ability.name)),
        ("description", json!(ability.description)),
        ("pokemon", named_list(host, POKEMON, &detail.children)),
    ])
}

pub fn camp_detail(host: &str, detail: &CampDetail) -> JsonObject {
    let camp = &detail.parent;
    object([
        ("id", json!(camp.id)),
        ("name", json!(camp.name)),
        ("description", json!(camp.description)),
        ("unlockType", json!(camp.unlock_type)),
        ("cost", json!(camp.cost)),
        ("pokemon", named_list(host, POKEMON, &detail.children)),
    ])
}

pub fn dungeon_detail(host: &str, detail: &DungeonDetail) -> JsonObject {
    let dungeon = &detail.parent;
    let pokemon: Vec<Value> = detail
        .children
        .iter()
        .map(|encounter| {
            json!({
                "pokemon": named(host, POKEMON, &encounter.pokemon),
                "isSuper": encounter.is_super,
            })
        })
        .collect();

    object([
        ("id", json!(dungeon.id)),
        ("name", json!(dungeon.name)),
        ("levels", json!(dungeon.levels)),
        ("startLevel", json!(dungeon.start_level)),
        ("teamSize", json!(dungeon.team_size)),
        ("itemsAllowed", json!(dungeon.items_allowed)),
        ("pokemonJoining", json!(dungeon.pokemon_joining)),
        ("mapVisible", json!(dungeon.map_visible)),
        ("pokemon", Value::Array(pokemon)),
    ])
}

pub fn move_detail(host: &str, detail: &MoveDetail) -> JsonObject {
    let attack_move = &detail.parent;
    let pokemon: Vec<Value> = detail
        .children
        .iter()
        .map(|learner| {
            json!({
                "pokemon": named(host, POKEMON, &learner.pokemon),
                "method": learner.method,
                "cost": learner.cost,
                "level": learner.level,
            })
        })
        .collect();

    object([
        ("id", json!(attack_move.id)),
        ("name", json!(attack_move.name)),
        ("category", json!(attack_move.category)),
        ("range", json!(attack_move.range)),
        ("target", json!(attack_move.target)),
        ("initialPP", json!(attack_move.initial_pp)),
        ("initialPower", json!(attack_move.initial_power)),
        ("accuracy", json!(attack_move.accuracy)),
        ("description", json!(attack_move.description)),
        ("type", named(host, TYPES, &attack_move.move_type)),
        ("pokemon", Value::Array(pokemon)),
    ])
}

pub fn pokemon_detail(host: &str, detail: &PokemonDetail) -> JsonObject {
    let pokemon = &detail.pokemon;
    let dungeons: Vec<Value> = detail
        .dungeons
        .iter()
        .map(|encounter| {
            json!({
                "dungeon": named(host, DUNGEONS, &encounter.dungeon),
                "isSuper": encounter.is_super,
            })
        })
        .collect();
    let moves: Vec<Value> = detail
        .moves
        .iter()
        .map(|learned| {
            json!({
                "move": named(host, MOVES, &learned.attack_move),
                "method": learned.method,
                "cost": learned.cost,
                "level": learned.level,
            })
        })
        .collect();

    object([
        ("id", json!(pokemon.id)),
        ("name", json!(pokemon.name)),
        ("classification", json!(pokemon.classification)),
        ("evolutionStage", json!(pokemon.evolution_stage)),
        ("evolveCondition", json!(pokemon.evolve_condition)),
        ("evolveLevel", json!(pokemon.evolve_level)),
        ("evolveCrystals", json!(pokemon.evolve_crystals)),
        ("camp", named(host, CAMPS, &pokemon.camp)),
        ("abilities", named_list(host, ABILITIES, &detail.abilities)),
        ("dungeons", Value::Array(dungeons)),
        ("moves", Value::Array(moves)),
        ("types", named_list(host, TYPES, &detail.types)),
    ])
}

pub fn type_detail(host: &str, detail: &TypeDetail) -> JsonObject {
    let pokemon_type = &detail.parent;
    let interactions: Vec<Value> = detail
        .children
        .iter()
        .map(|interaction| {
            json!({
                "type": named(host, TYPES, &interaction.defender),
                "interaction": interaction.interaction,
            })
        })
        .collect();

    object([
        ("id", json!(pokemon_type.id)),
        ("name", json!(pokemon_type.name)),
        ("interactions", Value::Array(interactions)),
    ])
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{HeaderMap, Uri};
    use pmdx_db::decode::Composite;
    use pmdx_db::models::attack_move::{AttackMove, MoveLearner};
    use pmdx_db::models::pokemon::{LearnedMove, Pokemon, PokemonEncounter};

    use super::*;

    const HOST: &str = "localhost:3000";

    fn keys(object: &JsonObject) -> Vec<&str> {
        object.keys().map(String::as_str).collect()
    }

    fn tackle() -> MoveDetail {
        Composite {
            parent: AttackMove {
                id: 10,
                name: "Quick Attack".into(),
                category: "Physical".into(),
                range: "Front".into(),
                target: "Enemy".into(),
                initial_pp: 20,
                initial_power: None,
                accuracy: Some(100),
                description: "Lunges.".into(),
                move_type: NamedResource::new(1, "Normal"),
            },
            children: vec![MoveLearner {
                pokemon: NamedResource::new(25, "Pikachu"),
                method: "Level".into(),
                cost: None,
                level: Some(5),
            }],
        }
    }

    #[test]
    fn named_reference_has_host_based_url() {
        assert_eq!(
            named(HOST, POKEMON, &NamedResource::new(25, "Pikachu")),
            json!({"name": "Pikachu", "url": "localhost:3000/v1/pokemon/25"})
        );
    }

    #[test]
    fn move_detail_key_order_and_type_url() {
        let object = move_detail(HOST, &tackle());
        assert_eq!(
            keys(&object),
            vec![
                "id",
                "name",
                "category",
                "range",
                "target",
                "initialPP",
                "initialPower",
                "accuracy",
                "description",
                "type",
                "pokemon",
            ]
        );
        assert_eq!(object["type"]["url"], "localhost:3000/v1/types/1");
        assert_eq!(object["initialPower"], Value::Null);
        assert_eq!(object["pokemon"][0]["level"], 5);
        assert_eq!(object["pokemon"][0]["cost"], Value::Null);
    }

    #[test]
    fn empty_children_render_as_empty_array() {
        let mut detail = tackle();
        detail.children.clear();
        assert_eq!(move_detail(HOST, &detail)["pokemon"], json!([]));
    }

    #[test]
    fn pokemon_detail_key_order() {
        let detail = PokemonDetail {
            pokemon: Pokemon {
                id: 4,
                name: "Charmander".into(),
                classification: "Lizard Pokemon".into(),
                evolution_stage: 1,
                evolve_condition: "Level".into(),
                evolve_level: Some(16),
                evolve_crystals: Some(20),
                camp: NamedResource::new(1, "Wild Plains"),
            },
            abilities: vec![NamedResource::new(2, "Blaze")],
            dungeons: vec![PokemonEncounter {
                dungeon: NamedResource::new(1, "Tiny Woods"),
                is_super: false,
            }],
            moves: vec![LearnedMove {
                attack_move: NamedResource::new(2, "Ember"),
                method: "Level".into(),
                cost: None,
                level: Some(7),
            }],
            types: vec![NamedResource::new(2, "Fire")],
        };

        let object = pokemon_detail(HOST, &detail);
        assert_eq!(
            keys(&object),
            vec![
                "id",
                "name",
                "classification",
                "evolutionStage",
                "evolveCondition",
                "evolveLevel",
                "evolveCrystals",
                "camp",
                "abilities",
                "dungeons",
                "moves",
                "types",
            ]
        );
        assert_eq!(object["camp"]["url"], "localhost:3000/v1/camps/1");
        assert_eq!(object["dungeons"][0]["dungeon"]["name"], "Tiny Woods");
        assert_eq!(object["moves"][0]["move"]["url"], "localhost:3000/v1/moves/2");
    }

    #[tokio::test]
    async fn list_response_sets_link_header_and_json() {
        let uri: Uri = "/v1/abilities?sort=name_desc&per_page=2&page=1".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("host", HeaderValue::from_static(HOST));
        let url = RequestUrl::new(&uri, &headers);
        let page = Page {
            total: 5,
            items: vec![NamedResource::new(3, "Gamma"), NamedResource::new(5, "Epsilon")],
        };

        let response = list_response(
            &url,
            ABILITIES,
            &Pagination::new(1, 2),
            &page,
            &FieldFilter::disabled(),
        );

        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            response.headers()[LINK],
            "<localhost:3000/v1/abilities?sort=name_desc&per_page=2&page=2>; rel=\"next\", \
             <null>; rel=\"previous\", \
             <localhost:3000/v1/abilities?sort=name_desc&per_page=2&page=3>; rel=\"last\""
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["count"], 5);
        assert_eq!(body["results"][0]["name"], "Gamma");
        assert_eq!(body["results"][1]["url"], "localhost:3000/v1/abilities/5");
    }

    #[tokio::test]
    async fn object_response_applies_field_filter() {
        let response = object_response(move_detail(HOST, &tackle()), &FieldFilter::parse(Some("name")));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"name":"Quick Attack"}"#);
    }
}
