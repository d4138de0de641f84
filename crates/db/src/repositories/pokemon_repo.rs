//! Repository for the `pokemon` table.
//!
//! The detail view is a four-way fan-out. Only the first query decides
//! whether the pokemon exists; the other three return empty lists for an
//! unknown key.

use pmdx_core::listing::ListParams;
use pmdx_core::search::SearchKey;
use sqlx::PgPool;

use crate::decode::decode_composite;
use crate::error::DbError;
use crate::fanout::spawn_query;
use crate::models::named::NamedResource;
use crate::models::pokemon::{LearnedMoveRow, PokemonDetail, PokemonRow, RESOURCE};
use crate::query::{key_predicate, TableSpec};
use crate::repositories::{bind_key, named_page, Page};

pub const TABLE: TableSpec = TableSpec {
    table: "pokemon",
    id_column: "dex_number",
    name_column: "pokemon_name",
};

pub struct PokemonRepo;

impl PokemonRepo {
    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Page<NamedResource>, DbError> {
        named_page(pool, TABLE, params).await
    }

    /// Find a pokemon with its camp, abilities, dungeons, moves and types.
    ///
    /// The four sub-queries run concurrently; the first failure fails the
    /// whole lookup.
    pub async fn find(pool: &PgPool, key: &SearchKey) -> Result<PokemonDetail, DbError> {
        let own = key_predicate(key, TABLE.id_column, TABLE.name_column);
        let joined = key_predicate(key, "P.dex_number", "P.pokemon_name");

        let encounters = spawn_query("pokemon", {
            let (pool, key) = (pool.clone(), key.clone());
            let query = format!(
                "SELECT P.dex_number, P.pokemon_name, P.evolution_stage, P.evolve_condition, \
                        P.evolve_level, P.evolve_crystals, P.classification, \
                        C.camp_id, C.camp_name, \
                        D.dungeon_id, D.dungeon_name, PD.super_enemy \
                 FROM (SELECT * FROM pokemon WHERE {own}) P \
                 INNER JOIN camp C ON P.camp_id = C.camp_id \
                 LEFT JOIN encountered_in PD ON P.dex_number = PD.dex_number \
                 LEFT JOIN dungeon D ON PD.dungeon_id = D.dungeon_id \
                 ORDER BY D.dungeon_id, PD.super_enemy"
            );
            async move {
                bind_key(sqlx::query_as::<_, PokemonRow>(&query), &key)
                    .fetch_all(&pool)
                    .await
            }
        });

        let types = spawn_query("pokemon types", {
            let (pool, key) = (pool.clone(), key.clone());
            let query = format!(
                "SELECT T.type_id AS id, T.type_name AS name \
                 FROM pokemon P \
                 INNER JOIN pokemon_has_type PT ON P.dex_number = PT.dex_number \
                 INNER JOIN pokemon_type T ON PT.type_id = T.type_id \
                 WHERE {joined} \
                 ORDER BY T.type_id"
            );
            async move {
                bind_key(sqlx::query_as::<_, NamedResource>(&query), &key)
                    .fetch_all(&pool)
                    .await
            }
        });

        let abilities = spawn_query("pokemon abilities", {
            let (pool, key) = (pool.clone(), key.clone());
            let query = format!(
                "SELECT A.ability_id AS id, A.ability_name AS name \
                 FROM pokemon P \
                 INNER JOIN pokemon_has_ability PA ON P.dex_number = PA.dex_number \
                 INNER JOIN ability A ON PA.ability_id = A.ability_id \
                 WHERE {joined} \
                 ORDER BY A.ability_id"
            );
            async move {
                bind_key(sqlx::query_as::<_, NamedResource>(&query), &key)
                    .fetch_all(&pool)
                    .await
            }
        });

        let moves = spawn_query("pokemon moves", {
            let (pool, key) = (pool.clone(), key.clone());
            let query = format!(
                "SELECT M.move_id, M.move_name, PM.learn_type, PM.cost, PM.level \
                 FROM pokemon P \
                 INNER JOIN learns PM ON P.dex_number = PM.dex_number \
                 INNER JOIN attack_move M ON PM.move_id = M.move_id \
                 WHERE {joined} \
                 ORDER BY M.move_id, PM.learn_type"
            );
            async move {
                bind_key(sqlx::query_as::<_, LearnedMoveRow>(&query), &key)
                    .fetch_all(&pool)
                    .await
            }
        });

        let (encounters, types, abilities, moves) = tokio::try_join!(
            encounters.join(),
            types.join(),
            abilities.join(),
            moves.join()
        )?;

        let decoded = decode_composite(encounters, RESOURCE, key)?;

        Ok(PokemonDetail {
            pokemon: decoded.parent,
            abilities,
            dungeons: decoded.children,
            moves: moves.into_iter().map(Into::into).collect(),
            types,
        })
    }
}
