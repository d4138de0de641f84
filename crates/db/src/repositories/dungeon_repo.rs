//! Repository for the `dungeon` table.

use pmdx_core::listing::ListParams;
use pmdx_core::search::SearchKey;
use sqlx::PgPool;

use crate::decode::decode_composite;
use crate::error::DbError;
use crate::models::dungeon::{DungeonDetail, DungeonRow, RESOURCE};
use crate::models::named::NamedResource;
use crate::query::{key_predicate, TableSpec};
use crate::repositories::{bind_key, named_page, Page};

pub const TABLE: TableSpec = TableSpec {
    table: "dungeon",
    id_column: "dungeon_id",
    name_column: "dungeon_name",
};

pub struct DungeonRepo;

impl DungeonRepo {
    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Page<NamedResource>, DbError> {
        named_page(pool, TABLE, params).await
    }

    /// Find a dungeon and the pokemon encountered in it.
    ///
    /// A pokemon appearing both normally and as a super enemy yields two
    /// entries.
    pub async fn find(pool: &PgPool, key: &SearchKey) -> Result<DungeonDetail, DbError> {
        let query = format!(
            "SELECT D.dungeon_id, D.dungeon_name, D.levels, D.start_level, D.team_size, \
                    D.items_allowed, D.pokemon_joining, D.map_visible, \
                    DP.super_enemy, P.dex_number AS pokemon_id, P.pokemon_name \
             FROM (SELECT * FROM dungeon WHERE {}) D \
             LEFT JOIN encountered_in DP ON D.dungeon_id = DP.dungeon_id \
             LEFT JOIN pokemon P ON DP.dex_number = P.dex_number \
             ORDER BY P.dex_number, DP.super_enemy",
            key_predicate(key, TABLE.id_column, TABLE.name_column)
        );
        let rows = bind_key(sqlx::query_as::<_, DungeonRow>(&query), key)
            .fetch_all(pool)
            .await?;
        Ok(decode_composite(rows, RESOURCE, key)?)
    }
}
