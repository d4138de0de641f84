//! Repository for the `pokemon_type` table.

use pmdx_core::listing::ListParams;
use pmdx_core::search::SearchKey;
use sqlx::PgPool;

use crate::decode::decode_composite;
use crate::error::DbError;
use crate::models::named::NamedResource;
use crate::models::pokemon_type::{TypeDetail, TypeRow, RESOURCE};
use crate::query::{key_predicate, TableSpec};
use crate::repositories::{bind_key, named_page, Page};

pub const TABLE: TableSpec = TableSpec {
    table: "pokemon_type",
    id_column: "type_id",
    name_column: "type_name",
};

pub struct TypeRepo;

impl TypeRepo {
    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Page<NamedResource>, DbError> {
        named_page(pool, TABLE, params).await
    }

    /// Find a type and how it fares attacking each other type.
    pub async fn find(pool: &PgPool, key: &SearchKey) -> Result<TypeDetail, DbError> {
        let query = format!(
            "SELECT AT.type_id, AT.type_name, TT.interaction, \
                    DT.type_id AS defender_id, DT.type_name AS defender_name \
             FROM (SELECT * FROM pokemon_type WHERE {}) AT \
             LEFT JOIN effectiveness TT ON AT.type_id = TT.attacker \
             LEFT JOIN pokemon_type DT ON TT.defender = DT.type_id \
             ORDER BY DT.type_id",
            key_predicate(key, TABLE.id_column, TABLE.name_column)
        );
        let rows = bind_key(sqlx::query_as::<_, TypeRow>(&query), key)
            .fetch_all(pool)
            .await?;
        Ok(decode_composite(rows, RESOURCE, key)?)
    }
}
