//! Repository for the `ability` table.

use pmdx_core::listing::ListParams;
use pmdx_core::search::SearchKey;
use sqlx::PgPool;

use crate::decode::decode_composite;
use crate::error::DbError;
use crate::models::ability::{AbilityDetail, AbilityRow, RESOURCE};
use crate::models::named::NamedResource;
use crate::query::{key_predicate, TableSpec};
use crate::repositories::{bind_key, named_page, Page};

pub const TABLE: TableSpec = TableSpec {
    table: "ability",
    id_column: "ability_id",
    name_column: "ability_name",
};

/// Provides data access for abilities.
pub struct AbilityRepo;

impl AbilityRepo {
    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Page<NamedResource>, DbError> {
        named_page(pool, TABLE, params).await
    }

    /// Find an ability and every pokemon that has it.
    pub async fn find(pool: &PgPool, key: &SearchKey) -> Result<AbilityDetail, DbError> {
        let query = format!(
            "SELECT A.ability_id, A.ability_name, A.description, \
                    P.dex_number AS pokemon_id, P.pokemon_name \
             FROM (SELECT * FROM ability WHERE {}) A \
             LEFT JOIN pokemon_has_ability PA ON A.ability_id = PA.ability_id \
             LEFT JOIN pokemon P ON PA.dex_number = P.dex_number \
             ORDER BY P.dex_number",
            key_predicate(key, TABLE.id_column, TABLE.name_column)
        );
        let rows = bind_key(sqlx::query_as::<_, AbilityRow>(&query), key)
            .fetch_all(pool)
            .await?;
        Ok(decode_composite(rows, RESOURCE, key)?)
    }
}
