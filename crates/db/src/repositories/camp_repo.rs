//! Repository for the `camp` table.

use pmdx_core::listing::ListParams;
use pmdx_core::search::SearchKey;
use sqlx::PgPool;

use crate::decode::decode_composite;
use crate::error::DbError;
use crate::models::camp::{CampDetail, CampRow, RESOURCE};
use crate::models::named::NamedResource;
use crate::query::{key_predicate, TableSpec};
use crate::repositories::{bind_key, named_page, Page};

pub const TABLE: TableSpec = TableSpec {
    table: "camp",
    id_column: "camp_id",
    name_column: "camp_name",
};

pub struct CampRepo;

impl CampRepo {
    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Page<NamedResource>, DbError> {
        named_page(pool, TABLE, params).await
    }

    /// Find a camp and the pokemon living in it.
    pub async fn find(pool: &PgPool, key: &SearchKey) -> Result<CampDetail, DbError> {
        let query = format!(
            "SELECT C.camp_id, C.camp_name, C.unlock_type, C.cost, C.description, \
                    P.dex_number AS pokemon_id, P.pokemon_name \
             FROM (SELECT * FROM camp WHERE {}) C \
             LEFT JOIN pokemon P ON C.camp_id = P.camp_id \
             ORDER BY P.dex_number",
            key_predicate(key, TABLE.id_column, TABLE.name_column)
        );
        let rows = bind_key(sqlx::query_as::<_, CampRow>(&query), key)
            .fetch_all(pool)
            .await?;
        Ok(decode_composite(rows, RESOURCE, key)?)
    }
}
