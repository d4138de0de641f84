//! Repository for the `attack_move` table.

use pmdx_core::listing::ListParams;
use pmdx_core::search::SearchKey;
use sqlx::PgPool;

use crate::decode::decode_composite;
use crate::error::DbError;
use crate::models::attack_move::{MoveDetail, MoveRow, RESOURCE};
use crate::models::named::NamedResource;
use crate::query::{key_predicate, TableSpec};
use crate::repositories::{bind_key, named_page, Page};

pub const TABLE: TableSpec = TableSpec {
    table: "attack_move",
    id_column: "move_id",
    name_column: "move_name",
};

pub struct MoveRepo;

impl MoveRepo {
    pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Page<NamedResource>, DbError> {
        named_page(pool, TABLE, params).await
    }

    /// Find a move with its type and every pokemon that learns it.
    pub async fn find(pool: &PgPool, key: &SearchKey) -> Result<MoveDetail, DbError> {
        let query = format!(
            "SELECT M.move_id, M.move_name, M.category, M.\"range\", M.target, \
                    M.initial_pp, M.initial_power, M.accuracy, M.description, \
                    T.type_id, T.type_name, \
                    MP.learn_type, MP.cost, MP.level, \
                    P.dex_number AS pokemon_id, P.pokemon_name \
             FROM (SELECT * FROM attack_move WHERE {}) M \
             INNER JOIN pokemon_type T ON M.type_id = T.type_id \
             LEFT JOIN learns MP ON MP.move_id = M.move_id \
             LEFT JOIN pokemon P ON MP.dex_number = P.dex_number \
             ORDER BY P.dex_number, MP.learn_type",
            key_predicate(key, TABLE.id_column, TABLE.name_column)
        );
        let rows = bind_key(sqlx::query_as::<_, MoveRow>(&query), key)
            .fetch_all(pool)
            .await?;
        Ok(decode_composite(rows, RESOURCE, key)?)
    }
}
