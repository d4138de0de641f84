//! Repository layer: one zero-sized struct per resource with async
//! associated functions taking a `&PgPool`.
//!
//! Every repository exposes `list` (a sorted, paginated page of
//! [`NamedResource`]s plus the unfiltered total) and `find` (the detail
//! view by [`SearchKey`]).

use pmdx_core::listing::ListParams;
use pmdx_core::search::SearchKey;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use crate::error::DbError;
use crate::fanout::spawn_query;
use crate::models::named::NamedResource;
use crate::query::{build_list_query, count_query, TableSpec};

pub mod ability_repo;
pub mod camp_repo;
pub mod dungeon_repo;
pub mod move_repo;
pub mod pokemon_repo;
pub mod type_repo;

pub use ability_repo::AbilityRepo;
pub use camp_repo::CampRepo;
pub use dungeon_repo::DungeonRepo;
pub use move_repo::MoveRepo;
pub use pokemon_repo::PokemonRepo;
pub use type_repo::TypeRepo;

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Row count of the whole table, independent of sort and pagination.
    pub total: i64,
    pub items: Vec<T>,
}

/// Fetch a page of `{id, name}` pairs and the table's row count
/// concurrently.
pub(crate) async fn named_page(
    pool: &PgPool,
    table: TableSpec,
    params: &ListParams,
) -> Result<Page<NamedResource>, DbError> {
    let page_sql = build_list_query(
        &table.named_select(),
        params.sort,
        table.id_column,
        table.name_column,
        &params.pagination,
    );
    let count_sql = count_query(table.table);

    let items = spawn_query("list page", {
        let pool = pool.clone();
        async move {
            sqlx::query_as::<_, NamedResource>(&page_sql)
                .fetch_all(&pool)
                .await
        }
    });
    let total = spawn_query("list count", {
        let pool = pool.clone();
        async move {
            sqlx::query_scalar::<_, i64>(&count_sql)
                .fetch_one(&pool)
                .await
        }
    });

    let (items, total) = tokio::try_join!(items.join(), total.join())?;
    Ok(Page { total, items })
}

/// Bind the value of `key` as `$1`.
pub(crate) fn bind_key<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    key: &'q SearchKey,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match key {
        SearchKey::Id(id) => query.bind(*id),
        SearchKey::Name(name) => query.bind(name.as_str()),
    }
}
