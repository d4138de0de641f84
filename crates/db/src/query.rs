//! SQL text builders for list endpoints and key lookups.
//!
//! Everything here is pure string construction so the generated SQL can be
//! asserted on directly. Only compile-time column names and integers are
//! ever interpolated; user-supplied search values are always bound.

use pmdx_core::listing::{Pagination, SortOrder};
use pmdx_core::search::SearchKey;

/// Table and columns backing one list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSpec {
    pub table: &'static str,
    pub id_column: &'static str,
    pub name_column: &'static str,
}

impl TableSpec {
    /// `SELECT <id> AS id, <name> AS name FROM <table>`
    pub fn named_select(&self) -> String {
        format!(
            "SELECT {} AS id, {} AS name FROM {}",
            self.id_column, self.name_column, self.table
        )
    }
}

/// Append ordering and pagination to `base`.
///
/// With no sort the order is `id_column ASC`. The four named orders map to
/// `(id_column | name_column) (ASC | DESC)`.
///
/// # Examples
///
/// ```
/// use pmdx_core::listing::{Pagination, SortOrder};
/// use pmdx_db::query::build_list_query;
///
/// let sql = build_list_query(
///     "SELECT * FROM ability",
///     Some(SortOrder::NameDesc),
///     "ability_id",
///     "ability_name",
///     &Pagination::new(2, 10),
/// );
/// assert_eq!(sql, "SELECT * FROM ability ORDER BY ability_name DESC LIMIT 10 OFFSET 10");
/// ```
pub fn build_list_query(
    base: &str,
    sort: Option<SortOrder>,
    id_column: &str,
    name_column: &str,
    pagination: &Pagination,
) -> String {
    let order = sort.unwrap_or_default();
    let column = if order.by_name() { name_column } else { id_column };
    let direction = if order.descending() { "DESC" } else { "ASC" };

    format!(
        "{base} ORDER BY {column} {direction} LIMIT {} OFFSET {}",
        pagination.limit(),
        pagination.offset()
    )
}

/// Unfiltered row count for `table`, independent of sort and pagination.
pub fn count_query(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {table}")
}

/// `<column> = $1`, choosing the column from the kind of search key.
pub fn key_predicate(key: &SearchKey, id_column: &str, name_column: &str) -> String {
    match key {
        SearchKey::Id(_) => format!("{id_column} = $1"),
        SearchKey::Name(_) => format!("{name_column} = $1"),
    }
}
