use pmdx_core::types::DbId;
use sqlx::FromRow;

/// Minimal identity of any resource: its surrogate key and display name.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct NamedResource {
    pub id: DbId,
    pub name: String,
}

impl NamedResource {
    pub fn new(id: DbId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Build from the nullable columns of an outer-joined table.
    ///
    /// A null or zero key means the join matched nothing.
    pub fn from_columns(id: Option<DbId>, name: Option<String>) -> Option<Self> {
        match (id, name) {
            (Some(id), Some(name)) if id != 0 => Some(Self { id, name }),
            _ => None,
        }
    }
}
