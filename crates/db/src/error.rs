use pmdx_core::error::CoreError;

/// Errors raised by repositories.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Domain error, e.g. a lookup that matched no row.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// One worker of a fan-out failed; `query` names the logical query.
    #[error("Query '{query}' failed: {source}")]
    Query {
        query: &'static str,
        source: sqlx::Error,
    },

    /// A fan-out worker panicked or was aborted before producing a result.
    #[error("Query worker '{query}' did not complete: {source}")]
    Worker {
        query: &'static str,
        source: tokio::task::JoinError,
    },
}

impl DbError {
    /// Whether this error means "no such resource" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::Core(CoreError::NotFound { .. }))
    }
}
