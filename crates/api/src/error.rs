use std::panic::Location;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pmdx_core::error::CoreError;
use pmdx_db::DbError;

/// Body of every 500 response. Details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Something went wrong on our side. Please contact the administrator.";

/// Application-level error type for HTTP handlers.
///
/// Responses are plain text: the not-found message for
/// [`CoreError::NotFound`] and [`INTERNAL_ERROR_MESSAGE`] for everything
/// else.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pmdx_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A repository failure, with the location of the `?` that raised it.
    #[error("{source} (at {location})")]
    Database {
        source: DbError,
        location: &'static Location<'static>,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => AppError::Core(core),
            source => AppError::Database {
                source,
                location: Location::caller(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Core(err @ CoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, err.to_string()).into_response()
            }
            AppError::Core(CoreError::Internal(msg)) => {
                tracing::error!(error = %msg, "Internal core error");
                internal_error()
            }
            AppError::Database { source, location } => {
                tracing::error!(
                    error = %source,
                    file = location.file(),
                    line = location.line(),
                    "Database error",
                );
                internal_error()
            }
        }
    }
}

fn internal_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::body::to_bytes;
    use pmdx_core::search::SearchKey;

    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn lookup() -> Result<(), DbError> {
        Err(DbError::Database(sqlx::Error::PoolTimedOut))
    }

    fn handler() -> AppResult<()> {
        lookup()?;
        Ok(())
    }

    #[tokio::test]
    async fn not_found_is_plain_text_404() {
        let err = AppError::from(DbError::Core(CoreError::NotFound {
            resource: "pokemon",
            key: SearchKey::Id(9999),
        }));
        assert_matches!(err, AppError::Core(_));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_text(response).await,
            "resource of type 'pokemon' with ID '9999' not found"
        );
    }

    #[tokio::test]
    async fn database_error_is_generic_500() {
        let response = AppError::from(DbError::Database(sqlx::Error::PoolClosed)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn question_mark_records_its_location() {
        let err = handler().unwrap_err();
        assert_matches!(
            err,
            AppError::Database { location, .. } if location.file().ends_with("error.rs")
        );
    }

    #[tokio::test]
    async fn internal_core_error_hides_message() {
        let response = AppError::Core(CoreError::Internal("secret detail".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_text(response).await.contains("secret"));
    }
}
