//! Service error type

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use resource_query::error::ErrorResponse;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for handlers
pub type LibraryResult<T> = std::result::Result<T, LibraryError>;

/// Errors returned by the authors endpoints
#[derive(Debug, Error)]
pub enum LibraryError {
    /// No author with this id
    #[error("Author {0} not found")]
    AuthorNotFound(Uuid),

    /// Query string could not be parsed
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    /// Collection query failure
    #[error(transparent)]
    Query(#[from] resource_query::Error),
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        match self {
            Self::AuthorNotFound(id) => {
                tracing::debug!(%id, "Author not found");
                let status = StatusCode::NOT_FOUND;
                (
                    status,
                    Json(ErrorResponse::with_code(status, "NOT_FOUND", self.to_string())),
                )
                    .into_response()
            }
            Self::InvalidQuery(ref reason) => {
                tracing::debug!(reason = %reason, "Rejected query string");
                let status = StatusCode::BAD_REQUEST;
                (
                    status,
                    Json(ErrorResponse::with_code(status, "INVALID_QUERY", self.to_string())),
                )
                    .into_response()
            }
            Self::Query(e) => e.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = LibraryError::AuthorNotFound(Uuid::nil()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_query_is_bad_request() {
        let response = LibraryError::InvalidQuery("bad pageNumber".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_query_errors_keep_their_status() {
        let err: LibraryError = resource_query::Error::UnknownField("'Shoe'".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
