//! Error types and HTTP response conversion
//!
//! Failures fall into two classes. Client input errors (an unknown sort or
//! shape field) become `400 Bad Request` and are never logged as server
//! faults. Everything else (a missing or duplicated mapping table, an empty
//! mapping entry, a failing store, broken configuration) is a server-side
//! defect and becomes a 5xx response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{StoreError, StoreErrorKind};

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for resource queries
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    /// A requested sort or shape field has no mapping entry
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Zero or duplicate mapping tables for a view pair
    #[error("Mapping configuration error: {0}")]
    Configuration(String),

    /// A mapping entry resolved to no internal paths
    #[error("Mapping for '{0}' has no internal paths")]
    EmptyMappingValue(String),

    /// Entity store failure
    #[error("{0}")]
    Store(StoreError),

    /// Configuration loading error
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an unknown-field error listing every offending name
    pub fn unknown_fields<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = names
            .into_iter()
            .map(|name| format!("'{}'", name.as_ref()))
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnknownField(joined)
    }

    /// Whether the error was caused by client input (4xx) rather than a defect (5xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::UnknownField(_))
    }

    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownField(_) => StatusCode::BAD_REQUEST,
            Self::Store(e) => match e.kind {
                StoreErrorKind::Unavailable | StoreErrorKind::Timeout => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                StoreErrorKind::Backend => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Configuration(_)
            | Self::EmptyMappingValue(_)
            | Self::Config(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField(_) => "UNKNOWN_FIELD",
            Self::Configuration(_) | Self::EmptyMappingValue(_) => "CONFIGURATION_ERROR",
            Self::Store(e) => match e.kind {
                StoreErrorKind::Unavailable => "STORE_UNAVAILABLE",
                StoreErrorKind::Timeout => "STORE_TIMEOUT",
                StoreErrorKind::Backend => "STORE_ERROR",
            },
            Self::Config(_) => "CONFIG_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Optional error code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// HTTP status code
    pub status: u16,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            status: status.as_u16(),
        }
    }

    /// Create error response with a code
    pub fn with_code(
        status: StatusCode,
        code: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            error: error.into(),
            code: Some(code.into()),
            status: status.as_u16(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Client mistakes stay out of the error log
        let message = match self {
            Error::UnknownField(ref fields) => {
                tracing::debug!(fields = %fields, "Rejected unknown field");
                self.to_string()
            }
            Error::Store(ref e) => {
                tracing::error!(
                    kind = %e.kind,
                    "Entity store error: {}", e.message
                );
                match e.kind {
                    StoreErrorKind::Unavailable | StoreErrorKind::Timeout => {
                        "Service temporarily unavailable".to_string()
                    }
                    StoreErrorKind::Backend => "An internal error occurred".to_string(),
                }
            }
            ref other => {
                tracing::error!(code, "Server fault: {}", other);
                "An internal error occurred".to_string()
            }
        };

        (status, Json(ErrorResponse::with_code(status, code, message))).into_response()
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Error::Store(err)
    }
}
