//! Entity store error types
//!
//! A store reports why a fetch failed through a [`StoreErrorKind`]. The
//! pipeline never retries; the kind only decides which server status the
//! caller sees.
//!
//! # Example
//!
//! ```rust
//! use resource_query::store::{StoreError, StoreErrorKind};
//!
//! let error = StoreError::unavailable("connection refused").with_resource("authors");
//! assert_eq!(error.kind, StoreErrorKind::Unavailable);
//! assert_eq!(error.resource.as_deref(), Some("authors"));
//! ```

use std::fmt;

/// Category of store failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    /// The backing store could not be reached
    Unavailable,
    /// The fetch did not finish in time
    Timeout,
    /// The backing store rejected or failed the fetch
    Backend,
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "unavailable"),
            Self::Timeout => write!(f, "timeout"),
            Self::Backend => write!(f, "backend"),
        }
    }
}

/// Structured store error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    /// The category of error
    pub kind: StoreErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Resource collection being fetched, when known
    pub resource: Option<String>,
}

impl StoreError {
    /// Create a new store error
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            resource: None,
        }
    }

    /// Create an "unavailable" error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unavailable, message)
    }

    /// Create a timeout error
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_query::store::StoreError;
    ///
    /// let error = StoreError::timeout("fetch exceeded 5s");
    /// assert_eq!(error.to_string(), "Store timeout error: fetch exceeded 5s");
    /// ```
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Timeout, message)
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Backend, message)
    }

    /// Attach the resource collection name
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Store {} error: {}", self.kind, self.message)?;
        if let Some(ref resource) = self.resource {
            write!(f, " [{}]", resource)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {}
