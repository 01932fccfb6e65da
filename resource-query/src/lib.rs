//! # resource-query
//!
//! Sortable, pageable and field-shapeable collection endpoints over any
//! entity store.
//!
//! ## Features
//!
//! - **Field mapping**: public API field names map to one or more internal
//!   paths, with optional direction inversion, per (source, destination) view pair
//! - **Sorting**: multi-key `orderBy` expressions such as `"Age desc, Name"`,
//!   validated before any data is fetched
//! - **Paging**: page size clamped to a configurable maximum, page counts and
//!   navigation links in an `X-Pagination` header
//! - **Shaping**: `fields=Id,Name` projects each item onto the requested fields
//! - **Runtime support**: Figment configuration, JSON tracing, axum responses
//!   and a server with graceful shutdown
//!
//! ## Example
//!
//! ```rust,no_run
//! use resource_query::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config);
//!
//!     let app = Router::new().route("/health", get(|| async { "ok" }));
//!
//!     Server::new(config).serve(app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod mapping;
pub mod observability;
pub mod paging;
pub mod pipeline;
pub mod response;
pub mod server;
pub mod shaping;
pub mod sort;
pub mod store;
pub mod value;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, QueryConfig, ServiceConfig};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::fields::{FieldAccessors, FieldSource};
    pub use crate::mapping::{FieldMapping, MappingRegistry, MappingTable, ViewKind};
    pub use crate::observability::init_tracing;
    pub use crate::paging::{
        LinkBuilder, PagedList, PaginationMetadata, ParameterQuery, ResourceParameters,
        ResourceUriType,
        DEFAULT_ORDER_BY, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    };
    pub use crate::pipeline::{ResourceQuery, ShapedPage};
    pub use crate::response::{PagedResponse, X_PAGINATION};
    pub use crate::server::Server;
    pub use crate::shaping::{shape, shape_all, ShapedEntity};
    pub use crate::sort::{
        apply_sort, apply_sort_passes, parse_order_by, OrderDirection, SortClause,
        SortInstruction, SortPlan,
    };
    pub use crate::store::{
        EntityStore, InMemoryStore, ResourceFilter, StoreError, StoreErrorKind, StoreResult,
    };
    pub use crate::value::FieldValue;

    pub use axum::{
        extract::{Path, Query, State},
        http::{HeaderMap, HeaderValue, StatusCode},
        response::{IntoResponse, Json, Response},
        routing::get,
        Router,
    };

    pub use serde::{Deserialize, Serialize};

    // Re-export tracing macros and types
    pub use tracing::{debug, error, info, instrument, trace, warn, Level, Span};

    // Re-export tokio for async runtime
    pub use tokio;

    // Re-export lazy statics for accessor tables
    pub use once_cell::sync::Lazy;

    // Re-export time utilities
    pub use chrono::{DateTime, NaiveDate, Utc};

    // Re-export UUID
    pub use uuid::Uuid;
}
