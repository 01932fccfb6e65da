//! Entity store collaborator
//!
//! The pipeline fetches entities through [`EntityStore`], which must filter,
//! order by internal field paths and report the total count. Paging and
//! shaping happen afterwards, on the returned collection.
//!
//! [`InMemoryStore`] is a ready implementation over a `Vec`.
//!
//! # Example
//!
//! ```rust,ignore
//! use resource_query::store::{EntityStore, ResourceFilter, StoreError, StoreResult};
//! use resource_query::sort::SortPlan;
//!
//! struct AuthorTable {
//!     pool: PgPool,
//! }
//!
//! impl EntityStore<Author> for AuthorTable {
//!     async fn fetch_ordered(
//!         &self,
//!         filter: &ResourceFilter,
//!         plan: &SortPlan,
//!     ) -> StoreResult<(Vec<Author>, u64)> {
//!         // Build ORDER BY from plan.instructions()
//!         todo!()
//!     }
//! }
//! ```

mod error;
mod memory;

use std::future::Future;

pub use error::{StoreError, StoreErrorKind};
pub use memory::InMemoryStore;

use crate::sort::SortPlan;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Domain filter and free-text search for a collection fetch
///
/// Values are trimmed; blank values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    /// Exact-match domain filter (for authors, the genre)
    pub filter_value: Option<String>,
    /// Free-text search
    pub search_query: Option<String>,
}

impl ResourceFilter {
    /// Create a filter, dropping blank values
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_query::store::ResourceFilter;
    ///
    /// let filter = ResourceFilter::new(Some(" Fantasy "), Some("   "));
    /// assert_eq!(filter.filter_value.as_deref(), Some("Fantasy"));
    /// assert!(filter.search_query.is_none());
    /// ```
    pub fn new(filter_value: Option<&str>, search_query: Option<&str>) -> Self {
        Self {
            filter_value: non_blank(filter_value),
            search_query: non_blank(search_query),
        }
    }

    /// Whether neither filter nor search is set
    pub fn is_empty(&self) -> bool {
        self.filter_value.is_none() && self.search_query.is_none()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Source of filtered, ordered entities
///
/// Implementations must order by the plan's internal paths in precedence
/// order and return the count of all matching entities, independent of any
/// paging. Errors are reported as [`StoreError`]; the pipeline does not
/// retry them.
pub trait EntityStore<E>: Send + Sync {
    /// Fetch every entity matching `filter`, ordered by `plan`
    fn fetch_ordered(
        &self,
        filter: &ResourceFilter,
        plan: &SortPlan,
    ) -> impl Future<Output = StoreResult<(Vec<E>, u64)>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_drops_blank_values() {
        let filter = ResourceFilter::new(Some(""), None);
        assert!(filter.is_empty());

        let filter = ResourceFilter::new(None, Some("  tolk "));
        assert_eq!(filter.search_query.as_deref(), Some("tolk"));
        assert!(!filter.is_empty());
    }
}
