//! The collection query pipeline
//!
//! [`ResourceQuery::execute`] runs one request end to end:
//!
//! 1. look up the mapping table for the view pair
//! 2. reject unknown `orderBy` and `fields` names
//! 3. resolve the sort plan
//! 4. fetch filtered, ordered entities from the store
//! 5. slice the requested page
//! 6. map entities to output views
//! 7. shape each view to the requested fields
//!
//! Steps 1 to 3 finish before the store is touched, so a rejected request
//! does no work.

use std::sync::Arc;

use crate::config::QueryConfig;
use crate::error::{Error, Result};
use crate::fields::{names_match, FieldSource};
use crate::mapping::{MappingRegistry, ViewKind};
use crate::paging::{LinkBuilder, PagedList, PaginationMetadata, ParameterQuery, ResourceParameters};
use crate::shaping::{shape, ShapedEntity};
use crate::sort::SortPlan;
use crate::store::EntityStore;

/// One page of shaped output items
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedPage {
    /// Shaped items plus collection counts
    pub page: PagedList<ShapedEntity>,
}

impl ShapedPage {
    /// Pagination metadata with links to neighbouring pages
    pub fn metadata<L>(&self, params: &ResourceParameters, links: &L) -> PaginationMetadata
    where
        L: LinkBuilder + ?Sized,
    {
        self.page.metadata().with_links(params, links)
    }

    /// Shaped items
    pub fn items(&self) -> &[ShapedEntity] {
        &self.page.items
    }

    /// Take the shaped items
    pub fn into_items(self) -> Vec<ShapedEntity> {
        self.page.items
    }
}

/// Shared entry point for collection queries
///
/// Cheap to clone; holds the read-only registry behind an `Arc`.
#[derive(Debug)]
pub struct ResourceQuery<V: ViewKind> {
    registry: Arc<MappingRegistry<V>>,
    config: QueryConfig,
}

impl<V: ViewKind> Clone for ResourceQuery<V> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            config: self.config.clone(),
        }
    }
}

impl<V: ViewKind> ResourceQuery<V> {
    /// Create a pipeline over a built registry
    pub fn new(registry: Arc<MappingRegistry<V>>, config: QueryConfig) -> Self {
        Self {
            registry,
            config: config.normalized(),
        }
    }

    /// The mapping registry
    pub fn registry(&self) -> &MappingRegistry<V> {
        &self.registry
    }

    /// Query limits and defaults
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Default parameters under this pipeline's limits
    pub fn default_parameters(&self) -> ResourceParameters {
        ResourceParameters::new()
            .with_max_page_size(self.config.max_page_size)
            .with_page_size(i64::from(self.config.default_page_size))
            .with_order_by(self.config.default_order_by.clone())
    }

    /// Parameters for a client query under this pipeline's limits
    pub fn parameters(&self, query: ParameterQuery) -> ResourceParameters {
        query.apply(self.default_parameters())
    }

    /// Validate a request against the view pair and resolve its sort plan
    ///
    /// `D` is the output view the fields will be shaped from.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when the pair has no table, and
    /// [`Error::UnknownField`] when `orderBy` or `fields` names something
    /// the table or `D` does not know.
    pub fn prepare<D: FieldSource>(
        &self,
        source: V,
        destination: V,
        params: &ResourceParameters,
    ) -> Result<SortPlan> {
        let table = self.registry.lookup(source, destination)?;

        let fields = params.fields();
        let mut unknown = table.unknown_fields(fields);
        for name in D::unknown_fields(fields) {
            if !unknown.iter().any(|u| names_match(u, &name)) {
                unknown.push(name);
            }
        }
        if !unknown.is_empty() {
            return Err(Error::unknown_fields(unknown));
        }

        SortPlan::resolve(params.order_by(), table)
    }

    /// Run the whole pipeline for one request
    ///
    /// `source` and `destination` name the view pair whose mapping table
    /// governs `orderBy` and `fields`. `map_view` converts each fetched
    /// entity `E` into its output view `D`.
    #[tracing::instrument(
        skip(self, params, store, map_view),
        fields(
            order_by = params.order_by(),
            shape = params.fields(),
            page = params.page_number(),
            page_size = params.page_size(),
        )
    )]
    pub async fn execute<E, D, S, M>(
        &self,
        source: V,
        destination: V,
        params: &ResourceParameters,
        store: &S,
        map_view: M,
    ) -> Result<ShapedPage>
    where
        D: FieldSource,
        S: EntityStore<E>,
        M: Fn(&E) -> D,
    {
        let plan = self.prepare::<D>(source, destination, params)?;
        tracing::debug!(plan = %plan, "Sort plan resolved");

        let (entities, total) = store.fetch_ordered(&params.filter(), &plan).await?;
        tracing::debug!(total, fetched = entities.len(), "Entities fetched");

        let page = PagedList::create(entities, params.page_number(), params.page_size());
        if page.total_count != total {
            tracing::warn!(
                reported = total,
                fetched = page.total_count,
                "Store count differs from fetched collection"
            );
        }

        let fields = params.fields();
        Ok(ShapedPage {
            page: page.map(|entity| shape(&map_view(&entity), fields)),
        })
    }
}
