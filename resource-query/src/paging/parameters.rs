//! Client-supplied collection parameters

use serde::{Deserialize, Serialize};

use crate::store::ResourceFilter;

/// Page requested when none is given
pub const DEFAULT_PAGE_NUMBER: u32 = 1;

/// Page size used when none is given
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a client may request
pub const MAX_PAGE_SIZE: u32 = 20;

/// Order-by expression used when none is given
pub const DEFAULT_ORDER_BY: &str = "Name";

/// Paging, filtering, ordering and shaping parameters for a collection
///
/// Out-of-range values are clamped whenever they are written, never
/// rejected: the page size always lies in `1..=max_page_size` and the page
/// number is at least 1.
///
/// Requests arrive as a [`ParameterQuery`], which is applied on top of
/// defaults carrying the configured limits (see
/// [`ResourceQuery::parameters`](crate::pipeline::ResourceQuery::parameters)).
///
/// # Example
///
/// ```rust
/// use resource_query::paging::ResourceParameters;
///
/// let params = ResourceParameters::new();
/// assert_eq!(params.page_number(), 1);
/// assert_eq!(params.page_size(), 10);
/// assert_eq!(params.order_by(), "Name");
///
/// let mut params = params.with_max_page_size(50);
/// params.set_page_size(80);
/// assert_eq!(params.page_size(), 50);
/// params.set_page_number(-3);
/// assert_eq!(params.page_number(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceParameters {
    page_number: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_query: Option<String>,
    order_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<String>,
    #[serde(skip)]
    max_page_size: u32,
}

/// Collection parameters exactly as the client sent them
///
/// Deserialises from camelCase query parameters: `pageNumber`, `pageSize`,
/// `filterValue`, `searchQuery`, `orderBy` and `fields`. Nothing is clamped
/// until [`ParameterQuery::apply`] meets the limits it should obey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub filter_value: Option<String>,
    pub search_query: Option<String>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

impl ParameterQuery {
    /// Overlay the supplied values on `defaults`
    ///
    /// The page size is clamped against `defaults.max_page_size()`.
    pub fn apply(self, defaults: ResourceParameters) -> ResourceParameters {
        let mut params = defaults;
        if let Some(page_number) = self.page_number {
            params.set_page_number(page_number);
        }
        if let Some(page_size) = self.page_size {
            params.set_page_size(page_size);
        }
        if let Some(order_by) = self.order_by {
            params.order_by = order_by;
        }
        if self.filter_value.is_some() {
            params.filter_value = self.filter_value;
        }
        if self.search_query.is_some() {
            params.search_query = self.search_query;
        }
        if self.fields.is_some() {
            params.fields = self.fields;
        }
        params
    }
}

impl Default for ResourceParameters {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
            filter_value: None,
            search_query: None,
            order_by: DEFAULT_ORDER_BY.to_string(),
            fields: None,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl ResourceParameters {
    /// Parameters with every default applied
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the page size ceiling, re-clamping the current page size
    ///
    /// A ceiling of zero is treated as one.
    #[must_use]
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size.max(1);
        self.page_size = self.page_size.min(self.max_page_size);
        self
    }

    /// Set the page number; values below 1 become 1
    pub fn set_page_number(&mut self, page_number: i64) {
        self.page_number = page_number.clamp(1, i64::from(u32::MAX)) as u32;
    }

    /// Set the page size, clamped to `1..=max_page_size`
    pub fn set_page_size(&mut self, page_size: i64) {
        self.page_size = page_size.clamp(1, i64::from(self.max_page_size)) as u32;
    }

    /// Builder form of [`ResourceParameters::set_page_number`]
    #[must_use]
    pub fn with_page_number(mut self, page_number: i64) -> Self {
        self.set_page_number(page_number);
        self
    }

    /// Builder form of [`ResourceParameters::set_page_size`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_query::paging::ResourceParameters;
    ///
    /// assert_eq!(ResourceParameters::new().with_page_size(50).page_size(), 20);
    /// assert_eq!(ResourceParameters::new().with_page_size(0).page_size(), 1);
    /// ```
    #[must_use]
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.set_page_size(page_size);
        self
    }

    /// Set the domain filter value
    #[must_use]
    pub fn with_filter_value(mut self, filter_value: impl Into<String>) -> Self {
        self.filter_value = Some(filter_value.into());
        self
    }

    /// Set the free-text search
    #[must_use]
    pub fn with_search_query(mut self, search_query: impl Into<String>) -> Self {
        self.search_query = Some(search_query.into());
        self
    }

    /// Set the order-by expression
    #[must_use]
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = order_by.into();
        self
    }

    /// Set the comma-separated list of fields to return
    #[must_use]
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// 1-indexed page number
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Items per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page size ceiling
    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    /// Domain filter value, as given
    pub fn filter_value(&self) -> Option<&str> {
        self.filter_value.as_deref()
    }

    /// Free-text search, as given
    pub fn search_query(&self) -> Option<&str> {
        self.search_query.as_deref()
    }

    /// Order-by expression
    pub fn order_by(&self) -> &str {
        &self.order_by
    }

    /// Requested fields, `None` for all
    pub fn fields(&self) -> Option<&str> {
        self.fields.as_deref()
    }

    /// Number of items before the requested page
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Store filter built from the filter value and search query
    pub fn filter(&self) -> ResourceFilter {
        ResourceFilter::new(self.filter_value(), self.search_query())
    }

    /// The same parameters addressing another page
    #[must_use]
    pub fn for_page(&self, page_number: u32) -> Self {
        let mut params = self.clone();
        params.page_number = page_number.max(1);
        params
    }
}
