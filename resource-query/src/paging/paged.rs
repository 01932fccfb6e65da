//! Paged results and their metadata

use serde::{Deserialize, Serialize};

use super::{calculate_total_pages, LinkBuilder, ResourceParameters, ResourceUriType};

/// One page of an ordered collection
///
/// Counts describe the whole collection, before slicing. A page past the
/// end holds no items but keeps the same counts.
///
/// # Example
///
/// ```rust
/// use resource_query::paging::PagedList;
///
/// let page = PagedList::create(vec!["a", "b", "c"], 5, 2);
/// assert!(page.items.is_empty());
/// assert_eq!(page.total_count, 3);
/// assert_eq!(page.total_pages, 2);
/// assert!(page.has_previous());
/// assert!(!page.has_next());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    /// Items on this page, in collection order
    pub items: Vec<T>,
    /// Number of items in the whole collection
    pub total_count: u64,
    /// Items per page
    pub page_size: u32,
    /// 1-indexed page number
    pub current_page: u32,
    /// Number of pages in the whole collection
    pub total_pages: u32,
}

impl<T> PagedList<T> {
    /// Slice one page out of a complete, ordered collection
    pub fn create(collection: Vec<T>, page_number: u32, page_size: u32) -> Self {
        let page_number = page_number.max(1);
        let page_size = page_size.max(1);
        let total_count = collection.len() as u64;
        let skip = usize::try_from(u64::from(page_number - 1) * u64::from(page_size))
            .unwrap_or(usize::MAX);

        let items = collection
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .collect();

        Self::from_page(items, total_count, page_number, page_size)
    }

    /// Wrap a page that was already sliced by the store
    pub fn from_page(items: Vec<T>, total_count: u64, page_number: u32, page_size: u32) -> Self {
        let page_size = page_size.max(1);
        Self {
            items,
            total_count,
            page_size,
            current_page: page_number.max(1),
            total_pages: calculate_total_pages(total_count, page_size),
        }
    }

    /// Whether a page exists before this one
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a page exists after this one
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform the items, keeping the counts
    pub fn map<U, F>(self, f: F) -> PagedList<U>
    where
        F: FnMut(T) -> U,
    {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }

    /// Counts of this page without links
    pub fn metadata(&self) -> PaginationMetadata {
        PaginationMetadata {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
            previous_page_link: None,
            next_page_link: None,
        }
    }
}

/// Pagination summary sent in the `X-Pagination` response header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    /// Number of items in the whole collection
    pub total_count: u64,
    /// Items per page
    pub page_size: u32,
    /// 1-indexed page number
    pub current_page: u32,
    /// Number of pages in the whole collection
    pub total_pages: u32,
    /// Link to the previous page, `null` on the first page
    pub previous_page_link: Option<String>,
    /// Link to the next page, `null` on the last page
    pub next_page_link: Option<String>,
}

impl PaginationMetadata {
    /// Fill in navigation links for the pages that exist
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_query::paging::{PagedList, ResourceParameters};
    ///
    /// let params = ResourceParameters::new().with_page_number(1).with_page_size(2);
    /// let page = PagedList::create(vec![1, 2, 3], params.page_number(), params.page_size());
    /// let links = |p: &ResourceParameters| Some(format!("/n?pageNumber={}", p.page_number()));
    ///
    /// let meta = page.metadata().with_links(&params, &links);
    /// assert_eq!(meta.previous_page_link, None);
    /// assert_eq!(meta.next_page_link.as_deref(), Some("/n?pageNumber=2"));
    /// ```
    #[must_use]
    pub fn with_links<L>(mut self, params: &ResourceParameters, links: &L) -> Self
    where
        L: LinkBuilder + ?Sized,
    {
        let params = params.for_page(self.current_page);
        self.previous_page_link = if self.has_previous() {
            links.link_for(&params, ResourceUriType::PreviousPage)
        } else {
            None
        };
        self.next_page_link = if self.has_next() {
            links.link_for(&params, ResourceUriType::NextPage)
        } else {
            None
        };
        self
    }

    /// Whether a page exists before this one
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether a page exists after this one
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Serialise for the `X-Pagination` header
    pub fn to_header_value(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let page = PagedList::create((1..=25).collect::<Vec<_>>(), 1, 10);
        assert_eq!(page.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_previous());
        assert!(page.has_next());
    }

    #[test]
    fn test_last_partial_page() {
        let page = PagedList::create((1..=25).collect::<Vec<_>>(), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_out_of_range_page_is_empty_with_same_counts() {
        let page = PagedList::create((1..=25).collect::<Vec<_>>(), 9, 10);
        assert!(page.is_empty());
        assert_eq!(page.total_count, 25);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 9);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_empty_collection() {
        let page = PagedList::create(Vec::<u8>::new(), 1, 10);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_from_page_keeps_store_counts() {
        let page = PagedList::from_page(vec!["x", "y"], 42, 2, 2);
        assert_eq!(page.total_pages, 21);
        assert_eq!(page.len(), 2);
        assert!(page.has_next());
    }

    #[test]
    fn test_map_keeps_counts() {
        let page = PagedList::create(vec![1, 2, 3], 1, 2).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_count, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_metadata_links_only_for_existing_pages() {
        let params = ResourceParameters::new().with_page_number(2).with_page_size(10);
        let page = PagedList::create((1..=25).collect::<Vec<_>>(), 2, 10);
        let links = |p: &ResourceParameters| Some(format!("page-{}", p.page_number()));

        let meta = page.metadata().with_links(&params, &links);
        assert_eq!(meta.previous_page_link.as_deref(), Some("page-1"));
        assert_eq!(meta.next_page_link.as_deref(), Some("page-3"));

        let single = PagedList::create(vec![1], 1, 10)
            .metadata()
            .with_links(&ResourceParameters::new(), &links);
        assert!(single.previous_page_link.is_none());
        assert!(single.next_page_link.is_none());
    }

    #[test]
    fn test_metadata_header_json() {
        let meta = PagedList::create(vec![1, 2, 3], 1, 2).metadata();
        let json: serde_json::Value = serde_json::from_str(&meta.to_header_value().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalCount": 3,
                "pageSize": 2,
                "currentPage": 1,
                "totalPages": 2,
                "previousPageLink": null,
                "nextPageLink": null,
            })
        );
    }
}
