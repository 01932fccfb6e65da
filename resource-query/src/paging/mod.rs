//! Paging parameters, paged results and navigation metadata
//!
//! [`ResourceParameters`] carries what a client asked for. [`PagedList`]
//! slices an ordered collection and computes page counts.
//! [`PaginationMetadata`] is the serialisable summary sent back in the
//! `X-Pagination` response header, with links built by a [`LinkBuilder`].
//!
//! # Example
//!
//! ```rust
//! use resource_query::paging::{PagedList, ResourceParameters};
//!
//! let params = ResourceParameters::new().with_page_number(2).with_page_size(50);
//! assert_eq!(params.page_size(), 20); // clamped to the maximum
//!
//! let page = PagedList::create((1..=45).collect::<Vec<u32>>(), params.page_number(), params.page_size());
//! assert_eq!(page.items, (21..=40).collect::<Vec<_>>());
//! assert_eq!(page.total_pages, 3);
//! assert!(page.has_previous() && page.has_next());
//! ```

mod links;
mod paged;
mod parameters;

pub use links::{LinkBuilder, ResourceUriType};
pub use paged::{PagedList, PaginationMetadata};
pub use parameters::{
    ParameterQuery, ResourceParameters, DEFAULT_ORDER_BY, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

/// Calculate total pages, rounding up
///
/// Zero items give zero pages. A zero page size is treated as one.
pub fn calculate_total_pages(total: u64, page_size: u32) -> u32 {
    let page_size = u64::from(page_size.max(1));
    let pages = total.saturating_add(page_size).saturating_sub(1) / page_size;
    pages.min(u64::from(u32::MAX)) as u32
}
