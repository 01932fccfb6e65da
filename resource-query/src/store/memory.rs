//! In-memory entity store

use std::fmt;

use super::{EntityStore, ResourceFilter, StoreResult};
use crate::fields::FieldSource;
use crate::sort::{apply_sort, SortPlan};

type Predicate<E> = Box<dyn Fn(&E, &ResourceFilter) -> bool + Send + Sync>;

/// Entity store over a fixed `Vec`
///
/// Filtering is delegated to a predicate, which is only consulted when the
/// filter is non-empty. Ordering uses [`apply_sort`].
///
/// # Example
///
/// ```rust
/// # use once_cell::sync::Lazy;
/// # use resource_query::fields::{FieldAccessors, FieldSource};
/// use resource_query::sort::{SortInstruction, SortPlan};
/// use resource_query::store::{EntityStore, InMemoryStore, ResourceFilter};
///
/// #[derive(Clone)]
/// struct Tag(&'static str);
/// # static TAG_FIELDS: Lazy<FieldAccessors<Tag>> =
/// #     Lazy::new(|| FieldAccessors::new().with("Label", |t: &Tag| t.0.into()));
/// # impl FieldSource for Tag {
/// #     fn field_accessors() -> &'static FieldAccessors<Self> { &TAG_FIELDS }
/// # }
///
/// # tokio_test_block(async {
/// let store = InMemoryStore::new(vec![Tag("rust"), Tag("axum"), Tag("tokio")])
///     .with_filter(|tag, filter| filter.search_query.as_deref().map_or(true, |q| tag.0.contains(q)));
///
/// let plan = SortPlan::from_instructions(vec![SortInstruction::ascending("Label")]);
/// let filter = ResourceFilter::new(None, Some("u"));
/// let (tags, total) = store.fetch_ordered(&filter, &plan).await.unwrap();
/// assert_eq!(total, 2);
/// assert_eq!(tags[0].0, "axum");
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f);
/// # }
/// ```
pub struct InMemoryStore<E> {
    items: Vec<E>,
    predicate: Predicate<E>,
}

impl<E> InMemoryStore<E> {
    /// Create a store that matches every entity
    pub fn new(items: Vec<E>) -> Self {
        Self {
            items,
            predicate: Box::new(|_, _| true),
        }
    }

    /// Use `predicate` to decide which entities match a non-empty filter
    #[must_use]
    pub fn with_filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&E, &ResourceFilter) -> bool + Send + Sync + 'static,
    {
        self.predicate = Box::new(predicate);
        self
    }

    /// All entities in insertion order
    pub fn all(&self) -> &[E] {
        &self.items
    }

    /// First entity matching `predicate`
    pub fn find<P>(&self, predicate: P) -> Option<&E>
    where
        P: Fn(&E) -> bool,
    {
        self.items.iter().find(|item| predicate(*item))
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<E> fmt::Debug for InMemoryStore<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("len", &self.items.len())
            .finish_non_exhaustive()
    }
}

impl<E> EntityStore<E> for InMemoryStore<E>
where
    E: FieldSource + Clone + Send + Sync,
{
    async fn fetch_ordered(
        &self,
        filter: &ResourceFilter,
        plan: &SortPlan,
    ) -> StoreResult<(Vec<E>, u64)> {
        let mut matched: Vec<E> = if filter.is_empty() {
            self.items.clone()
        } else {
            self.items
                .iter()
                .filter(|item| (self.predicate)(*item, filter))
                .cloned()
                .collect()
        };

        apply_sort(&mut matched, plan);

        let total = matched.len() as u64;
        tracing::trace!(total, plan = %plan, "In-memory fetch");
        Ok((matched, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldAccessors;
    use crate::sort::SortInstruction;
    use once_cell::sync::Lazy;

    #[derive(Debug, Clone, PartialEq)]
    struct Book {
        title: &'static str,
        genre: &'static str,
    }

    static BOOK_FIELDS: Lazy<FieldAccessors<Book>> = Lazy::new(|| {
        FieldAccessors::new()
            .with("Title", |b: &Book| b.title.into())
            .with("Genre", |b: &Book| b.genre.into())
    });

    impl FieldSource for Book {
        fn field_accessors() -> &'static FieldAccessors<Self> {
            &BOOK_FIELDS
        }
    }

    fn store() -> InMemoryStore<Book> {
        InMemoryStore::new(vec![
            Book { title: "Dune", genre: "SciFi" },
            Book { title: "Emma", genre: "Romance" },
            Book { title: "Anathem", genre: "SciFi" },
        ])
        .with_filter(|book, filter| {
            filter
                .filter_value
                .as_deref()
                .map_or(true, |genre| book.genre.eq_ignore_ascii_case(genre))
        })
    }

    #[tokio::test]
    async fn test_fetch_without_filter_returns_everything_ordered() {
        let plan = SortPlan::from_instructions(vec![SortInstruction::ascending("Title")]);
        let (books, total) = store()
            .fetch_ordered(&ResourceFilter::default(), &plan)
            .await
            .unwrap();

        assert_eq!(total, 3);
        let titles: Vec<_> = books.iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["Anathem", "Dune", "Emma"]);
    }

    #[tokio::test]
    async fn test_fetch_applies_filter_before_counting() {
        let filter = ResourceFilter::new(Some("scifi"), None);
        let plan = SortPlan::from_instructions(vec![SortInstruction::descending("Title")]);
        let (books, total) = store().fetch_ordered(&filter, &plan).await.unwrap();

        assert_eq!(total, 2);
        let titles: Vec<_> = books.iter().map(|b| b.title).collect();
        assert_eq!(titles, vec!["Dune", "Anathem"]);
    }

    #[test]
    fn test_find_and_all() {
        let store = store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.all()[1].title, "Emma");
        assert_eq!(store.find(|b| b.title == "Dune").map(|b| b.genre), Some("SciFi"));
        assert!(store.find(|b| b.title == "Ulysses").is_none());
    }
}
