//! Per-type field accessor tables
//!
//! Each type that can be sorted or shaped registers its named fields once,
//! as plain function pointers, through [`FieldSource`]. Lookups by name are
//! case-insensitive; the declared spelling is kept for output keys.
//!
//! # Example
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use resource_query::fields::{FieldAccessors, FieldSource};
//! use resource_query::value::FieldValue;
//!
//! struct Book {
//!     title: String,
//!     pages: u32,
//! }
//!
//! static BOOK_FIELDS: Lazy<FieldAccessors<Book>> = Lazy::new(|| {
//!     FieldAccessors::new()
//!         .with("Title", |b: &Book| b.title.clone().into())
//!         .with("Pages", |b: &Book| b.pages.into())
//! });
//!
//! impl FieldSource for Book {
//!     fn field_accessors() -> &'static FieldAccessors<Self> {
//!         &BOOK_FIELDS
//!     }
//! }
//!
//! let book = Book { title: "Dune".into(), pages: 412 };
//! assert_eq!(book.field_value("title"), Some(FieldValue::Text("Dune".into())));
//! assert!(Book::has_fields(Some("Title, pages")));
//! assert!(!Book::has_fields(Some("Title,Isbn")));
//! ```

use std::fmt;

use crate::value::FieldValue;

/// Reads one named field from a value
pub type Accessor<T> = fn(&T) -> FieldValue;

/// Ordered table of named field accessors for `T`
pub struct FieldAccessors<T> {
    entries: Vec<(&'static str, Accessor<T>)>,
}

impl<T> FieldAccessors<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a field accessor
    ///
    /// Registering a name that already exists (ignoring case) replaces the
    /// accessor and keeps the original position and spelling.
    #[must_use]
    pub fn with(mut self, name: &'static str, accessor: Accessor<T>) -> Self {
        match self.position(name) {
            Some(index) => self.entries[index].1 = accessor,
            None => self.entries.push((name, accessor)),
        }
        self
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(declared, _)| names_match(declared, name))
    }

    /// Find a field by name, returning its declared spelling and accessor
    pub fn get(&self, name: &str) -> Option<(&'static str, Accessor<T>)> {
        self.position(name).map(|index| self.entries[index])
    }

    /// Check whether a field exists
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Read a field from `value`, `None` when the name is not registered
    pub fn read(&self, value: &T, name: &str) -> Option<FieldValue> {
        self.get(name).map(|(_, accessor)| accessor(value))
    }

    /// Declared field names in registration order
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// Iterate over declared names and accessors in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Accessor<T>)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of registered fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fields are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for FieldAccessors<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FieldAccessors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// A type whose fields can be read by name
///
/// Implemented by internal entities (sorted by internal path) and by output
/// views (shaped by public name).
pub trait FieldSource: Sized + 'static {
    /// The process-wide accessor table for this type
    fn field_accessors() -> &'static FieldAccessors<Self>;

    /// Read one field by name
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        Self::field_accessors().read(self, name)
    }

    /// Whether every name in a comma-separated list is a field of this type
    ///
    /// A blank or absent list is always accepted.
    fn has_fields(fields: Option<&str>) -> bool {
        Self::unknown_fields(fields).is_empty()
    }

    /// Names in a comma-separated list that are not fields of this type
    fn unknown_fields(fields: Option<&str>) -> Vec<String> {
        let accessors = Self::field_accessors();
        split_field_list(fields)
            .filter(|name| !accessors.contains(name))
            .map(str::to_string)
            .collect()
    }
}

/// Whether two field names are equal ignoring case
///
/// Uses full Unicode lowercase mapping, not just ASCII.
pub fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Whether a field or order-by list is absent or only whitespace
pub fn is_blank(list: Option<&str>) -> bool {
    list.map_or(true, |s| s.trim().is_empty())
}

/// Split a comma-separated list into trimmed tokens
///
/// A blank list yields nothing. Empty tokens between commas are kept, so
/// `"Id,,Name"` yields an empty name that no table will contain.
pub fn split_field_list(list: Option<&str>) -> impl Iterator<Item = &str> {
    let list = if is_blank(list) { None } else { list };
    list.into_iter().flat_map(|s| s.split(',').map(str::trim))
}
