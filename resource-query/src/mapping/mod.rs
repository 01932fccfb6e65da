//! Public-to-internal field mapping
//!
//! A [`MappingTable`] maps each public, API-facing field name to one or more
//! internal field paths. A [`MappingRegistry`] holds one table per
//! (source view, destination view) pair, keyed by an application-defined
//! enum of view kinds.
//!
//! Registries are built once at startup and are read-only afterwards, so an
//! `Arc<MappingRegistry<V>>` can be shared across request handlers without
//! locking.
//!
//! # Example
//!
//! ```rust
//! use resource_query::mapping::{FieldMapping, MappingRegistry, MappingTable};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum View {
//!     Author,
//!     AuthorDto,
//! }
//!
//! let table = MappingTable::new()
//!     .with("Id", FieldMapping::new(["Id"]))?
//!     .with("Age", FieldMapping::new(["DateOfBirth"]).inverted())?;
//!
//! let registry = MappingRegistry::builder()
//!     .register(View::AuthorDto, View::Author, table)?
//!     .build();
//!
//! assert!(registry.validate_fields(View::AuthorDto, View::Author, Some("id, Age desc"))?);
//! assert!(registry.lookup(View::Author, View::AuthorDto).is_err());
//! # Ok::<(), resource_query::Error>(())
//! ```

mod registry;
mod table;

pub use registry::{MappingRegistry, MappingRegistryBuilder, ViewKind};
pub use table::{FieldMapping, MappingTable};
