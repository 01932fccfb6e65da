//! Registry of mapping tables keyed by view pair

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use super::MappingTable;
use crate::error::{Error, Result};

/// Identifies a resource view (an entity or an output shape)
///
/// Implemented automatically for any small `Copy` key, typically a fieldless
/// enum listing the application's resource kinds.
pub trait ViewKind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

impl<T> ViewKind for T where T: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {}

/// Immutable set of mapping tables, one per (source, destination) pair
#[derive(Debug)]
pub struct MappingRegistry<V: ViewKind> {
    tables: HashMap<(V, V), MappingTable>,
}

impl<V: ViewKind> MappingRegistry<V> {
    /// Start building a registry
    pub fn builder() -> MappingRegistryBuilder<V> {
        MappingRegistryBuilder {
            tables: HashMap::new(),
        }
    }

    /// Find the table registered for a view pair
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when no table was registered for the
    /// pair. This is a wiring defect, never a client error.
    pub fn lookup(&self, source: V, destination: V) -> Result<&MappingTable> {
        self.tables.get(&(source, destination)).ok_or_else(|| {
            Error::Configuration(format!(
                "no mapping table registered for {:?} -> {:?}",
                source, destination
            ))
        })
    }

    /// Look up a table and check a comma-separated field list against it
    pub fn validate_fields(&self, source: V, destination: V, fields: Option<&str>) -> Result<bool> {
        Ok(self.lookup(source, destination)?.validate_fields(fields))
    }

    /// Number of registered view pairs
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no view pairs are registered
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Builder for [`MappingRegistry`]
#[derive(Debug)]
pub struct MappingRegistryBuilder<V: ViewKind> {
    tables: HashMap<(V, V), MappingTable>,
}

impl<V: ViewKind> MappingRegistryBuilder<V> {
    /// Register the table for a view pair
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the pair already has a table.
    pub fn register(mut self, source: V, destination: V, table: MappingTable) -> Result<Self> {
        if self.tables.contains_key(&(source, destination)) {
            return Err(Error::Configuration(format!(
                "mapping table for {:?} -> {:?} registered twice",
                source, destination
            )));
        }
        self.tables.insert((source, destination), table);
        Ok(self)
    }

    /// Freeze the registry for shared read-only use
    pub fn build(self) -> Arc<MappingRegistry<V>> {
        tracing::debug!(tables = self.tables.len(), "Mapping registry built");
        Arc::new(MappingRegistry {
            tables: self.tables,
        })
    }
}
