//! Field mappings between the author views

use std::sync::Arc;

use resource_query::mapping::{FieldMapping, MappingRegistry, MappingTable};

/// Views known to this service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Stored record, see [`crate::Author`]
    Author,
    /// Public view, see [`crate::AuthorDto`]
    AuthorDto,
}

/// Public author fields to stored author paths
///
/// `Age` sorts by date of birth with the direction flipped, so the
/// youngest author comes first for `Age`.
pub fn author_mapping() -> resource_query::Result<MappingTable> {
    MappingTable::new()
        .with("Id", FieldMapping::new(["Id"]))?
        .with("Genre", FieldMapping::new(["Genre"]))?
        .with("Age", FieldMapping::new(["DateOfBirth"]).inverted())?
        .with("Name", FieldMapping::new(["FirstName", "LastName"]))
}

/// Registry holding every view pair the service queries
pub fn registry() -> resource_query::Result<Arc<MappingRegistry<View>>> {
    Ok(MappingRegistry::builder()
        .register(View::AuthorDto, View::Author, author_mapping()?)?
        .build())
}
