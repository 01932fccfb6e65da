//! Projection of output views onto requested fields
//!
//! The shaper assumes its caller already rejected unknown names (see
//! [`MappingTable::validate_fields`](crate::mapping::MappingTable::validate_fields)
//! and [`FieldSource::has_fields`]). It only projects.
//!
//! # Example
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use resource_query::fields::{FieldAccessors, FieldSource};
//! use resource_query::shaping::shape;
//!
//! struct AuthorView {
//!     id: &'static str,
//!     name: &'static str,
//!     genre: &'static str,
//! }
//!
//! static VIEW_FIELDS: Lazy<FieldAccessors<AuthorView>> = Lazy::new(|| {
//!     FieldAccessors::new()
//!         .with("Id", |a: &AuthorView| a.id.into())
//!         .with("Name", |a: &AuthorView| a.name.into())
//!         .with("Genre", |a: &AuthorView| a.genre.into())
//! });
//!
//! impl FieldSource for AuthorView {
//!     fn field_accessors() -> &'static FieldAccessors<Self> {
//!         &VIEW_FIELDS
//!     }
//! }
//!
//! let view = AuthorView { id: "A1", name: "X", genre: "Y" };
//! let shaped = shape(&view, Some("name, id"));
//! assert_eq!(
//!     serde_json::to_string(&shaped).unwrap(),
//!     r#"{"Name":"X","Id":"A1"}"#
//! );
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::fields::{is_blank, names_match, split_field_list, FieldSource};
use crate::value::FieldValue;

/// Ordered name-to-value projection of one item
///
/// Serialises as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapedEntity {
    fields: Vec<(&'static str, FieldValue)>,
}

impl ShapedEntity {
    /// Value of a field, matched ignoring case
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(declared, _)| names_match(declared, name))
            .map(|(_, value)| value)
    }

    /// Field names in output order
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Iterate over names and values in output order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were projected
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(declared, _)| *declared == name)
    }
}

impl Serialize for ShapedEntity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Project `item` onto a comma-separated list of field names
///
/// A blank or absent list returns every field in declared order. Otherwise
/// fields appear in request order under their declared spelling; repeated
/// names keep their first position. A name the type does not expose is
/// skipped with a warning.
pub fn shape<T: FieldSource>(item: &T, fields: Option<&str>) -> ShapedEntity {
    let accessors = T::field_accessors();

    if is_blank(fields) {
        return ShapedEntity {
            fields: accessors
                .iter()
                .map(|(name, accessor)| (name, accessor(item)))
                .collect(),
        };
    }

    let mut shaped = ShapedEntity::default();
    for requested in split_field_list(fields) {
        match accessors.get(requested) {
            Some((name, accessor)) => {
                if !shaped.contains(name) {
                    shaped.fields.push((name, accessor(item)));
                }
            }
            None => {
                tracing::warn!(
                    field = requested,
                    "Requested field is not exposed by {}; skipping",
                    std::any::type_name::<T>()
                );
            }
        }
    }
    shaped
}

/// Project every item of a sequence, see [`shape`]
pub fn shape_all<T: FieldSource>(items: &[T], fields: Option<&str>) -> Vec<ShapedEntity> {
    items.iter().map(|item| shape(item, fields)).collect()
}
