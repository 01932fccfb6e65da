//! Mapping tables for one view pair

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::fields::split_field_list;
use crate::sort::bare_field_name;

/// Internal field paths behind one public field name
///
/// Every path receives the direction requested for the public field. When
/// `invert_direction` is set that direction is flipped for these paths, as
/// for a public `Age` backed by an internal date of birth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    internal_paths: Vec<String>,
    invert_direction: bool,
}

impl FieldMapping {
    /// Map to the given internal paths, in significance order
    pub fn new<I, S>(internal_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            internal_paths: internal_paths.into_iter().map(Into::into).collect(),
            invert_direction: false,
        }
    }

    /// Flip the requested direction for these paths
    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert_direction = true;
        self
    }

    /// Internal paths in declared order
    pub fn internal_paths(&self) -> &[String] {
        &self.internal_paths
    }

    /// Whether requested directions are flipped
    pub fn invert_direction(&self) -> bool {
        self.invert_direction
    }
}

/// Public field name to [`FieldMapping`] table
///
/// Names are matched case-insensitively (Unicode lowercase) and kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: Vec<(String, FieldMapping)>,
    index: HashMap<String, usize>,
}

impl MappingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mapping entry
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMappingValue`] when the mapping has no internal
    /// paths and [`Error::Configuration`] when the public name is already
    /// present (ignoring case).
    pub fn insert(&mut self, public_name: impl Into<String>, mapping: FieldMapping) -> Result<()> {
        let public_name = public_name.into();
        if mapping.internal_paths.is_empty() {
            return Err(Error::EmptyMappingValue(public_name));
        }

        let key = public_name.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(Error::Configuration(format!(
                "duplicate mapping for public field '{}'",
                public_name
            )));
        }

        self.index.insert(key, self.entries.len());
        self.entries.push((public_name, mapping));
        Ok(())
    }

    /// Builder form of [`MappingTable::insert`]
    pub fn with(mut self, public_name: impl Into<String>, mapping: FieldMapping) -> Result<Self> {
        self.insert(public_name, mapping)?;
        Ok(self)
    }

    /// Find the mapping for a public name
    pub fn get(&self, public_name: &str) -> Option<&FieldMapping> {
        self.index
            .get(&public_name.to_lowercase())
            .map(|&i| &self.entries[i].1)
    }

    /// Whether a public name is mapped
    pub fn contains(&self, public_name: &str) -> bool {
        self.index.contains_key(&public_name.to_lowercase())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMapping)> {
        self.entries.iter().map(|(name, mapping)| (name.as_str(), mapping))
    }

    /// Check a comma-separated field list against the table
    ///
    /// A blank or absent list is valid. Otherwise each token is trimmed,
    /// any direction suffix is dropped, and the bare name must be mapped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_query::mapping::{FieldMapping, MappingTable};
    ///
    /// let table = MappingTable::new().with("Genre", FieldMapping::new(["Genre"]))?;
    /// assert!(table.validate_fields(None));
    /// assert!(table.validate_fields(Some("genre desc")));
    /// assert!(!table.validate_fields(Some("Genre, Shoe")));
    /// # Ok::<(), resource_query::Error>(())
    /// ```
    pub fn validate_fields(&self, fields: Option<&str>) -> bool {
        split_field_list(fields).all(|token| self.contains(bare_field_name(token)))
    }

    /// Bare names in a comma-separated field list that are not mapped
    pub fn unknown_fields(&self, fields: Option<&str>) -> Vec<String> {
        split_field_list(fields)
            .map(bare_field_name)
            .filter(|name| !self.contains(name))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author_table() -> MappingTable {
        MappingTable::new()
            .with("Id", FieldMapping::new(["Id"]))
            .and_then(|t| t.with("Genre", FieldMapping::new(["Genre"])))
            .and_then(|t| t.with("Age", FieldMapping::new(["DateOfBirth"]).inverted()))
            .and_then(|t| t.with("Name", FieldMapping::new(["FirstName", "LastName"])))
            .unwrap()
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = author_table();
        let name = table.get("nAmE").unwrap();
        assert_eq!(name.internal_paths(), &["FirstName", "LastName"]);
        assert!(!name.invert_direction());
        assert!(table.get("AGE").unwrap().invert_direction());
        assert!(table.get("Shoe").is_none());
    }

    #[test]
    fn test_lookup_folds_non_ascii_case() {
        let table = MappingTable::new()
            .with("Größe", FieldMapping::new(["Size"]))
            .and_then(|t| t.with("Ärger", FieldMapping::new(["Trouble"])))
            .unwrap();
        assert!(table.contains("GRÖßE"));
        assert!(table.contains("ÄRGER"));
        assert!(table.validate_fields(Some("ärger desc, GRÖßE")));

        let err = table.clone().insert("äRGER", FieldMapping::new(["Other"])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let table = author_table();
        let names: Vec<_> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Id", "Genre", "Age", "Name"]);
    }

    #[test]
    fn test_duplicate_public_name_rejected() {
        let mut table = author_table();
        let err = table.insert("genre", FieldMapping::new(["Other"])).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_empty_paths_rejected() {
        let mut table = MappingTable::new();
        let err = table
            .insert("Ghost", FieldMapping::new(Vec::<String>::new()))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyMappingValue(ref name) if name == "Ghost"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_validate_fields_blank_is_valid() {
        let table = author_table();
        assert!(table.validate_fields(None));
        assert!(table.validate_fields(Some("")));
        assert!(table.validate_fields(Some("   ")));
    }

    #[test]
    fn test_validate_fields_strips_direction() {
        let table = author_table();
        assert!(table.validate_fields(Some("Age desc, name")));
        assert!(table.validate_fields(Some(" Id , Genre asc")));
    }

    #[test]
    fn test_validate_fields_rejects_unknown() {
        let table = author_table();
        assert!(!table.validate_fields(Some("Name, Shoe")));
        assert!(!table.validate_fields(Some("Name,")));
    }

    #[test]
    fn test_unknown_fields_lists_bare_names() {
        let table = author_table();
        assert_eq!(
            table.unknown_fields(Some("Shoe desc, Name, Hat")),
            vec!["Shoe".to_string(), "Hat".to_string()]
        );
        assert!(table.unknown_fields(None).is_empty());
    }
}
