//! Resolution of order-by expressions into internal sort instructions

use std::fmt;

use super::{parse_order_by, OrderDirection};
use crate::error::{Error, Result};
use crate::mapping::MappingTable;

/// Sort by one internal field path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortInstruction {
    /// Internal field path
    pub internal_path: String,
    /// Effective direction, after any inversion
    pub direction: OrderDirection,
}

impl SortInstruction {
    /// Create an instruction
    pub fn new(internal_path: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            internal_path: internal_path.into(),
            direction,
        }
    }

    /// Ascending instruction
    pub fn ascending(internal_path: impl Into<String>) -> Self {
        Self::new(internal_path, OrderDirection::Ascending)
    }

    /// Descending instruction
    pub fn descending(internal_path: impl Into<String>) -> Self {
        Self::new(internal_path, OrderDirection::Descending)
    }
}

impl fmt::Display for SortInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.internal_path, self.direction)
    }
}

/// Resolved sort instructions in precedence order
///
/// The first instruction is the most significant key. Stores that compose
/// single-key stable sorts should walk [`SortPlan::apply_order`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortPlan {
    instructions: Vec<SortInstruction>,
}

impl SortPlan {
    /// A plan that leaves order untouched
    pub fn unsorted() -> Self {
        Self::default()
    }

    /// Build a plan directly from instructions in precedence order
    pub fn from_instructions(instructions: Vec<SortInstruction>) -> Self {
        Self { instructions }
    }

    /// Resolve an order-by expression through a mapping table
    ///
    /// Each clause expands to the internal paths of its mapping entry, in
    /// declared order. Every path takes the clause direction, flipped when
    /// the entry inverts direction. A blank expression gives an empty plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] naming every clause whose field is not
    /// in the table. Nothing is resolved in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_query::mapping::{FieldMapping, MappingTable};
    /// use resource_query::sort::{SortInstruction, SortPlan};
    ///
    /// let table = MappingTable::new()
    ///     .with("Age", FieldMapping::new(["DateOfBirth"]).inverted())?;
    ///
    /// let plan = SortPlan::resolve("Age desc", &table)?;
    /// assert_eq!(plan.instructions(), &[SortInstruction::ascending("DateOfBirth")]);
    ///
    /// assert!(SortPlan::resolve("Shoe", &table).unwrap_err().is_client_error());
    /// # Ok::<(), resource_query::Error>(())
    /// ```
    pub fn resolve(order_by: &str, table: &MappingTable) -> Result<Self> {
        let mut instructions = Vec::new();
        let mut unknown = Vec::new();

        for clause in parse_order_by(order_by) {
            let Some(mapping) = table.get(&clause.field) else {
                unknown.push(clause.field);
                continue;
            };
            let direction = clause.direction.inverted_if(mapping.invert_direction());
            instructions.extend(
                mapping
                    .internal_paths()
                    .iter()
                    .map(|path| SortInstruction::new(path.clone(), direction)),
            );
        }

        if !unknown.is_empty() {
            return Err(Error::unknown_fields(unknown));
        }
        Ok(Self { instructions })
    }

    /// Instructions in precedence order
    pub fn instructions(&self) -> &[SortInstruction] {
        &self.instructions
    }

    /// Instructions in stable-pass application order
    ///
    /// Clauses are reversed and so are the paths within each clause, which
    /// is the full reverse of precedence order. Applying a stable single-key
    /// sort for each in turn leaves the first clause most significant.
    pub fn apply_order(&self) -> impl Iterator<Item = &SortInstruction> {
        self.instructions.iter().rev()
    }

    /// Internal paths in precedence order
    pub fn internal_paths(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().map(|i| i.internal_path.as_str())
    }

    /// Whether the plan has no instructions
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }
}

impl fmt::Display for SortPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::FieldMapping;

    fn author_table() -> MappingTable {
        let mut table = MappingTable::new();
        table.insert("Id", FieldMapping::new(["Id"])).unwrap();
        table.insert("Genre", FieldMapping::new(["Genre"])).unwrap();
        table
            .insert("Age", FieldMapping::new(["DateOfBirth"]).inverted())
            .unwrap();
        table
            .insert("Name", FieldMapping::new(["FirstName", "LastName"]))
            .unwrap();
        table
    }

    #[test]
    fn test_blank_order_by_is_empty_plan() {
        let table = author_table();
        assert!(SortPlan::resolve("", &table).unwrap().is_empty());
        assert!(SortPlan::resolve("  ", &table).unwrap().is_empty());
    }

    #[test]
    fn test_inverted_entry_flips_direction() {
        let table = author_table();
        let desc = SortPlan::resolve("Age desc", &table).unwrap();
        assert_eq!(desc.instructions(), &[SortInstruction::ascending("DateOfBirth")]);

        let asc = SortPlan::resolve("Age", &table).unwrap();
        assert_eq!(asc.instructions(), &[SortInstruction::descending("DateOfBirth")]);
    }

    #[test]
    fn test_multi_path_entry_shares_direction() {
        let table = author_table();
        let plan = SortPlan::resolve("name desc", &table).unwrap();
        assert_eq!(
            plan.instructions(),
            &[
                SortInstruction::descending("FirstName"),
                SortInstruction::descending("LastName"),
            ]
        );
    }

    #[test]
    fn test_inverted_multi_path_entry_flips_every_path() {
        let mut table = author_table();
        table
            .insert("Seniority", FieldMapping::new(["DateOfBirth", "Id"]).inverted())
            .unwrap();

        let plan = SortPlan::resolve("Seniority desc, Genre", &table).unwrap();
        assert_eq!(
            plan.instructions(),
            &[
                SortInstruction::ascending("DateOfBirth"),
                SortInstruction::ascending("Id"),
                SortInstruction::ascending("Genre"),
            ]
        );

        let plan = SortPlan::resolve("seniority", &table).unwrap();
        assert_eq!(
            plan.instructions(),
            &[
                SortInstruction::descending("DateOfBirth"),
                SortInstruction::descending("Id"),
            ]
        );
    }

    #[test]
    fn test_resolution_leaves_table_unchanged() {
        let table = author_table();
        let first = SortPlan::resolve("Age desc, Name", &table).unwrap();
        let second = SortPlan::resolve("Age desc, Name", &table).unwrap();
        assert_eq!(first, second);

        let age = table.get("Age").unwrap();
        assert!(age.invert_direction());
        assert_eq!(age.internal_paths(), &["DateOfBirth"]);
        assert_eq!(
            SortPlan::resolve("Age", &table).unwrap().instructions(),
            &[SortInstruction::descending("DateOfBirth")]
        );
    }

    #[test]
    fn test_precedence_and_apply_order() {
        let table = author_table();
        let plan = SortPlan::resolve("Name,Age desc", &table).unwrap();

        let precedence: Vec<_> = plan.internal_paths().collect();
        assert_eq!(precedence, vec!["FirstName", "LastName", "DateOfBirth"]);

        let applied: Vec<_> = plan
            .apply_order()
            .map(|i| i.internal_path.as_str())
            .collect();
        assert_eq!(applied, vec!["DateOfBirth", "LastName", "FirstName"]);
    }

    #[test]
    fn test_unknown_field_aborts_resolution() {
        let table = author_table();
        let err = SortPlan::resolve("Name, Shoe desc, Hat", &table).unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Unknown field: 'Shoe', 'Hat'");
    }

    #[test]
    fn test_empty_token_is_unknown() {
        let table = author_table();
        let err = SortPlan::resolve("Name,", &table).unwrap_err();
        assert!(matches!(err, Error::UnknownField(_)));
    }

    #[test]
    fn test_plan_display() {
        let table = author_table();
        let plan = SortPlan::resolve("Genre desc, Age", &table).unwrap();
        assert_eq!(plan.to_string(), "Genre desc, DateOfBirth desc");
        assert_eq!(plan.len(), 2);
    }
}
