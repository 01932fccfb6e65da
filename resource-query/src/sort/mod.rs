//! Sort expression parsing, resolution and application
//!
//! An order-by string such as `"Age desc, Name"` goes through three steps:
//!
//! - [`parse_order_by`] splits it into [`SortClause`]s of public names
//! - [`SortPlan::resolve`] maps those names through a
//!   [`MappingTable`](crate::mapping::MappingTable) into internal
//!   [`SortInstruction`]s, flipping inverted entries
//! - [`apply_sort`] orders a collection by the plan
//!
//! # Example
//!
//! ```rust
//! use resource_query::mapping::{FieldMapping, MappingTable};
//! use resource_query::sort::{OrderDirection, SortPlan};
//!
//! let mut table = MappingTable::new();
//! table.insert("Name", FieldMapping::new(["FirstName", "LastName"]))?;
//! table.insert("Age", FieldMapping::new(["DateOfBirth"]).inverted())?;
//!
//! let plan = SortPlan::resolve("Age desc, Name", &table)?;
//! let paths: Vec<_> = plan.internal_paths().collect();
//! assert_eq!(paths, vec!["DateOfBirth", "FirstName", "LastName"]);
//! assert_eq!(plan.instructions()[0].direction, OrderDirection::Ascending);
//! # Ok::<(), resource_query::Error>(())
//! ```

mod apply;
mod expression;
mod plan;

use std::fmt;

pub use apply::{apply_sort, apply_sort_passes};
pub(crate) use expression::bare_field_name;
pub use expression::{parse_order_by, SortClause};
pub use plan::{SortInstruction, SortPlan};

/// Direction for ordering results
///
/// # Example
///
/// ```rust
/// use resource_query::sort::OrderDirection;
///
/// assert_eq!(format!("{}", OrderDirection::Ascending), "asc");
/// assert_eq!(OrderDirection::Ascending.reversed(), OrderDirection::Descending);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderDirection {
    /// Sort in ascending order (A-Z, 0-9)
    #[default]
    Ascending,
    /// Sort in descending order (Z-A, 9-0)
    Descending,
}

impl OrderDirection {
    /// The opposite direction
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Whether this is [`OrderDirection::Descending`]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }

    /// Flip the direction when `invert` is set
    #[must_use]
    pub const fn inverted_if(self, invert: bool) -> Self {
        if invert {
            self.reversed()
        } else {
            self
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_direction_display() {
        assert_eq!(format!("{}", OrderDirection::Ascending), "asc");
        assert_eq!(format!("{}", OrderDirection::Descending), "desc");
    }

    #[test]
    fn test_order_direction_default() {
        assert_eq!(OrderDirection::default(), OrderDirection::Ascending);
    }

    #[test]
    fn test_inverted_if() {
        assert_eq!(
            OrderDirection::Ascending.inverted_if(true),
            OrderDirection::Descending
        );
        assert_eq!(
            OrderDirection::Descending.inverted_if(true),
            OrderDirection::Ascending
        );
        assert_eq!(
            OrderDirection::Descending.inverted_if(false),
            OrderDirection::Descending
        );
        assert!(OrderDirection::Descending.is_descending());
    }
}
