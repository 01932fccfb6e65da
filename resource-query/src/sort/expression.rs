//! Order-by expression parsing

use super::OrderDirection;
use crate::fields::split_field_list;

const DESCENDING_SUFFIX: &str = " desc";

/// One parsed order-by token: a public field name and a direction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    /// Public field name as written by the client
    pub field: String,
    /// Requested direction
    pub direction: OrderDirection,
}

impl SortClause {
    /// Parse a single token
    ///
    /// The token is trimmed. It is descending only when it ends with the
    /// exact, case-sensitive suffix `" desc"`. The field name is everything
    /// before the first space, so `"Name asc"` is an ascending sort on
    /// `Name`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use resource_query::sort::{OrderDirection, SortClause};
    ///
    /// let clause = SortClause::parse("  Age desc ");
    /// assert_eq!(clause.field, "Age");
    /// assert_eq!(clause.direction, OrderDirection::Descending);
    ///
    /// // The suffix check is case-sensitive
    /// assert_eq!(SortClause::parse("Age DESC").direction, OrderDirection::Ascending);
    /// ```
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        let direction = if token.ends_with(DESCENDING_SUFFIX) {
            OrderDirection::Descending
        } else {
            OrderDirection::Ascending
        };
        Self {
            field: bare_field_name(token).to_string(),
            direction,
        }
    }
}

/// Parse a comma-separated order-by expression
///
/// A blank expression yields no clauses.
pub fn parse_order_by(order_by: &str) -> Vec<SortClause> {
    split_field_list(Some(order_by))
        .map(SortClause::parse)
        .collect()
}

/// Bare public field name of an order-by or field-list token
pub(crate) fn bare_field_name(token: &str) -> &str {
    let token = token.trim();
    token.split_once(' ').map_or(token, |(name, _)| name)
}
