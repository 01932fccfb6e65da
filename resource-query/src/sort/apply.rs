//! Ordering of in-memory collections by a sort plan

use std::cmp::Ordering;

use super::{OrderDirection, SortInstruction, SortPlan};
use crate::fields::{Accessor, FieldSource};

/// Order `items` by every instruction of `plan` at once
///
/// Uses one stable sort whose comparator walks the plan in precedence
/// order, so items that tie on every key keep their input order. An empty
/// plan leaves `items` untouched. A path that `T` does not expose reads as
/// null for every item and so never reorders anything.
///
/// # Example
///
/// ```rust
/// use once_cell::sync::Lazy;
/// use resource_query::fields::{FieldAccessors, FieldSource};
/// use resource_query::sort::{apply_sort, SortInstruction, SortPlan};
///
/// struct Row(i64, &'static str);
///
/// static ROW_FIELDS: Lazy<FieldAccessors<Row>> = Lazy::new(|| {
///     FieldAccessors::new()
///         .with("Rank", |r: &Row| r.0.into())
///         .with("Label", |r: &Row| r.1.into())
/// });
///
/// impl FieldSource for Row {
///     fn field_accessors() -> &'static FieldAccessors<Self> {
///         &ROW_FIELDS
///     }
/// }
///
/// let mut rows = vec![Row(2, "b"), Row(1, "z"), Row(2, "a")];
/// let plan = SortPlan::from_instructions(vec![
///     SortInstruction::descending("Rank"),
///     SortInstruction::ascending("Label"),
/// ]);
/// apply_sort(&mut rows, &plan);
///
/// let labels: Vec<_> = rows.iter().map(|r| r.1).collect();
/// assert_eq!(labels, vec!["a", "b", "z"]);
/// ```
pub fn apply_sort<T: FieldSource>(items: &mut [T], plan: &SortPlan) {
    if plan.is_empty() {
        return;
    }

    let keys: Vec<_> = plan
        .instructions()
        .iter()
        .map(|instruction| (accessor_for::<T>(instruction), instruction.direction))
        .collect();

    items.sort_by(|a, b| {
        keys.iter()
            .map(|&(accessor, direction)| compare_by(a, b, accessor, direction))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
}

/// Order `items` with one stable single-key pass per instruction
///
/// Passes run in [`SortPlan::apply_order`], least significant key first,
/// and give the same result as [`apply_sort`]. Suited to stores that can
/// only sort by one key at a time.
pub fn apply_sort_passes<T: FieldSource>(items: &mut [T], plan: &SortPlan) {
    for instruction in plan.apply_order() {
        let accessor = accessor_for::<T>(instruction);
        items.sort_by(|a, b| compare_by(a, b, accessor, instruction.direction));
    }
}

fn accessor_for<T: FieldSource>(instruction: &SortInstruction) -> Option<Accessor<T>> {
    let accessor = T::field_accessors()
        .get(&instruction.internal_path)
        .map(|(_, accessor)| accessor);
    if accessor.is_none() {
        tracing::warn!(
            path = %instruction.internal_path,
            "Sort path is not a field of {}; ignoring",
            std::any::type_name::<T>()
        );
    }
    accessor
}

fn compare_by<T>(a: &T, b: &T, accessor: Option<Accessor<T>>, direction: OrderDirection) -> Ordering {
    let Some(read) = accessor else {
        return Ordering::Equal;
    };
    let ordering = read(a).sort_cmp(&read(b));
    if direction.is_descending() {
        ordering.reverse()
    } else {
        ordering
    }
}
