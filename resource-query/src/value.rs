//! Dynamically typed field values
//!
//! [`FieldValue`] is what an accessor reads out of an entity or view. The
//! ordering applier compares them and the field shaper serializes them.
//!
//! # Example
//!
//! ```rust
//! use resource_query::value::FieldValue;
//!
//! let name: FieldValue = "Ada".into();
//! let age: FieldValue = 36_i64.into();
//! let missing: FieldValue = Option::<String>::None.into();
//!
//! assert_eq!(name, FieldValue::Text("Ada".to_string()));
//! assert_eq!(age, FieldValue::Int(36));
//! assert!(missing.is_null());
//! ```

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A value read from a named field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit integer value
    Int(i64),
    /// 64-bit floating point value
    Float(f64),
    /// String value
    Text(String),
    /// UUID value
    Uuid(Uuid),
    /// Calendar date
    Date(NaiveDate),
    /// UTC timestamp
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Check whether the value is [`FieldValue::Null`]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Compare two values for sorting
    ///
    /// Nulls sort first. Integers and floats compare numerically with each
    /// other. Values of unrelated kinds fall back to a fixed kind order so
    /// the result is always a total order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    /// use resource_query::value::FieldValue;
    ///
    /// assert_eq!(FieldValue::Null.sort_cmp(&FieldValue::Int(1)), Ordering::Less);
    /// assert_eq!(FieldValue::Int(2).sort_cmp(&FieldValue::Float(1.5)), Ordering::Greater);
    /// ```
    #[must_use]
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Uuid(a), Self::Uuid(b)) => a.cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (a, b) => a.kind_rank().cmp(&b.kind_rank()),
        }
    }

    const fn kind_rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::Uuid(_) => 4,
            Self::Date(_) => 5,
            Self::Timestamp(_) => 6,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Uuid> for FieldValue {
    fn from(id: Uuid) -> Self {
        Self::Uuid(id)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::Timestamp(ts)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
