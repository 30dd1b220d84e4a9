//! Loosely-typed cell values pulled out of a partition.
//!
//! A [`RawValue`] is what a column reader produces for one cell: either a
//! decoded value or [`RawValue::Missing`] when the cell is absent or could
//! not be coerced. One `Vec<RawValue>` is produced per row pulled and handed
//! to the row builders; it is discarded after the construction attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single decoded cell.
///
/// Coercion problems are represented as [`RawValue::Missing`], never as a
/// panic or error: a malformed cell must not abort the partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    /// Absent cell, or a cell the reader could not decode.
    Missing,
    /// 64-bit signed integer.
    Int(i64),
    /// 64-bit float.
    Real(f64),
    /// UTF-8 string; categorical cells decode to their level label.
    Str(String),
    /// Epoch milliseconds.
    Time(i64),
    /// 128-bit identifier.
    Uuid(u128),
}

impl RawValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawValue::Missing)
    }

    /// Integer view. `Time` reads as its epoch-millisecond payload.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RawValue::Int(v) | RawValue::Time(v) => Some(*v),
            _ => None,
        }
    }

    /// Float view. Integers widen losslessly enough for row construction.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            RawValue::Real(v) => Some(*v),
            RawValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean view of a 0/1 integer column.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Int(0) => Some(false),
            RawValue::Int(1) => Some(true),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<i64> {
        match self {
            RawValue::Time(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<u128> {
        match self {
            RawValue::Uuid(v) => Some(*v),
            _ => None,
        }
    }

    /// Short name of the variant, used in rejection reasons.
    pub fn kind(&self) -> &'static str {
        match self {
            RawValue::Missing => "missing",
            RawValue::Int(_) => "int",
            RawValue::Real(_) => "real",
            RawValue::Str(_) => "string",
            RawValue::Time(_) => "time",
            RawValue::Uuid(_) => "uuid",
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Missing => write!(f, "<missing>"),
            RawValue::Int(v) => write!(f, "{v}"),
            RawValue::Real(v) => write!(f, "{v}"),
            RawValue::Str(s) => write!(f, "{s}"),
            RawValue::Time(v) => write!(f, "{v}ms"),
            RawValue::Uuid(v) => write!(f, "{v:032x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_views() {
        assert_eq!(RawValue::Int(7).as_int(), Some(7));
        assert_eq!(RawValue::Time(1_000).as_int(), Some(1_000));
        assert_eq!(RawValue::Real(7.0).as_int(), None);
    }

    #[test]
    fn real_widens_int() {
        assert_eq!(RawValue::Int(3).as_real(), Some(3.0));
        assert_eq!(RawValue::Real(2.5).as_real(), Some(2.5));
        assert_eq!(RawValue::Str("2.5".into()).as_real(), None);
    }

    #[test]
    fn bool_only_from_zero_or_one() {
        assert_eq!(RawValue::Int(0).as_bool(), Some(false));
        assert_eq!(RawValue::Int(1).as_bool(), Some(true));
        assert_eq!(RawValue::Int(2).as_bool(), None);
        assert_eq!(RawValue::Missing.as_bool(), None);
    }

    #[test]
    fn missing_is_inert() {
        let v = RawValue::Missing;
        assert!(v.is_missing());
        assert_eq!(v.as_int(), None);
        assert_eq!(v.as_real(), None);
        assert_eq!(v.as_str(), None);
        assert_eq!(v.as_uuid(), None);
    }
}
