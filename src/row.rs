//! Row construction from positional value arrays.
//!
//! A [`RowBuilder`] is one way of building the target type from a
//! fixed-length `&[RawValue]`. Builders are registered explicitly on a
//! [`RowSpec`](crate::schema::RowSpec); there is no runtime reflection. An
//! attempt either yields the row or a [`BuildError`] carrying the rejection
//! reason; it never panics across the boundary, because malformed rows are
//! expected in real data and must be skippable.

use crate::value::RawValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Why one construction attempt rejected its value array.
///
/// Rejections are counted by the iterator, not propagated; the reason is
/// kept for diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildError {
    /// Positional index of the offending field, when known.
    pub field: Option<usize>,
    /// Human-readable rejection reason.
    pub message: String,
}

impl BuildError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Attach the positional field index the rejection applies to.
    #[must_use]
    pub fn at(mut self, field: usize) -> Self {
        self.field = Some(field);
        self
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(i) => write!(f, "[field {i}] {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for BuildError {}

/// Outcome of one construction attempt.
pub type BuildResult<T> = Result<T, BuildError>;

/// One candidate constructor of the target type.
///
/// Implementations must be total: any failure (type mismatch, illegal
/// value) comes back as `Err`, never as a panic.
pub trait RowBuilder<T>: Send + Sync {
    /// Number of positional values this builder consumes.
    fn arity(&self) -> usize;

    /// Attempt to construct the target from `values`. The slice length
    /// equals [`arity`](RowBuilder::arity) when called by the iterator.
    fn build(&self, values: &[RawValue]) -> BuildResult<T>;
}

/// Conversion of a single [`RawValue`] into a typed field.
///
/// `Option<T>` absorbs [`RawValue::Missing`] instead of rejecting the row;
/// every other implementation rejects missing cells.
pub trait FromRaw: Sized {
    fn from_raw(value: &RawValue) -> BuildResult<Self>;
}

fn reject<T>(expected: &str, got: &RawValue) -> BuildResult<T> {
    Err(BuildError::new(format!("expected {expected}, got {}", got.kind())))
}

impl FromRaw for i64 {
    fn from_raw(value: &RawValue) -> BuildResult<Self> {
        match value.as_int() {
            Some(v) => Ok(v),
            None => reject("int", value),
        }
    }
}

impl FromRaw for f64 {
    fn from_raw(value: &RawValue) -> BuildResult<Self> {
        match value.as_real() {
            Some(v) => Ok(v),
            None => reject("real", value),
        }
    }
}

impl FromRaw for String {
    fn from_raw(value: &RawValue) -> BuildResult<Self> {
        match value.as_str() {
            Some(v) => Ok(v.to_string()),
            None => reject("string", value),
        }
    }
}

impl FromRaw for bool {
    fn from_raw(value: &RawValue) -> BuildResult<Self> {
        match value.as_bool() {
            Some(v) => Ok(v),
            None => reject("0/1 int", value),
        }
    }
}

impl FromRaw for u128 {
    fn from_raw(value: &RawValue) -> BuildResult<Self> {
        match value.as_uuid() {
            Some(v) => Ok(v),
            None => reject("uuid", value),
        }
    }
}

impl<T: FromRaw> FromRaw for Option<T> {
    fn from_raw(value: &RawValue) -> BuildResult<Self> {
        if value.is_missing() {
            Ok(None)
        } else {
            T::from_raw(value).map(Some)
        }
    }
}

/// Builder for tuple row types whose elements implement [`FromRaw`].
///
/// Implemented for tuples of arity 1 through 8, so single-column frames
/// convert straight to `(f64,)`-style rows and multi-column frames to wider
/// tuples without a hand-written builder.
pub struct TupleBuilder<T>(PhantomData<T>);

impl<T> TupleBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TupleBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! tuple_builders {
    ($($len:expr => ($($t:ident $idx:tt),+));+ $(;)?) => {
        $(
            impl<$($t: FromRaw + Send + Sync),+> RowBuilder<($($t,)+)> for TupleBuilder<($($t,)+)> {
                fn arity(&self) -> usize {
                    $len
                }

                fn build(&self, values: &[RawValue]) -> BuildResult<($($t,)+)> {
                    if values.len() != $len {
                        return Err(BuildError::new(format!(
                            "expected {} values, got {}",
                            $len,
                            values.len()
                        )));
                    }
                    Ok(($(
                        $t::from_raw(&values[$idx]).map_err(|e| e.at($idx))?,
                    )+))
                }
            }
        )+
    };
}

tuple_builders! {
    1 => (A 0);
    2 => (A 0, B 1);
    3 => (A 0, B 1, C 2);
    4 => (A 0, B 1, C 2, D 3);
    5 => (A 0, B 1, C 2, D 3, E 4);
    6 => (A 0, B 1, C 2, D 3, E 4, F 5);
    7 => (A 0, B 1, C 2, D 3, E 4, F 5, G 6);
    8 => (A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7)
}

/// Closure-backed builder for struct row types.
///
/// ```ignore
/// use framecast::{FnBuilder, BuildError, RawValue};
///
/// struct Flight { year: i64, origin: String }
///
/// let builder = FnBuilder::new(2, |values: &[RawValue]| {
///     Ok(Flight {
///         year: values[0].as_int().ok_or_else(|| BuildError::new("year").at(0))?,
///         origin: values[1].as_str().ok_or_else(|| BuildError::new("origin").at(1))?.to_string(),
///     })
/// });
/// ```
pub struct FnBuilder<T, F> {
    arity: usize,
    f: F,
    _t: PhantomData<fn() -> T>,
}

impl<T, F> FnBuilder<T, F>
where
    F: Fn(&[RawValue]) -> BuildResult<T> + Send + Sync,
{
    #[must_use]
    pub fn new(arity: usize, f: F) -> Self {
        Self {
            arity,
            f,
            _t: PhantomData,
        }
    }
}

impl<T, F> RowBuilder<T> for FnBuilder<T, F>
where
    F: Fn(&[RawValue]) -> BuildResult<T> + Send + Sync,
{
    fn arity(&self) -> usize {
        self.arity
    }

    fn build(&self, values: &[RawValue]) -> BuildResult<T> {
        if values.len() != self.arity {
            return Err(BuildError::new(format!(
                "expected {} values, got {}",
                self.arity,
                values.len()
            )));
        }
        (self.f)(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuple_builder_constructs_in_order() {
        let builder = TupleBuilder::<(i64, String, f64)>::new();
        assert_eq!(builder.arity(), 3);
        let values = vec![
            RawValue::Int(1987),
            RawValue::Str("ORD".into()),
            RawValue::Real(733.0),
        ];
        assert_eq!(
            builder.build(&values).unwrap(),
            (1987, "ORD".to_string(), 733.0)
        );
    }

    #[test]
    fn rejection_names_the_field() {
        let builder = TupleBuilder::<(i64, String)>::new();
        let err = builder
            .build(&[RawValue::Int(1), RawValue::Missing])
            .unwrap_err();
        assert_eq!(err.field, Some(1));
    }

    #[test]
    fn option_fields_absorb_missing() {
        let builder = TupleBuilder::<(i64, Option<f64>)>::new();
        let row = builder
            .build(&[RawValue::Int(2), RawValue::Missing])
            .unwrap();
        assert_eq!(row, (2, None));

        let row = builder
            .build(&[RawValue::Int(2), RawValue::Real(0.5)])
            .unwrap();
        assert_eq!(row, (2, Some(0.5)));
    }

    #[test]
    fn wrong_width_is_rejected() {
        let builder = TupleBuilder::<(i64,)>::new();
        assert!(builder.build(&[]).is_err());
        assert!(builder
            .build(&[RawValue::Int(1), RawValue::Int(2)])
            .is_err());
    }

    #[test]
    fn fn_builder_checks_width_before_calling() {
        let builder = FnBuilder::new(2, |values: &[RawValue]| {
            i64::from_raw(&values[0]).map_err(|e| e.at(0))
        });
        assert!(builder.build(&[RawValue::Int(1)]).is_err());
        assert_eq!(
            builder.build(&[RawValue::Int(1), RawValue::Missing]).unwrap(),
            1
        );
    }

    #[test]
    fn bool_from_int_column() {
        assert_eq!(bool::from_raw(&RawValue::Int(1)).unwrap(), true);
        assert!(bool::from_raw(&RawValue::Int(5)).is_err());
    }
}
