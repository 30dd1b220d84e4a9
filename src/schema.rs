//! Frame metadata and target row descriptors.
//!
//! A [`FrameSchema`] describes the source side of a conversion: a stable
//! [`FrameKey`] plus an ordered set of uniquely named columns, each tagged
//! with a [`SemanticType`]. These are provided facts from the storage engine;
//! the conversion core never infers them.
//!
//! A [`RowSpec`] describes the target side: the ordered named fields of the
//! row type, each with the semantic type expected by its decoder, plus the
//! statically registered [`RowBuilder`]s that know how to construct the type
//! from a positional value array.

use crate::row::RowBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable identifier of a distributed columnar frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameKey(String);

impl FrameKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FrameKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semantic type of a column, fixed by the storage engine.
///
/// The name of each variant is the registry key used to select a column
/// reader (see [`ReaderRegistry`](crate::reader::ReaderRegistry)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    /// Categorical column: a level index plus a per-column level list.
    Enum,
    /// 128-bit identifier column.
    Uuid,
    /// UTF-8 string column.
    String,
    /// Integer column flagged as epoch-millisecond timestamps.
    Time,
    /// 64-bit signed integer column.
    Int,
    /// 64-bit float column.
    Real,
}

impl SemanticType {
    /// The registry name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            SemanticType::Enum => "enum",
            SemanticType::Uuid => "uuid",
            SemanticType::String => "string",
            SemanticType::Time => "time",
            SemanticType::Int => "int",
            SemanticType::Real => "real",
        }
    }

    /// Parse a registry name back into a semantic type.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "enum" => Some(SemanticType::Enum),
            "uuid" => Some(SemanticType::Uuid),
            "string" => Some(SemanticType::String),
            "time" => Some(SemanticType::Time),
            "int" => Some(SemanticType::Int),
            "real" => Some(SemanticType::Real),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Metadata for one source column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMeta {
    pub name: String,
    pub dtype: SemanticType,
    /// Level labels for `enum` columns; `None` otherwise.
    pub levels: Option<Vec<String>>,
}

impl ColumnMeta {
    pub fn new(name: impl Into<String>, dtype: SemanticType) -> Self {
        Self {
            name: name.into(),
            dtype,
            levels: None,
        }
    }

    #[must_use]
    pub fn with_levels(mut self, levels: Vec<String>) -> Self {
        self.levels = Some(levels);
        self
    }
}

/// Ordered, uniquely named column set of one frame.
///
/// Column name uniqueness is guaranteed by the storage engine; the schema is
/// immutable for the lifetime of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSchema {
    key: FrameKey,
    columns: Vec<ColumnMeta>,
}

impl FrameSchema {
    pub fn new(key: FrameKey, columns: Vec<ColumnMeta>) -> Self {
        Self { key, columns }
    }

    pub fn key(&self) -> &FrameKey {
        &self.key
    }

    pub fn columns(&self) -> &[ColumnMeta] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Position of the column with the given exact name.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

/// One named field of the target row type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub dtype: SemanticType,
}

/// Descriptor of a target row type: ordered named fields plus the builders
/// registered for it.
///
/// Builders are registered statically at setup; the candidate set used
/// during iteration is the subset whose arity equals the output field count,
/// discovered once per conversion instance.
///
/// # Example
///
/// ```ignore
/// use framecast::{RowSpec, SemanticType, TupleBuilder};
///
/// let spec: RowSpec<(i64, String)> = RowSpec::new()
///     .field("year", SemanticType::Int)
///     .field("origin", SemanticType::String)
///     .builder(TupleBuilder::default());
/// ```
pub struct RowSpec<T> {
    fields: Vec<FieldSpec>,
    builders: Vec<Arc<dyn RowBuilder<T>>>,
}

impl<T> RowSpec<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            builders: Vec::new(),
        }
    }

    /// Append a field with the semantic type its decoder expects.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, dtype: SemanticType) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            dtype,
        });
        self
    }

    /// Register a candidate builder.
    #[must_use]
    pub fn builder(mut self, builder: impl RowBuilder<T> + 'static) -> Self {
        self.builders.push(Arc::new(builder));
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// Semantic type of each field in declared order, used to select
    /// decoders (the column type resolver of the conversion).
    pub fn semantic_types(&self) -> Vec<SemanticType> {
        self.fields.iter().map(|f| f.dtype).collect()
    }

    /// Semantic type of the named field, if declared.
    pub fn dtype_of(&self, name: &str) -> Option<SemanticType> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.dtype)
    }

    pub(crate) fn builders(&self) -> &[Arc<dyn RowBuilder<T>>] {
        &self.builders
    }
}

impl<T> Default for RowSpec<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_type_names_round_trip() {
        for t in [
            SemanticType::Enum,
            SemanticType::Uuid,
            SemanticType::String,
            SemanticType::Time,
            SemanticType::Int,
            SemanticType::Real,
        ] {
            assert_eq!(SemanticType::parse(t.name()), Some(t));
        }
        assert_eq!(SemanticType::parse("decimal"), None);
    }

    #[test]
    fn position_lookup_is_exact() {
        let schema = FrameSchema::new(
            FrameKey::new("f"),
            vec![
                ColumnMeta::new("year", SemanticType::Int),
                ColumnMeta::new("Year", SemanticType::Real),
            ],
        );
        assert_eq!(schema.position_of("year"), Some(0));
        assert_eq!(schema.position_of("Year"), Some(1));
        assert_eq!(schema.position_of("YEAR"), None);
    }
}
