//! Typed column readers and the reader registry.
//!
//! A [`ColumnReader`] is bound to one source column index and decodes one
//! cell per call according to the column's semantic type. Readers are
//! selected once per output field at conversion-instance construction time,
//! through an explicit [`ReaderRegistry`] (semantic type name → factory)
//! passed in by the caller; there is no process-wide registration.

use crate::error::{ConvertError, ConvertResult};
use crate::schema::ColumnMeta;
use crate::store::PartitionChunk;
use crate::value::RawValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Decodes one cell of a bound column per call.
pub trait ColumnReader: Send + Sync {
    /// Raw value at the given row of the bound column. Never fails: cells
    /// that cannot be decoded come back as [`RawValue::Missing`].
    fn read(&self, chunk: &dyn PartitionChunk, row: usize) -> RawValue;

    /// The bound source column index.
    fn column(&self) -> usize;
}

/// Builds a reader bound to `column`, given that column's metadata.
pub type ReaderFactory =
    Arc<dyn Fn(&ColumnMeta, usize) -> Arc<dyn ColumnReader> + Send + Sync>;

struct IntReader {
    column: usize,
}

impl ColumnReader for IntReader {
    fn read(&self, chunk: &dyn PartitionChunk, row: usize) -> RawValue {
        match chunk.get_int(self.column, row) {
            Some(v) => RawValue::Int(v),
            None => RawValue::Missing,
        }
    }

    fn column(&self) -> usize {
        self.column
    }
}

struct RealReader {
    column: usize,
}

impl ColumnReader for RealReader {
    fn read(&self, chunk: &dyn PartitionChunk, row: usize) -> RawValue {
        match chunk.get_real(self.column, row) {
            Some(v) => RawValue::Real(v),
            None => RawValue::Missing,
        }
    }

    fn column(&self) -> usize {
        self.column
    }
}

struct StrReader {
    column: usize,
}

impl ColumnReader for StrReader {
    fn read(&self, chunk: &dyn PartitionChunk, row: usize) -> RawValue {
        match chunk.get_str(self.column, row) {
            Some(v) => RawValue::Str(v),
            None => RawValue::Missing,
        }
    }

    fn column(&self) -> usize {
        self.column
    }
}

struct TimeReader {
    column: usize,
}

impl ColumnReader for TimeReader {
    fn read(&self, chunk: &dyn PartitionChunk, row: usize) -> RawValue {
        match chunk.get_int(self.column, row) {
            Some(v) => RawValue::Time(v),
            None => RawValue::Missing,
        }
    }

    fn column(&self) -> usize {
        self.column
    }
}

struct UuidReader {
    column: usize,
}

impl ColumnReader for UuidReader {
    fn read(&self, chunk: &dyn PartitionChunk, row: usize) -> RawValue {
        match chunk.get_uuid(self.column, row) {
            Some(v) => RawValue::Uuid(v),
            None => RawValue::Missing,
        }
    }

    fn column(&self) -> usize {
        self.column
    }
}

/// Categorical reader: decodes the stored level index through the column's
/// level list. An index outside the level list is a per-cell decode failure.
struct EnumReader {
    column: usize,
    levels: Vec<String>,
}

impl ColumnReader for EnumReader {
    fn read(&self, chunk: &dyn PartitionChunk, row: usize) -> RawValue {
        let idx = match chunk.get_int(self.column, row) {
            Some(v) if v >= 0 => v as usize,
            _ => return RawValue::Missing,
        };
        match self.levels.get(idx) {
            Some(label) => RawValue::Str(label.clone()),
            None => RawValue::Missing,
        }
    }

    fn column(&self) -> usize {
        self.column
    }
}

/// Registry mapping semantic type names to reader factories.
///
/// [`ReaderRegistry::new`] comes with the built-in readers for the six
/// storage types registered; [`ReaderRegistry::empty`] starts blank for
/// callers that want full control.
pub struct ReaderRegistry {
    factories: HashMap<String, ReaderFactory>,
}

impl ReaderRegistry {
    /// Registry with the built-in readers registered.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("int", |_, column| {
            Arc::new(IntReader { column }) as Arc<dyn ColumnReader>
        });
        registry.register("real", |_, column| {
            Arc::new(RealReader { column }) as Arc<dyn ColumnReader>
        });
        registry.register("string", |_, column| {
            Arc::new(StrReader { column }) as Arc<dyn ColumnReader>
        });
        registry.register("time", |_, column| {
            Arc::new(TimeReader { column }) as Arc<dyn ColumnReader>
        });
        registry.register("uuid", |_, column| {
            Arc::new(UuidReader { column }) as Arc<dyn ColumnReader>
        });
        registry.register("enum", |meta, column| {
            Arc::new(EnumReader {
                column,
                levels: meta.levels.clone().unwrap_or_default(),
            }) as Arc<dyn ColumnReader>
        });
        registry
    }

    /// Registry with no factories registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register (or replace) the factory for a semantic type name.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&ColumnMeta, usize) -> Arc<dyn ColumnReader> + Send + Sync + 'static,
    ) {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    /// Build a reader for `name`, bound to `column` with its metadata.
    ///
    /// # Errors
    ///
    /// [`ConvertError::UnregisteredType`] when no factory is registered for
    /// `name`.
    pub fn reader_for(
        &self,
        name: &str,
        meta: &ColumnMeta,
        column: usize,
    ) -> ConvertResult<Arc<dyn ColumnReader>> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory(meta, column)),
            None => Err(ConvertError::UnregisteredType {
                name: name.to_string(),
            }),
        }
    }
}

impl Default for ReaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SemanticType;

    struct OneCell {
        int: Option<i64>,
        string: Option<String>,
    }

    impl PartitionChunk for OneCell {
        fn row_count(&self) -> usize {
            1
        }
        fn get_int(&self, _column: usize, _row: usize) -> Option<i64> {
            self.int
        }
        fn get_real(&self, _column: usize, _row: usize) -> Option<f64> {
            None
        }
        fn get_str(&self, _column: usize, _row: usize) -> Option<String> {
            self.string.clone()
        }
        fn get_uuid(&self, _column: usize, _row: usize) -> Option<u128> {
            None
        }
    }

    #[test]
    fn enum_reader_resolves_levels() {
        let registry = ReaderRegistry::new();
        let meta = ColumnMeta::new("origin", SemanticType::Enum)
            .with_levels(vec!["ORD".into(), "SFO".into()]);
        let reader = registry.reader_for("enum", &meta, 0).unwrap();

        let chunk = OneCell {
            int: Some(1),
            string: None,
        };
        assert_eq!(reader.read(&chunk, 0), RawValue::Str("SFO".into()));

        let out_of_range = OneCell {
            int: Some(9),
            string: None,
        };
        assert_eq!(reader.read(&out_of_range, 0), RawValue::Missing);
    }

    #[test]
    fn unknown_type_is_an_error() {
        let registry = ReaderRegistry::new();
        let meta = ColumnMeta::new("x", SemanticType::Int);
        let err = registry
            .reader_for("decimal", &meta, 0)
            .err()
            .expect("unknown type must be rejected");
        assert!(err.to_string().contains("decimal"));
    }

    #[test]
    fn time_reader_tags_epoch_millis() {
        let registry = ReaderRegistry::new();
        let meta = ColumnMeta::new("dep_time", SemanticType::Time);
        let reader = registry.reader_for("time", &meta, 0).unwrap();
        let chunk = OneCell {
            int: Some(1_700_000_000_000),
            string: None,
        };
        assert_eq!(reader.read(&chunk, 0), RawValue::Time(1_700_000_000_000));
    }
}
