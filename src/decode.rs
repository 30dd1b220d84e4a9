//! Per-row decoding through the bound reader set.

use crate::partition::PartitionCursor;
use crate::reader::ColumnReader;
use crate::value::RawValue;
use std::sync::Arc;

/// Decodes one row at a time into a positional value array.
///
/// Holds one reader per output field, each already bound to its resolved
/// source column index and expected semantic type. A single cell that fails
/// to coerce becomes [`RawValue::Missing`] in the array, never an error,
/// because one malformed cell must not abort the partition.
pub struct RowDecoder {
    readers: Vec<Arc<dyn ColumnReader>>,
}

impl RowDecoder {
    pub fn new(readers: Vec<Arc<dyn ColumnReader>>) -> Self {
        Self { readers }
    }

    /// Number of output fields decoded per row.
    pub fn width(&self) -> usize {
        self.readers.len()
    }

    /// Pull one raw value per mapped column in output-field order, then
    /// advance the cursor exactly once.
    pub fn decode_row(&self, cursor: &mut PartitionCursor) -> Vec<RawValue> {
        let values = self
            .readers
            .iter()
            .map(|reader| cursor.read_column(reader.as_ref()))
            .collect();
        cursor.advance();
        values
    }
}
