//! Cursor over one opened partition.
//!
//! A [`PartitionCursor`] binds an opened [`PartitionChunk`] to a mutable row
//! cursor and the partition's fixed total row count. It is exclusively owned
//! by one iterator; dropping it releases the chunk's partition-local
//! resources on every exit path, including early abandonment.

use crate::reader::ColumnReader;
use crate::store::PartitionChunk;
use crate::value::RawValue;

/// Row cursor over one partition's chunk.
pub struct PartitionCursor {
    chunk: Box<dyn PartitionChunk>,
    row: usize,
    rows: usize,
}

impl PartitionCursor {
    pub fn new(chunk: Box<dyn PartitionChunk>) -> Self {
        let rows = chunk.row_count();
        Self {
            chunk,
            row: 0,
            rows,
        }
    }

    /// True while the cursor has not reached the partition's total row
    /// count.
    pub fn has_more(&self) -> bool {
        self.row < self.rows
    }

    /// Move the cursor forward by one row. Called exactly once per row
    /// consumed.
    pub fn advance(&mut self) {
        self.row += 1;
    }

    /// Current row position.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Fixed total row count of the partition.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Raw value at the cursor's current row, decoded through the given
    /// bound column reader.
    pub fn read_column(&self, reader: &dyn ColumnReader) -> RawValue {
        reader.read(self.chunk.as_ref(), self.row)
    }

    pub fn chunk(&self) -> &dyn PartitionChunk {
        self.chunk.as_ref()
    }
}
