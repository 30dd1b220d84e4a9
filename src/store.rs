//! Boundary with the frame storage engine.
//!
//! The conversion core consumes storage through two small traits: a
//! [`FrameStore`] that resolves frame metadata and opens partitions, and a
//! [`PartitionChunk`] giving positional access to one partition's cells.
//! Both are provided by the surrounding system; the in-memory implementation
//! under [`crate::testing`] exists for tests and demos.
//!
//! Opening a partition may allocate partition-local resources (decompressed
//! or mapped storage). Release is scoped: a chunk is dropped when the owning
//! iterator is exhausted or abandoned, on every exit path.

use crate::error::ConvertResult;
use crate::schema::{FrameKey, FrameSchema};

/// Positional read access to one opened partition.
///
/// The typed accessors return `None` for absent cells and for cells whose
/// stored representation does not match the requested view; readers turn
/// that into [`RawValue::Missing`](crate::value::RawValue::Missing) rather
/// than failing the partition.
pub trait PartitionChunk: Send {
    /// Total number of rows in this partition. Fixed for the lifetime of
    /// the chunk.
    fn row_count(&self) -> usize;

    /// Integer payload at (`column`, `row`); also serves time columns
    /// (epoch milliseconds) and the level index of categorical columns.
    fn get_int(&self, column: usize, row: usize) -> Option<i64>;

    /// Float payload at (`column`, `row`).
    fn get_real(&self, column: usize, row: usize) -> Option<f64>;

    /// String payload at (`column`, `row`).
    fn get_str(&self, column: usize, row: usize) -> Option<String>;

    /// 128-bit identifier payload at (`column`, `row`).
    fn get_uuid(&self, column: usize, row: usize) -> Option<u128>;
}

/// Handle to the distributed frame storage engine.
pub trait FrameStore: Send + Sync {
    /// Metadata for the given frame.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NotFound`](crate::error::ConvertError::NotFound) if
    /// the key is unknown.
    fn schema(&self, key: &FrameKey) -> ConvertResult<FrameSchema>;

    /// Number of partitions the frame is divided into.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NotFound`](crate::error::ConvertError::NotFound) if
    /// the key is unknown.
    fn partition_count(&self, key: &FrameKey) -> ConvertResult<usize>;

    /// Open a read context for one partition. Each call returns a fresh,
    /// independent chunk; re-opening after an abandoned attempt carries no
    /// state over.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NotFound`](crate::error::ConvertError::NotFound) if
    /// the key or the partition index is invalid.
    fn open_partition(
        &self,
        key: &FrameKey,
        partition: usize,
    ) -> ConvertResult<Box<dyn PartitionChunk>>;
}
