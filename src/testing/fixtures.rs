//! In-memory frame store and sample frames.
//!
//! [`MemFrameStore`] is a complete [`FrameStore`] over heap-resident
//! columns, partitioned into contiguous row ranges. Every chunk it opens
//! carries a release marker, so tests can observe that abandoning an
//! iterator early still releases partition resources.

use crate::error::{ConvertError, ConvertResult};
use crate::schema::{FrameKey, FrameSchema};
use crate::store::{FrameStore, PartitionChunk};
use std::collections::HashMap;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One heap-resident column. `Enum` holds level indices; the level labels
/// live in the column's [`ColumnMeta`].
#[derive(Debug, Clone)]
pub enum MemColumn {
    Int(Vec<Option<i64>>),
    Real(Vec<Option<f64>>),
    Str(Vec<Option<String>>),
    Time(Vec<Option<i64>>),
    Uuid(Vec<Option<u128>>),
    Enum(Vec<Option<i64>>),
}

impl MemColumn {
    pub fn len(&self) -> usize {
        match self {
            MemColumn::Int(v) | MemColumn::Time(v) | MemColumn::Enum(v) => v.len(),
            MemColumn::Real(v) => v.len(),
            MemColumn::Str(v) => v.len(),
            MemColumn::Uuid(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An in-memory frame: schema, column data, and partition boundaries.
#[derive(Debug, Clone)]
pub struct MemFrame {
    schema: FrameSchema,
    columns: Arc<Vec<MemColumn>>,
    bounds: Vec<Range<usize>>,
}

impl MemFrame {
    pub(crate) fn new(
        schema: FrameSchema,
        columns: Vec<MemColumn>,
        bounds: Vec<Range<usize>>,
    ) -> Self {
        Self {
            schema,
            columns: Arc::new(columns),
            bounds,
        }
    }

    pub fn key(&self) -> &FrameKey {
        self.schema.key()
    }

    pub fn schema(&self) -> &FrameSchema {
        &self.schema
    }

    pub fn partition_count(&self) -> usize {
        self.bounds.len()
    }
}

struct MemChunk {
    columns: Arc<Vec<MemColumn>>,
    start: usize,
    rows: usize,
    released: Arc<AtomicUsize>,
}

impl PartitionChunk for MemChunk {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn get_int(&self, column: usize, row: usize) -> Option<i64> {
        match self.columns.get(column)? {
            MemColumn::Int(v) | MemColumn::Time(v) | MemColumn::Enum(v) => {
                v.get(self.start + row).copied().flatten()
            }
            _ => None,
        }
    }

    fn get_real(&self, column: usize, row: usize) -> Option<f64> {
        match self.columns.get(column)? {
            MemColumn::Real(v) => v.get(self.start + row).copied().flatten(),
            _ => None,
        }
    }

    fn get_str(&self, column: usize, row: usize) -> Option<String> {
        match self.columns.get(column)? {
            MemColumn::Str(v) => v.get(self.start + row).cloned().flatten(),
            _ => None,
        }
    }

    fn get_uuid(&self, column: usize, row: usize) -> Option<u128> {
        match self.columns.get(column)? {
            MemColumn::Uuid(v) => v.get(self.start + row).copied().flatten(),
            _ => None,
        }
    }
}

impl Drop for MemChunk {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory [`FrameStore`] with open/release accounting.
#[derive(Default)]
pub struct MemFrameStore {
    frames: Mutex<HashMap<FrameKey, MemFrame>>,
    opened: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl MemFrameStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a frame under its key, replacing any previous one.
    pub fn insert(&self, frame: MemFrame) {
        self.frames
            .lock()
            .unwrap()
            .insert(frame.key().clone(), frame);
    }

    /// Chunks opened over the store's lifetime.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Chunks released (dropped) over the store's lifetime.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Chunks currently held open by live iterators.
    pub fn live_chunks(&self) -> usize {
        self.opened() - self.released()
    }

    fn frame(&self, key: &FrameKey) -> ConvertResult<MemFrame> {
        self.frames
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| ConvertError::NotFound {
                frame: key.to_string(),
                partition: None,
            })
    }
}

impl FrameStore for MemFrameStore {
    fn schema(&self, key: &FrameKey) -> ConvertResult<FrameSchema> {
        Ok(self.frame(key)?.schema.clone())
    }

    fn partition_count(&self, key: &FrameKey) -> ConvertResult<usize> {
        Ok(self.frame(key)?.bounds.len())
    }

    fn open_partition(
        &self,
        key: &FrameKey,
        partition: usize,
    ) -> ConvertResult<Box<dyn PartitionChunk>> {
        let frame = self.frame(key)?;
        let range = frame
            .bounds
            .get(partition)
            .cloned()
            .ok_or_else(|| ConvertError::NotFound {
                frame: key.to_string(),
                partition: Some(partition),
            })?;
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemChunk {
            columns: Arc::clone(&frame.columns),
            start: range.start,
            rows: range.len(),
            released: Arc::clone(&self.released),
        }))
    }
}

/// Sample frame: six flights over two partitions.
///
/// Columns: `year` (int), `origin` (enum over ORD/SFO/DEN), `distance`
/// (real). Every row decodes and constructs cleanly.
#[must_use]
pub fn flights_frame() -> MemFrame {
    crate::testing::FrameBuilder::new("flights")
        .int_column(
            "year",
            vec![
                Some(1987),
                Some(1987),
                Some(1988),
                Some(1989),
                Some(1990),
                Some(1990),
            ],
        )
        .enum_column(
            "origin",
            &["ORD", "SFO", "DEN"],
            vec![Some(0), Some(1), Some(2), Some(0), Some(1), Some(0)],
        )
        .real_column(
            "distance",
            vec![
                Some(733.0),
                Some(1_846.0),
                Some(967.0),
                Some(733.0),
                Some(1_846.0),
                Some(802.0),
            ],
        )
        .partitions(2)
        .build()
}

/// Sample frame: one unnamed-ish real column, four rows, one partition.
///
/// Single-column frames bypass name-based mapping entirely, so the column
/// name here is deliberately unhelpful.
#[must_use]
pub fn single_column_frame() -> MemFrame {
    crate::testing::FrameBuilder::new("measurements")
        .real_column("C1", vec![Some(0.5), Some(1.5), Some(2.5), Some(3.5)])
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_reports_unknown_frames() {
        let store = MemFrameStore::new();
        let err = store.schema(&FrameKey::new("nope")).unwrap_err();
        assert!(matches!(err, ConvertError::NotFound { .. }));
    }

    #[test]
    fn chunk_release_is_counted() {
        let store = MemFrameStore::new();
        store.insert(flights_frame());
        let chunk = store
            .open_partition(&FrameKey::new("flights"), 0)
            .unwrap();
        assert_eq!(store.live_chunks(), 1);
        drop(chunk);
        assert_eq!(store.live_chunks(), 0);
        assert_eq!(store.released(), 1);
    }

    #[test]
    fn typed_accessors_reject_other_layouts() {
        let store = MemFrameStore::new();
        store.insert(flights_frame());
        let chunk = store
            .open_partition(&FrameKey::new("flights"), 0)
            .unwrap();
        // column 0 is int: string view must refuse it
        assert_eq!(chunk.get_str(0, 0), None);
        assert_eq!(chunk.get_int(0, 0), Some(1987));
    }

    #[test]
    fn sample_frames_are_partitioned_as_documented() {
        assert_eq!(flights_frame().partition_count(), 2);
        assert_eq!(single_column_frame().partition_count(), 1);
    }
}
