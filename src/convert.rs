//! The conversion instance: eager validation, per-partition computation,
//! and whole-frame drivers.
//!
//! A [`FrameConverter`] binds a frame to a target row type. All validation
//! happens at construction: column mapping, candidate-builder discovery, and
//! reader binding. What remains per partition is pure: `compute_partition`
//! opens a fresh read context and returns a lazy [`RowIter`] for the
//! external scheduler to drain. Nothing is shared mutably between
//! partitions, so any number of them may be computed concurrently.

use crate::decode::RowDecoder;
use crate::error::{ConvertError, ConvertResult};
use crate::iter::RowIter;
use crate::mapping::map_columns;
use crate::metrics::ConvertMetrics;
use crate::partition::PartitionCursor;
use crate::reader::{ColumnReader, ReaderRegistry};
use crate::row::RowBuilder;
use crate::schema::{FrameKey, FrameSchema, RowSpec};
use crate::store::FrameStore;
use rayon::prelude::*;
use std::sync::Arc;

/// Lazily converts one frame into rows of `T`, partition by partition.
///
/// Construction validates everything that can fail for configuration
/// reasons, before any partition is opened, so a misconfigured conversion
/// fails fast and uniformly across the whole job:
///
/// - every output field must resolve to a source column
///   ([`ConvertError::SchemaMismatch`], naming all misses at once);
/// - at least one registered builder must match the output field count
///   ([`ConvertError::NoCompatibleConstructor`]);
/// - every field's semantic type must have a registered reader.
///
/// The computed mapping, reader set, and candidate builders are immutable
/// afterwards and reused across all partitions.
pub struct FrameConverter<T> {
    store: Arc<dyn FrameStore>,
    schema: FrameSchema,
    fields: Vec<String>,
    mapping: Vec<usize>,
    readers: Vec<Arc<dyn ColumnReader>>,
    builders: Vec<Arc<dyn RowBuilder<T>>>,
    metrics: ConvertMetrics,
}

impl<T> FrameConverter<T> {
    /// Build a converter extracting all of the spec's fields in declared
    /// order.
    pub fn new(
        store: Arc<dyn FrameStore>,
        key: FrameKey,
        spec: &RowSpec<T>,
        registry: &ReaderRegistry,
    ) -> ConvertResult<Self> {
        let fields = spec.field_names();
        Self::with_fields(store, key, spec, registry, fields)
    }

    /// Build a converter extracting an explicit output field list.
    ///
    /// Each name must be declared on the spec (that is where its decoder
    /// type comes from) and must exist as a frame column; misses of either
    /// kind are collected into one [`ConvertError::SchemaMismatch`].
    pub fn with_fields(
        store: Arc<dyn FrameStore>,
        key: FrameKey,
        spec: &RowSpec<T>,
        registry: &ReaderRegistry,
        fields: Vec<String>,
    ) -> ConvertResult<Self> {
        let schema = store.schema(&key)?;

        let unknown: Vec<String> = fields
            .iter()
            .filter(|name| spec.dtype_of(name).is_none())
            .cloned()
            .collect();
        if !unknown.is_empty() {
            return Err(ConvertError::SchemaMismatch { missing: unknown });
        }

        let mapping = map_columns(&fields, &schema)?;

        let arity = fields.len();
        let builders: Vec<Arc<dyn RowBuilder<T>>> = spec
            .builders()
            .iter()
            .filter(|b| b.arity() == arity)
            .cloned()
            .collect();
        if builders.is_empty() {
            return Err(ConvertError::NoCompatibleConstructor {
                arity,
                registered: spec.builders().iter().map(|b| b.arity()).collect(),
            });
        }

        let mut readers = Vec::with_capacity(fields.len());
        for (name, &column) in fields.iter().zip(&mapping) {
            // dtype_of cannot miss here: unknown names were rejected above.
            let dtype = spec
                .dtype_of(name)
                .ok_or_else(|| ConvertError::SchemaMismatch {
                    missing: vec![name.clone()],
                })?;
            let meta = &schema.columns()[column];
            readers.push(registry.reader_for(dtype.name(), meta, column)?);
        }

        Ok(Self {
            store,
            schema,
            fields,
            mapping,
            readers,
            builders,
            metrics: ConvertMetrics::new(),
        })
    }

    pub fn schema(&self) -> &FrameSchema {
        &self.schema
    }

    /// Output field names in extraction order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Source column index for each output field.
    pub fn mapping(&self) -> &[usize] {
        &self.mapping
    }

    /// Counters shared with every iterator this converter hands out.
    pub fn metrics(&self) -> &ConvertMetrics {
        &self.metrics
    }

    /// Number of partitions of the bound frame.
    pub fn partition_count(&self) -> ConvertResult<usize> {
        self.store.partition_count(self.schema.key())
    }

    /// Compute one partition's row sequence.
    ///
    /// The sole per-partition entry point: opens a fresh read context and
    /// returns the lazy iterator over it. Safe to invoke once per partition
    /// per job attempt: a retried partition gets a fresh context with no
    /// state from the prior attempt.
    ///
    /// # Errors
    ///
    /// [`ConvertError::NotFound`] when the partition index is invalid.
    pub fn compute_partition(&self, partition: usize) -> ConvertResult<RowIter<T>> {
        let chunk = self.store.open_partition(self.schema.key(), partition)?;
        self.metrics.inc_partitions_opened();
        Ok(RowIter::new(
            PartitionCursor::new(chunk),
            RowDecoder::new(self.readers.clone()),
            self.builders.clone(),
            self.metrics.clone(),
        ))
    }

    /// Drain every partition in index order on the calling thread.
    pub fn collect_seq(&self) -> ConvertResult<Vec<T>> {
        let mut out = Vec::new();
        for partition in 0..self.partition_count()? {
            for row in self.compute_partition(partition)? {
                out.push(row?);
            }
        }
        Ok(out)
    }

    /// Drain every partition concurrently on a rayon pool, preserving
    /// partition order in the concatenated output.
    ///
    /// `threads` overrides the pool size; the default is the smaller of the
    /// partition count and the machine's logical CPU count.
    pub fn collect_par(&self, threads: Option<usize>) -> ConvertResult<Vec<T>>
    where
        T: Send,
    {
        let partitions = self.partition_count()?;
        let pool_size = threads.unwrap_or_else(|| num_cpus::get().min(partitions.max(1)));
        // ok() to ignore "already built" on repeated calls
        rayon::ThreadPoolBuilder::new()
            .num_threads(pool_size)
            .build_global()
            .ok();

        let per_partition: Vec<ConvertResult<Vec<T>>> = (0..partitions)
            .into_par_iter()
            .map(|partition| self.compute_partition(partition)?.collect())
            .collect();

        let mut out = Vec::new();
        for rows in per_partition {
            out.extend(rows?);
        }
        Ok(out)
    }
}
