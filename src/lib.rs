//! # Framecast
//!
//! Lazy, partition-parallel conversion of **column-oriented, partitioned
//! data frames** into sequences of **strongly-typed Rust rows**, computed
//! independently per partition without materializing the whole dataset
//! centrally.
//!
//! ## Key Features
//!
//! - **Eager validation** - schema mismatches and missing builders surface at
//!   construction time, before any partition is opened
//! - **Lazy per-partition iteration** - bounded work per pull, safe to drive
//!   from any pull-based consumption loop
//! - **Type-directed decoding** - per-column readers selected by semantic
//!   type through an explicit, injectable registry
//! - **Skip-on-failure** - malformed rows are counted and skipped, never
//!   fatal; ambiguous construction is fatal, never guessed
//! - **Scoped resources** - partition read contexts are released on every
//!   exit path, including early abandonment
//! - **Sequential and parallel drivers** - drain one partition at a time or
//!   fan out over a Rayon pool
//!
//! ## Quick Start
//!
//! ```ignore
//! use framecast::*;
//! use framecast::testing::*;
//! use std::sync::Arc;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = Arc::new(MemFrameStore::new());
//! store.insert(flights_frame());
//!
//! // Describe the target row type: named fields plus a builder.
//! let spec: RowSpec<(i64, String, f64)> = RowSpec::new()
//!     .field("year", SemanticType::Int)
//!     .field("origin", SemanticType::Enum)
//!     .field("distance", SemanticType::Real)
//!     .builder(TupleBuilder::default());
//!
//! // Validate once, then compute partitions lazily.
//! let converter = FrameConverter::new(
//!     store,
//!     FrameKey::new("flights"),
//!     &spec,
//!     &ReaderRegistry::new(),
//! )?;
//!
//! for row in converter.compute_partition(0)? {
//!     let (year, origin, distance) = row?;
//!     println!("{year} {origin} {distance}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Frames and partitions
//!
//! A frame is a distributed columnar dataset with a fixed, uniquely named
//! column schema ([`FrameSchema`]), physically divided into partitions. The
//! storage engine behind it is reached through the [`FrameStore`] and
//! [`PartitionChunk`] traits; this crate never owns the data.
//!
//! ### The conversion instance
//!
//! A [`FrameConverter`] binds one frame to one target row type. At
//! construction it computes the output-field → source-column mapping,
//! discovers the candidate builders, and binds one typed [`ColumnReader`]
//! per output field. All of that is immutable afterwards and shared by every
//! partition, so no locking is needed at iteration time.
//!
//! ### Row construction
//!
//! A [`RowBuilder`] is one candidate constructor: it either builds the row
//! from a positional [`RawValue`] array or reports a [`BuildError`]. Rows
//! rejected by *every* candidate are skipped and counted. A row accepted by
//! *more than one* candidate stops the partition with
//! [`ConvertError::AmbiguousConstruction`]: the schemas admit two readings
//! of the data, which is a configuration error, not something to resolve by
//! picking one. Tuple targets are covered out of the box by
//! [`TupleBuilder`]; struct targets use [`FnBuilder`] or a hand-written
//! impl.
//!
//! ### The iterator
//!
//! [`RowIter`] is single-pass and partition-scoped: `has_next`/`next_row`
//! drive an explicit Empty/Ready/Exhausted state machine, and the plain
//! [`Iterator`] impl wraps the same protocol for ordinary `for` loops.
//! Re-computing a partition (e.g. a scheduler retry) just asks the
//! converter again: each call opens a fresh read context.
//!
//! ## Module Overview
//!
//! - [`schema`] - frame metadata, semantic types, target row descriptors
//! - [`store`] - the storage engine boundary (consumed)
//! - [`reader`] - typed column readers and the reader registry
//! - [`mapping`] - output-field to source-column mapping
//! - [`partition`] - cursor over one opened partition
//! - [`decode`] - per-row decoding into raw value arrays
//! - [`row`] - row builders and typed field extraction
//! - [`iter`] - the lazy per-partition row iterator
//! - [`convert`] - the conversion instance and whole-frame drivers
//! - [`metrics`] - conversion counters
//! - [`error`] - the error taxonomy
//! - [`testing`] - in-memory store, frame builders, assertions

pub mod convert;
pub mod decode;
pub mod error;
pub mod iter;
pub mod mapping;
pub mod metrics;
pub mod partition;
pub mod reader;
pub mod row;
pub mod schema;
pub mod store;
pub mod testing;
pub mod value;

pub use convert::FrameConverter;
pub use decode::RowDecoder;
pub use error::{ConvertError, ConvertResult};
pub use iter::RowIter;
pub use mapping::map_columns;
pub use metrics::ConvertMetrics;
pub use partition::PartitionCursor;
pub use reader::{ColumnReader, ReaderFactory, ReaderRegistry};
pub use row::{BuildError, BuildResult, FnBuilder, FromRaw, RowBuilder, TupleBuilder};
pub use schema::{ColumnMeta, FieldSpec, FrameKey, FrameSchema, RowSpec, SemanticType};
pub use store::{FrameStore, PartitionChunk};
pub use value::RawValue;
