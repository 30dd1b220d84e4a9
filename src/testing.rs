//! Testing utilities for frame conversions.
//!
//! This module provides what tests and demos need to exercise the
//! conversion engine without a real storage cluster:
//!
//! - **Fixtures**: [`MemFrameStore`], an in-memory [`FrameStore`] with
//!   per-chunk open/release tracking, plus ready-made sample frames
//! - **Builders**: [`FrameBuilder`] for assembling frames column by column
//! - **Assertions**: compare converted row collections with expected results
//!
//! # Quick Start
//!
//! ```ignore
//! use framecast::*;
//! use framecast::testing::*;
//! use std::sync::Arc;
//!
//! #[test]
//! fn converts_flights() -> anyhow::Result<()> {
//!     let store = Arc::new(MemFrameStore::new());
//!     store.insert(flights_frame());
//!
//!     let spec: RowSpec<(i64, String, f64)> = RowSpec::new()
//!         .field("year", SemanticType::Int)
//!         .field("origin", SemanticType::Enum)
//!         .field("distance", SemanticType::Real)
//!         .builder(TupleBuilder::default());
//!
//!     let converter =
//!         FrameConverter::new(store, FrameKey::new("flights"), &spec, &ReaderRegistry::new())?;
//!     let rows = converter.collect_seq()?;
//!     assert_row_count(&rows, 6);
//!     Ok(())
//! }
//! ```
//!
//! [`FrameStore`]: crate::store::FrameStore
//! [`MemFrameStore`]: fixtures::MemFrameStore
//! [`FrameBuilder`]: builders::FrameBuilder

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
