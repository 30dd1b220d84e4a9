//! Conversion counters.
//!
//! Per-row decode failures are recovered locally (the row is skipped), so
//! they must be observable somewhere: a [`ConvertMetrics`] handle is shared
//! between a converter and every iterator it hands out, and counts what
//! happened across all partitions of the conversion. Counters can be
//! inspected programmatically, printed, or exported as JSON.
//!
//! # Example
//!
//! ```ignore
//! let converter = FrameConverter::new(store, key, &spec, &registry)?;
//! let rows = converter.collect_seq()?;
//! converter.metrics().print();
//! converter.metrics().save_to_file("convert-metrics.json")?;
//! ```

use anyhow::Result;
use serde_json::{json, Value};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Counters {
    partitions_opened: AtomicU64,
    rows_scanned: AtomicU64,
    rows_skipped: AtomicU64,
    rows_yielded: AtomicU64,
}

/// Thread-safe, cloneable handle to one conversion's counters.
///
/// Clones share the same counters; partitions computed concurrently all
/// report into the one handle.
#[derive(Clone, Default)]
pub struct ConvertMetrics {
    inner: Arc<Counters>,
}

impl ConvertMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn inc_partitions_opened(&self) {
        self.inner.partitions_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_rows_scanned(&self) {
        self.inner.rows_scanned.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_rows_skipped(&self) {
        self.inner.rows_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn inc_rows_yielded(&self) {
        self.inner.rows_yielded.fetch_add(1, Ordering::Relaxed);
    }

    /// Partitions opened so far (one per `compute_partition` call).
    pub fn partitions_opened(&self) -> u64 {
        self.inner.partitions_opened.load(Ordering::Relaxed)
    }

    /// Rows pulled and decoded, whether or not they constructed.
    pub fn rows_scanned(&self) -> u64 {
        self.inner.rows_scanned.load(Ordering::Relaxed)
    }

    /// Rows that failed every construction attempt and were discarded.
    pub fn rows_skipped(&self) -> u64 {
        self.inner.rows_skipped.load(Ordering::Relaxed)
    }

    /// Rows successfully yielded to the consumer.
    pub fn rows_yielded(&self) -> u64 {
        self.inner.rows_yielded.load(Ordering::Relaxed)
    }

    /// Snapshot of all counters as a JSON object.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        json!({
            "partitions_opened": self.partitions_opened(),
            "rows_scanned": self.rows_scanned(),
            "rows_skipped": self.rows_skipped(),
            "rows_yielded": self.rows_yielded(),
        })
    }

    /// Print the counters to stdout.
    pub fn print(&self) {
        println!("========== Conversion Metrics ==========");
        println!("partitions_opened : {}", self.partitions_opened());
        println!("rows_scanned      : {}", self.rows_scanned());
        println!("rows_skipped      : {}", self.rows_skipped());
        println!("rows_yielded      : {}", self.rows_yielded());
        println!("========================================");
    }

    /// Write the JSON snapshot to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
