//! The lazy, single-pass row iterator over one partition.
//!
//! [`RowIter`] is the externally visible sequence: it pulls rows from its
//! partition cursor, decodes them through the bound reader set, attempts
//! construction with every candidate builder, skips rows that fail all
//! attempts, and enforces the zero-or-one-success invariant.
//!
//! The cached-element protocol is an explicit state machine rather than a
//! mutable option field, so the iterator's position in the protocol is an
//! auditable value:
//!
//! - `Empty`: no cached row; the cursor may or may not have more.
//! - `Ready`: a constructed row is cached, waiting to be yielded.
//! - `Exhausted`: terminal; the partition is fully consumed (or iteration
//!   was stopped by an ambiguity error) and nothing is cached.
//!
//! Each pull performs a bounded amount of work (one row decode plus a fixed
//! number of construction attempts) before returning control, so the
//! iterator is safe to drive from any pull-based loop, including ones that
//! interleave several iterators round-robin.

use crate::decode::RowDecoder;
use crate::error::{ConvertError, ConvertResult};
use crate::metrics::ConvertMetrics;
use crate::partition::PartitionCursor;
use crate::row::RowBuilder;
use std::mem;
use std::sync::Arc;

enum IterState<T> {
    Empty,
    Ready(T),
    Exhausted,
}

/// Lazy sequence of constructed rows for one partition.
///
/// Single-pass and not restartable; re-reading a partition means asking the
/// converter for a fresh iterator bound to a fresh partition context. The
/// partition chunk is released when the iterator is dropped, whether or not
/// it was drained.
pub struct RowIter<T> {
    cursor: PartitionCursor,
    decoder: RowDecoder,
    builders: Vec<Arc<dyn RowBuilder<T>>>,
    state: IterState<T>,
    produced: usize,
    metrics: ConvertMetrics,
}

impl<T> RowIter<T> {
    pub(crate) fn new(
        cursor: PartitionCursor,
        decoder: RowDecoder,
        builders: Vec<Arc<dyn RowBuilder<T>>>,
        metrics: ConvertMetrics,
    ) -> Self {
        Self {
            cursor,
            decoder,
            builders,
            state: IterState::Empty,
            produced: 0,
            metrics,
        }
    }

    /// True when a row is available to pull.
    ///
    /// Idempotent: with a row already cached (or the iterator exhausted),
    /// repeated calls neither advance the cursor nor consume anything.
    /// Otherwise rows are pulled and decoded until one constructs, the
    /// partition runs out, or a row is accepted by more than one builder.
    ///
    /// # Errors
    ///
    /// [`ConvertError::AmbiguousConstruction`] when a row's value array is
    /// accepted by two or more candidate builders. That is a caller
    /// configuration error, not a data error; the partition stops
    /// immediately rather than guessing.
    pub fn has_next(&mut self) -> ConvertResult<bool> {
        loop {
            match self.state {
                IterState::Ready(_) => return Ok(true),
                IterState::Exhausted => return Ok(false),
                IterState::Empty => {}
            }

            if !self.cursor.has_more() {
                self.state = IterState::Exhausted;
                return Ok(false);
            }

            let row_index = self.cursor.row();
            let values = self.decoder.decode_row(&mut self.cursor);
            self.metrics.inc_rows_scanned();

            let mut matches = Vec::new();
            let mut candidate = None;
            for (i, builder) in self.builders.iter().enumerate() {
                if let Ok(row) = builder.build(&values) {
                    matches.push(i);
                    if candidate.is_none() {
                        candidate = Some(row);
                    }
                }
            }

            if matches.len() > 1 {
                self.state = IterState::Exhausted;
                return Err(ConvertError::AmbiguousConstruction {
                    row: row_index,
                    matches,
                });
            }

            match candidate {
                Some(row) => {
                    self.state = IterState::Ready(row);
                    return Ok(true);
                }
                // Malformed row: discard and keep pulling. An arbitrarily
                // long run of bad rows before a good one is tolerated.
                None => self.metrics.inc_rows_skipped(),
            }
        }
    }

    /// Pull the cached row, driving [`has_next`](RowIter::has_next)
    /// internally if needed.
    ///
    /// # Errors
    ///
    /// [`ConvertError::EndOfSequence`] when nothing is available, an
    /// out-of-contract call, reported with the produced/total row counts to
    /// aid debugging of widespread decode failure. Ambiguity errors from the
    /// internal pull pass through.
    pub fn next_row(&mut self) -> ConvertResult<T> {
        if !self.has_next()? {
            return Err(ConvertError::EndOfSequence {
                produced: self.produced,
                total: self.cursor.row_count(),
            });
        }
        match mem::replace(&mut self.state, IterState::Empty) {
            IterState::Ready(row) => {
                self.produced += 1;
                self.metrics.inc_rows_yielded();
                Ok(row)
            }
            // has_next returned true, so the state was Ready.
            _ => Err(ConvertError::EndOfSequence {
                produced: self.produced,
                total: self.cursor.row_count(),
            }),
        }
    }

    /// Rows successfully yielded so far.
    pub fn produced(&self) -> usize {
        self.produced
    }

    /// Total rows in the underlying partition.
    pub fn row_count(&self) -> usize {
        self.cursor.row_count()
    }
}

impl<T> Iterator for RowIter<T> {
    type Item = ConvertResult<T>;

    /// A fatal error is yielded once as `Err`; the iterator is terminal
    /// afterwards and returns `None`.
    fn next(&mut self) -> Option<Self::Item> {
        match self.has_next() {
            Ok(true) => Some(self.next_row()),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
