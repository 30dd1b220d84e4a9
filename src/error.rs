//! Error types for frame-to-row conversion.
//!
//! Construction-time errors ([`ConvertError::SchemaMismatch`],
//! [`ConvertError::NoCompatibleConstructor`]) surface before any partition is
//! opened, so a misconfigured conversion fails uniformly across the whole job
//! instead of on an arbitrary worker. Per-row decode failures are *not*
//! errors at this level: malformed rows are skipped and counted by the
//! iterator (see [`crate::metrics::ConvertMetrics`]).

use std::error::Error;
use std::fmt;

/// Errors raised by the conversion engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// One or more requested output fields have no matching source column.
    /// Lists every offending field so the caller can fix the request in one
    /// pass.
    SchemaMismatch { missing: Vec<String> },

    /// No registered row builder accepts the output field count.
    /// `registered` holds the arities that are available.
    NoCompatibleConstructor { arity: usize, registered: Vec<usize> },

    /// A single row's value array was accepted by more than one candidate
    /// builder. `row` is partition-relative; `matches` holds the indices of
    /// the accepting builders in registration order.
    AmbiguousConstruction { row: usize, matches: Vec<usize> },

    /// `next_row` was invoked with nothing available. Reports how many rows
    /// were produced against the partition's total, to aid debugging of
    /// widespread decode failure.
    EndOfSequence { produced: usize, total: usize },

    /// The requested frame key or partition index does not exist in the
    /// backing store.
    NotFound {
        frame: String,
        partition: Option<usize>,
    },

    /// A field's semantic type has no reader registered in the
    /// [`ReaderRegistry`](crate::reader::ReaderRegistry).
    UnregisteredType { name: String },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::SchemaMismatch { missing } => {
                write!(f, "no source column for field(s): {}", missing.join(", "))
            }
            ConvertError::NoCompatibleConstructor { arity, registered } => {
                write!(
                    f,
                    "no row builder of arity {arity} (registered arities: {registered:?})"
                )
            }
            ConvertError::AmbiguousConstruction { row, matches } => {
                write!(
                    f,
                    "row {row} accepted by {} builders {matches:?}; refusing to pick one",
                    matches.len()
                )
            }
            ConvertError::EndOfSequence { produced, total } => {
                write!(
                    f,
                    "next_row called past the end ({produced} of {total} rows produced)"
                )
            }
            ConvertError::NotFound { frame, partition } => match partition {
                Some(p) => write!(f, "partition {p} of frame '{frame}' not found"),
                None => write!(f, "frame '{frame}' not found"),
            },
            ConvertError::UnregisteredType { name } => {
                write!(f, "no column reader registered for semantic type '{name}'")
            }
        }
    }
}

impl Error for ConvertError {}

/// Result alias used throughout the crate.
pub type ConvertResult<T> = Result<T, ConvertError>;
