//! Output-field to source-column mapping.
//!
//! Runs once, eagerly, at conversion-instance construction time, before any
//! partition work begins, so schema errors surface immediately rather than
//! mid-job on an arbitrary worker.

use crate::error::{ConvertError, ConvertResult};
use crate::schema::FrameSchema;

/// Compute the position mapping: entry *i* is the source column index for
/// output field *i*.
///
/// A single-field request maps to `[0]` without any name lookup: frames
/// with exactly one column may be unnamed or renamed, and name matching adds
/// nothing there.
///
/// # Errors
///
/// [`ConvertError::SchemaMismatch`] naming *every* unmatched field, so the
/// caller can fix the request in one pass instead of discovering missing
/// columns one at a time.
pub fn map_columns(fields: &[String], schema: &FrameSchema) -> ConvertResult<Vec<usize>> {
    if fields.len() == 1 {
        return Ok(vec![0]);
    }

    let resolved: Vec<Option<usize>> = fields
        .iter()
        .map(|name| schema.position_of(name))
        .collect();

    let missing: Vec<String> = fields
        .iter()
        .zip(&resolved)
        .filter(|(_, pos)| pos.is_none())
        .map(|(name, _)| name.clone())
        .collect();

    if !missing.is_empty() {
        return Err(ConvertError::SchemaMismatch { missing });
    }

    Ok(resolved.into_iter().flatten().collect())
}
