//! Fluent construction of in-memory frames for tests.

use crate::schema::{ColumnMeta, FrameKey, FrameSchema, SemanticType};
use crate::testing::fixtures::{MemColumn, MemFrame};
use std::ops::Range;

/// Assemble a [`MemFrame`] column by column.
///
/// All columns must have the same length; `build` panics otherwise (this is
/// test tooling; a mis-specified fixture should fail loudly).
///
/// # Example
///
/// ```ignore
/// use framecast::testing::FrameBuilder;
///
/// let frame = FrameBuilder::new("weather")
///     .int_column("station", vec![Some(1), Some(2), Some(3)])
///     .real_column("temp", vec![Some(20.5), None, Some(23.0)])
///     .partitions(2)
///     .build();
/// ```
pub struct FrameBuilder {
    key: FrameKey,
    columns: Vec<(ColumnMeta, MemColumn)>,
    partitions: usize,
    sizes: Option<Vec<usize>>,
}

impl FrameBuilder {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: FrameKey::new(key),
            columns: Vec::new(),
            partitions: 1,
            sizes: None,
        }
    }

    #[must_use]
    pub fn int_column(mut self, name: impl Into<String>, cells: Vec<Option<i64>>) -> Self {
        self.columns.push((
            ColumnMeta::new(name, SemanticType::Int),
            MemColumn::Int(cells),
        ));
        self
    }

    #[must_use]
    pub fn real_column(mut self, name: impl Into<String>, cells: Vec<Option<f64>>) -> Self {
        self.columns.push((
            ColumnMeta::new(name, SemanticType::Real),
            MemColumn::Real(cells),
        ));
        self
    }

    #[must_use]
    pub fn str_column(mut self, name: impl Into<String>, cells: Vec<Option<String>>) -> Self {
        self.columns.push((
            ColumnMeta::new(name, SemanticType::String),
            MemColumn::Str(cells),
        ));
        self
    }

    #[must_use]
    pub fn time_column(mut self, name: impl Into<String>, cells: Vec<Option<i64>>) -> Self {
        self.columns.push((
            ColumnMeta::new(name, SemanticType::Time),
            MemColumn::Time(cells),
        ));
        self
    }

    #[must_use]
    pub fn uuid_column(mut self, name: impl Into<String>, cells: Vec<Option<u128>>) -> Self {
        self.columns.push((
            ColumnMeta::new(name, SemanticType::Uuid),
            MemColumn::Uuid(cells),
        ));
        self
    }

    /// Categorical column: `cells` are indices into `levels`.
    #[must_use]
    pub fn enum_column(
        mut self,
        name: impl Into<String>,
        levels: &[&str],
        cells: Vec<Option<i64>>,
    ) -> Self {
        let meta = ColumnMeta::new(name, SemanticType::Enum)
            .with_levels(levels.iter().map(|s| s.to_string()).collect());
        self.columns.push((meta, MemColumn::Enum(cells)));
        self
    }

    /// Split rows into `n` contiguous partitions of roughly equal size
    /// (the last may be shorter).
    #[must_use]
    pub fn partitions(mut self, n: usize) -> Self {
        self.partitions = n.max(1);
        self.sizes = None;
        self
    }

    /// Explicit partition sizes; must sum to the row count.
    #[must_use]
    pub fn partition_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = Some(sizes);
        self
    }

    /// # Panics
    ///
    /// Panics when column lengths differ or explicit partition sizes do not
    /// sum to the row count.
    #[must_use]
    pub fn build(self) -> MemFrame {
        let rows = self.columns.first().map_or(0, |(_, c)| c.len());
        for (meta, column) in &self.columns {
            assert_eq!(
                column.len(),
                rows,
                "column '{}' has {} cells, expected {rows}",
                meta.name,
                column.len()
            );
        }

        let bounds = match self.sizes {
            Some(sizes) => {
                let total: usize = sizes.iter().sum();
                assert_eq!(total, rows, "partition sizes sum to {total}, expected {rows}");
                let mut bounds = Vec::with_capacity(sizes.len());
                let mut start = 0;
                for size in sizes {
                    bounds.push(start..start + size);
                    start += size;
                }
                bounds
            }
            None => split_rows(rows, self.partitions),
        };

        let (metas, columns): (Vec<ColumnMeta>, Vec<MemColumn>) =
            self.columns.into_iter().unzip();
        MemFrame::new(FrameSchema::new(self.key, metas), columns, bounds)
    }
}

/// Contiguous chunks of ~rows/n each (the last chunk may be shorter).
fn split_rows(rows: usize, n: usize) -> Vec<Range<usize>> {
    if n <= 1 || rows <= 1 {
        return vec![0..rows];
    }
    let chunk = rows.div_ceil(n);
    let mut bounds = Vec::new();
    let mut start = 0;
    while start < rows {
        bounds.push(start..(start + chunk).min(rows));
        start += chunk;
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split_covers_all_rows() {
        let frame = FrameBuilder::new("f")
            .int_column("a", (0..10).map(Some).collect())
            .partitions(3)
            .build();
        assert_eq!(frame.partition_count(), 3);
    }

    #[test]
    fn explicit_sizes_are_honored() {
        let frame = FrameBuilder::new("f")
            .int_column("a", (0..5).map(Some).collect())
            .partition_sizes(vec![1, 3, 1])
            .build();
        assert_eq!(frame.partition_count(), 3);
    }

    #[test]
    #[should_panic(expected = "cells")]
    fn ragged_columns_panic() {
        let _ = FrameBuilder::new("f")
            .int_column("a", vec![Some(1), Some(2)])
            .real_column("b", vec![Some(1.0)])
            .build();
    }
}
