//! Assertion helpers for converted row collections.

use std::fmt::Debug;

/// Assert that two row collections are equal in order and content.
///
/// # Panics
///
/// Panics with a detailed message if the collections differ in length or
/// content.
///
/// # Example
///
/// ```
/// use framecast::testing::assert_rows_equal;
///
/// let actual = vec![(1, "a"), (2, "b")];
/// assert_rows_equal(&actual, &[(1, "a"), (2, "b")]);
/// ```
pub fn assert_rows_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Row count mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Row mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

/// Assert that a row collection has the expected size.
///
/// # Panics
///
/// Panics if the size differs.
pub fn assert_row_count<T>(rows: &[T], expected: usize) {
    assert_eq!(
        rows.len(),
        expected,
        "Row count mismatch:\n  Expected: {expected}\n  Actual: {}",
        rows.len()
    );
}

/// Assert that every row satisfies a predicate.
///
/// # Panics
///
/// Panics naming the first offending row.
pub fn assert_all_rows<T: Debug>(rows: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, row) in rows.iter().enumerate() {
        assert!(
            predicate(row),
            "Predicate failed for row at index {i}:\n  Row: {row:?}"
        );
    }
}
