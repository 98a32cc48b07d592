//! Assertion functions for document rows.

use crate::row::{Key, Row};

/// Assert that two row sequences are equal in order and content.
///
/// # Panics
///
/// Panics with the first differing index and both full sequences.
///
/// # Example
///
/// ```
/// use lazy_csv::Row;
/// use lazy_csv::testing::assert_rows_equal;
///
/// let rows = vec![Row::from([("id", "1")])];
/// assert_rows_equal(&rows, &[Row::from([("id", "1")])]);
/// ```
pub fn assert_rows_equal(actual: &[Row], expected: &[Row]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Row count mismatch:\n  Expected: {}\n  Actual: {}\n  Expected rows: {expected:?}\n  Actual rows: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(
            a, e,
            "Row mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}"
        );
    }
}

/// Assert that a header equals the given names, in order.
///
/// # Panics
///
/// Panics if the keys differ.
pub fn assert_header(actual: &[Key], expected: &[&str]) {
    let expected: Vec<Key> = expected.iter().map(|k| Key::from(*k)).collect();
    assert_eq!(
        actual, expected,
        "Header mismatch:\n  Expected: {expected:?}\n  Actual: {actual:?}"
    );
}
