//! Well-known CSV texts and row sets.

use crate::row::{Record, Row};

/// Two people with an `id,name` header.
pub const PEOPLE_CSV: &str = "id,name\n1,Johanna\n2,John\n";

/// Semicolon-separated cities with a `country;city` header.
pub const CITIES_SEMICOLON_CSV: &str = "country;city\nde;berlin\nnl;amsterdam";

/// Three headerless key/value lines.
pub const HEADERLESS_CSV: &str = "name,max\nage,42\ngender,male";

/// Rows matching [`PEOPLE_CSV`].
#[must_use]
pub fn people_rows() -> Vec<Row> {
    vec![
        Row::from([("id", "1"), ("name", "Johanna")]),
        Row::from([("id", "2"), ("name", "John")]),
    ]
}

/// Rows whose key sets overlap only partly: `{a, b}` then `{b, c}`.
#[must_use]
pub fn overlapping_rows() -> Vec<Row> {
    vec![
        Row::from([("a", "1"), ("b", "2")]),
        Row::from([("b", "3"), ("c", "4")]),
    ]
}

/// Build a record with explicit absent values.
///
/// ```
/// use lazy_csv::testing::record;
///
/// let r = record(&[("id", Some("1")), ("data", None)]);
/// assert_eq!(r.get("id"), Some("1"));
/// assert!(r.contains_key("data"));
/// ```
#[must_use]
pub fn record(entries: &[(&str, Option<&str>)]) -> Record {
    let mut r = Record::with_capacity(entries.len());
    for (k, v) in entries {
        r.insert(*k, v.map(str::to_string));
    }
    r
}
