//! Row model: keys, keyed records, and plain field rows.
//!
//! A document row is either a [`Record`] (an ordered key → value mapping,
//! produced in header mode) or a plain sequence of fields (produced when
//! header mode is off). Values inside a record may be absent, which is how a
//! short data row is padded up to the width of its header.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Column key: a header name or a positional index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Key {
    /// Zero-based column position.
    Index(usize),
    /// Column name.
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(n) => f.write_str(n),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Index(value)
    }
}

/// Ordered mapping from [`Key`] to an optional value.
///
/// Keys are unique; inserting an existing key replaces its value in place.
///
/// ```
/// use lazy_csv::Record;
///
/// let mut r: Record = [("id", "1"), ("name", "Anne")].into_iter().collect();
/// r.insert("name", None);
/// assert_eq!(r.get("id"), Some("1"));
/// assert_eq!(r.get("name"), None);
/// assert!(r.contains_key("name"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    entries: Vec<(Key, Option<String>)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert or replace the value for `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<Key>, value: Option<String>) -> Option<Option<String>> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Shorthand for inserting a present value.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<String>) {
        self.insert(key, Some(value.into()));
    }

    /// Value stored under `key`. Absent keys and null values both yield `None`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&str> {
        self.lookup(&key.into())
    }

    pub(crate) fn lookup(&self, key: &Key) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = Option<&str>> {
        self.entries.iter().map(|(_, v)| v.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k, v.as_deref()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a record by pairing header keys with fields, padding missing
    /// trailing fields with `None`. The caller guarantees `fields` is not
    /// wider than `keys`.
    pub(crate) fn zip_padded<'a>(keys: &[Key], fields: impl IntoIterator<Item = &'a str>) -> Self {
        let mut fields = fields.into_iter();
        let entries = keys
            .iter()
            .map(|k| (k.clone(), fields.next().map(str::to_string)))
            .collect();
        Self { entries }
    }
}

impl<K: Into<Key>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut r = Record::new();
        for (k, v) in iter {
            r.set(k, v);
        }
        r
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// One document row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Row {
    /// Positional fields, as produced when header mode is off.
    Fields(Vec<String>),
    /// Keyed values, as produced when header mode is on.
    Record(Record),
}

impl Row {
    /// Keys of this row. Field rows are keyed by position.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        match self {
            Row::Fields(f) => (0..f.len()).map(Key::Index).collect(),
            Row::Record(r) => r.keys().cloned().collect(),
        }
    }

    /// Values in insertion order.
    pub fn values(&self) -> Vec<Option<&str>> {
        match self {
            Row::Fields(f) => f.iter().map(|s| Some(s.as_str())).collect(),
            Row::Record(r) => r.values().collect(),
        }
    }

    pub fn get(&self, key: impl Into<Key>) -> Option<&str> {
        self.lookup(&key.into())
    }

    pub(crate) fn lookup(&self, key: &Key) -> Option<&str> {
        match (self, key) {
            (Row::Fields(f), Key::Index(i)) => f.get(*i).map(String::as_str),
            (Row::Fields(_), Key::Name(_)) => None,
            (Row::Record(r), k) => r.lookup(k),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Row::Fields(f) => f.len(),
            Row::Record(r) => r.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Row::Record(r) => Some(r),
            Row::Fields(_) => None,
        }
    }

    #[must_use]
    pub fn as_fields(&self) -> Option<&[String]> {
        match self {
            Row::Fields(f) => Some(f),
            Row::Record(_) => None,
        }
    }
}

impl From<Record> for Row {
    fn from(value: Record) -> Self {
        Row::Record(value)
    }
}

impl From<Vec<String>> for Row {
    fn from(value: Vec<String>) -> Self {
        Row::Fields(value)
    }
}

impl From<Vec<&str>> for Row {
    fn from(value: Vec<&str>) -> Self {
        Row::Fields(value.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Row {
    fn from(value: [(&str, &str); N]) -> Self {
        Row::Record(value.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut r: Record = [("a", "1"), ("b", "2")].into_iter().collect();
        let old = r.insert("a", Some("9".into()));
        assert_eq!(old, Some(Some("1".to_string())));
        assert_eq!(r.keys().cloned().collect::<Vec<_>>(), vec![Key::from("a"), Key::from("b")]);
        assert_eq!(r.get("a"), Some("9"));
    }

    #[test]
    fn zip_pads_missing_trailing_fields() {
        let keys = vec![Key::from("id"), Key::from("data")];
        let r = Record::zip_padded(&keys, ["1"]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.get("id"), Some("1"));
        assert!(r.contains_key("data"));
        assert_eq!(r.get("data"), None);
    }

    #[test]
    fn field_rows_are_keyed_by_position() {
        let row = Row::from(vec!["x", "y"]);
        assert_eq!(row.keys(), vec![Key::Index(0), Key::Index(1)]);
        assert_eq!(row.get(1usize), Some("y"));
        assert_eq!(row.get("x"), None);
    }

    #[test]
    fn index_and_name_keys_are_distinct() {
        assert_ne!(Key::from(0usize), Key::from("0"));
        assert_eq!(Key::from(0usize).to_string(), Key::from("0").to_string());
    }

    #[test]
    fn rows_serialize_as_maps_and_sequences() {
        let keyed = Row::from([("id", "1")]);
        assert_eq!(serde_json::to_string(&keyed).unwrap(), r#"{"id":"1"}"#);

        let mut padded = Record::new();
        padded.insert("id", None);
        assert_eq!(serde_json::to_string(&padded).unwrap(), r#"{"id":null}"#);

        let plain = Row::from(vec!["a", "b"]);
        assert_eq!(serde_json::to_string(&plain).unwrap(), r#"["a","b"]"#);
    }
}
