//! Header reconciliation.
//!
//! The [`HeaderReconciler`] owns the canonical key sequence of a document in
//! header mode. Keys enter the sequence in first-seen order, either from a
//! parsed header line or from rows added programmatically, and never move once
//! present. Serialization projects every row onto this sequence, so rows with
//! different key sets still produce a rectangular table.
//!
//! When header mode is off the reconciler is inert: it records nothing and
//! projects rows as their values in insertion order.

use crate::error::{CsvFileError, Result};
use crate::row::{Key, Row};
use std::collections::HashSet;

/// Where the reconciler is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderState {
    /// No header line parsed and no keyed row added yet.
    NoHeaderSeen,
    /// A header line was captured from the source.
    HeaderCaptured,
    /// Rows added through `add` have contributed keys.
    Accumulating,
}

/// Ordered, duplicate-free set of column keys with a stable union rule.
#[derive(Clone, Debug)]
pub struct HeaderReconciler {
    enabled: bool,
    state: HeaderState,
    keys: Vec<Key>,
    seen: HashSet<Key>,
    /// Column names the keys are written under.
    names: HashSet<String>,
}

impl HeaderReconciler {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            state: HeaderState::NoHeaderSeen,
            keys: Vec::new(),
            seen: HashSet::new(),
            names: HashSet::new(),
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn state(&self) -> HeaderState {
        self.state
    }

    /// Canonical key sequence in first-seen order.
    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Fail with [`CsvFileError::DuplicateHeader`] if two of `keys` would be
    /// written under the same column name. `Key::Index(0)` and
    /// `Key::Name("0")` count as the same column.
    pub fn check_unique(keys: &[Key]) -> Result<()> {
        let mut names = HashSet::with_capacity(keys.len());
        for k in keys {
            let name = k.to_string();
            if names.contains(&name) {
                return Err(CsvFileError::DuplicateHeader { key: name });
            }
            names.insert(name);
        }
        Ok(())
    }

    /// Fail if a key not yet in the sequence shares its column name with one
    /// that is.
    fn check_collisions(&self, keys: &[Key]) -> Result<()> {
        for k in keys.iter().filter(|k| !self.seen.contains(*k)) {
            let name = k.to_string();
            if self.names.contains(&name) {
                return Err(CsvFileError::DuplicateHeader { key: name });
            }
        }
        Ok(())
    }

    /// Seed the canonical sequence with `keys`, or append the ones not yet
    /// present, keeping first-seen order.
    pub fn seed_or_extend(&mut self, keys: &[Key]) {
        for k in keys {
            if self.seen.insert(k.clone()) {
                self.names.insert(k.to_string());
                self.keys.push(k.clone());
            }
        }
    }

    /// Take a header line parsed from the source.
    pub fn capture_header(&mut self, keys: &[Key]) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        Self::check_unique(keys)?;
        self.check_collisions(keys)?;
        self.seed_or_extend(keys);
        self.state = HeaderState::HeaderCaptured;
        Ok(())
    }

    /// Fold the keys of a programmatically added row into the sequence.
    pub fn absorb(&mut self, row: &Row) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let keys = row.keys();
        Self::check_unique(&keys)?;
        self.check_collisions(&keys)?;
        self.seed_or_extend(&keys);
        self.state = HeaderState::Accumulating;
        Ok(())
    }

    /// Values of `row` laid out along the canonical sequence; keys the row
    /// lacks come out as `None`. Identity (insertion order) when inert.
    #[must_use]
    pub fn project<'r>(&self, row: &'r Row) -> Vec<Option<&'r str>> {
        if !self.enabled {
            return row.values();
        }
        self.keys.iter().map(|k| row.lookup(k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(names: &[&str]) -> Vec<Key> {
        names.iter().map(|n| Key::from(*n)).collect()
    }

    #[test]
    fn first_keys_seed_in_order() {
        let mut h = HeaderReconciler::new(true);
        h.seed_or_extend(&keys(&["b", "a"]));
        assert_eq!(h.keys(), keys(&["b", "a"]).as_slice());
    }

    #[test]
    fn union_appends_new_keys_only() {
        let mut h = HeaderReconciler::new(true);
        h.seed_or_extend(&keys(&["a", "b"]));
        h.seed_or_extend(&keys(&["c", "b", "a", "d"]));
        assert_eq!(h.keys(), keys(&["a", "b", "c", "d"]).as_slice());
    }

    #[test]
    fn duplicate_in_one_header_is_rejected() {
        let mut h = HeaderReconciler::new(true);
        let err = h.capture_header(&keys(&["id", "name", "id"])).unwrap_err();
        assert!(matches!(err, CsvFileError::DuplicateHeader { key } if key == "id"));
        assert!(h.is_empty());
        assert_eq!(h.state(), HeaderState::NoHeaderSeen);
    }

    #[test]
    fn states_follow_capture_then_add() {
        let mut h = HeaderReconciler::new(true);
        assert_eq!(h.state(), HeaderState::NoHeaderSeen);
        h.capture_header(&keys(&["a"])).unwrap();
        assert_eq!(h.state(), HeaderState::HeaderCaptured);
        h.absorb(&Row::from([("b", "2")])).unwrap();
        assert_eq!(h.state(), HeaderState::Accumulating);
        assert_eq!(h.keys(), keys(&["a", "b"]).as_slice());
    }

    #[test]
    fn projection_fills_missing_keys_with_none() {
        let mut h = HeaderReconciler::new(true);
        let first = Row::from([("a", "1"), ("b", "2")]);
        let second = Row::from([("b", "3"), ("c", "4")]);
        h.absorb(&first).unwrap();
        h.absorb(&second).unwrap();
        assert_eq!(h.project(&first), vec![Some("1"), Some("2"), None]);
        assert_eq!(h.project(&second), vec![None, Some("3"), Some("4")]);
    }

    #[test]
    fn inert_when_disabled() {
        let mut h = HeaderReconciler::new(false);
        let row = Row::from(vec!["x", "y"]);
        h.absorb(&row).unwrap();
        h.capture_header(&keys(&["a", "a"])).unwrap();
        assert!(h.is_empty());
        assert_eq!(h.project(&row), vec![Some("x"), Some("y")]);
    }

    #[test]
    fn named_key_cannot_shadow_a_positional_one() {
        let mut h = HeaderReconciler::new(true);
        h.absorb(&Row::from(vec!["x"])).unwrap();
        let err = h.absorb(&Row::from([("0", "y")])).unwrap_err();
        assert!(matches!(err, CsvFileError::DuplicateHeader { key } if key == "0"));
        assert_eq!(h.keys(), &[Key::Index(0)]);
        assert_eq!(h.state(), HeaderState::Accumulating);
    }

    #[test]
    fn parsed_header_cannot_shadow_added_positions() {
        let mut h = HeaderReconciler::new(true);
        h.absorb(&Row::from(vec!["x", "y"])).unwrap();
        let err = h.capture_header(&keys(&["id", "1"])).unwrap_err();
        assert!(matches!(err, CsvFileError::DuplicateHeader { key } if key == "1"));
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn mixed_keys_in_one_row_are_checked_by_name() {
        let mut record = crate::row::Record::new();
        record.set(0usize, "x");
        record.set("0", "y");
        let err = HeaderReconciler::new(true).absorb(&Row::from(record)).unwrap_err();
        assert!(matches!(err, CsvFileError::DuplicateHeader { key } if key == "0"));
    }

    #[test]
    fn field_rows_project_by_position() {
        let mut h = HeaderReconciler::new(true);
        let row = Row::from(vec!["x", "y"]);
        h.absorb(&row).unwrap();
        assert_eq!(h.keys(), &[Key::Index(0), Key::Index(1)]);
        assert_eq!(h.project(&row), vec![Some("x"), Some("y")]);
    }
}
