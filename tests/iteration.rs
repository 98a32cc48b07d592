use anyhow::Result;
use lazy_csv::testing::*;
use lazy_csv::{CsvDocument, CsvFileError, Dialect, ParseState, Row};
use std::cell::Cell;
use std::io::{self, Cursor, Read};
use std::rc::Rc;

/// Reader that counts reads and drops of the wrapped stream.
struct CountingReader {
    inner: Cursor<Vec<u8>>,
    reads: Rc<Cell<usize>>,
    drops: Rc<Cell<usize>>,
}

impl CountingReader {
    fn new(text: &str) -> (Self, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let reads = Rc::new(Cell::new(0));
        let drops = Rc::new(Cell::new(0));
        let r = Self {
            inner: Cursor::new(text.as_bytes().to_vec()),
            reads: reads.clone(),
            drops: drops.clone(),
        };
        (r, reads, drops)
    }
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.set(self.reads.get() + 1);
        self.inner.read(buf)
    }
}

impl Drop for CountingReader {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

#[test]
fn can_iterate() -> Result<()> {
    let mut doc = CsvDocument::from_buffer("as_number,as_string\n1,one\n2,two", Dialect::default());
    let rows: Vec<Row> = doc.iter().collect::<lazy_csv::Result<_>>()?;
    assert_rows_equal(
        &rows,
        &[
            Row::from([("as_number", "1"), ("as_string", "one")]),
            Row::from([("as_number", "2"), ("as_string", "two")]),
        ],
    );
    Ok(())
}

#[test]
fn materialize_is_idempotent() -> Result<()> {
    let mut doc = CsvDocument::from_buffer(PEOPLE_CSV, Dialect::default());
    let first = doc.materialize()?.to_vec();
    let second = doc.materialize()?.to_vec();
    assert_rows_equal(&first, &second);
    assert_eq!(first.len(), 2);
    Ok(())
}

#[test]
fn replay_does_not_touch_the_stream() -> Result<()> {
    let (reader, reads, _) = CountingReader::new(PEOPLE_CSV);
    let mut doc = CsvDocument::from_reader(reader, Dialect::default());
    doc.materialize()?;
    let reads_after_parse = reads.get();

    let replayed: Vec<Row> = doc.iter().collect::<lazy_csv::Result<_>>()?;
    let again: Vec<Row> = (&mut doc).into_iter().collect::<lazy_csv::Result<_>>()?;
    assert_rows_equal(&replayed, &people_rows());
    assert_rows_equal(&again, &people_rows());
    assert_eq!(reads.get(), reads_after_parse);
    Ok(())
}

#[test]
fn stream_is_not_read_until_rows_are_requested() {
    let (reader, reads, _) = CountingReader::new(PEOPLE_CSV);
    let doc = CsvDocument::from_reader(reader, Dialect::default());
    assert_eq!(reads.get(), 0);
    assert_eq!(doc.state(), ParseState::Unparsed);
}

#[test]
fn second_iterator_resumes_from_shared_cursor() -> Result<()> {
    let mut doc = CsvDocument::from_buffer("n\n1\n2\n3", Dialect::default());

    let first = doc.iter().next().transpose()?;
    assert_eq!(first.as_ref().and_then(|r| r.get("n")), Some("1"));

    let rest: Vec<Row> = doc.iter().collect::<lazy_csv::Result<_>>()?;
    assert_rows_equal(&rest, &[Row::from([("n", "2")]), Row::from([("n", "3")])]);

    // everything pulled so far was kept
    assert_eq!(doc.len(), 3);
    assert!(doc.is_materialized());
    assert_eq!(doc.iter().count(), 3);
    Ok(())
}

#[test]
fn stream_closes_once_on_completion() -> Result<()> {
    let (reader, _, drops) = CountingReader::new(PEOPLE_CSV);
    let mut doc = CsvDocument::from_reader(reader, Dialect::default());
    doc.materialize()?;
    assert_eq!(drops.get(), 1);
    drop(doc);
    assert_eq!(drops.get(), 1);
    Ok(())
}

#[test]
fn stream_closes_when_dropped_mid_iteration() -> Result<()> {
    let (reader, _, drops) = CountingReader::new("n\n1\n2\n3");
    let mut doc = CsvDocument::from_reader(reader, Dialect::default());
    assert!(doc.iter().next().is_some());
    assert_eq!(drops.get(), 0);
    drop(doc);
    assert_eq!(drops.get(), 1);
    Ok(())
}

#[test]
fn stream_closes_on_parse_error() {
    let (reader, _, drops) = CountingReader::new("id,data\n1,foo,bar\n2,baz\n");
    let mut doc = CsvDocument::from_reader(reader, Dialect::default());
    let err = doc.materialize().unwrap_err();
    assert!(matches!(err, CsvFileError::RowTooWide { .. }));
    assert_eq!(drops.get(), 1);
}

#[test]
fn iterator_stops_after_an_error() {
    let mut doc = CsvDocument::from_buffer("id\n1\n2,3\n4", Dialect::default());
    let items: Vec<_> = doc.iter().collect();
    assert_eq!(items.len(), 2);
    assert!(items[0].is_ok());
    assert!(matches!(items[1], Err(CsvFileError::RowTooWide { row: 2, .. })));
}

#[test]
fn wide_row_is_rejected() {
    let mut doc = CsvDocument::from_buffer("id,data\n1,foo,bar", Dialect::default());
    let err = doc.materialize().unwrap_err();
    assert!(matches!(
        err,
        CsvFileError::RowTooWide { row: 1, expected: 2, actual: 3 }
    ));
    assert!(doc.is_empty());
}

#[test]
fn short_row_is_padded_with_absent_values() -> Result<()> {
    let mut doc = CsvDocument::from_buffer("id,data\n1", Dialect::default());
    let rows = doc.materialize()?;
    assert_rows_equal(rows, &[Row::from(record(&[("id", Some("1")), ("data", None)]))]);
    Ok(())
}

#[test]
fn duplicate_header_is_rejected_at_capture() {
    let mut doc = CsvDocument::from_buffer("id,name,id\n1,a,2", Dialect::default());
    let err = doc.iter().next().unwrap().unwrap_err();
    assert!(matches!(err, CsvFileError::DuplicateHeader { key } if key == "id"));
    assert!(doc.is_empty());
    assert!(doc.headers().is_empty());
}

#[test]
fn duplicate_fields_are_fine_without_header_mode() -> Result<()> {
    let mut doc = CsvDocument::from_buffer("id,name,id\n1,a,2", Dialect::headerless());
    assert_eq!(doc.materialize()?.len(), 2);
    Ok(())
}

#[test]
fn header_only_source_has_header_and_no_rows() -> Result<()> {
    let mut doc = CsvDocument::from_buffer("id,name\n", Dialect::default());
    assert!(doc.materialize()?.is_empty());
    assert_header(doc.headers(), &["id", "name"]);
    Ok(())
}
