//! The lazy CSV document.
//!
//! A [`CsvDocument`] is created from rows, a byte buffer, a reader, or a path,
//! and moves through three states:
//!
//! - [`ParseState::Unparsed`]: nothing has been read from the source yet.
//! - [`ParseState::Parsing`]: at least one record has been pulled; rows read
//!   so far are kept in the document.
//! - [`ParseState::Materialized`]: the source is exhausted (or rows were
//!   supplied directly). Final for the lifetime of the document.
//!
//! Iterating an unmaterialized document pulls one record per step from the
//! shared cursor, so only one consumer should iterate at a time. Once
//! materialized, iteration replays the stored rows without touching the
//! source again.

use crate::dialect::Dialect;
use crate::error::{CsvFileError, Result};
use crate::header::HeaderReconciler;
use crate::io::path::{create_sink, open_source};
use crate::row::{Key, Record, Row};
use crate::source::{Source, SourceKind};
use csv::StringRecord;
use std::io::{self, Read, Write};
use std::path::Path;

/// Parse progress of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseState {
    Unparsed,
    Parsing,
    Materialized,
}

/// A tabular document backed by rows, a buffer, or a stream.
///
/// # Examples
///
/// ```
/// use lazy_csv::{CsvDocument, Dialect};
///
/// # fn main() -> lazy_csv::Result<()> {
/// let mut doc = CsvDocument::from_buffer("id,name\n1,Anne\n2,Alex", Dialect::default());
/// let rows = doc.materialize()?;
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1].get("name"), Some("Alex"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CsvDocument {
    dialect: Dialect,
    source: Source,
    state: ParseState,
    rows: Vec<Row>,
    header: HeaderReconciler,
    /// Header line captured from the source; keys every parsed data record.
    parsed_header: Option<Vec<Key>>,
    record: StringRecord,
    records_read: usize,
}

impl Default for CsvDocument {
    fn default() -> Self {
        Self::empty(Dialect::default())
    }
}

impl CsvDocument {
    fn with_source(source: Source, state: ParseState, dialect: Dialect) -> Self {
        tracing::debug!(source = %source.kind(), header_row = dialect.use_header_row, "creating document");
        Self {
            header: HeaderReconciler::new(dialect.use_header_row),
            dialect,
            source,
            state,
            rows: Vec::new(),
            parsed_header: None,
            record: StringRecord::new(),
            records_read: 0,
        }
    }

    /// Empty, materialized document.
    #[must_use]
    pub fn empty(dialect: Dialect) -> Self {
        Self::with_source(Source::rows(), ParseState::Materialized, dialect)
    }

    /// Materialized document holding `rows`, each passed through [`add`](Self::add).
    ///
    /// # Errors
    /// [`CsvFileError::DuplicateHeader`] if a row repeats a key.
    pub fn from_rows<I, R>(rows: I, dialect: Dialect) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: Into<Row>,
    {
        let mut doc = Self::empty(dialect);
        for row in rows {
            doc.add(row)?;
        }
        Ok(doc)
    }

    /// Unparsed document over a byte stream.
    ///
    /// The stream is not read until rows are requested and is dropped once it
    /// is exhausted, fails, or the document is dropped. Ownership of a
    /// [`Read`] value already guarantees a readable handle, so this
    /// constructor cannot fail; use [`from_path`](Self::from_path) when the
    /// source may not exist.
    pub fn from_reader<R: Read + 'static>(reader: R, dialect: Dialect) -> Self {
        Self::with_source(Source::stream(Box::new(reader)), ParseState::Unparsed, dialect)
    }

    /// Unparsed document over raw delimited text.
    pub fn from_buffer(text: impl Into<Vec<u8>>, dialect: Dialect) -> Self {
        Self::with_source(Source::buffer(text.into()), ParseState::Unparsed, dialect)
    }

    /// Unparsed document over a file, decompressed when the extension or the
    /// leading bytes name a supported codec.
    ///
    /// # Errors
    /// [`CsvFileError::InvalidSource`] if the file does not exist or cannot be
    /// opened.
    pub fn from_path(path: impl AsRef<Path>, dialect: Dialect) -> Result<Self> {
        let reader = open_source(path.as_ref())?;
        Ok(Self::with_source(Source::stream(reader), ParseState::Unparsed, dialect))
    }

    #[must_use]
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    #[must_use]
    pub fn state(&self) -> ParseState {
        self.state
    }

    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.state == ParseState::Materialized
    }

    #[must_use]
    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    /// Canonical header keys seen so far. Empty when header mode is off.
    #[must_use]
    pub fn headers(&self) -> &[Key] {
        self.header.keys()
    }

    /// Rows accumulated so far, without reading further from the source.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row. In header mode its keys are merged into the canonical
    /// header first, so a bad row is rejected here rather than at save time.
    ///
    /// # Errors
    /// [`CsvFileError::DuplicateHeader`] if the row repeats a key.
    pub fn add(&mut self, row: impl Into<Row>) -> Result<()> {
        let row = row.into();
        self.header.absorb(&row)?;
        self.rows.push(row);
        Ok(())
    }

    /// Drain the source and return every row. Idempotent.
    ///
    /// # Errors
    /// Any error raised while parsing; see [`iter`](Self::iter).
    pub fn materialize(&mut self) -> Result<&[Row]> {
        while let Some(row) = self.next_row() {
            row?;
        }
        Ok(&self.rows)
    }

    /// Lazy row iterator.
    ///
    /// On a materialized document this replays the stored rows. Otherwise it
    /// pulls one record per step from the source, resuming wherever an
    /// earlier iteration stopped. The iterator ends after the first error.
    ///
    /// ```
    /// use lazy_csv::{CsvDocument, Dialect};
    ///
    /// # fn main() -> lazy_csv::Result<()> {
    /// let mut doc = CsvDocument::from_buffer("a,b\n1,2\n3,4", Dialect::default());
    /// let first = doc.iter().next().transpose()?;
    /// assert_eq!(first.unwrap().get("a"), Some("1"));
    /// assert!(!doc.is_materialized());
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter(&mut self) -> RowIter<'_> {
        let mode = if self.is_materialized() {
            IterMode::Replay(0)
        } else {
            IterMode::Pull
        };
        RowIter { doc: self, mode }
    }

    /// Pull, key, and store the next data row from the source.
    fn next_row(&mut self) -> Option<Result<Row>> {
        if self.is_materialized() {
            return None;
        }
        loop {
            match self.source.read_record(&self.dialect, &mut self.record) {
                Ok(true) => {}
                Ok(false) => {
                    self.state = ParseState::Materialized;
                    tracing::debug!(rows = self.rows.len(), "document materialized");
                    return None;
                }
                Err(e) => return Some(Err(e)),
            }
            self.state = ParseState::Parsing;
            self.records_read += 1;

            if self.dialect.use_header_row && self.parsed_header.is_none() {
                let keys: Vec<Key> = self.record.iter().map(Key::from).collect();
                if let Err(e) = self.header.capture_header(&keys) {
                    self.source.close();
                    return Some(Err(e));
                }
                tracing::debug!(columns = keys.len(), "captured header row");
                self.parsed_header = Some(keys);
                continue;
            }

            tracing::trace!(record = self.records_read, fields = self.record.len(), "parsed record");
            return match self.key_record() {
                Ok(row) => {
                    self.rows.push(row.clone());
                    Some(Ok(row))
                }
                Err(e) => {
                    self.source.close();
                    Some(Err(e))
                }
            };
        }
    }

    /// Turn the current raw record into a row.
    fn key_record(&self) -> Result<Row> {
        let Some(header) = self.parsed_header.as_deref() else {
            return Ok(Row::Fields(self.record.iter().map(str::to_string).collect()));
        };
        if self.record.len() > header.len() {
            return Err(CsvFileError::RowTooWide {
                row: self.records_read - 1,
                expected: header.len(),
                actual: self.record.len(),
            });
        }
        Ok(Row::Record(Record::zip_padded(header, self.record.iter())))
    }

    /// Materialize, then write the document to `path`.
    ///
    /// The source is fully parsed before the destination is touched, so a
    /// parse failure leaves an existing file intact. Parent directories are
    /// created, and the output is compressed when the extension asks for it.
    ///
    /// # Errors
    /// [`CsvFileError::DestinationUnwritable`] if the file cannot be created,
    /// plus any parse or write error.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.materialize()?;
        let sink = create_sink(path)?;
        tracing::debug!(destination = %path.display(), "saving document");
        self.write_to(sink)
    }

    /// Materialize, then write the header line (header mode with at least one
    /// known key) and one line per row projected onto the canonical header.
    ///
    /// # Errors
    /// Any parse error, or a failure of the underlying writer.
    pub fn write_to<W: Write>(&mut self, writer: W) -> Result<()> {
        self.materialize()?;
        let dialect = self.dialect;
        let mut wtr = dialect.writer_builder().from_writer(writer);
        if self.header.is_enabled() && !self.header.is_empty() {
            let names: Vec<String> = self.header.keys().iter().map(ToString::to_string).collect();
            wtr.write_record(names.iter().map(|n| dialect.encode_field(n.as_bytes())))?;
        }
        for row in &self.rows {
            let fields = self.header.project(row);
            wtr.write_record(
                fields
                    .into_iter()
                    .map(|f| dialect.encode_field(f.unwrap_or("").as_bytes())),
            )?;
        }
        wtr.flush()?;
        tracing::debug!(rows = self.rows.len(), columns = self.header.len(), "wrote document");
        Ok(())
    }

    /// Serialize the document into a string.
    ///
    /// # Errors
    /// Any parse error raised while materializing.
    pub fn to_csv_string(&mut self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

enum IterMode {
    Replay(usize),
    Pull,
    Done,
}

/// Iterator returned by [`CsvDocument::iter`].
pub struct RowIter<'a> {
    doc: &'a mut CsvDocument,
    mode: IterMode,
}

impl Iterator for RowIter<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.mode {
            IterMode::Replay(i) => {
                let row = self.doc.rows.get(i).cloned();
                self.mode = if row.is_some() {
                    IterMode::Replay(i + 1)
                } else {
                    IterMode::Done
                };
                row.map(Ok)
            }
            IterMode::Pull => {
                let next = self.doc.next_row();
                if !matches!(next, Some(Ok(_))) {
                    self.mode = IterMode::Done;
                }
                next
            }
            IterMode::Done => None,
        }
    }
}

impl<'a> IntoIterator for &'a mut CsvDocument {
    type Item = Result<Row>;
    type IntoIter = RowIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
