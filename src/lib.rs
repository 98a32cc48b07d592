//! # lazy-csv
//!
//! A **lazy, header-aware CSV document** that reads the same way whether its
//! rows come from memory, a byte buffer, or a stream, and that writes them back
//! out as a rectangular delimited-text table.
//!
//! ## Key Features
//!
//! - **One document, three origins** - in-memory rows, raw text, any [`std::io::Read`]
//! - **Lazy parsing** - records are pulled one at a time and kept for replay
//! - **Header reconciliation** - rows with different keys share one canonical
//!   header in first-seen order
//! - **Strict widths** - data rows wider than the header are rejected, shorter
//!   ones are padded with absent values
//! - **Configurable dialect** - separator, enclosure, escape, header mode
//! - **Transparent compression** - `.gz`, `.zst`, `.bz2`, `.xz` paths (feature flags)
//!
//! ## Quick Start
//!
//! ```
//! use lazy_csv::{CsvDocument, Dialect};
//!
//! # fn main() -> lazy_csv::Result<()> {
//! let mut doc = CsvDocument::empty(Dialect::default());
//! doc.add([("a", "1"), ("b", "2")])?;
//! doc.add([("b", "3"), ("c", "4")])?;
//!
//! assert_eq!(doc.to_csv_string()?, "a,b,c\n1,2,\n,3,4\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Documents
//!
//! A [`CsvDocument`] is built with one of:
//! - [`CsvDocument::empty`] / [`CsvDocument::from_rows`] - materialized from the start
//! - [`CsvDocument::from_buffer`] - raw text, wrapped in a reader on first use
//! - [`CsvDocument::from_reader`] - any byte stream
//! - [`CsvDocument::from_path`] - a file, decompressed if needed
//!
//! Rows are read through [`CsvDocument::iter`] (lazy) or
//! [`CsvDocument::materialize`] (drain everything). The document tracks its
//! progress in a [`ParseState`].
//!
//! ### Rows
//!
//! In header mode every row is a [`Record`]: an ordered mapping from [`Key`]
//! to an optional value. With header mode off rows are plain field lists
//! ([`Row::Fields`]).
//!
//! ### Header reconciliation
//!
//! The [`HeaderReconciler`] keeps the canonical key sequence. The first header
//! line (or the first added row) seeds it, later keys are appended, and saving
//! projects every row onto it.
//!
//! ## Feature Flags
//!
//! - `compression-gzip`, `compression-zstd`, `compression-bzip2`,
//!   `compression-xz` - codecs for path-based sources and sinks (all default)
//!
//! ## Module Overview
//!
//! - [`document`] - the document and its row iterator
//! - [`header`] - canonical header keys, uniqueness, projection
//! - [`row`] - keys, records, rows
//! - [`dialect`] - dialect configuration
//! - [`io`] - path-backed sources and sinks, compression
//! - [`testing`] - helpers for tests that use documents

pub mod dialect;
pub mod document;
pub mod error;
pub mod header;
pub mod io;
pub mod row;
mod source;
pub mod testing;

pub use dialect::Dialect;
pub use document::{CsvDocument, ParseState, RowIter};
pub use error::{CsvFileError, Result};
pub use header::{HeaderReconciler, HeaderState};
pub use row::{Key, Record, Row};
pub use source::SourceKind;
