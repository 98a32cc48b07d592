//! Error types for CSV document operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CsvFileError>;

/// Errors raised while creating, parsing, or saving a [`CsvDocument`](crate::CsvDocument).
///
/// The four domain conditions (`InvalidSource`, `DestinationUnwritable`,
/// `DuplicateHeader`, `RowTooWide`) are raised by the document itself; the
/// remaining variants wrap failures of the underlying reader, writer, or
/// tokenizer unchanged.
///
/// # Examples
///
/// ```
/// use lazy_csv::CsvFileError;
///
/// let err = CsvFileError::RowTooWide { row: 2, expected: 2, actual: 3 };
/// assert_eq!(
///     err.to_string(),
///     "row 2 has 3 fields but the header only has 2 columns"
/// );
/// ```
#[derive(Debug, Error)]
pub enum CsvFileError {
    /// The supplied path or handle cannot be used as a byte stream.
    #[error("invalid source '{source_name}': {reason}")]
    InvalidSource {
        /// Display name of the source (usually a path).
        source_name: String,
        /// Why the source was rejected.
        reason: String,
    },

    /// The destination could not be opened for writing.
    #[error("cannot write to {}: {source}", .destination.display())]
    DestinationUnwritable {
        /// Destination that was requested.
        destination: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A header line contains the same key more than once.
    #[error("duplicate header key '{key}'")]
    DuplicateHeader {
        /// The repeated key.
        key: String,
    },

    /// A data row carries more fields than the header has columns.
    #[error("row {row} has {actual} fields but the header only has {expected} columns")]
    RowTooWide {
        /// Data row number (1-based, header excluded).
        row: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of fields in the offending row.
        actual: usize,
    },

    /// The source stream was released after an earlier parse failure and
    /// cannot produce more rows.
    #[error("source stream was closed before the document was fully parsed")]
    SourceClosed,

    /// I/O error from the byte source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error from the CSV tokenizer or field encoder.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CsvFileError {
    pub(crate) fn invalid_source(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSource {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}
