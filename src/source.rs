//! Where a document's rows come from.
//!
//! A [`Source`] owns the origin of a document: nothing to read (rows were
//! supplied directly), a raw byte buffer, or a byte stream. Buffers and
//! streams are only wrapped in a tokenizer on the first read, and the
//! underlying stream is dropped (closed) as soon as it is exhausted, fails, or
//! the owning document goes away.

use crate::dialect::Dialect;
use crate::error::{CsvFileError, Result};
use csv::StringRecord;
use std::fmt;
use std::io::{Cursor, Read};

/// Kind of origin a document was created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Rows supplied in memory.
    Rows,
    /// Raw delimited text held in memory.
    Buffer,
    /// A byte stream (file, socket, pipe, ...).
    Stream,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Rows => "rows",
            SourceKind::Buffer => "buffer",
            SourceKind::Stream => "stream",
        })
    }
}

enum Unopened {
    Buffer(Vec<u8>),
    Stream(Box<dyn Read>),
}

enum Handle {
    /// Not opened yet.
    Pending(Unopened),
    Open(csv::Reader<Box<dyn Read>>),
    Closed,
}

/// Owned origin of a document with a lazily opened record reader.
pub(crate) struct Source {
    kind: SourceKind,
    handle: Handle,
}

impl Source {
    pub(crate) fn rows() -> Self {
        Self {
            kind: SourceKind::Rows,
            handle: Handle::Closed,
        }
    }

    pub(crate) fn buffer(bytes: Vec<u8>) -> Self {
        Self {
            kind: SourceKind::Buffer,
            handle: Handle::Pending(Unopened::Buffer(bytes)),
        }
    }

    pub(crate) fn stream(reader: Box<dyn Read>) -> Self {
        Self {
            kind: SourceKind::Stream,
            handle: Handle::Pending(Unopened::Stream(reader)),
        }
    }

    pub(crate) fn kind(&self) -> SourceKind {
        self.kind
    }

    /// Whether the underlying stream has been released.
    pub(crate) fn is_closed(&self) -> bool {
        matches!(self.handle, Handle::Closed)
    }

    /// Read the next physical record into `record`.
    ///
    /// Returns `Ok(false)` once the source is exhausted. The stream is
    /// released on exhaustion and on any error.
    pub(crate) fn read_record(&mut self, dialect: &Dialect, record: &mut StringRecord) -> Result<bool> {
        if self.kind == SourceKind::Rows {
            return Ok(false);
        }
        self.handle = match std::mem::replace(&mut self.handle, Handle::Closed) {
            Handle::Pending(pending) => self.open(pending, dialect),
            other => other,
        };
        let Handle::Open(reader) = &mut self.handle else {
            return Err(CsvFileError::SourceClosed);
        };
        match reader.read_record(record) {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.close();
                Ok(false)
            }
            Err(e) => {
                self.close();
                Err(e.into())
            }
        }
    }

    fn open(&self, pending: Unopened, dialect: &Dialect) -> Handle {
        let bytes: Box<dyn Read> = match pending {
            Unopened::Buffer(buf) => Box::new(Cursor::new(buf)),
            Unopened::Stream(s) => s,
        };
        tracing::debug!(source = %self.kind, "opening record reader");
        Handle::Open(dialect.reader_builder().from_reader(bytes))
    }

    /// Release the underlying stream. Safe to call more than once.
    pub(crate) fn close(&mut self) {
        if !self.is_closed() {
            tracing::debug!(source = %self.kind, "closing source");
            self.handle = Handle::Closed;
        }
    }
}

impl Drop for Source {
    fn drop(&mut self) {
        if !self.is_closed() {
            tracing::warn!(source = %self.kind, "source dropped before it was fully read");
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let handle = match self.handle {
            Handle::Pending(_) => "pending",
            Handle::Open(_) => "open",
            Handle::Closed => "closed",
        };
        f.debug_struct("Source")
            .field("kind", &self.kind)
            .field("handle", &handle)
            .finish()
    }
}
