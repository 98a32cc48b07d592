//! Dialect configuration and the bridge to the `csv` tokenizer.
//!
//! A [`Dialect`] carries the character-level rules (separator, enclosure,
//! escape) plus the header-row switch. It is fixed once a document is built.
//! Quoting is delegated to the `csv` crate; this module translates a dialect
//! into configured [`csv::ReaderBuilder`] and [`csv::WriterBuilder`] values.
//!
//! Inside an enclosed field the reader takes the escape byte to mean "the next
//! byte is literal". The writer mirrors that: enclosures are written as
//! escape + enclosure, and escape bytes in a value are written twice (which
//! forces the field to be enclosed). When the escape and the enclosure are the
//! same byte, enclosures are simply doubled.
//!
//! Dialects are serde-enabled, so they can be loaded from a configuration
//! file. Missing fields fall back to the defaults:
//!
//! ```
//! use lazy_csv::Dialect;
//!
//! let d = Dialect::default().with_separator(b';');
//! assert_eq!(d.separator, b';');
//! assert_eq!(d.enclosure, b'"');
//! assert!(d.use_header_row);
//! ```

use std::borrow::Cow;

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use serde::{Deserialize, Serialize};

/// Default field separator.
pub const DEFAULT_SEPARATOR: u8 = b',';
/// Default enclosure (quote) character.
pub const DEFAULT_ENCLOSURE: u8 = b'"';
/// Default escape character.
pub const DEFAULT_ESCAPE: u8 = b'\\';
/// Whether the first record is a header by default.
pub const DEFAULT_USE_HEADER_ROW: bool = true;

/// Delimited-text dialect.
///
/// The separator, enclosure and escape are single ASCII bytes, which is the
/// unit the tokenizer operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Dialect {
    /// Byte separating fields within a record.
    pub separator: u8,
    /// Byte used to enclose fields containing special characters.
    pub enclosure: u8,
    /// Byte escaping an enclosure inside an enclosed field.
    pub escape: u8,
    /// Treat the first record as column names.
    pub use_header_row: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            enclosure: DEFAULT_ENCLOSURE,
            escape: DEFAULT_ESCAPE,
            use_header_row: DEFAULT_USE_HEADER_ROW,
        }
    }
}

impl Dialect {
    /// Default dialect with header mode switched off.
    #[must_use]
    pub fn headerless() -> Self {
        Self::default().with_header_row(false)
    }

    #[must_use]
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_enclosure(mut self, enclosure: u8) -> Self {
        self.enclosure = enclosure;
        self
    }

    #[must_use]
    pub fn with_escape(mut self, escape: u8) -> Self {
        self.escape = escape;
        self
    }

    #[must_use]
    pub fn with_header_row(mut self, use_header_row: bool) -> Self {
        self.use_header_row = use_header_row;
        self
    }

    /// Whether the escape byte is distinct from the enclosure.
    fn escapes_enclosures(&self) -> bool {
        self.escape != self.enclosure
    }

    /// Reader configured for this dialect.
    ///
    /// Header handling is done by the document, so the reader never consumes a
    /// header itself, and it accepts records of any width.
    pub(crate) fn reader_builder(&self) -> ReaderBuilder {
        let mut b = ReaderBuilder::new();
        b.has_headers(false)
            .flexible(true)
            .delimiter(self.separator)
            .quote(self.enclosure)
            .escape(self.escapes_enclosures().then_some(self.escape))
            .double_quote(true);
        b
    }

    /// Writer configured for this dialect. Lines end with `\n`.
    pub(crate) fn writer_builder(&self) -> WriterBuilder {
        let mut b = WriterBuilder::new();
        b.has_headers(false)
            .flexible(true)
            .delimiter(self.separator)
            .quote(self.enclosure)
            .escape(self.escape)
            .double_quote(!self.escapes_enclosures())
            .terminator(Terminator::Any(b'\n'));
        b
    }

    /// Field bytes as they must be handed to the writer so that the reader
    /// gives back `field` unchanged: every escape byte is doubled.
    pub(crate) fn encode_field<'a>(&self, field: &'a [u8]) -> Cow<'a, [u8]> {
        if !self.escapes_enclosures() || !field.contains(&self.escape) {
            return Cow::Borrowed(field);
        }
        let mut out = Vec::with_capacity(field.len() + 2);
        for &b in field {
            if b == self.escape {
                out.push(b);
            }
            out.push(b);
        }
        Cow::Owned(out)
    }
}
