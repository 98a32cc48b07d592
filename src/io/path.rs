//! Path-backed byte sources and sinks.
//!
//! These are the only places the crate touches the filesystem. Both sides go
//! through [`compression`](super::compression), so a `.gz` path is
//! decompressed on read and compressed on write.

use super::compression::{auto_detect_reader, auto_detect_writer};
use crate::error::{CsvFileError, Result};
use std::fs::{File, create_dir_all};
use std::io::{Read, Write};
use std::path::Path;

/// Open `path` for reading.
///
/// # Errors
/// [`CsvFileError::InvalidSource`] if the file does not exist, is not a
/// regular file, or cannot be opened.
pub fn open_source(path: &Path) -> Result<Box<dyn Read>> {
    let name = path.display().to_string();
    let meta = std::fs::metadata(path)
        .map_err(|_| CsvFileError::invalid_source(&name, "file does not exist"))?;
    if !meta.is_file() {
        return Err(CsvFileError::invalid_source(&name, "not a regular file"));
    }
    let f = File::open(path)
        .map_err(|e| CsvFileError::invalid_source(&name, format!("cannot open: {e}")))?;
    auto_detect_reader(f, path)
        .map_err(|e| CsvFileError::invalid_source(&name, format!("cannot decode: {e}")))
}

/// Create (or truncate) `path` for writing, creating parent directories.
///
/// # Errors
/// [`CsvFileError::DestinationUnwritable`] if the directories or the file
/// cannot be created.
pub fn create_sink(path: &Path) -> Result<Box<dyn Write>> {
    let unwritable = |source| CsvFileError::DestinationUnwritable {
        destination: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).map_err(unwritable)?;
    }
    let f = File::create(path).map_err(unwritable)?;
    auto_detect_writer(f, path).map_err(unwritable)
}
