//! Scratch files for tests that need a real path.

use std::io::{self, Write};
use tempfile::NamedTempFile;

/// Create a temporary `.csv` file holding `contents`. The file is removed when
/// the returned handle is dropped.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created or written.
///
/// # Example
///
/// ```
/// use lazy_csv::testing::mock_csv_file;
///
/// let file = mock_csv_file("a,b\n1,2\n").unwrap();
/// assert_eq!(std::fs::read_to_string(file.path()).unwrap(), "a,b\n1,2\n");
/// ```
pub fn mock_csv_file(contents: &str) -> io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("lazy_csv_")
        .suffix(".csv")
        .tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}
