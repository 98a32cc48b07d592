//! Testing utilities for code that works with CSV documents.
//!
//! - **Assertions**: compare document rows with expected rows
//! - **Fixtures**: small, well-known CSV texts and row sets
//! - **Mock I/O**: temporary CSV files that clean up after themselves
//!
//! # Quick Start
//!
//! ```
//! use lazy_csv::{CsvDocument, Dialect};
//! use lazy_csv::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let file = mock_csv_file(PEOPLE_CSV)?;
//! let mut doc = CsvDocument::from_path(file.path(), Dialect::default())?;
//! assert_rows_equal(doc.materialize()?, &people_rows());
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod mock_io;

pub use assertions::*;
pub use fixtures::*;
pub use mock_io::*;
