//! # unsheet
//!
//! Tolerant reader for `.xlsx` workbooks that turns every sheet into a list
//! of string records keyed by the sheet's header row.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unsheet::read_workbook;
//!
//! let workbook = read_workbook("pipeline.xlsx")?;
//!
//! if let Some(deals) = workbook.get("Merchant List") {
//!     for record in deals {
//!         println!("{:?}", record.get("deal_stage"));
//!     }
//! }
//!
//! for diagnostic in workbook.diagnostics() {
//!     eprintln!("warning: {}", diagnostic);
//! }
//! # Ok::<(), unsheet::Error>(())
//! ```
//!
//! ## Decoding rules
//!
//! - The first row of each sheet becomes the header; field names are trimmed,
//!   lower-cased and have whitespace replaced by `_`.
//! - Short rows are padded with empty strings, long rows are truncated to the
//!   header width.
//! - All values are strings; nothing is typed as number or date.
//! - Only an unreadable archive or a missing workbook manifest fails the read.
//!   Missing relationships, worksheet parts or shared strings shrink the
//!   result and are reported through [`Workbook::diagnostics`].
//!
//! ## Features
//!
//! - `parallel`: decode sheets on the rayon pool when
//!   [`ReadOptions::with_parallel`](xlsx::ReadOptions::with_parallel) is set

pub mod container;
pub mod error;
pub mod model;
pub mod render;
pub mod xlsx;

// Re-exports
pub use container::{Archive, Relationship, Relationships};
pub use error::{Error, Result};
pub use model::{
    normalize_header, CellValue, Diagnostic, Fallback, Record, RecordBuilder, Sheet, SheetTable,
    Workbook,
};
pub use xlsx::{ReadOptions, SheetNameCase, XlsxReader};

use std::path::Path;

/// Read a workbook file with default options.
///
/// # Example
///
/// ```no_run
/// use unsheet::read_workbook;
///
/// let workbook = read_workbook("pipeline.xlsx")?;
/// println!("Sheets: {:?}", workbook.sheet_names());
/// # Ok::<(), unsheet::Error>(())
/// ```
pub fn read_workbook(path: impl AsRef<Path>) -> Result<Workbook> {
    XlsxReader::open(path)?.read()
}

/// Read a workbook file with explicit options.
///
/// # Example
///
/// ```no_run
/// use unsheet::{read_workbook_with_options, ReadOptions};
///
/// let options = ReadOptions::new().preserve_sheet_names();
/// let workbook = read_workbook_with_options("pipeline.xlsx", &options)?;
/// # Ok::<(), unsheet::Error>(())
/// ```
pub fn read_workbook_with_options(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> Result<Workbook> {
    XlsxReader::open(path)?
        .with_options(options.clone())
        .read()
}

/// Read a workbook held in memory.
///
/// # Example
///
/// ```no_run
/// use unsheet::read_workbook_bytes;
///
/// let data = std::fs::read("pipeline.xlsx")?;
/// let workbook = read_workbook_bytes(&data)?;
/// # Ok::<(), unsheet::Error>(())
/// ```
pub fn read_workbook_bytes(data: &[u8]) -> Result<Workbook> {
    XlsxReader::from_bytes(data.to_vec())?.read()
}
