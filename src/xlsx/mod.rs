//! XLSX (Excel) workbook reading.
//!
//! Reading happens in four steps: resolve the sheets declared by the manifest
//! to worksheet parts, load the shared string table, decode each worksheet
//! into rows, and promote each sheet's first row to record keys.
//!
//! # Example
//!
//! ```no_run
//! use unsheet::xlsx::{ReadOptions, XlsxReader};
//!
//! let reader = XlsxReader::open("pipeline.xlsx")?
//!     .with_options(ReadOptions::new().preserve_sheet_names());
//! let workbook = reader.read()?;
//!
//! for sheet in &workbook {
//!     println!("{}: {} records", sheet.name, sheet.table.len());
//! }
//! # Ok::<(), unsheet::Error>(())
//! ```

mod manifest;
mod options;
mod reader;
mod resolver;
mod shared_strings;
mod sheet;

pub use manifest::{parse_manifest, SheetDescriptor};
pub use options::{ReadOptions, SheetNameCase};
pub use reader::XlsxReader;
pub use resolver::{locate_manifest, resolve_sheets, ResolvedSheet, WorkbookLayout, DEFAULT_MANIFEST_PATH};
pub use shared_strings::SharedStringTable;
pub use sheet::{decode_sheet, parse_rows, RawCell, RawRow};
