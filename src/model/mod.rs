//! Decoded workbook model.
//!
//! The XLSX readers produce [`CellValue`]s; the assembler collapses them into
//! header-keyed [`Record`]s grouped per sheet inside a [`Workbook`].

mod cell;
mod table;
mod workbook;

pub use cell::*;
pub use table::*;
pub use workbook::*;
