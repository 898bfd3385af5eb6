//! Output rendering for decoded workbooks.
//!
//! # Example
//!
//! ```no_run
//! use unsheet::{read_workbook, render::*};
//!
//! let workbook = read_workbook("pipeline.xlsx")?;
//! let json = to_json(&workbook, JsonFormat::Pretty)?;
//! # Ok::<(), unsheet::Error>(())
//! ```

mod json;

pub use json::{to_json, to_json_default, JsonFormat};
