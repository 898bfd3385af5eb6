//! JSON renderer implementation.

use crate::error::{Error, Result};
use crate::model::Workbook;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Convert a Workbook to JSON: an object of sheet name to record array.
pub fn to_json(workbook: &Workbook, format: JsonFormat) -> Result<String> {
    let rendered = match format {
        JsonFormat::Compact => serde_json::to_string(workbook),
        JsonFormat::Pretty => serde_json::to_string_pretty(workbook),
    };
    rendered.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a Workbook to JSON with default formatting.
pub fn to_json_default(workbook: &Workbook) -> Result<String> {
    to_json(workbook, JsonFormat::Pretty)
}
