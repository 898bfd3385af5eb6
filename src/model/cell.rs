//! Resolved cell values.

/// Why a cell decoded to an empty string instead of real content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fallback {
    /// The cell carried no value element.
    NoValue,
    /// A shared-string index pointed past the end of the table.
    IndexOutOfRange(usize),
    /// A shared-string cell whose text was not a non-negative integer.
    InvalidIndex(String),
}

/// Outcome of decoding a single cell.
///
/// Lenient decoding never fails on a cell; instead the reason for an empty
/// value is kept here until the row is turned into a [`Record`](super::Record).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Text stored in the cell itself (numbers, inline strings, booleans...).
    Literal(String),
    /// Text looked up in the shared string table.
    Shared { index: usize, text: String },
    /// No usable content; reads as an empty string.
    Defaulted(Fallback),
}

impl CellValue {
    /// The cell text, empty for defaulted cells.
    pub fn as_str(&self) -> &str {
        match self {
            CellValue::Literal(text) | CellValue::Shared { text, .. } => text,
            CellValue::Defaulted(_) => "",
        }
    }

    /// Consume the value into its text.
    pub fn into_string(self) -> String {
        match self {
            CellValue::Literal(text) | CellValue::Shared { text, .. } => text,
            CellValue::Defaulted(_) => String::new(),
        }
    }

    /// Whether the value fell back to an empty string.
    pub fn is_defaulted(&self) -> bool {
        matches!(self, CellValue::Defaulted(_))
    }
}
