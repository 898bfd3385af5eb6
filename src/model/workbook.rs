//! Workbook model: sheets in declaration order plus read diagnostics.

use super::SheetTable;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;

/// Something that went wrong while reading, without aborting the read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The workbook relationship part is absent; no sheet could be located.
    RelationshipsMissing { path: String },
    /// The workbook relationship part could not be parsed.
    RelationshipsMalformed { path: String, message: String },
    /// A sheet's relationship id has no usable target; the sheet is omitted.
    UnresolvedRelationship { sheet: String, rel_id: String },
    /// A sheet's worksheet part is absent; the sheet reads as empty.
    SheetPartMissing { sheet: String, part: String },
    /// A worksheet part could not be parsed; the sheet reads as empty.
    SheetMalformed { sheet: String, message: String },
    /// The shared string table could not be parsed and was ignored.
    SharedStringsMalformed { path: String, message: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::RelationshipsMissing { path } => {
                write!(f, "workbook relationships missing ({})", path)
            }
            Diagnostic::RelationshipsMalformed { path, message } => {
                write!(f, "workbook relationships unreadable ({}): {}", path, message)
            }
            Diagnostic::UnresolvedRelationship { sheet, rel_id } => {
                write!(f, "sheet '{}' skipped: relationship '{}' not found", sheet, rel_id)
            }
            Diagnostic::SheetPartMissing { sheet, part } => {
                write!(f, "sheet '{}' is empty: part {} missing", sheet, part)
            }
            Diagnostic::SheetMalformed { sheet, message } => {
                write!(f, "sheet '{}' is empty: {}", sheet, message)
            }
            Diagnostic::SharedStringsMalformed { path, message } => {
                write!(f, "shared strings ignored ({}): {}", path, message)
            }
        }
    }
}

/// A named sheet table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: String,
    pub table: SheetTable,
}

/// Every decoded sheet of a workbook, in the order the workbook declares them.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    diagnostics: Vec<Diagnostic>,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sheet; a sheet with the same name is replaced in place.
    pub fn insert(&mut self, name: impl Into<String>, table: SheetTable) {
        let name = name.into();
        match self.sheets.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.table = table,
            None => self.sheets.push(Sheet { name, table }),
        }
    }

    /// Look a sheet up by name, ignoring case and surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&SheetTable> {
        let wanted = name.trim().to_lowercase();
        self.sheets
            .iter()
            .find(|s| s.name.trim().to_lowercase() == wanted)
            .map(|s| &s.table)
    }

    /// The first declared sheet.
    pub fn first(&self) -> Option<&Sheet> {
        self.sheets.first()
    }

    /// Sheet names in declaration order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Iterate over sheets in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sheet> {
        self.sheets.iter()
    }

    /// Number of sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Problems absorbed while reading.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Record an absorbed problem.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Consume the workbook into its sheets.
    pub fn into_sheets(self) -> Vec<Sheet> {
        self.sheets
    }
}

impl<'a> IntoIterator for &'a Workbook {
    type Item = &'a Sheet;
    type IntoIter = std::slice::Iter<'a, Sheet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.iter()
    }
}

impl Serialize for Workbook {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sheets.len()))?;
        for sheet in &self.sheets {
            map.serialize_entry(&sheet.name, &sheet.table)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    fn table(header: &[&str], rows: &[&[&str]]) -> SheetTable {
        let mut all = vec![header
            .iter()
            .map(|h| CellValue::Literal(h.to_string()))
            .collect::<Vec<_>>()];
        for row in rows {
            all.push(row.iter().map(|v| CellValue::Literal(v.to_string())).collect());
        }
        SheetTable::from_rows(all)
    }

    #[test]
    fn test_insert_keeps_declaration_order() {
        let mut wb = Workbook::new();
        wb.insert("summary", table(&["a"], &[]));
        wb.insert("data", table(&["b"], &[]));
        assert_eq!(wb.sheet_names(), ["summary", "data"]);
        assert_eq!(wb.first().map(|s| s.name.as_str()), Some("summary"));
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut wb = Workbook::new();
        wb.insert("data", table(&["a"], &[&["1"]]));
        wb.insert("other", table(&["a"], &[]));
        wb.insert("data", table(&["b"], &[&["2"], &["3"]]));

        assert_eq!(wb.len(), 2);
        assert_eq!(wb.sheet_names(), ["data", "other"]);
        assert_eq!(wb.get("data").unwrap().len(), 2);
    }

    #[test]
    fn test_get_ignores_case_and_whitespace() {
        let mut wb = Workbook::new();
        wb.insert("Merchant List", table(&["a"], &[&["1"]]));
        assert!(wb.get("merchant list").is_some());
        assert!(wb.get("  MERCHANT LIST ").is_some());
        assert!(wb.get("merchant").is_none());
    }

    #[test]
    fn test_serialize_workbook() {
        let mut wb = Workbook::new();
        wb.insert("b", table(&["X"], &[&["1"]]));
        wb.insert("a", table(&["Y"], &[]));
        let json = serde_json::to_string(&wb).unwrap();
        assert_eq!(json, r#"{"b":[{"x":"1"}],"a":[]}"#);
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::UnresolvedRelationship {
            sheet: "data".into(),
            rel_id: "rId7".into(),
        };
        assert_eq!(
            diag.to_string(),
            "sheet 'data' skipped: relationship 'rId7' not found"
        );
    }
}
