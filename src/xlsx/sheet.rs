//! Worksheet decoding.

use super::shared_strings::SharedStringTable;
use crate::container::{attr_string, Archive};
use crate::error::{Error, Result};
use crate::model::{CellValue, Fallback};
use quick_xml::events::Event;

/// A cell as stored in the worksheet part, before shared-string lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    /// Text of the value element (`<v>`) or inline string; `None` when the
    /// cell has neither.
    pub text: Option<String>,
    /// The cell's `t` attribute
    pub type_tag: Option<String>,
}

/// Cells of one row, in document order.
pub type RawRow = Vec<RawCell>;

impl RawCell {
    /// Resolve the cell against the shared string table.
    pub fn resolve(self, strings: &SharedStringTable) -> CellValue {
        let Some(text) = self.text else {
            return CellValue::Defaulted(Fallback::NoValue);
        };

        if self.type_tag.as_deref() != Some("s") {
            return CellValue::Literal(text);
        }

        let digits = text.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return CellValue::Defaulted(Fallback::InvalidIndex(text));
        }
        match digits.parse::<usize>() {
            Ok(index) => match strings.get(index) {
                Some(shared) => CellValue::Shared {
                    index,
                    text: shared.to_string(),
                },
                None => CellValue::Defaulted(Fallback::IndexOutOfRange(index)),
            },
            // too large for usize, so certainly past the end of the table
            Err(_) => CellValue::Defaulted(Fallback::InvalidIndex(text)),
        }
    }
}

/// Parse worksheet XML into raw rows.
///
/// Cells are kept in encounter order; cell references (`r="C4"`) are not used
/// to re-insert skipped columns. Rows without any cell element are skipped
/// until the first row with cells; after that they are kept as empty rows.
pub fn parse_rows(xml: &str) -> Result<Vec<RawRow>> {
    let mut rows = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut current_row: Option<RawRow> = None;
    let mut current_cell: Option<RawCell> = None;
    let mut in_value = false;
    let mut in_inline = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"row" => current_row = Some(Vec::new()),
                b"c" if current_row.is_some() => {
                    current_cell = Some(RawCell {
                        text: None,
                        type_tag: cell_type(&e),
                    });
                }
                b"v" if current_cell.is_some() => {
                    in_value = true;
                    set_text(&mut current_cell);
                }
                b"is" if current_cell.is_some() => {
                    in_inline = true;
                    set_text(&mut current_cell);
                }
                b"rPh" if in_inline => in_phonetic = true,
                b"t" if in_inline && !in_phonetic => in_value = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"row" if !rows.is_empty() => rows.push(Vec::new()),
                b"c" => {
                    if let Some(row) = current_row.as_mut() {
                        row.push(RawCell {
                            text: None,
                            type_tag: cell_type(&e),
                        });
                    }
                }
                b"v" | b"is" if current_cell.is_some() => set_text(&mut current_cell),
                _ => {}
            },
            Ok(Event::Text(e)) if in_value => {
                let text = e.unescape().unwrap_or_default();
                push_text(&mut current_cell, &text);
            }
            Ok(Event::CData(e)) if in_value => {
                push_text(&mut current_cell, &String::from_utf8_lossy(&e));
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"row" => {
                    if let Some(row) = current_row.take() {
                        if !row.is_empty() || !rows.is_empty() {
                            rows.push(row);
                        }
                    }
                }
                b"c" => {
                    if let (Some(row), Some(cell)) = (current_row.as_mut(), current_cell.take()) {
                        row.push(cell);
                    }
                    in_value = false;
                    in_inline = false;
                    in_phonetic = false;
                }
                b"v" => in_value = false,
                b"t" if in_inline => in_value = false,
                b"rPh" => in_phonetic = false,
                b"is" => in_inline = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(rows)
}

fn cell_type(e: &quick_xml::events::BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == b"t")
        .map(|attr| attr_string(&attr))
}

fn set_text(cell: &mut Option<RawCell>) {
    if let Some(cell) = cell.as_mut() {
        cell.text.get_or_insert_with(String::new);
    }
}

fn push_text(cell: &mut Option<RawCell>, text: &str) {
    if let Some(cell) = cell.as_mut() {
        cell.text.get_or_insert_with(String::new).push_str(text);
    }
}

/// Decode one worksheet part into resolved rows.
///
/// Fails with [`Error::SheetPartMissing`] when `part_path` is not in the
/// archive and with [`Error::XmlParse`] when the part is malformed.
pub fn decode_sheet(
    archive: &Archive,
    part_path: &str,
    strings: &SharedStringTable,
) -> Result<Vec<Vec<CellValue>>> {
    if !archive.contains(part_path) {
        return Err(Error::SheetPartMissing(part_path.to_string()));
    }

    let xml = archive.read_xml(part_path)?;
    let rows = parse_rows(&xml)?
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.resolve(strings)).collect())
        .collect();
    Ok(rows)
}
