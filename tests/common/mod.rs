//! Synthetic .xlsx packages for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const WORKSHEET_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
pub const SHARED_STRINGS_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";

/// A cell to place in a generated worksheet.
#[derive(Clone)]
pub enum TestCell {
    /// `t="s"` with the given raw index text
    Shared(&'static str),
    /// Plain `<v>` value
    Number(&'static str),
    /// `t="inlineStr"`
    Inline(&'static str),
    /// Cell element without a value
    Blank,
}

pub fn worksheet(rows: &[Vec<TestCell>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        xml.push_str(&format!(r#"<row r="{}">"#, r + 1));
        for cell in row {
            match cell {
                TestCell::Shared(idx) => xml.push_str(&format!(r#"<c t="s"><v>{}</v></c>"#, idx)),
                TestCell::Number(v) => xml.push_str(&format!("<c><v>{}</v></c>", v)),
                TestCell::Inline(v) => {
                    xml.push_str(&format!(r#"<c t="inlineStr"><is><t>{}</t></is></c>"#, v))
                }
                TestCell::Blank => xml.push_str(r#"<c s="1"/>"#),
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

pub fn shared_strings(values: &[&str]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );
    for value in values {
        xml.push_str(&format!("<si><t>{}</t></si>", value));
    }
    xml.push_str("</sst>");
    xml
}

/// `(sheet name, relationship id)` pairs in declaration order.
pub fn manifest(sheets: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>"#,
    );
    for (i, (name, rel_id)) in sheets.iter().enumerate() {
        xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}" r:id="{}"/>"#,
            name,
            i + 1,
            rel_id
        ));
    }
    xml.push_str("</sheets></workbook>");
    xml
}

/// `(relationship id, type, target)` triples.
pub fn relationships(rels: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, rel_type, target) in rels {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, rel_type, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Zip the given parts into an in-memory package.
pub fn package(parts: &[(&str, String)]) -> Vec<u8> {
    let mut buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        for (name, content) in parts {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    buffer
}

/// The "Merchant List" workbook: one sheet, shared-string header and values.
pub fn merchant_list() -> Vec<u8> {
    use TestCell::*;
    package(&[
        ("xl/workbook.xml", manifest(&[("Merchant List", "rId1")])),
        (
            "xl/_rels/workbook.xml.rels",
            relationships(&[
                ("rId1", WORKSHEET_REL, "worksheets/sheet1.xml"),
                ("rId2", SHARED_STRINGS_REL, "sharedStrings.xml"),
            ]),
        ),
        (
            "xl/sharedStrings.xml",
            shared_strings(&["Deal Stage", "Region", "Live", "EMEA", "Lost"]),
        ),
        (
            "xl/worksheets/sheet1.xml",
            worksheet(&[
                vec![Shared("0"), Shared("1")],
                vec![Shared("2"), Shared("3")],
                vec![Shared("4")],
            ]),
        ),
    ])
}
