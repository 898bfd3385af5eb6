//! Workbook manifest (workbook.xml) parsing.

use crate::container::attr_string;
use crate::error::{Error, Result};
use quick_xml::events::Event;

/// A `<sheet>` entry of the workbook manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetDescriptor {
    /// Display name as authored
    pub name: String,
    /// Relationship id pointing at the worksheet part
    pub rel_id: String,
}

/// Extract sheet descriptors in declaration order.
///
/// A sheet without a `name` attribute is called `Sheet<N>`, `N` being its
/// 1-based position in the manifest.
pub fn parse_manifest(xml: &str) -> Result<Vec<SheetDescriptor>> {
    let mut sheets = Vec::new();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut rel_id = String::new();

                for attr in e.attributes().flatten() {
                    let key = attr.key;
                    match key.local_name().as_ref() {
                        b"name" => name = Some(attr_string(&attr)),
                        // r:id, whatever prefix the relationships namespace got
                        b"id" if key.prefix().is_some() => rel_id = attr_string(&attr),
                        _ => {}
                    }
                }

                let name = name.unwrap_or_else(|| format!("Sheet{}", sheets.len() + 1));
                sheets.push(SheetDescriptor { name, rel_id });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlParse(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}
