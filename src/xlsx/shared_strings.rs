//! XLSX shared strings parsing.

use crate::container::Archive;
use crate::error::{Error, Result};
use quick_xml::events::Event;

/// Shared strings table.
///
/// Index `n` is the `n`-th `<si>` entry of the part; entries without text are
/// kept as empty strings so later indices stay aligned.
#[derive(Debug, Clone, Default)]
pub struct SharedStringTable {
    strings: Vec<String>,
}

impl SharedStringTable {
    /// Load the table stored at `path`.
    ///
    /// A workbook without a shared strings part is valid (all its text is
    /// inline), so an absent part yields an empty table.
    pub fn load(archive: &Archive, path: &str) -> Result<Self> {
        if !archive.contains(path) {
            tracing::debug!(part = %path, "no shared strings part");
            return Ok(Self::default());
        }
        let xml = archive.read_xml(path)?;
        Self::parse(&xml)
    }

    /// Parse shared strings from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut strings = Vec::new();
        let mut reader = quick_xml::Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic hints (<rPh>) carry their own <t> runs that are not part
        // of the displayed text.
        let mut in_phonetic = false;
        let mut current_text = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_text.clear();
                    }
                    b"rPh" if in_si => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::Text(e)) if in_t => {
                    let text = e.unescape().unwrap_or_default();
                    current_text.push_str(&text);
                }
                Ok(Event::CData(e)) if in_t => {
                    current_text.push_str(&String::from_utf8_lossy(&e));
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(std::mem::take(&mut current_text));
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Get the count of shared strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl FromIterator<String> for SharedStringTable {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().collect(),
        }
    }
}
