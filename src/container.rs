//! ZIP container access for OOXML spreadsheet packages.

use crate::error::{Error, Result};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Upper bound on the buffer reserved up front for a part.
const PREALLOC_LIMIT: u64 = 1 << 20;

/// A relationship entry from a .rels file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative or absolute)
    pub target: String,
    /// Whether the target is external
    pub external: bool,
}

/// Collection of relationships parsed from a .rels file.
///
/// Entries keep document order; a repeated id resolves to its last entry.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
    by_id: HashMap<String, usize>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id).map(|&idx| &self.entries[idx])
    }

    /// Get relationships by type, in document order.
    pub fn get_by_type(&self, rel_type: &str) -> Vec<&Relationship> {
        self.entries
            .iter()
            .filter(|r| r.rel_type == rel_type)
            .collect()
    }

    /// First relationship whose type URI ends with `suffix`.
    ///
    /// Transitional and strict OOXML use different URI prefixes for the same
    /// relationship kind, so lookups match on the trailing segment.
    pub fn find_by_type_suffix(&self, suffix: &str) -> Option<&Relationship> {
        self.entries.iter().find(|r| r.rel_type.ends_with(suffix))
    }

    /// Add a relationship.
    pub fn add(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), self.entries.len());
        self.entries.push(rel);
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the content of a .rels part.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut rels = Relationships::new();
        if xml.trim().is_empty() {
            return Ok(rels);
        }

        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = String::new();
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut external = false;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = attr_string(&attr),
                            b"Type" => rel_type = attr_string(&attr),
                            b"Target" => target = attr_string(&attr),
                            b"TargetMode" => {
                                external = attr_string(&attr).eq_ignore_ascii_case("external")
                            }
                            _ => {}
                        }
                    }

                    if !id.is_empty() {
                        rels.add(Relationship {
                            id,
                            rel_type,
                            target,
                            external,
                        });
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }
}

/// Read an attribute value, unescaping XML entities where possible.
pub(crate) fn attr_string(attr: &Attribute<'_>) -> String {
    match attr.unescape_value() {
        Ok(value) => value.into_owned(),
        Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
    }
}

/// Fix XML encoding declaration from UTF-16 to UTF-8.
///
/// Once UTF-16 bytes are decoded into a Rust `String` the declaration still
/// claims UTF-16, and quick-xml would try to re-decode the text.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML bytes handling different encodings (UTF-8, UTF-16 LE/BE).
///
/// Spreadsheet parts are almost always UTF-8, but files produced by some
/// third-party writers use UTF-16.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if let Some(rest) = bytes.strip_prefix(b"\xEF\xBB\xBF") {
        return String::from_utf8(rest.to_vec())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)));
    }

    if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
        let content = decode_utf16(rest, u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
        let content = decode_utf16(rest, u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    match String::from_utf8(bytes.to_vec()) {
        Ok(s) => Ok(s),
        Err(_) => {
            // BOM-less UTF-16 shows up as NUL bytes next to ASCII markup
            if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 {
                decode_utf16(bytes, u16::from_le_bytes)
            } else if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 {
                decode_utf16(bytes, u16::from_be_bytes)
            } else {
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// An opened `.xlsx` package.
///
/// The decompression handle sits behind a mutex, so a shared `&Archive` can
/// serve parts to several sheet decoders at once; each `read_part` call holds
/// the lock only while its entry is inflated.
pub struct Archive {
    archive: Mutex<zip::ZipArchive<Cursor<Vec<u8>>>>,
    names: Vec<String>,
}

impl Archive {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use unsheet::container::Archive;
    ///
    /// let archive = Archive::open("report.xlsx")?;
    /// println!("{} parts", archive.part_names().len());
    /// # Ok::<(), unsheet::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Archive(format!("{}: {}", path.display(), e)))?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Open a package held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        let names = archive.file_names().map(String::from).collect();
        Ok(Self {
            archive: Mutex::new(archive),
            names,
        })
    }

    /// Open a package from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    fn lock(&self) -> MutexGuard<'_, zip::ZipArchive<Cursor<Vec<u8>>>> {
        // A panic mid-read leaves nothing half-written on our side.
        self.archive.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Read the fully decompressed bytes of a part.
    pub fn read_part(&self, name: &str) -> Result<Vec<u8>> {
        if !self.contains(name) {
            return Err(Error::PartMissing(name.to_string()));
        }

        let mut archive = self.lock();
        let mut file = archive
            .by_name(name)
            .map_err(|_| Error::PartMissing(name.to_string()))?;
        // The declared size comes from the untrusted header; it only seeds the buffer.
        let mut data = Vec::with_capacity(file.size().min(PREALLOC_LIMIT) as usize);
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read a part as XML text, normalising its encoding to UTF-8.
    pub fn read_xml(&self, name: &str) -> Result<String> {
        let bytes = self.read_part(name)?;
        decode_xml_bytes(&bytes)
    }

    /// Check if a part exists in the archive.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// All entry names, in central-directory order.
    pub fn part_names(&self) -> &[String] {
        &self.names
    }

    /// Location of the .rels part describing `part_path`'s relationships.
    pub fn rels_path_for(part_path: &str) -> String {
        if part_path.is_empty() || part_path == "/" {
            return "_rels/.rels".to_string();
        }

        match part_path.rsplit_once('/') {
            Some((dir, file)) if !dir.is_empty() => format!("{}/_rels/{}.rels", dir, file),
            Some((_, file)) => format!("_rels/{}.rels", file),
            None => format!("_rels/{}.rels", part_path),
        }
    }

    /// Read and parse the relationships of `part_path`.
    ///
    /// Fails with [`Error::PartMissing`] when the .rels part is absent and with
    /// [`Error::XmlParse`] when it is malformed.
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        let rels_path = Self::rels_path_for(part_path);
        let content = self.read_xml(&rels_path)?;
        Relationships::parse(&content)
    }

    /// Read package-level relationships (_rels/.rels).
    pub fn read_package_relationships(&self) -> Result<Relationships> {
        self.read_relationships("")
    }

    /// Resolve a relationship target relative to the part that declares it.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let base_dir = Path::new(base).parent().unwrap_or(Path::new(""));

        let mut result = base_dir.to_path_buf();
        for component in Path::new(relative).components() {
            match component {
                std::path::Component::ParentDir => {
                    result.pop();
                }
                std::path::Component::Normal(c) => {
                    result.push(c);
                }
                _ => {}
            }
        }

        result.to_string_lossy().replace('\\', "/")
    }
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("parts", &self.names.len())
            .finish()
    }
}
