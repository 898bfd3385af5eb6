//! Header-keyed sheet tables.

use super::CellValue;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Normalize a raw header cell into a field name.
///
/// Surrounding whitespace is trimmed, the text is lower-cased and every
/// remaining whitespace character becomes an underscore, so `" Deal Stage "`
/// reads as `deal_stage`.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// One data row keyed by header field.
///
/// Fields keep header order; every record of a table carries exactly the
/// table's header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Value of `field`, if the header has that field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(field, value)` pairs in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Field names in header order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Turns raw rows into [`Record`]s against a fixed header.
///
/// Header cells that normalize to the same name share one field: the field
/// keeps its first position and takes the value of the right-most column.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    fields: Vec<String>,
    /// Field slot for each header column.
    slots: Vec<usize>,
}

impl RecordBuilder {
    /// Build from the raw (unnormalized) header row.
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields: Vec<String> = Vec::new();
        let mut slots = Vec::new();

        for raw in header {
            let name = normalize_header(raw.as_ref());
            let slot = match fields.iter().position(|f| *f == name) {
                Some(existing) => existing,
                None => {
                    fields.push(name);
                    fields.len() - 1
                }
            };
            slots.push(slot);
        }

        Self { fields, slots }
    }

    /// Normalized field names.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Build a record: short rows pad with empty strings, cells past the
    /// header are dropped.
    pub fn build(&self, row: Vec<CellValue>) -> Record {
        let mut values = vec![String::new(); self.fields.len()];
        let mut cells = row.into_iter();

        for &slot in &self.slots {
            values[slot] = cells.next().map(CellValue::into_string).unwrap_or_default();
        }

        Record {
            fields: self.fields.iter().cloned().zip(values).collect(),
        }
    }
}

/// The records of one sheet, with the header row promoted to field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl SheetTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote the first row to the header and build a record from each
    /// following row. No rows at all yields an empty table.
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        let mut rows = rows.into_iter();
        let Some(header) = rows.next() else {
            return Self::default();
        };

        let builder = RecordBuilder::new(header.iter().map(CellValue::as_str));
        let records = rows.map(|row| builder.build(row)).collect();

        Self {
            headers: builder.fields,
            records,
        }
    }

    /// Normalized header field names.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All data records in sheet order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records (header row excluded).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the table into its records.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl<'a> IntoIterator for &'a SheetTable {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for SheetTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.records.len()))?;
        for record in &self.records {
            seq.serialize_element(record)?;
        }
        seq.end()
    }
}
