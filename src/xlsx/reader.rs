//! Workbook assembly: ties the package readers together.

use super::options::ReadOptions;
use super::resolver::{resolve_sheets, ResolvedSheet};
use super::shared_strings::SharedStringTable;
use super::sheet::decode_sheet;
use crate::container::Archive;
use crate::error::{Error, Result};
use crate::model::{Diagnostic, SheetTable, Workbook};
use std::path::Path;
use tracing::{debug, warn};

/// Reader for XLSX workbooks.
pub struct XlsxReader {
    archive: Archive,
    options: ReadOptions,
}

impl XlsxReader {
    /// Open an XLSX file for reading.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_archive(Archive::open(path)?))
    }

    /// Create a reader from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Ok(Self::from_archive(Archive::from_bytes(data)?))
    }

    /// Create a reader over an already opened archive.
    pub fn from_archive(archive: Archive) -> Self {
        Self {
            archive,
            options: ReadOptions::default(),
        }
    }

    /// Replace the read options.
    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    /// Get a reference to the archive.
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Decode every resolvable sheet.
    ///
    /// Fails only when the manifest is missing or unparseable. Anything else
    /// wrong with the package shrinks the result and is listed in
    /// [`Workbook::diagnostics`].
    pub fn read(&self) -> Result<Workbook> {
        let mut diagnostics = Vec::new();
        let layout = resolve_sheets(&self.archive, self.options.sheet_names, &mut diagnostics)?;

        let strings = match SharedStringTable::load(&self.archive, &layout.shared_strings_path) {
            Ok(strings) => strings,
            Err(e) => {
                warn!(part = %layout.shared_strings_path, error = %e, "ignoring shared strings");
                diagnostics.push(Diagnostic::SharedStringsMalformed {
                    path: layout.shared_strings_path.clone(),
                    message: e.to_string(),
                });
                SharedStringTable::default()
            }
        };
        debug!(count = strings.len(), "loaded shared strings");

        let outcomes = self.decode_all(&layout.sheets, &strings);

        let mut workbook = Workbook::new();
        for diagnostic in diagnostics {
            workbook.add_diagnostic(diagnostic);
        }
        for (sheet, (table, diagnostic)) in layout.sheets.into_iter().zip(outcomes) {
            if let Some(diagnostic) = diagnostic {
                workbook.add_diagnostic(diagnostic);
            }
            debug!(sheet = %sheet.name, records = table.len(), "decoded sheet");
            workbook.insert(sheet.name, table);
        }

        Ok(workbook)
    }

    /// Decode all sheets; output order follows `sheets`.
    fn decode_all(
        &self,
        sheets: &[ResolvedSheet],
        strings: &SharedStringTable,
    ) -> Vec<(SheetTable, Option<Diagnostic>)> {
        #[cfg(feature = "parallel")]
        {
            if self.options.parallel {
                use rayon::prelude::*;
                return sheets
                    .par_iter()
                    .map(|sheet| self.decode_one(sheet, strings))
                    .collect();
            }
        }

        sheets
            .iter()
            .map(|sheet| self.decode_one(sheet, strings))
            .collect()
    }

    /// Decode one sheet, absorbing its failure into an empty table.
    fn decode_one(
        &self,
        sheet: &ResolvedSheet,
        strings: &SharedStringTable,
    ) -> (SheetTable, Option<Diagnostic>) {
        match decode_sheet(&self.archive, &sheet.part_path, strings) {
            Ok(rows) => (SheetTable::from_rows(rows), None),
            Err(Error::SheetPartMissing(part)) => {
                warn!(sheet = %sheet.name, part = %part, "worksheet part missing");
                let diagnostic = Diagnostic::SheetPartMissing {
                    sheet: sheet.name.clone(),
                    part,
                };
                (SheetTable::new(), Some(diagnostic))
            }
            Err(e) => {
                warn!(sheet = %sheet.name, error = %e, "worksheet unreadable");
                let diagnostic = Diagnostic::SheetMalformed {
                    sheet: sheet.name.clone(),
                    message: e.to_string(),
                };
                (SheetTable::new(), Some(diagnostic))
            }
        }
    }
}

impl std::fmt::Debug for XlsxReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxReader")
            .field("archive", &self.archive)
            .field("options", &self.options)
            .finish()
    }
}
