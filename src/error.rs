//! Error types for the unsheet library.

use std::io;
use thiserror::Error;

/// Result type alias for unsheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a workbook.
///
/// Only [`Error::Io`], [`Error::Archive`], [`Error::ManifestMissing`] and an
/// unparseable manifest ([`Error::XmlParse`]) ever escape
/// [`read_workbook`](crate::read_workbook). The remaining variants are raised by
/// the lower-level readers and absorbed by the assembler as
/// [`Diagnostic`](crate::Diagnostic)s.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a readable ZIP container.
    #[error("ZIP archive error: {0}")]
    Archive(String),

    /// A named part is not present in the archive.
    #[error("Missing part: {0}")]
    PartMissing(String),

    /// The workbook manifest is absent, so no sheet can be located.
    #[error("Workbook manifest missing: {0}")]
    ManifestMissing(String),

    /// A worksheet part referenced by the workbook is absent.
    #[error("Worksheet part missing: {0}")]
    SheetPartMissing(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Error while rendering a decoded workbook.
    #[error("Render error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error aborts a whole workbook read regardless of which
    /// part raised it.
    ///
    /// [`Error::XmlParse`] is not listed: it is fatal only when raised by the
    /// workbook manifest, and absorbed as a [`Diagnostic`](crate::Diagnostic)
    /// when raised by a worksheet or the shared string table.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Archive(_) | Error::ManifestMissing(_)
        )
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Archive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ManifestMissing("xl/workbook.xml".to_string());
        assert_eq!(err.to_string(), "Workbook manifest missing: xl/workbook.xml");

        let err = Error::PartMissing("xl/styles.xml".to_string());
        assert_eq!(err.to_string(), "Missing part: xl/styles.xml");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_sheet_errors_are_not_fatal() {
        assert!(!Error::SheetPartMissing("xl/worksheets/sheet9.xml".into()).is_fatal());
        assert!(!Error::PartMissing("xl/sharedStrings.xml".into()).is_fatal());
        assert!(!Error::XmlParse("unexpected end of row".into()).is_fatal());
    }
}
