//! Sheet relationship resolution.
//!
//! The manifest names sheets by relationship id; the manifest's .rels part
//! maps each id to a worksheet part relative to the manifest's directory.

use super::manifest::parse_manifest;
use super::options::SheetNameCase;
use crate::container::{Archive, Relationships};
use crate::error::{Error, Result};
use crate::model::Diagnostic;
use tracing::{debug, warn};

/// Where the manifest lives when the package relationships don't say.
pub const DEFAULT_MANIFEST_PATH: &str = "xl/workbook.xml";

const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const SHARED_STRINGS_REL: &str = "/sharedStrings";

/// A sheet whose worksheet part has been located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSheet {
    /// Name under the configured [`SheetNameCase`] policy
    pub name: String,
    /// Archive path of the worksheet part
    pub part_path: String,
}

/// Resolved layout of a workbook package.
#[derive(Debug, Clone)]
pub struct WorkbookLayout {
    /// Archive path of workbook.xml
    pub manifest_path: String,
    /// Archive path of the shared string table (may be absent from the archive)
    pub shared_strings_path: String,
    /// Sheets in declaration order
    pub sheets: Vec<ResolvedSheet>,
}

/// Find the workbook manifest via the package relationships.
pub fn locate_manifest(archive: &Archive) -> String {
    if let Ok(rels) = archive.read_package_relationships() {
        if let Some(rel) = rels.find_by_type_suffix(OFFICE_DOCUMENT_REL) {
            let path = Archive::resolve_path("", &rel.target);
            if !rel.external && archive.contains(&path) {
                return path;
            }
        }
    }
    DEFAULT_MANIFEST_PATH.to_string()
}

/// Resolve every declared sheet to its worksheet part.
///
/// Only a missing or unparseable manifest is an error. Sheets whose
/// relationship can't be resolved are left out and reported through
/// `diagnostics`.
pub fn resolve_sheets(
    archive: &Archive,
    naming: SheetNameCase,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<WorkbookLayout> {
    let manifest_path = locate_manifest(archive);
    if !archive.contains(&manifest_path) {
        return Err(Error::ManifestMissing(manifest_path));
    }

    let descriptors = parse_manifest(&archive.read_xml(&manifest_path)?)?;
    debug!(manifest = %manifest_path, sheets = descriptors.len(), "read workbook manifest");

    let rels_path = Archive::rels_path_for(&manifest_path);
    let rels = match archive.read_relationships(&manifest_path) {
        Ok(rels) => rels,
        Err(Error::PartMissing(_)) => {
            warn!(part = %rels_path, "workbook relationships missing");
            diagnostics.push(Diagnostic::RelationshipsMissing {
                path: rels_path.clone(),
            });
            Relationships::new()
        }
        Err(e) => {
            warn!(part = %rels_path, error = %e, "workbook relationships unreadable");
            diagnostics.push(Diagnostic::RelationshipsMalformed {
                path: rels_path.clone(),
                message: e.to_string(),
            });
            Relationships::new()
        }
    };

    let mut sheets = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let name = naming.apply(&descriptor.name);
        match rels.get(&descriptor.rel_id) {
            Some(rel) if !rel.external && !rel.target.is_empty() => {
                let part_path = Archive::resolve_path(&manifest_path, &rel.target);
                debug!(sheet = %name, part = %part_path, "resolved sheet");
                sheets.push(ResolvedSheet { name, part_path });
            }
            _ => {
                warn!(sheet = %name, rel_id = %descriptor.rel_id, "unresolved sheet relationship");
                diagnostics.push(Diagnostic::UnresolvedRelationship {
                    sheet: name,
                    rel_id: descriptor.rel_id,
                });
            }
        }
    }

    let shared_strings_path = match rels.find_by_type_suffix(SHARED_STRINGS_REL) {
        Some(rel) if !rel.external => Archive::resolve_path(&manifest_path, &rel.target),
        _ => Archive::resolve_path(&manifest_path, "sharedStrings.xml"),
    };

    Ok(WorkbookLayout {
        manifest_path,
        shared_strings_path,
        sheets,
    })
}
