//! Catalog stage: map each image to the set of classes it contains.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::ClassTable;
use crate::error::BalanceError;
use crate::labels::{collect_label_files, parse_label_line, ParsedLine};

/// Mapping from image stem to the distinct class names present in that image.
///
/// Membership-only semantics: a class present twice in one image counts once.
/// Images with zero recognized classes never appear.
pub type ImageCatalog = BTreeMap<String, BTreeSet<String>>;

/// Aggregate counts from the catalog pass.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct CatalogReport {
    /// Label files scanned.
    pub label_files: usize,
    /// Images with at least one recognized class.
    pub cataloged_images: usize,
    /// Lines skipped because they could not be parsed.
    pub malformed_lines: usize,
    /// Well-formed annotations whose class id is outside the class table.
    pub unknown_class_ids: usize,
}

/// Scan `label_dir` and build the image catalog.
///
/// Read-only; the only fatal condition is a missing label directory. Malformed
/// lines and unknown class ids are skipped and counted.
pub fn catalog_labels(
    label_dir: &Path,
    class_table: &ClassTable,
) -> Result<(ImageCatalog, CatalogReport), BalanceError> {
    let label_files = collect_label_files(label_dir)?;

    let mut catalog = ImageCatalog::new();
    let mut report = CatalogReport {
        label_files: label_files.len(),
        ..Default::default()
    };

    for label_path in &label_files {
        let Some(stem) = label_path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let content = fs::read_to_string(label_path).map_err(BalanceError::Io)?;
        for line in content.lines() {
            match parse_label_line(line) {
                ParsedLine::Record(record) => match class_table.name_of(record.class_id) {
                    Some(name) => {
                        catalog
                            .entry(stem.to_string())
                            .or_default()
                            .insert(name.to_string());
                    }
                    None => report.unknown_class_ids += 1,
                },
                ParsedLine::Blank => {}
                ParsedLine::Malformed => report.malformed_lines += 1,
            }
        }
    }

    report.cataloged_images = catalog.len();
    Ok((catalog, report))
}
