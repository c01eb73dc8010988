//! Balance report types and terminal formatting.
//!
//! The report aggregates the three stage reports so every recoverable
//! condition of a run is visible as a count, and carries the effective seed
//! so the selection can be reproduced.

use serde::Serialize;
use std::fmt;

use crate::catalog::CatalogReport;
use crate::materialize::MaterializeReport;
use crate::select::ClassDraw;

/// The result of a full balance run.
#[derive(Clone, Debug, Serialize)]
pub struct BalanceReport {
    /// The split label the output tree was written under.
    pub split: String,
    /// The seed the selection stage ran with.
    pub seed: u64,
    /// Counts from the catalog pass.
    pub catalog: CatalogReport,
    /// Per-class draw rows, in targets order.
    pub draws: Vec<ClassDraw>,
    /// Unique images selected across all classes.
    pub selected_images: usize,
    /// Counts from the copy pass.
    pub materialize: MaterializeReport,
}

impl BalanceReport {
    /// Number of recoverable conditions surfaced by the run.
    pub fn warning_count(&self) -> usize {
        let empty_classes = self.draws.iter().filter(|d| d.available == 0).count();
        self.catalog.malformed_lines + empty_classes + self.materialize.skipped
    }
}

impl fmt::Display for BalanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Balance report for split '{}'", self.split)?;
        writeln!(f, "  seed: {}", self.seed)?;
        writeln!(f)?;

        writeln!(f, "Catalog")?;
        writeln!(f, "  label files:       {}", self.catalog.label_files)?;
        writeln!(f, "  cataloged images:  {}", self.catalog.cataloged_images)?;
        writeln!(f, "  malformed lines:   {}", self.catalog.malformed_lines)?;
        writeln!(f, "  unknown class ids: {}", self.catalog.unknown_class_ids)?;
        writeln!(f)?;

        writeln!(f, "Selection")?;
        let width = self
            .draws
            .iter()
            .map(|d| d.class.len())
            .max()
            .unwrap_or(0);
        for draw in &self.draws {
            if draw.available == 0 {
                writeln!(
                    f,
                    "  {:width$}  no images available",
                    draw.class,
                    width = width
                )?;
            } else {
                writeln!(
                    f,
                    "  {:width$}  available {:>6}  drawn {:>6}",
                    draw.class,
                    draw.available,
                    draw.drawn,
                    width = width
                )?;
            }
        }
        writeln!(f, "  unique images selected: {}", self.selected_images)?;
        writeln!(f)?;

        writeln!(f, "Materialize")?;
        writeln!(f, "  copied pairs:  {}", self.materialize.copied)?;
        writeln!(f, "  skipped pairs: {}", self.materialize.skipped)?;

        let warnings = self.warning_count();
        if warnings > 0 {
            writeln!(f)?;
            writeln!(f, "Completed with {} warning(s)", warnings)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_report() -> BalanceReport {
        BalanceReport {
            split: "train".to_string(),
            seed: 42,
            catalog: CatalogReport {
                label_files: 3,
                cataloged_images: 3,
                malformed_lines: 1,
                unknown_class_ids: 0,
            },
            draws: vec![
                ClassDraw {
                    class: "car".to_string(),
                    available: 2,
                    drawn: 1,
                },
                ClassDraw {
                    class: "bus".to_string(),
                    available: 0,
                    drawn: 0,
                },
            ],
            selected_images: 1,
            materialize: MaterializeReport {
                copied: 1,
                skipped: 0,
            },
        }
    }

    #[test]
    fn counts_warnings_across_stages() {
        let report = make_report();
        // One malformed line plus one class with no candidates.
        assert_eq!(report.warning_count(), 2);
    }

    #[test]
    fn display_includes_all_sections() {
        let output = format!("{}", make_report());
        assert!(output.contains("Balance report for split 'train'"));
        assert!(output.contains("seed: 42"));
        assert!(output.contains("Catalog"));
        assert!(output.contains("Selection"));
        assert!(output.contains("no images available"));
        assert!(output.contains("Materialize"));
        assert!(output.contains("Completed with 2 warning(s)"));
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_string(&make_report()).expect("serialize report");
        assert!(json.contains("\"seed\":42"));
        assert!(json.contains("\"copied\":1"));
    }
}
