//! Distribution report types and terminal formatting.

use serde::Serialize;
use std::fmt;

/// Per-class counts over a label directory.
#[derive(Clone, Debug, Serialize)]
pub struct ClassCount {
    /// The class name.
    pub class: String,
    /// Total annotation lines with this class.
    pub instances: usize,
    /// Distinct images containing at least one instance of this class.
    pub images: usize,
}

/// The result of a distribution check.
#[derive(Clone, Debug, Serialize)]
pub struct DistributionReport {
    /// Label files scanned.
    pub label_files: usize,
    /// Lines skipped because they could not be parsed.
    pub malformed_lines: usize,
    /// Annotations whose class id is outside the class table.
    pub unknown_class_ids: usize,
    /// Total recognized annotations.
    pub total_instances: usize,
    /// Per-class rows, sorted by instance count descending.
    pub entries: Vec<ClassCount>,
    /// Display-only option for histogram rendering width.
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

impl fmt::Display for DistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Class distribution over {} label file(s), {} annotation(s)",
            self.label_files, self.total_instances
        )?;

        if self.entries.is_empty() {
            writeln!(f, "  no recognized annotations found")?;
        } else {
            let name_width = self
                .entries
                .iter()
                .map(|e| e.class.len())
                .max()
                .unwrap_or(0);
            let max_count = self
                .entries
                .iter()
                .map(|e| e.instances)
                .max()
                .unwrap_or(1)
                .max(1);

            for entry in &self.entries {
                let bar_len = (entry.instances * self.bar_width).div_ceil(max_count);
                writeln!(
                    f,
                    "  {:name_width$}  {:>8}  {:bar_width$}  ({} image(s))",
                    entry.class,
                    entry.instances,
                    "#".repeat(bar_len),
                    entry.images,
                    name_width = name_width,
                    bar_width = self.bar_width,
                )?;
            }
        }

        if self.malformed_lines > 0 || self.unknown_class_ids > 0 {
            writeln!(
                f,
                "  skipped: {} malformed line(s), {} unknown class id(s)",
                self.malformed_lines, self.unknown_class_ids
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_proportional_bars() {
        let report = DistributionReport {
            label_files: 2,
            malformed_lines: 0,
            unknown_class_ids: 0,
            total_instances: 6,
            entries: vec![
                ClassCount {
                    class: "car".to_string(),
                    instances: 4,
                    images: 2,
                },
                ClassCount {
                    class: "person".to_string(),
                    instances: 2,
                    images: 1,
                },
            ],
            bar_width: 8,
        };

        let output = format!("{}", report);
        assert!(output.contains("Class distribution over 2 label file(s)"));
        assert!(output.contains("########"));
        assert!(output.contains("####"));
        assert!(output.contains("(2 image(s))"));
    }

    #[test]
    fn display_handles_empty_reports() {
        let report = DistributionReport {
            label_files: 0,
            malformed_lines: 0,
            unknown_class_ids: 0,
            total_instances: 0,
            entries: vec![],
            bar_width: 8,
        };

        let output = format!("{}", report);
        assert!(output.contains("no recognized annotations found"));
    }

    #[test]
    fn display_reports_skip_counts() {
        let report = DistributionReport {
            label_files: 1,
            malformed_lines: 3,
            unknown_class_ids: 1,
            total_instances: 0,
            entries: vec![],
            bar_width: 8,
        };

        let output = format!("{}", report);
        assert!(output.contains("3 malformed line(s)"));
        assert!(output.contains("1 unknown class id(s)"));
    }
}
