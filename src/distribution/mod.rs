//! Class-distribution analysis for a label directory.
//!
//! This is the read-only companion to the balance pipeline: it counts object
//! instances and images per class so the effect of a balancing run (or the
//! imbalance of the source dataset) can be checked from the label files
//! alone.

mod report;

pub use report::{ClassCount, DistributionReport};

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::config::ClassTable;
use crate::error::BalanceError;
use crate::labels::{collect_label_files, parse_label_line, ParsedLine};

/// Options for distribution analysis.
#[derive(Clone, Debug)]
pub struct DistributionOptions {
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self { bar_width: 30 }
    }
}

/// Count per-class instances and images over `label_dir`.
///
/// Uses the same lenient line parsing and fatal-input rules as the catalog
/// stage: malformed lines and unknown class ids are counted, a missing
/// directory aborts.
pub fn check_distribution(
    label_dir: &Path,
    class_table: &ClassTable,
    opts: &DistributionOptions,
) -> Result<DistributionReport, BalanceError> {
    let label_files = collect_label_files(label_dir)?;

    let mut instance_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut image_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut malformed_lines = 0usize;
    let mut unknown_class_ids = 0usize;

    for label_path in &label_files {
        let content = fs::read_to_string(label_path).map_err(BalanceError::Io)?;
        let mut classes_in_file: BTreeSet<&str> = BTreeSet::new();

        for line in content.lines() {
            match parse_label_line(line) {
                ParsedLine::Record(record) => match class_table.name_of(record.class_id) {
                    Some(name) => {
                        *instance_counts.entry(name.to_string()).or_insert(0) += 1;
                        classes_in_file.insert(name);
                    }
                    None => unknown_class_ids += 1,
                },
                ParsedLine::Blank => {}
                ParsedLine::Malformed => malformed_lines += 1,
            }
        }

        for name in classes_in_file {
            *image_counts.entry(name.to_string()).or_insert(0) += 1;
        }
    }

    let total_instances = instance_counts.values().sum();
    let mut entries: Vec<ClassCount> = instance_counts
        .into_iter()
        .map(|(class, instances)| {
            let images = image_counts.get(&class).copied().unwrap_or(0);
            ClassCount {
                class,
                instances,
                images,
            }
        })
        .collect();

    entries.sort_by(|a, b| {
        b.instances
            .cmp(&a.instances)
            .then_with(|| a.class.cmp(&b.class))
    });

    Ok(DistributionReport {
        label_files: label_files.len(),
        malformed_lines,
        unknown_class_ids,
        total_instances,
        entries,
        bar_width: opts.bar_width,
    })
}
