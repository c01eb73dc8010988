//! The balance pipeline: catalog, select, materialize.
//!
//! A linear three-stage pipeline with no branching states. Each stage fully
//! consumes its input and hands an immutable value to the next; the only
//! state that survives a run is the copied output tree.

mod report;

pub use report::BalanceReport;

use std::path::PathBuf;

use crate::catalog::catalog_labels;
use crate::config::{ClassTable, SamplingTargets};
use crate::error::BalanceError;
use crate::materialize::materialize;
use crate::select::select_balanced;

/// Options for a balance run.
#[derive(Clone, Debug)]
pub struct BalanceOptions {
    /// Directory of source images.
    pub image_dir: PathBuf,
    /// Directory of YOLO label files paired with the images by stem.
    pub label_dir: PathBuf,
    /// Root of the output tree (`images/<split>/`, `labels/<split>/`).
    pub output_dir: PathBuf,
    /// Split label for the output tree, e.g. "train" or "val".
    pub split: String,
    /// Seed for the selection stage. When `None` an entropy seed is drawn
    /// and recorded in the report.
    pub seed: Option<u64>,
}

/// Run the full balance pipeline.
///
/// Fatal only for missing input directories and unwritable output; every
/// per-file and per-class problem is recovered and surfaced as an aggregate
/// count in the returned report.
pub fn balance_dataset(
    class_table: &ClassTable,
    targets: &SamplingTargets,
    opts: &BalanceOptions,
) -> Result<BalanceReport, BalanceError> {
    // Both input directories are checked before the (potentially long)
    // catalog pass so a bad path fails immediately.
    if !opts.image_dir.is_dir() {
        return Err(BalanceError::InputDirNotFound {
            path: opts.image_dir.clone(),
        });
    }

    let (catalog, catalog_report) = catalog_labels(&opts.label_dir, class_table)?;
    let selection = select_balanced(&catalog, targets, opts.seed);
    let materialize_report = materialize(
        &selection.selected,
        &opts.image_dir,
        &opts.label_dir,
        &opts.output_dir,
        &opts.split,
    )?;

    Ok(BalanceReport {
        split: opts.split.clone(),
        seed: selection.seed,
        catalog: catalog_report,
        draws: selection.draws,
        selected_images: selection.selected.len(),
        materialize: materialize_report,
    })
}
