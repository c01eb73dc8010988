//! Materialize stage: copy the selected image/label pairs into the output
//! tree.
//!
//! Copies only complete pairs, so the output dataset is image/label
//! consistent at every point in time. Copies are byte-identical duplications;
//! sources are never mutated or deleted, and there is no rollback. A crash
//! mid-run leaves a partially populated but individually valid tree.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::BalanceError;
use crate::labels::{find_image_for_stem, LABEL_EXTENSION};

/// Aggregate counts from the copy pass.
#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct MaterializeReport {
    /// Image/label pairs copied.
    pub copied: usize,
    /// Stems skipped because the image or the label file was missing.
    pub skipped: usize,
}

/// Copy every selected pair into `output_dir/images/<split>/` and
/// `output_dir/labels/<split>/`, preserving filenames.
pub fn materialize(
    selected: &BTreeSet<String>,
    image_dir: &Path,
    label_dir: &Path,
    output_dir: &Path,
    split: &str,
) -> Result<MaterializeReport, BalanceError> {
    if !image_dir.is_dir() {
        return Err(BalanceError::InputDirNotFound {
            path: image_dir.to_path_buf(),
        });
    }
    if !label_dir.is_dir() {
        return Err(BalanceError::InputDirNotFound {
            path: label_dir.to_path_buf(),
        });
    }

    let out_images = output_dir.join("images").join(split);
    let out_labels = output_dir.join("labels").join(split);
    fs::create_dir_all(&out_images).map_err(|source| BalanceError::OutputWrite {
        path: out_images.clone(),
        source,
    })?;
    fs::create_dir_all(&out_labels).map_err(|source| BalanceError::OutputWrite {
        path: out_labels.clone(),
        source,
    })?;

    let mut report = MaterializeReport::default();

    for stem in selected {
        let label_src = label_dir.join(format!("{stem}.{LABEL_EXTENSION}"));
        let image_src = find_image_for_stem(image_dir, stem);

        // Partial pairs are never copied.
        let (Some(image_src), true) = (image_src, label_src.is_file()) else {
            report.skipped += 1;
            continue;
        };

        let image_name = image_src
            .file_name()
            .expect("probed image path has a file name")
            .to_owned();
        let image_dst = out_images.join(image_name);
        let label_dst = out_labels.join(format!("{stem}.{LABEL_EXTENSION}"));

        fs::copy(&image_src, &image_dst).map_err(|source| BalanceError::OutputWrite {
            path: image_dst.clone(),
            source,
        })?;
        fs::copy(&label_src, &label_dst).map_err(|source| BalanceError::OutputWrite {
            path: label_dst.clone(),
            source,
        })?;

        report.copied += 1;
    }

    Ok(report)
}
