//! YOLO label-file parsing and discovery.
//!
//! Label files are plain text, one annotation per line:
//! `class_id center_x center_y width height`, with the four floats normalized
//! to [0,1]. Real-world label dumps contain empty and malformed lines, so
//! parsing here is lenient: a bad line yields `None` and the caller counts it,
//! it never aborts the file or the run.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::BalanceError;

/// Image extensions probed when pairing a label stem with its image,
/// in preference order.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "png", "jpeg", "bmp", "webp"];

/// Extension of label files.
pub const LABEL_EXTENSION: &str = "txt";

/// One parsed annotation line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelRecord {
    pub class_id: usize,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

/// Outcome of parsing a single label line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParsedLine {
    /// A well-formed annotation.
    Record(LabelRecord),
    /// An empty or whitespace-only line, not counted as malformed.
    Blank,
    /// A line that could not be parsed (too few fields, bad class id or
    /// coordinate). Skipped and counted by the caller.
    Malformed,
}

/// Parse one label line leniently.
pub fn parse_label_line(line: &str) -> ParsedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ParsedLine::Blank;
    }

    // Take at most 6 tokens so pathological inputs do not allocate unbounded memory.
    let tokens: Vec<&str> = trimmed.split_whitespace().take(6).collect();
    if tokens.len() != 5 {
        return ParsedLine::Malformed;
    }

    let Ok(class_id) = tokens[0].parse::<usize>() else {
        return ParsedLine::Malformed;
    };

    let mut coords = [0.0f64; 4];
    for (slot, token) in coords.iter_mut().zip(&tokens[1..]) {
        match token.parse::<f64>() {
            Ok(value) => *slot = value,
            Err(_) => return ParsedLine::Malformed,
        }
    }

    ParsedLine::Record(LabelRecord {
        class_id,
        cx: coords[0],
        cy: coords[1],
        w: coords[2],
        h: coords[3],
    })
}

/// Collect every label file under `label_dir`, sorted by path for
/// deterministic processing order.
///
/// Fails with [`BalanceError::InputDirNotFound`] when the directory is
/// missing, per the fatal-input contract.
pub fn collect_label_files(label_dir: &Path) -> Result<Vec<PathBuf>, BalanceError> {
    if !label_dir.is_dir() {
        return Err(BalanceError::InputDirNotFound {
            path: label_dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(label_dir).follow_links(true) {
        let entry = entry.map_err(|source| BalanceError::DirTraversal {
            path: label_dir.to_path_buf(),
            message: format!("failed while traversing directory: {source}"),
        })?;

        if entry.file_type().is_file() && has_extension(entry.path(), &[LABEL_EXTENSION]) {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Probe `image_dir` for an image matching `stem`, trying each known
/// extension in order.
pub fn find_image_for_stem(image_dir: &Path, stem: &str) -> Option<PathBuf> {
    for ext in IMAGE_EXTENSIONS {
        let candidate = image_dir.join(format!("{stem}.{ext}"));
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}
