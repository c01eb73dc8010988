//! Static configuration: class tables and sampling targets.
//!
//! Both structures are supplied as files on the command line. The class table
//! accepts the Ultralytics `data.yaml` shape (a `names:` sequence or index
//! mapping) as well as a plain `classes.txt` with one name per line, so the
//! same file that drove annotation production can drive balancing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::BalanceError;

/// Mapping from integer class id to class name.
///
/// The id is the position in the underlying list, matching the class indices
/// written into YOLO label files.
#[derive(Clone, Debug)]
pub struct ClassTable {
    names: Vec<String>,
}

impl ClassTable {
    /// Build a table directly from an ordered name list.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a class table from a file, dispatching on its extension.
    ///
    /// `.txt` files are treated as one-name-per-line lists; anything else is
    /// parsed as YAML with a `names:` key.
    pub fn load(path: &Path) -> Result<Self, BalanceError> {
        let is_txt = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

        if is_txt {
            Self::load_classes_txt(path)
        } else {
            Self::load_yaml(path)
        }
    }

    fn load_yaml(path: &Path) -> Result<Self, BalanceError> {
        let data = fs::read_to_string(path).map_err(BalanceError::Io)?;
        let parsed: ClassesYaml =
            serde_yaml::from_str(&data).map_err(|source| BalanceError::ClassTableParse {
                path: path.to_path_buf(),
                source,
            })?;

        let names = match parsed.names {
            ClassNames::Sequence(names) => names,
            ClassNames::Mapping(mapping) => {
                if mapping.is_empty() {
                    Vec::new()
                } else {
                    let max_index = *mapping.keys().max().expect("checked non-empty");
                    let mut names = vec![String::new(); max_index + 1];
                    for (index, name) in mapping {
                        names[index] = name;
                    }
                    for (index, name) in names.iter_mut().enumerate() {
                        if name.trim().is_empty() {
                            *name = format!("class_{}", index);
                        }
                    }
                    names
                }
            }
        };

        Ok(Self { names })
    }

    fn load_classes_txt(path: &Path) -> Result<Self, BalanceError> {
        let data = fs::read_to_string(path).map_err(BalanceError::Io)?;
        let mut names = Vec::new();

        for (line_idx, line) in data.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return Err(BalanceError::ClassTableInvalid {
                    path: path.to_path_buf(),
                    message: format!("line {} is empty", line_idx + 1),
                });
            }
            names.push(trimmed.to_string());
        }

        Ok(Self { names })
    }

    /// Look up the name for a class id; `None` for ids outside the table.
    pub fn name_of(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    /// All class names in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct ClassesYaml {
    names: ClassNames,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassNames {
    Sequence(Vec<String>),
    Mapping(BTreeMap<usize, String>),
}

/// Ordered per-class target image counts.
///
/// Order is semantic: the selection stage processes classes in the order the
/// targets file lists them, and earlier draws are never revisited.
#[derive(Clone, Debug)]
pub struct SamplingTargets {
    entries: Vec<(String, usize)>,
}

impl SamplingTargets {
    /// Build targets from an ordered list of (class name, target count).
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(name, count)| (name.into(), count))
                .collect(),
        }
    }

    /// Load targets from a YAML mapping of `class name: image count`,
    /// preserving document order.
    pub fn load(path: &Path) -> Result<Self, BalanceError> {
        let data = fs::read_to_string(path).map_err(BalanceError::Io)?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&data).map_err(|source| BalanceError::TargetsParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mapping = value
            .as_mapping()
            .ok_or_else(|| BalanceError::TargetsInvalid {
                path: path.to_path_buf(),
                message: "expected a mapping of class name to image count".to_string(),
            })?;

        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = key
                .as_str()
                .ok_or_else(|| BalanceError::TargetsInvalid {
                    path: path.to_path_buf(),
                    message: format!("class name '{:?}' is not a string", key),
                })?
                .to_string();

            let count = value
                .as_u64()
                .ok_or_else(|| BalanceError::TargetsInvalid {
                    path: path.to_path_buf(),
                    message: format!("target for '{}' is not a non-negative integer", name),
                })?;

            entries.push((name, count as usize));
        }

        Ok(Self { entries })
    }

    /// Iterate (class name, target count) pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
