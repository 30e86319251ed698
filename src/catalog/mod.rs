//! Class catalog: maps a detector's class index to a human-readable name.
//!
//! Catalogs are loaded once at startup from the same files a YOLO training
//! run produces:
//!
//! - `data.yaml` with `names:` as a sequence or as an `index: name` mapping,
//! - `classes.txt` with one name per line,
//!
//! or from names given inline in the configuration file. An index missing
//! from the catalog is a detector contract violation and fails the lookup.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CropmarkError, DetectionError};
use crate::ir::ClassIndex;

/// Read-only `class_index -> class_name` table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassCatalog {
    names: BTreeMap<u64, String>,
}

impl ClassCatalog {
    /// Builds a catalog where the i-th name has class index i.
    pub fn from_names<I, S>(names: I) -> Result<Self, CropmarkError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_mapping(
            names
                .into_iter()
                .enumerate()
                .map(|(idx, name)| (idx as u64, name.into())),
        )
    }

    /// Builds a catalog from explicit `(index, name)` pairs. Gaps are allowed
    /// and stay unmapped.
    pub fn from_mapping<I>(entries: I) -> Result<Self, CropmarkError>
    where
        I: IntoIterator<Item = (u64, String)>,
    {
        let mut names = BTreeMap::new();
        for (index, name) in entries {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(CropmarkError::ConfigInvalid(format!(
                    "class {index} has an empty name"
                )));
            }
            if names.insert(index, name).is_some() {
                return Err(CropmarkError::ConfigInvalid(format!(
                    "class {index} is defined more than once"
                )));
            }
        }
        Ok(Self { names })
    }

    /// Loads a catalog from `data.yaml` (`.yaml`/`.yml`) or `classes.txt` (`.txt`).
    pub fn from_path(path: &Path) -> Result<Self, CropmarkError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => read_data_yaml(path),
            Some("txt") => read_classes_txt(path),
            _ => Err(CropmarkError::UnsupportedFormat(format!(
                "class catalog '{}' (expected .yaml, .yml or .txt)",
                path.display()
            ))),
        }
    }

    /// Resolves a class index to its name.
    ///
    /// # Errors
    /// Returns [`DetectionError::UnknownClassIndex`] if the index is not mapped.
    pub fn lookup(&self, index: ClassIndex) -> Result<&str, DetectionError> {
        self.names
            .get(&index.as_u64())
            .map(String::as_str)
            .ok_or(DetectionError::UnknownClassIndex {
                index: index.as_u64(),
                catalog_len: self.names.len(),
            })
    }

    /// Number of mapped classes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct DataYaml {
    names: DataYamlNames,
}

/// `names:` in a YOLO `data.yaml`, either form. Also used for inline
/// catalogs in the configuration file.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DataYamlNames {
    Sequence(Vec<String>),
    Mapping(BTreeMap<u64, String>),
}

impl DataYamlNames {
    pub(crate) fn into_catalog(self) -> Result<ClassCatalog, CropmarkError> {
        match self {
            DataYamlNames::Sequence(names) => ClassCatalog::from_names(names),
            DataYamlNames::Mapping(mapping) => ClassCatalog::from_mapping(mapping),
        }
    }
}

fn read_data_yaml(path: &Path) -> Result<ClassCatalog, CropmarkError> {
    let data = fs::read_to_string(path).map_err(CropmarkError::Io)?;
    let parsed: DataYaml =
        serde_yaml::from_str(&data).map_err(|source| CropmarkError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
    parsed.names.into_catalog()
}

fn read_classes_txt(path: &Path) -> Result<ClassCatalog, CropmarkError> {
    let data = fs::read_to_string(path).map_err(CropmarkError::Io)?;
    let mut names = Vec::new();

    for (line_idx, line) in data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(CropmarkError::ClassesTxtInvalid {
                path: path.to_path_buf(),
                message: format!("line {} is empty", line_idx + 1),
            });
        }
        names.push(trimmed.to_string());
    }

    ClassCatalog::from_names(names)
}
