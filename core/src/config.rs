// SPDX-License-Identifier: MIT OR Apache-2.0

//! Normalizer configuration

use crate::category::Category;
use crate::error::{NormalizeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default name of the merged output file
pub const MERGED_FILE_NAME: &str = "merged_dataset.csv";

/// Where to read raw files from and where to write converted ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Root holding one subdirectory per category
    pub dataset_dir: PathBuf,

    /// Directory receiving converted files and the merged file
    pub output_dir: PathBuf,

    /// File name of the merged dataset inside `output_dir`
    pub merged_file_name: String,

    /// Categories to process, in order
    pub categories: Vec<Category>,

    /// Suffix a source file name must end with to be converted
    pub input_extension: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            dataset_dir: PathBuf::from("dataset"),
            output_dir: PathBuf::from("dataset_converted"),
            merged_file_name: MERGED_FILE_NAME.to_string(),
            categories: Category::ALL.to_vec(),
            input_extension: ".txt".to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| NormalizeError::read(path, e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| NormalizeError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the dataset root
    pub fn with_dataset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dataset_dir = dir.into();
        self
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the merged file name
    pub fn with_merged_file_name(mut self, name: impl Into<String>) -> Self {
        self.merged_file_name = name.into();
        self
    }

    /// Restrict processing to the given categories
    pub fn with_categories(mut self, categories: impl Into<Vec<Category>>) -> Self {
        self.categories = categories.into();
        self
    }

    /// Full path of the merged output file
    pub fn merged_path(&self) -> PathBuf {
        self.output_dir.join(&self.merged_file_name)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.merged_file_name.is_empty() {
            return Err(NormalizeError::Config("merged file name is empty".into()));
        }
        if self.merged_file_name.contains(['/', '\\']) {
            return Err(NormalizeError::Config(format!(
                "merged file name must not contain a path separator: {}",
                self.merged_file_name
            )));
        }
        if self.categories.is_empty() {
            return Err(NormalizeError::Config("no categories configured".into()));
        }
        Ok(())
    }
}
