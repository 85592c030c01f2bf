// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification buckets that name the source subdirectories

use crate::error::NormalizeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed classification buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Side to move is in check
    Check,
    /// Side to move is checkmated
    Checkmate,
    /// Neither check nor checkmate
    Nothing,
}

impl Category {
    /// Every category, in processing order
    pub const ALL: [Category; 3] = [Category::Check, Category::Checkmate, Category::Nothing];

    /// Directory name (and output filename prefix) for this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Check => "check",
            Category::Checkmate => "checkmate",
            Category::Nothing => "nothing",
        }
    }

    /// Name of the converted file for a source file in this category
    pub fn output_file_name(&self, source_name: &str) -> String {
        format!("{}_{}", self.as_str(), source_name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(Category::Check),
            "checkmate" => Ok(Category::Checkmate),
            "nothing" => Ok(Category::Nothing),
            other => Err(NormalizeError::UnknownCategory(other.to_string())),
        }
    }
}
