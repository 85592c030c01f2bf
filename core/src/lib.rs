// SPDX-License-Identifier: MIT OR Apache-2.0

//! fenprep core - dataset preparation for chess-position classification
//!
//! This crate provides:
//! - Raw (`descriptor label`) to canonical (`descriptor;label`) record conversion
//! - Batch conversion of a category-per-directory dataset tree
//! - Merging of converted files into a single dataset
//! - A loader that reads prepared datasets back with their class labels

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod category;
pub mod config;
pub mod dataset;
pub mod error;
mod lines;
pub mod normalizer;
pub mod record;

pub use category::Category;
pub use config::{NormalizerConfig, MERGED_FILE_NAME};
pub use dataset::{load_labeled, DatasetStats, Label, LabeledPosition};
pub use error::{NormalizeError, Result};
pub use normalizer::{convert_file, DatasetNormalizer, FileConversion, Progress, RunSummary};
pub use record::CanonicalRecord;
