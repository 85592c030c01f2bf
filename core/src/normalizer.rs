// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw dataset to canonical CSV converter
//!
//! The normalizer walks `<dataset_dir>/<category>/*.txt`, rewrites every
//! file into `<output_dir>/<category>_<filename>` with one `descriptor;label`
//! record per line, then concatenates the converted files into a single
//! merged dataset. Lines that cannot be split are dropped without failing
//! the run.

use crate::category::Category;
use crate::config::NormalizerConfig;
use crate::error::{NormalizeError, Result};
use crate::lines::TextLines;
use crate::record::CanonicalRecord;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Progress event emitted while a run is in flight
///
/// The `Display` form is the line printed to stdout by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress<'a> {
    /// A source file is about to be converted
    Converting { input: &'a Path, output: &'a Path },
    /// All conversions are done and the merge is starting
    Merging { merged: &'a Path },
    /// The merged file has been written
    Done { merged: &'a Path, total_lines: usize },
}

impl fmt::Display for Progress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Converting { input, output } => {
                write!(f, "Converting {} -> {}", input.display(), output.display())
            }
            Progress::Merging { merged } => {
                write!(f, "\nMerging all files into {}", merged.display())
            }
            Progress::Done { merged, total_lines } => write!(
                f,
                "\nDone! Merged dataset: {}\nTotal lines: {}",
                merged.display(),
                total_lines
            ),
        }
    }
}

/// Outcome of converting one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConversion {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Canonical records written
    pub records: usize,
    /// Non-blank lines dropped because they had no space to split on
    pub dropped: usize,
}

/// Outcome of a full run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Converted files, in the order they were processed
    pub conversions: Vec<FileConversion>,
    pub merged_path: PathBuf,
    /// Lines in the merged file
    pub total_lines: usize,
}

impl RunSummary {
    /// Records written across all converted files
    pub fn total_records(&self) -> usize {
        self.conversions.iter().map(|c| c.records).sum()
    }

    /// Lines dropped across all converted files
    pub fn total_dropped(&self) -> usize {
        self.conversions.iter().map(|c| c.dropped).sum()
    }
}

/// Convert a single raw file into canonical records
///
/// Creates or truncates `output_path`. Blank lines are skipped and lines
/// without a space are dropped; everything else becomes `descriptor;label`
/// in input order.
pub fn convert_file(input_path: &Path, output_path: &Path) -> Result<FileConversion> {
    let input = File::open(input_path).map_err(|e| NormalizeError::read(input_path, e))?;
    let output = File::create(output_path).map_err(|e| NormalizeError::write(output_path, e))?;

    let reader = BufReader::new(input);
    let mut writer = BufWriter::new(output);
    let mut records = 0;
    let mut dropped = 0;

    for (idx, line) in TextLines::new(reader).enumerate() {
        let line = line.map_err(|e| NormalizeError::read(input_path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        match CanonicalRecord::from_raw_line(&line) {
            Some(record) => {
                writeln!(writer, "{}", record)
                    .map_err(|e| NormalizeError::write(output_path, e))?;
                records += 1;
            }
            None => {
                tracing::debug!(
                    "Dropping malformed line {} of {}: {:?}",
                    idx + 1,
                    input_path.display(),
                    line
                );
                dropped += 1;
            }
        }
    }

    writer
        .flush()
        .map_err(|e| NormalizeError::write(output_path, e))?;

    tracing::info!(
        "Converted {} ({} records, {} dropped)",
        input_path.display(),
        records,
        dropped
    );

    Ok(FileConversion {
        input: input_path.to_path_buf(),
        output: output_path.to_path_buf(),
        records,
        dropped,
    })
}

/// Count lines the way a line iterator would: a trailing partial line counts
fn count_lines(path: &Path) -> Result<usize> {
    let file = File::open(path).map_err(|e| NormalizeError::read(path, e))?;
    let mut reader = BufReader::new(file);
    let mut newlines = 0;
    let mut last = None;

    loop {
        let chunk = reader.fill_buf().map_err(|e| NormalizeError::read(path, e))?;
        if chunk.is_empty() {
            break;
        }
        newlines += chunk.iter().filter(|b| **b == b'\n').count();
        last = chunk.last().copied();
        let consumed = chunk.len();
        reader.consume(consumed);
    }

    Ok(newlines + usize::from(last.is_some_and(|b| b != b'\n')))
}

/// Batch converter over a category-per-directory dataset tree
pub struct DatasetNormalizer {
    config: NormalizerConfig,
}

impl DatasetNormalizer {
    /// Create a normalizer for the given configuration
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Run the pipeline, printing progress lines to stdout
    pub fn run(&self) -> Result<RunSummary> {
        self.run_with(|progress| println!("{}", progress))
    }

    /// Run the pipeline, handing each progress event to `observer`
    ///
    /// Events are delivered as work happens, so everything reported before
    /// a fatal error has already been written to disk.
    pub fn run_with<F>(&self, mut observer: F) -> Result<RunSummary>
    where
        F: FnMut(&Progress<'_>),
    {
        self.config.validate()?;

        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| NormalizeError::CreateDir {
            path: output_dir.clone(),
            source,
        })?;

        let merged_path = self.config.merged_path();
        let mut conversions = Vec::new();

        for &category in &self.config.categories {
            for (input, file_name) in self.category_sources(category)? {
                let output = output_dir.join(category.output_file_name(&file_name));
                if output == merged_path {
                    tracing::warn!(
                        "Skipping {}: its output name collides with the merged file",
                        input.display()
                    );
                    continue;
                }
                observer(&Progress::Converting {
                    input: &input,
                    output: &output,
                });
                conversions.push(convert_file(&input, &output)?);
            }
        }

        observer(&Progress::Merging {
            merged: &merged_path,
        });
        self.merge(&conversions, &merged_path)?;

        let total_lines = count_lines(&merged_path)?;
        observer(&Progress::Done {
            merged: &merged_path,
            total_lines,
        });

        Ok(RunSummary {
            conversions,
            merged_path,
            total_lines,
        })
    }

    /// Source files of one category, sorted by file name
    ///
    /// A missing category directory yields no files.
    fn category_sources(&self, category: Category) -> Result<Vec<(PathBuf, String)>> {
        let dir = self.config.dataset_dir.join(category.as_str());
        if !dir.exists() {
            tracing::debug!("Category directory {} not found, skipping", dir.display());
            return Ok(Vec::new());
        }

        let list_err = |source| NormalizeError::ListDir {
            path: dir.clone(),
            source,
        };

        let mut sources = Vec::new();
        for entry in fs::read_dir(&dir).map_err(list_err)? {
            let entry = entry.map_err(list_err)?;
            let path = entry.path();
            let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::warn!("Skipping non UTF-8 file name in {}", dir.display());
                continue;
            };
            if !file_name.ends_with(&self.config.input_extension) || !path.is_file() {
                continue;
            }
            sources.push((path, file_name));
        }

        sources.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(sources)
    }

    /// Concatenate converted files into the merged file, ordered by file name
    fn merge(&self, conversions: &[FileConversion], merged_path: &Path) -> Result<()> {
        let mut inputs: Vec<&Path> = conversions
            .iter()
            .map(|c| c.output.as_path())
            .collect();
        inputs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        let file = File::create(merged_path).map_err(|e| NormalizeError::write(merged_path, e))?;
        let mut writer = BufWriter::new(file);

        for input in inputs {
            let content = fs::read(input).map_err(|e| NormalizeError::read(input, e))?;
            writer
                .write_all(&content)
                .map_err(|e| NormalizeError::write(merged_path, e))?;
        }

        writer
            .flush()
            .map_err(|e| NormalizeError::write(merged_path, e))?;

        Ok(())
    }
}
