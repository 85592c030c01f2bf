// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading prepared datasets back into labeled positions
//!
//! Accepts both the canonical `descriptor;label` form and the raw
//! `descriptor label` form, so converted and unconverted files can be
//! inspected with the same loader.

use crate::error::{NormalizeError, Result};
use crate::lines::TextLines;
use crate::record::SEPARATOR;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Number of output classes a label maps onto
pub const NUM_CLASSES: usize = 3;

/// A recognised classification token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Nothing,
    Check,
    Checkmate,
    /// Game won by white (`White` or `1-0`)
    WhiteWins,
    /// Game won by black (`Black` or `0-1`)
    BlackWins,
    /// Drawn game (`Draw` or `1/2-1/2`)
    Draw,
}

impl Label {
    /// Parse a label token, returning `None` for unknown tokens
    pub fn parse(token: &str) -> Option<Self> {
        let label = match token {
            "Nothing" | "nothing" => Label::Nothing,
            "Check" | "check" => Label::Check,
            "Checkmate" | "checkmate" => Label::Checkmate,
            "White" | "1-0" => Label::WhiteWins,
            "Black" | "0-1" => Label::BlackWins,
            "Draw" | "1/2-1/2" => Label::Draw,
            _ => return None,
        };
        Some(label)
    }

    /// Index of the output class this label trains
    pub fn class_index(&self) -> usize {
        match self {
            Label::Nothing | Label::WhiteWins => 0,
            Label::Check | Label::BlackWins => 1,
            Label::Checkmate | Label::Draw => 2,
        }
    }

    /// One-hot training target
    pub fn target(&self) -> [f64; NUM_CLASSES] {
        let mut target = [0.0; NUM_CLASSES];
        target[self.class_index()] = 1.0;
        target
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Label::Nothing => "Nothing",
            Label::Check => "Check",
            Label::Checkmate => "Checkmate",
            Label::WhiteWins => "White",
            Label::BlackWins => "Black",
            Label::Draw => "Draw",
        };
        f.write_str(name)
    }
}

/// A descriptor paired with a recognised label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledPosition {
    pub descriptor: String,
    pub label: Label,
}

/// Parse one dataset line
///
/// The separator is the first `;` when present, otherwise the last space.
/// Empty lines, lines with no separator and lines with an unknown label
/// yield `None`.
pub fn parse_labeled_line(line: &str) -> Option<LabeledPosition> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (descriptor, label) = line
        .split_once(SEPARATOR)
        .or_else(|| line.rsplit_once(' '))?;
    let label = Label::parse(label.trim())?;
    Some(LabeledPosition {
        descriptor: descriptor.to_string(),
        label,
    })
}

/// Load every recognised position from a dataset file
pub fn load_labeled(path: impl AsRef<Path>) -> Result<Vec<LabeledPosition>> {
    let mut positions = Vec::new();
    visit_lines(path.as_ref(), |parsed| {
        if let Some(position) = parsed {
            positions.push(position);
        }
    })?;
    Ok(positions)
}

fn visit_lines<F>(path: &Path, mut visit: F) -> Result<()>
where
    F: FnMut(Option<LabeledPosition>),
{
    let file = File::open(path).map_err(|e| NormalizeError::read(path, e))?;
    for line in TextLines::new(BufReader::new(file)) {
        let line = line.map_err(|e| NormalizeError::read(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        visit(parse_labeled_line(&line));
    }
    Ok(())
}

/// Class balance of a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    /// Positions per class index
    pub per_class: [usize; NUM_CLASSES],
    /// Positions accepted
    pub total: usize,
    /// Non-blank lines that were not recognised
    pub skipped: usize,
}

impl DatasetStats {
    /// Tally already-loaded positions
    pub fn from_positions<'a>(positions: impl IntoIterator<Item = &'a LabeledPosition>) -> Self {
        let mut stats = Self::default();
        for position in positions {
            stats.record(position.label);
        }
        stats
    }

    /// Tally a dataset file, including lines the loader would skip
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut stats = Self::default();
        visit_lines(path.as_ref(), |parsed| match parsed {
            Some(position) => stats.record(position.label),
            None => stats.skipped += 1,
        })?;
        Ok(stats)
    }

    fn record(&mut self, label: Label) {
        self.per_class[label.class_index()] += 1;
        self.total += 1;
    }

    /// Share of positions in each class, zero for an empty dataset
    pub fn class_fractions(&self) -> [f64; NUM_CLASSES] {
        let mut fractions = [0.0; NUM_CLASSES];
        if self.total == 0 {
            return fractions;
        }
        for (fraction, count) in fractions.iter_mut().zip(self.per_class) {
            *fraction = count as f64 / self.total as f64;
        }
        fractions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn canonical_and_raw_lines_parse_identically() {
        let canonical = parse_labeled_line(&format!("{START};Nothing")).unwrap();
        let raw = parse_labeled_line(&format!("{START} Nothing")).unwrap();
        assert_eq!(canonical, raw);
        assert_eq!(canonical.descriptor, START);
        assert_eq!(canonical.label.target(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn semicolon_takes_precedence_over_space() {
        let pos = parse_labeled_line("a b;Check").unwrap();
        assert_eq!(pos.descriptor, "a b");
        assert_eq!(pos.label, Label::Check);
    }

    #[test]
    fn outcome_labels_share_class_slots() {
        assert_eq!(Label::parse("1-0").unwrap().class_index(), 0);
        assert_eq!(Label::parse("Black").unwrap().class_index(), 1);
        assert_eq!(Label::parse("1/2-1/2").unwrap().target(), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn unknown_labels_and_unsplittable_lines_are_skipped() {
        assert_eq!(parse_labeled_line("8/8 w - - 0 1 stalemate"), None);
        assert_eq!(parse_labeled_line("nosep"), None);
        assert_eq!(parse_labeled_line("  "), None);
    }

    #[test]
    fn stats_from_file_counts_skipped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged.csv");
        fs::write(
            &path,
            "a;check\nb;checkmate\nc;Checkmate\n\nd;bogus\nnosep\ne;nothing\n",
        )
        .unwrap();

        let stats = DatasetStats::from_file(&path).unwrap();
        assert_eq!(stats.per_class, [1, 1, 2]);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.skipped, 2);

        let loaded = load_labeled(&path).unwrap();
        assert_eq!(DatasetStats::from_positions(&loaded).per_class, stats.per_class);
    }

    #[test]
    fn loader_accepts_cr_and_crlf_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.csv");
        fs::write(&path, "a;check\rb;nothing\r\nc;Checkmate\n").unwrap();

        let loaded = load_labeled(&path).unwrap();
        let labels: Vec<Label> = loaded.iter().map(|p| p.label).collect();
        assert_eq!(labels, [Label::Check, Label::Nothing, Label::Checkmate]);
    }

    #[test]
    fn fractions_of_empty_dataset_are_zero() {
        assert_eq!(DatasetStats::default().class_fractions(), [0.0; NUM_CLASSES]);
    }
}
