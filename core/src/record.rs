// SPDX-License-Identifier: MIT OR Apache-2.0

//! Raw and canonical record forms
//!
//! A raw record is `<descriptor> <label>` where the descriptor may itself
//! contain spaces (a FEN string does). The label is whatever follows the
//! last space. The canonical form joins the two halves with `;`.

use std::fmt;

/// Field separator of the canonical form
pub const SEPARATOR: char = ';';

/// A record split into descriptor and label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalRecord<'a> {
    /// Position descriptor, treated as an opaque string
    pub descriptor: &'a str,
    /// Trailing classification token
    pub label: &'a str,
}

impl<'a> CanonicalRecord<'a> {
    /// Parse one raw line
    ///
    /// Leading and trailing whitespace is stripped first. Returns `None` for
    /// blank lines and for lines without a space to split on.
    pub fn from_raw_line(line: &'a str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (descriptor, label) = line.rsplit_once(' ')?;
        Some(Self { descriptor, label })
    }
}

impl fmt::Display for CanonicalRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.descriptor, SEPARATOR, self.label)
    }
}
