// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line splitting that accepts `\n`, `\r\n` and bare `\r` terminators

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Iterator over the text lines of a buffered reader
///
/// Terminators are not included in the yielded lines. Invalid UTF-8 is
/// reported as an `InvalidData` error.
pub(crate) struct TextLines<R> {
    reader: R,
    buf: Vec<u8>,
    pending: VecDeque<String>,
}

impl<R: BufRead> TextLines<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Read up to the next `\n` and queue the `\r`-separated pieces
    fn fill(&mut self) -> io::Result<bool> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        let text = std::str::from_utf8(&self.buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut pieces: Vec<&str> = text.split('\r').collect();
        // "a\r" or "a\r\n" ends the line at the `\r`, not with an extra blank one
        if text.ends_with('\r') {
            pieces.pop();
        }
        self.pending.extend(pieces.into_iter().map(str::to_owned));
        Ok(true)
    }
}

impl<R: BufRead> Iterator for TextLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() {
            match self.fill() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
        self.pending.pop_front().map(Ok)
    }
}
