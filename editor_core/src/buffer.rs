//! Line storage with tab-aware rendering

use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Default tab stop width
pub const DEFAULT_TAB_STOP: usize = 8;

/// Cursor position in the buffer
///
/// `col` is a byte offset into the line's content, not its render form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Advance a render column past one tab
pub const fn next_tab_stop(col: usize, tab_stop: usize) -> usize {
    col + (tab_stop - (col % tab_stop))
}

/// One row of the document
///
/// `rendered` is rebuilt by every mutating method before it returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    content: Vec<u8>,
    rendered: Vec<u8>,
}

impl Line {
    pub fn new(content: Vec<u8>, tab_stop: usize) -> Self {
        let mut line = Self {
            content,
            rendered: Vec::new(),
        };
        line.update(tab_stop);
        line
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn rendered(&self) -> &[u8] {
        &self.rendered
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Render column of logical column `col` (clamped to the line length)
    pub fn render_column(&self, col: usize, tab_stop: usize) -> usize {
        let end = col.min(self.content.len());
        self.content[..end].iter().fold(0, |rx, &byte| {
            if byte == b'\t' {
                next_tab_stop(rx, tab_stop)
            } else {
                rx + 1
            }
        })
    }

    fn update(&mut self, tab_stop: usize) {
        self.rendered.clear();
        for &byte in &self.content {
            if byte == b'\t' {
                let target = next_tab_stop(self.rendered.len(), tab_stop);
                self.rendered.resize(target, b' ');
            } else {
                self.rendered.push(byte);
            }
        }
    }
}

/// Text buffer with line-based storage
///
/// A freshly created buffer has no lines at all; a line is appended on the
/// first insertion. Every content mutation bumps the dirty counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<Line>,
    tab_stop: usize,
    dirty: u64,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::with_tab_stop(DEFAULT_TAB_STOP)
    }

    /// A zero tab stop is treated as 1.
    pub fn with_tab_stop(tab_stop: usize) -> Self {
        Self {
            lines: Vec::new(),
            tab_stop: tab_stop.max(1),
            dirty: 0,
        }
    }

    /// Build a clean buffer from already split lines
    pub fn from_lines<I>(lines: I, tab_stop: usize) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        let tab_stop = tab_stop.max(1);
        Self {
            lines: lines
                .into_iter()
                .map(|content| Line::new(content, tab_stop))
                .collect(),
            tab_stop,
            dirty: 0,
        }
    }

    /// Split raw file bytes on `\n`, dropping trailing `\r`
    pub fn from_bytes(bytes: &[u8], tab_stop: usize) -> Self {
        Self::from_lines(split_lines(bytes), tab_stop)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, row: usize) -> Option<&Line> {
        self.lines.get(row)
    }

    pub fn line_length(&self, row: usize) -> usize {
        self.lines.get(row).map(Line::len).unwrap_or(0)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn mark_clean(&mut self) {
        self.dirty = 0;
    }

    /// Insert a new line at `index`; `index == line_count()` appends
    pub fn insert_line(&mut self, index: usize, text: &[u8]) -> bool {
        if index > self.lines.len() {
            return false;
        }

        self.lines
            .insert(index, Line::new(text.to_vec(), self.tab_stop));
        self.dirty += 1;
        true
    }

    /// Delete entire line at `index`
    pub fn delete_line(&mut self, index: usize) -> bool {
        if index >= self.lines.len() {
            return false;
        }

        self.lines.remove(index);
        self.dirty += 1;
        true
    }

    /// Insert a byte; an out-of-range column appends at the end of the line
    pub fn insert_char(&mut self, row: usize, col: usize, ch: u8) -> bool {
        let tab_stop = self.tab_stop;
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };

        let at = col.min(line.content.len());
        line.content.insert(at, ch);
        line.update(tab_stop);
        self.dirty += 1;
        true
    }

    /// Delete the byte at `col`
    pub fn delete_char(&mut self, row: usize, col: usize) -> bool {
        let tab_stop = self.tab_stop;
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };
        if col >= line.content.len() {
            return false;
        }

        line.content.remove(col);
        line.update(tab_stop);
        self.dirty += 1;
        true
    }

    /// Append bytes to the end of a line
    pub fn append_to_line(&mut self, row: usize, text: &[u8]) -> bool {
        let tab_stop = self.tab_stop;
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };

        line.content.extend_from_slice(text);
        line.update(tab_stop);
        self.dirty += 1;
        true
    }

    /// Move `[col, len)` of a line onto a new line right after it
    pub fn split_line(&mut self, row: usize, col: usize) -> bool {
        let tab_stop = self.tab_stop;
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };

        let at = col.min(line.content.len());
        let rest = line.content.split_off(at);
        line.update(tab_stop);
        self.lines.insert(row + 1, Line::new(rest, tab_stop));
        self.dirty += 1;
        true
    }

    /// Append line `row` to line `row - 1` and remove it
    ///
    /// Returns the join point (the previous line's old length).
    pub fn join_with_previous(&mut self, row: usize) -> Option<Position> {
        if row == 0 || row >= self.lines.len() {
            return None;
        }

        let current = self.lines.remove(row);
        let join_col = self.lines[row - 1].len();
        self.append_to_line(row - 1, &current.content);
        Some(Position::new(row - 1, join_col))
    }

    /// Render column of a logical position; 0 past the end of the document
    pub fn render_column_of(&self, row: usize, col: usize) -> usize {
        self.lines
            .get(row)
            .map(|line| line.render_column(col, self.tab_stop))
            .unwrap_or(0)
    }

    /// Every line followed by `\n`, including the last one
    pub fn serialize(&self) -> Vec<u8> {
        let total: usize = self.lines.iter().map(|line| line.len() + 1).sum();
        let mut out = Vec::with_capacity(total);
        for line in &self.lines {
            out.extend_from_slice(&line.content);
            out.push(b'\n');
        }
        out
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Split bytes into lines, stripping `\n` and any `\r` before it
///
/// A trailing newline does not produce an extra empty line.
pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }

    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n')
        .map(|line| {
            let mut end = line.len();
            while end > 0 && line[end - 1] == b'\r' {
                end -= 1;
            }
            line[..end].to_vec()
        })
        .collect()
}
