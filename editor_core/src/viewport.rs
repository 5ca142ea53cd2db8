//! Scroll offsets and cursor visibility

use crate::buffer::{Position, TextBuffer};

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Size of the text area in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct ScreenSize {
    pub rows: usize,
    pub cols: usize,
}

impl ScreenSize {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Text area left once the message and status bars are taken out
    pub const fn from_terminal(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.saturating_sub(2),
            cols,
        }
    }
}

/// Scroll position: first visible line and first visible render column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
}

impl Viewport {
    pub const fn new() -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
        }
    }

    /// Scroll just enough to bring `cursor` into view
    ///
    /// Returns the cursor's render column. A zero-sized screen counts as 1x1.
    pub fn scroll(&mut self, buffer: &TextBuffer, cursor: Position, screen: ScreenSize) -> usize {
        let render_col = buffer.render_column_of(cursor.row, cursor.col);
        let rows = screen.rows.max(1);
        let cols = screen.cols.max(1);

        if cursor.row < self.row_offset {
            self.row_offset = cursor.row;
        }
        if cursor.row >= self.row_offset + rows {
            self.row_offset = cursor.row - rows + 1;
        }
        if render_col < self.col_offset {
            self.col_offset = render_col;
        }
        if render_col >= self.col_offset + cols {
            self.col_offset = render_col - cols + 1;
        }

        render_col
    }

    /// Whether a (row, render column) pair falls inside the window
    pub fn contains(&self, row: usize, render_col: usize, screen: ScreenSize) -> bool {
        let rows = screen.rows.max(1);
        let cols = screen.cols.max(1);
        (self.row_offset..self.row_offset + rows).contains(&row)
            && (self.col_offset..self.col_offset + cols).contains(&render_col)
    }
}
