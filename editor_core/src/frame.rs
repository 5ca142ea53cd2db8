//! Drawable frame description
//!
//! A [`Frame`] says what goes on screen and in which order; turning it into
//! terminal bytes is the host's job.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::buffer::{Position, TextBuffer};
use crate::viewport::{ScreenSize, Viewport};

/// Longest file name shown in the status bar
pub const STATUS_NAME_WIDTH: usize = 20;

const BANNER_RULE: &str = "+--------------------------------------+";

/// One row of the text area
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameRow {
    /// Windowed render form of a document line
    Text(Vec<u8>),
    /// Past the end of the document
    Filler,
    /// Welcome banner text, already padded and truncated
    Banner(String),
}

/// Everything the renderer draws for one refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub screen: ScreenSize,
    pub rows: Vec<FrameRow>,
    pub message: String,
    pub status_left: String,
    pub status_right: String,
    /// Zero-based screen position of the cursor inside the text area
    pub cursor: Position,
}

impl Frame {
    pub(crate) fn text_rows(
        buffer: &TextBuffer,
        viewport: &Viewport,
        screen: ScreenSize,
        show_banner: bool,
    ) -> Vec<FrameRow> {
        let banner = if show_banner {
            banner_lines(screen.cols)
        } else {
            Vec::new()
        };
        let banner_top = screen.rows / 3;

        (0..screen.rows)
            .map(|y| {
                let file_row = y + viewport.row_offset;
                if let Some(line) = buffer.line(file_row) {
                    let rendered = line.rendered();
                    let start = viewport.col_offset.min(rendered.len());
                    let end = (viewport.col_offset + screen.cols).min(rendered.len());
                    FrameRow::Text(rendered[start..end].to_vec())
                } else if let Some(text) = y
                    .checked_sub(banner_top)
                    .and_then(|index| banner.get(index))
                {
                    FrameRow::Banner(text.clone())
                } else {
                    FrameRow::Filler
                }
            })
            .collect()
    }

    pub(crate) fn status_texts(
        buffer: &TextBuffer,
        filename: Option<&str>,
        cursor: Position,
    ) -> (String, String) {
        let name = filename.unwrap_or("[No Name]");
        let name: String = name.chars().take(STATUS_NAME_WIDTH).collect();
        let modified = if buffer.is_dirty() { " (modified)" } else { "" };
        let left = format!("{} - {} lines{}", name, buffer.line_count(), modified);
        let right = format!("{}/{}", cursor.row + 1, buffer.line_count());
        (left, right)
    }
}

fn banner_lines(cols: usize) -> Vec<String> {
    let title = format!("  BeDIT editor -- version {}", env!("CARGO_PKG_VERSION"));
    [BANNER_RULE, title.as_str(), BANNER_RULE]
        .iter()
        .map(|text| centered(text, cols))
        .collect()
}

fn centered(text: &str, cols: usize) -> String {
    let width = text.len().min(cols.saturating_sub(1));
    let padding = (cols.saturating_sub(width)) / 2;
    let mut line = String::from("~");
    for _ in 1..padding {
        line.push(' ');
    }
    line.push_str(&text[..width]);
    line.chars().take(cols).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::DEFAULT_TAB_STOP;
    use alloc::vec;

    fn buffer_of(lines: &[&str]) -> TextBuffer {
        TextBuffer::from_lines(
            lines.iter().map(|l| l.as_bytes().to_vec()),
            DEFAULT_TAB_STOP,
        )
    }

    #[test]
    fn test_rows_are_windowed() {
        let buffer = buffer_of(&["0123456789", "ab", "third"]);
        let viewport = Viewport {
            row_offset: 0,
            col_offset: 3,
        };
        let rows = Frame::text_rows(&buffer, &viewport, ScreenSize::new(4, 4), false);
        assert_eq!(
            rows,
            vec![
                FrameRow::Text(b"3456".to_vec()),
                FrameRow::Text(Vec::new()),
                FrameRow::Text(b"rd".to_vec()),
                FrameRow::Filler,
            ]
        );
    }

    #[test]
    fn test_rows_use_render_form() {
        let buffer = buffer_of(&["\tx"]);
        let rows = Frame::text_rows(&buffer, &Viewport::new(), ScreenSize::new(1, 20), false);
        assert_eq!(rows, vec![FrameRow::Text(b"        x".to_vec())]);
    }

    #[test]
    fn test_banner_placement() {
        let buffer = TextBuffer::new();
        let rows = Frame::text_rows(&buffer, &Viewport::new(), ScreenSize::new(9, 60), true);
        assert_eq!(rows[0], FrameRow::Filler);
        assert!(matches!(&rows[3], FrameRow::Banner(text) if text.contains("+---")));
        assert!(matches!(&rows[4], FrameRow::Banner(text) if text.contains("BeDIT editor")));
        assert!(matches!(&rows[5], FrameRow::Banner(text) if text.contains("+---")));
        assert_eq!(rows[6], FrameRow::Filler);
    }

    #[test]
    fn test_banner_truncated_to_width() {
        for line in banner_lines(12) {
            assert!(line.len() <= 12);
            assert!(line.starts_with('~'));
        }
    }

    #[test]
    fn test_status_texts() {
        let mut buffer = buffer_of(&["a", "b"]);
        let (left, right) = Frame::status_texts(&buffer, None, Position::new(1, 0));
        assert_eq!(left, "[No Name] - 2 lines");
        assert_eq!(right, "2/2");

        buffer.insert_char(0, 0, b'x');
        let (left, _) = Frame::status_texts(
            &buffer,
            Some("a-very-long-file-name-indeed.txt"),
            Position::zero(),
        );
        assert_eq!(left, "a-very-long-file-nam - 2 lines (modified)");
    }
}
