//! Frame to ANSI byte stream

use editor_core::{Frame, FrameRow};

pub const HIDE_CURSOR: &[u8] = b"\x1b[?25l";
pub const SHOW_CURSOR: &[u8] = b"\x1b[?25h";
pub const CURSOR_HOME: &[u8] = b"\x1b[H";
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
pub const ERASE_LINE: &[u8] = b"\x1b[K";
pub const INVERT: &[u8] = b"\x1b[7m";
pub const RESET_STYLE: &[u8] = b"\x1b[m";

/// Editor view for rendering
///
/// Keeps one output buffer alive across refreshes so each frame is a single
/// write.
#[derive(Debug, Default)]
pub struct EditorView {
    out: Vec<u8>,
}

impl EditorView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a frame into the view's buffer and return it
    pub fn render(&mut self, frame: &Frame) -> &[u8] {
        let cols = frame.screen.cols;
        self.out.clear();
        self.out.extend_from_slice(HIDE_CURSOR);
        self.out.extend_from_slice(CURSOR_HOME);

        for row in &frame.rows {
            match row {
                FrameRow::Text(bytes) => self.out.extend_from_slice(bytes),
                FrameRow::Filler => self.out.push(b'~'),
                FrameRow::Banner(text) => self.out.extend_from_slice(text.as_bytes()),
            }
            self.out.extend_from_slice(ERASE_LINE);
            self.out.extend_from_slice(b"\r\n");
        }

        self.render_message_bar(&frame.message, cols);
        self.render_status_bar(&frame.status_left, &frame.status_right, cols);

        // One-based from here on
        let position = format!("\x1b[{};{}H", frame.cursor.row + 1, frame.cursor.col + 1);
        self.out.extend_from_slice(position.as_bytes());
        self.out.extend_from_slice(SHOW_CURSOR);

        &self.out
    }

    fn render_message_bar(&mut self, message: &str, cols: usize) {
        self.out.extend_from_slice(ERASE_LINE);
        let bytes = message.as_bytes();
        self.out.extend_from_slice(&bytes[..bytes.len().min(cols)]);
        self.out.extend_from_slice(b"\r\n");
    }

    fn render_status_bar(&mut self, left: &str, right: &str, cols: usize) {
        self.out.extend_from_slice(INVERT);
        self.out.extend_from_slice(&status_bar(left, right, cols));
        self.out.extend_from_slice(RESET_STYLE);
    }
}

/// Left text, then spaces, then right text flush against the last column
///
/// The right text is dropped when it does not fit next to the left text.
pub fn status_bar(left: &str, right: &str, cols: usize) -> Vec<u8> {
    let mut bar: Vec<u8> = left.bytes().take(cols).collect();
    while bar.len() < cols {
        if cols - bar.len() == right.len() {
            bar.extend_from_slice(right.as_bytes());
            break;
        }
        bar.push(b' ');
    }
    bar
}
