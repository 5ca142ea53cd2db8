//! EditSession state machine
//!
//! The session owns the document, the cursor and the scroll offsets. It
//! applies one key at a time and reports what the host has to do next
//! through [`CoreOutcome`]; it never performs I/O itself.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    buffer::{Position, TextBuffer, DEFAULT_TAB_STOP},
    frame::Frame,
    key::Key,
    mode::EditorMode,
    snapshot::EditorSnapshot,
    viewport::{ScreenSize, Viewport},
};

/// Extra Ctrl-Q presses needed to quit with unsaved changes
pub const DEFAULT_QUIT_TIMES: usize = 1;

/// Session tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub tab_stop: usize,
    pub quit_times: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_times: DEFAULT_QUIT_TIMES,
        }
    }
}

/// Outcome from applying a key to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Nothing happened
    Continue,
    /// State changed (buffer modified, cursor moved, prompt edited)
    Changed,
    /// Display a status message
    StatusMessage(String),
    /// Request IO operation from host
    RequestIo(CoreIoRequest),
    /// Request to exit the editor
    RequestExit,
}

/// IO request from the session to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreIoRequest {
    /// Save to the current file name
    Save,
    /// Save to a name just entered at the prompt
    SaveAs(String),
}

/// One open document plus cursor, scroll and prompt state
#[derive(Debug, Clone)]
pub struct EditSession {
    config: SessionConfig,
    mode: EditorMode,
    buffer: TextBuffer,
    cursor: Position,
    viewport: Viewport,
    screen: ScreenSize,
    filename: Option<String>,
    prompt: String,
    quit_remaining: usize,
}

impl EditSession {
    /// Create a session on an empty, unnamed document
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            mode: EditorMode::Edit,
            buffer: TextBuffer::with_tab_stop(config.tab_stop),
            cursor: Position::zero(),
            viewport: Viewport::new(),
            screen: ScreenSize::new(1, 1),
            filename: None,
            prompt: String::new(),
            quit_remaining: config.quit_times,
        }
    }

    /// Replace the document with loaded lines
    pub fn load_lines(&mut self, lines: Vec<Vec<u8>>, filename: Option<String>) {
        self.buffer = TextBuffer::from_lines(lines, self.config.tab_stop);
        self.filename = filename;
        self.cursor = Position::zero();
        self.viewport = Viewport::new();
        self.mode = EditorMode::Edit;
        self.prompt.clear();
        self.quit_remaining = self.config.quit_times;
    }

    /// Apply a key event and return the outcome
    pub fn apply_key(&mut self, key: Key) -> CoreOutcome {
        let quitting = self.mode == EditorMode::Edit && key.is_ctrl(b'q');
        if !quitting {
            self.quit_remaining = self.config.quit_times;
        }

        match self.mode {
            EditorMode::Edit => self.handle_edit_mode(key),
            EditorMode::SaveAs => self.handle_prompt_mode(key),
        }
    }

    /// Recompute the viewport and describe the screen
    ///
    /// `message` is the host's status message, already expired if stale. In
    /// save-as mode the prompt replaces it.
    pub fn frame(&mut self, message: &str) -> Frame {
        let render_col = self.viewport.scroll(&self.buffer, self.cursor, self.screen);
        let show_banner = self.buffer.is_empty() && self.filename.is_none();
        let rows = Frame::text_rows(&self.buffer, &self.viewport, self.screen, show_banner);
        let (status_left, status_right) =
            Frame::status_texts(&self.buffer, self.filename.as_deref(), self.cursor);
        let message = match self.mode {
            EditorMode::Edit => String::from(message),
            EditorMode::SaveAs => self.prompt_message(),
        };

        Frame {
            screen: self.screen,
            rows,
            message,
            status_left,
            status_right,
            cursor: Position::new(
                self.cursor.row - self.viewport.row_offset,
                render_col - self.viewport.col_offset,
            ),
        }
    }

    /// Get a complete snapshot of session state
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            mode: self.mode,
            cursor: self.cursor,
            buffer_lines: self
                .buffer
                .lines()
                .iter()
                .map(|line| line.content().to_vec())
                .collect(),
            dirty: self.buffer.dirty(),
            viewport: self.viewport,
            filename: self.filename.clone(),
            prompt: self.prompt.clone(),
        }
    }

    // Public accessors for rendering/testing
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn screen_size(&self) -> ScreenSize {
        self.screen
    }

    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Document bytes for saving
    pub fn serialize(&self) -> Vec<u8> {
        self.buffer.serialize()
    }

    /// Called by the host after a successful save
    pub fn mark_saved(&mut self) {
        self.buffer.mark_clean();
    }

    fn prompt_message(&self) -> String {
        format!("Save as: {} (ESC to cancel)", self.prompt)
    }

    fn handle_edit_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Ctrl(b'q') => self.handle_quit(),
            Key::Ctrl(b's') => self.request_save(),
            Key::Enter => self.insert_newline(),
            Key::Backspace | Key::Ctrl(b'h') => self.delete_backward(),
            Key::Delete => self.delete_forward(),
            Key::Left | Key::Right | Key::Up | Key::Down => {
                self.move_cursor(key);
                CoreOutcome::Changed
            }
            Key::PageUp | Key::PageDown => {
                self.move_page(key);
                CoreOutcome::Changed
            }
            Key::Home => {
                self.cursor.col = 0;
                CoreOutcome::Changed
            }
            Key::End => {
                self.cursor.col = self.buffer.line_length(self.cursor.row);
                CoreOutcome::Changed
            }
            other => match other.text_byte() {
                Some(byte) => self.insert_char(byte),
                // Escape, Ctrl-L and unbound control keys
                None => CoreOutcome::Continue,
            },
        }
    }

    fn handle_prompt_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Escape => {
                self.mode = EditorMode::Edit;
                self.prompt.clear();
                CoreOutcome::StatusMessage("Save aborted".into())
            }
            Key::Enter => {
                if self.prompt.is_empty() {
                    return CoreOutcome::Continue;
                }
                let name = core::mem::take(&mut self.prompt);
                self.filename = Some(name.clone());
                self.mode = EditorMode::Edit;
                CoreOutcome::RequestIo(CoreIoRequest::SaveAs(name))
            }
            Key::Backspace | Key::Delete | Key::Ctrl(b'h') => {
                self.prompt.pop();
                CoreOutcome::Changed
            }
            Key::Char(byte) if (0x20..0x7f).contains(&byte) => {
                self.prompt.push(char::from(byte));
                CoreOutcome::Changed
            }
            _ => CoreOutcome::Continue,
        }
    }

    fn handle_quit(&mut self) -> CoreOutcome {
        if !self.buffer.is_dirty() || self.quit_remaining == 0 {
            return CoreOutcome::RequestExit;
        }

        let remaining = self.quit_remaining;
        self.quit_remaining -= 1;
        CoreOutcome::StatusMessage(format!(
            "WARNING!! File has unsaved changes. Press Ctrl-Q {} more time{} to quit.",
            remaining,
            if remaining == 1 { "" } else { "s" }
        ))
    }

    fn request_save(&mut self) -> CoreOutcome {
        if self.filename.is_some() {
            return CoreOutcome::RequestIo(CoreIoRequest::Save);
        }

        self.mode = EditorMode::SaveAs;
        self.prompt.clear();
        CoreOutcome::Changed
    }

    // Editing

    fn insert_char(&mut self, byte: u8) -> CoreOutcome {
        if self.cursor.row >= self.buffer.line_count() {
            self.buffer.insert_line(self.buffer.line_count(), b"");
        }
        if self.buffer.insert_char(self.cursor.row, self.cursor.col, byte) {
            self.cursor.col += 1;
            CoreOutcome::Changed
        } else {
            CoreOutcome::Continue
        }
    }

    fn insert_newline(&mut self) -> CoreOutcome {
        if self.cursor.row >= self.buffer.line_count() {
            self.buffer.insert_line(self.buffer.line_count(), b"");
        }

        let Position { row, col } = self.cursor;
        if col == 0 {
            self.buffer.insert_line(row, b"");
        } else if col >= self.buffer.line_length(row) {
            self.buffer.insert_line(row + 1, b"");
        } else {
            self.buffer.split_line(row, col);
        }
        self.cursor = Position::new(row + 1, 0);
        CoreOutcome::Changed
    }

    fn delete_backward(&mut self) -> CoreOutcome {
        let Position { row, col } = self.cursor;
        if row >= self.buffer.line_count() {
            return CoreOutcome::Continue;
        }

        if col > 0 {
            self.buffer.delete_char(row, col - 1);
            self.cursor.col -= 1;
            CoreOutcome::Changed
        } else if let Some(join_point) = self.buffer.join_with_previous(row) {
            self.cursor = join_point;
            CoreOutcome::Changed
        } else {
            CoreOutcome::Continue
        }
    }

    fn delete_forward(&mut self) -> CoreOutcome {
        let before = self.cursor;
        self.move_cursor(Key::Right);
        if self.cursor == before {
            return CoreOutcome::Continue;
        }
        self.delete_backward()
    }

    // Cursor movement

    fn move_cursor(&mut self, key: Key) {
        let line_count = self.buffer.line_count();
        let Position { row, col } = self.cursor;

        match key {
            Key::Left => {
                if col > 0 {
                    self.cursor.col -= 1;
                } else if row > 0 {
                    self.cursor = Position::new(row - 1, self.buffer.line_length(row - 1));
                }
            }
            Key::Right => {
                if row < line_count {
                    if col < self.buffer.line_length(row) {
                        self.cursor.col += 1;
                    } else if row + 1 < line_count {
                        self.cursor = Position::new(row + 1, 0);
                    }
                }
            }
            Key::Up => {
                if row > 0 {
                    self.cursor.row -= 1;
                }
            }
            Key::Down => {
                if row + 1 < line_count {
                    self.cursor.row += 1;
                }
            }
            _ => {}
        }

        self.clamp_cursor();
    }

    fn move_page(&mut self, key: Key) {
        let page = self.screen.rows.max(1);
        let last_row = self.buffer.line_count().saturating_sub(1);

        self.cursor.row = match key {
            Key::PageUp => self.cursor.row.saturating_sub(page),
            _ => (self.cursor.row + page).min(last_row),
        };
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let line_len = self.buffer.line_length(self.cursor.row);
        if self.cursor.col > line_len {
            self.cursor.col = line_len;
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
