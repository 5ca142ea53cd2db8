//! # Terminal Editor Service
//!
//! This crate hosts an [`editor_core::EditSession`] on a real terminal.
//!
//! ## Philosophy
//!
//! - **Host owns I/O**: The session never touches the terminal or the disk
//! - **One loop, one owner**: A single `Editor` value owns every piece of state
//! - **Restore on every exit**: Raw mode is undone on drop and on panic
//! - **Testable**: The loop is generic over its byte source, sink and storage
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A terminal emulator or curses replacement
//! - Unicode aware; the document is bytes
//! - Portable to non-Unix terminals
//!
//! ## Design
//!
//! - `terminal` enters raw mode and queries the window size
//! - `input` reads stdin one byte at a time with a bounded wait
//! - `render` turns a frame into one ANSI write
//! - `io` loads and saves documents
//! - `status` keeps the transient message line
//! - `editor` ties them into the refresh/poll/dispatch loop

pub mod editor;
pub mod input;
pub mod io;
pub mod render;
pub mod status;
pub mod terminal;

pub use editor::{Editor, EditorAction, EditorError, EditorResult, HELP_MESSAGE};
pub use input::ByteReader;
pub use io::{EditorIo, FileEditorIo, IoError, MemoryEditorIo};
pub use render::EditorView;
pub use status::{StatusMessage, DEFAULT_MESSAGE_TIMEOUT};
pub use terminal::{window_size, RawModeGuard, TerminalError};
