//! # BeDIT Host
//!
//! Process-level wiring for the `bedit` binary: configuration, logging and
//! the terminal session around an [`services_editor_tty::Editor`].
//!
//! ## Responsibilities
//!
//! The host:
//! - Parses arguments and environment into an `EditorConfig`
//! - Sends log events to a file, never to the screen
//! - Acquires the terminal and restores it on every exit path
//! - Reports fatal errors only after the terminal is back to normal

pub mod config;
pub mod logging;

use std::io;

use editor_core::EditSession;
use services_editor_tty::{
    window_size, ByteReader, Editor, EditorError, FileEditorIo, RawModeGuard, TerminalError,
};
use thiserror::Error;
use tracing::info;

pub use config::{Cli, EditorConfig};

/// Host error types
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] TerminalError),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Run one editing session on the controlling terminal
///
/// Raw mode is left before this returns, whether or not the session
/// succeeded.
pub fn run(config: &EditorConfig) -> Result<(), HostError> {
    let guard = RawModeGuard::enable()?;
    let screen = window_size()?;
    info!(rows = screen.rows, cols = screen.cols, "window size");

    let mut editor = Editor::new(
        EditSession::new(config.session_config()),
        ByteReader::stdin(),
        io::stdout(),
        FileEditorIo::new(),
        config.message_timeout,
    );
    editor.set_screen_size(screen);

    if let Some(path) = &config.path {
        editor.open(path)?;
    }

    let result = editor.run();
    drop(guard);
    result.map_err(HostError::from)
}
