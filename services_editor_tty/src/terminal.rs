//! Raw mode and window size
//!
//! [`RawModeGuard`] puts the controlling terminal into raw mode with a
//! bounded read wait (`VMIN = 0`, `VTIME = 1`, so each read returns after at
//! most 100 ms). The saved attributes are restored when the guard drops, and
//! by a panic hook if the process panics first.

use std::io::{self, Write};
use std::sync::{Mutex, Once};

use editor_core::ScreenSize;
use rustix::termios::{self, OptionalActions, SpecialCodeIndex, Termios};
use thiserror::Error;
use tracing::info;

use crate::render::{CLEAR_SCREEN, CURSOR_HOME, SHOW_CURSOR};

/// Attributes to put back on panic
static ORIGINAL_TERMIOS: Mutex<Option<Termios>> = Mutex::new(None);

/// Terminal error
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("standard input is not a terminal")]
    NotATerminal,

    #[error("failed to read terminal attributes: {0}")]
    GetAttributes(#[source] io::Error),

    #[error("failed to set terminal attributes: {0}")]
    SetAttributes(#[source] io::Error),

    #[error("failed to query window size: {0}")]
    WindowSize(#[source] io::Error),

    #[error("terminal reports a width of zero columns")]
    ZeroWidth,

    #[error("terminal is {0} rows tall; at least 3 are needed")]
    TooShort(u16),
}

/// One text row plus the message and status bars
const MIN_TERMINAL_ROWS: u16 = 3;

/// Holds the terminal in raw mode until dropped
pub struct RawModeGuard {
    original: Termios,
}

impl RawModeGuard {
    /// Switch stdin's terminal to raw mode
    pub fn enable() -> Result<Self, TerminalError> {
        let stdin = io::stdin();
        if !termios::isatty(&stdin) {
            return Err(TerminalError::NotATerminal);
        }

        let original =
            termios::tcgetattr(&stdin).map_err(|e| TerminalError::GetAttributes(e.into()))?;

        let mut raw = original.clone();
        raw.make_raw();
        raw.special_codes[SpecialCodeIndex::VMIN] = 0;
        raw.special_codes[SpecialCodeIndex::VTIME] = 1;

        termios::tcsetattr(&stdin, OptionalActions::Flush, &raw)
            .map_err(|e| TerminalError::SetAttributes(e.into()))?;

        if let Ok(mut saved) = ORIGINAL_TERMIOS.lock() {
            *saved = Some(original.clone());
        }
        install_panic_hook();
        info!("raw mode entered");

        Ok(Self { original })
    }

    /// Put the saved attributes back
    pub fn restore(&self) -> Result<(), TerminalError> {
        termios::tcsetattr(io::stdin(), OptionalActions::Flush, &self.original)
            .map_err(|e| TerminalError::SetAttributes(e.into()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(SHOW_CURSOR);
        let _ = stdout.flush();

        if self.restore().is_ok() {
            if let Ok(mut saved) = ORIGINAL_TERMIOS.lock() {
                *saved = None;
            }
            info!("raw mode left");
        }
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            best_effort_restore();
            previous(info);
        }));
    });
}

fn best_effort_restore() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(CLEAR_SCREEN);
    let _ = stdout.write_all(CURSOR_HOME);
    let _ = stdout.write_all(SHOW_CURSOR);
    let _ = stdout.flush();

    // try_lock: the panic may have happened while the lock was held
    if let Ok(saved) = ORIGINAL_TERMIOS.try_lock() {
        if let Some(original) = saved.as_ref() {
            let _ = termios::tcsetattr(io::stdin(), OptionalActions::Flush, original);
        }
    }
}

/// Text area of the current terminal window
///
/// Two rows are taken out for the message and status bars.
pub fn window_size() -> Result<ScreenSize, TerminalError> {
    let size =
        termios::tcgetwinsize(io::stdout()).map_err(|e| TerminalError::WindowSize(e.into()))?;
    text_area(size.ws_row, size.ws_col)
}

fn text_area(rows: u16, cols: u16) -> Result<ScreenSize, TerminalError> {
    if cols == 0 {
        return Err(TerminalError::ZeroWidth);
    }
    if rows < MIN_TERMINAL_ROWS {
        return Err(TerminalError::TooShort(rows));
    }

    Ok(ScreenSize::from_terminal(usize::from(rows), usize::from(cols)))
}
