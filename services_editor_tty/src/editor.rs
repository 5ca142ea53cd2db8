//! Main editor implementation

use std::io::{self, Write};
use std::time::Duration;

use editor_core::{
    ByteSource, CoreIoRequest, CoreOutcome, EditSession, Key, KeyDecoder, KeyPoll, ScreenSize,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::io::{EditorIo, IoError};
use crate::render::{EditorView, CLEAR_SCREEN, CURSOR_HOME};
use crate::status::StatusMessage;
use crate::terminal::TerminalError;

/// Message shown when the editor starts
pub const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit";

/// Editor error
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] TerminalError),

    #[error("Input error: {0}")]
    Input(#[source] io::Error),

    #[error("Output error: {0}")]
    Output(#[source] io::Error),
}

/// Editor result
pub type EditorResult<T> = Result<T, EditorError>;

/// Editor action result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Continue editing
    Continue,
    /// Quit the editor
    Quit,
    /// Document was saved; carries the byte count
    Saved(usize),
}

/// The terminal editor
///
/// Generic over where key bytes come from, where screen bytes go, and how
/// documents are stored.
pub struct Editor<S, W, I> {
    session: EditSession,
    decoder: KeyDecoder,
    input: S,
    output: W,
    io: I,
    view: EditorView,
    status: StatusMessage,
}

impl<S, W, I> Editor<S, W, I>
where
    S: ByteSource<Error = io::Error>,
    W: Write,
    I: EditorIo,
{
    /// Create an editor around a session
    pub fn new(session: EditSession, input: S, output: W, io: I, message_timeout: Duration) -> Self {
        let mut status = StatusMessage::new(message_timeout);
        status.set(HELP_MESSAGE);

        Self {
            session,
            decoder: KeyDecoder::new(),
            input,
            output,
            io,
            view: EditorView::new(),
            status,
        }
    }

    /// Load `path` into the session
    ///
    /// A missing file opens as an empty document with that name.
    pub fn open(&mut self, path: &str) -> EditorResult<()> {
        let lines = self.io.load(path)?;
        info!(path, lines = lines.len(), "file loaded");
        self.session.load_lines(lines, Some(path.to_string()));
        Ok(())
    }

    pub fn set_screen_size(&mut self, screen: ScreenSize) {
        self.session.set_screen_size(screen);
    }

    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.status.set(text);
    }

    /// Draw the current frame in one write
    pub fn refresh_screen(&mut self) -> EditorResult<()> {
        let frame = self.session.frame(self.status.visible());
        let bytes = self.view.render(&frame);
        self.output.write_all(bytes).map_err(EditorError::Output)?;
        self.output.flush().map_err(EditorError::Output)
    }

    /// Refresh, wait for one key, and apply it
    pub fn step(&mut self) -> EditorResult<EditorAction> {
        self.refresh_screen()?;

        match self
            .decoder
            .read_key(&mut self.input)
            .map_err(EditorError::Input)?
        {
            KeyPoll::Key(key) => self.process_key(key),
            KeyPoll::Idle => Ok(EditorAction::Continue),
        }
    }

    /// Run until the user quits, then clear the screen
    pub fn run(&mut self) -> EditorResult<()> {
        while self.step()? != EditorAction::Quit {}

        self.output.write_all(CLEAR_SCREEN).map_err(EditorError::Output)?;
        self.output.write_all(CURSOR_HOME).map_err(EditorError::Output)?;
        self.output.flush().map_err(EditorError::Output)
    }

    /// Apply one key to the session and carry out what it asks for
    pub fn process_key(&mut self, key: Key) -> EditorResult<EditorAction> {
        debug!(?key, "key decoded");

        match self.session.apply_key(key) {
            CoreOutcome::Continue | CoreOutcome::Changed => Ok(EditorAction::Continue),
            CoreOutcome::StatusMessage(text) => {
                if key.is_ctrl(b'q') {
                    warn!("quit blocked by unsaved changes");
                }
                self.status.set(text);
                Ok(EditorAction::Continue)
            }
            CoreOutcome::RequestIo(request) => Ok(self.handle_io_request(request)),
            CoreOutcome::RequestExit => Ok(EditorAction::Quit),
        }
    }

    fn handle_io_request(&mut self, request: CoreIoRequest) -> EditorAction {
        let path = match request {
            CoreIoRequest::SaveAs(path) => path,
            CoreIoRequest::Save => match self.session.filename() {
                Some(path) => path.to_string(),
                None => return EditorAction::Continue,
            },
        };

        let content = self.session.serialize();
        match self.io.save(&path, &content) {
            Ok(written) => {
                self.session.mark_saved();
                info!(path = path.as_str(), bytes = written, "file saved");
                self.status.set(format!("{} bytes written to disk", written));
                EditorAction::Saved(written)
            }
            Err(err) => {
                warn!(path = path.as_str(), error = %err, "save failed");
                self.status.set(format!("Can't save! I/O error: {}", err));
                EditorAction::Continue
            }
        }
    }

    // Public accessors for testing

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn status_message(&self) -> &StatusMessage {
        &self.status
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn io(&self) -> &I {
        &self.io
    }
}
