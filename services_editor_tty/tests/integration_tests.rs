//! Integration tests for the terminal editor
//!
//! These tests drive the whole loop (render, poll, decode, dispatch, save)
//! with scripted key bytes and an in-memory screen.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use editor_core::{ByteSource, EditSession, EditorMode, ScreenSize, SessionConfig};
use services_editor_tty::{
    Editor, EditorAction, EditorError, EditorIo, FileEditorIo, MemoryEditorIo,
};

/// Replays a key script; `None` entries stand for a read timeout
///
/// Running out of script is an input error, so a test that forgets to quit
/// fails instead of spinning.
struct Script(VecDeque<Option<u8>>);

impl Script {
    fn new(bytes: &[u8]) -> Self {
        Self(bytes.iter().copied().map(Some).collect())
    }

    fn with_pauses(mut self) -> Self {
        let bytes: Vec<_> = self.0.drain(..).collect();
        for byte in bytes {
            self.0.push_back(byte);
            self.0.push_back(None);
        }
        self
    }
}

impl ByteSource for Script {
    type Error = io::Error;

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.0
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

const CTRL_Q: u8 = 0x11;
const CTRL_S: u8 = 0x13;

fn editor_with<I: EditorIo>(script: Script, io: I, config: SessionConfig) -> Editor<Script, Vec<u8>, I> {
    let mut editor = Editor::new(
        EditSession::new(config),
        script,
        Vec::new(),
        io,
        Duration::from_secs(5),
    );
    editor.set_screen_size(ScreenSize::new(10, 60));
    editor
}

fn screen_text(editor: &Editor<Script, Vec<u8>, impl EditorIo>) -> String {
    String::from_utf8_lossy(editor.output()).into_owned()
}

#[test]
fn test_type_and_save_existing_file() {
    let io = MemoryEditorIo::new().with_file("notes.txt", b"first\nsecond\n".to_vec());
    let mut script = b"\x1b[B\x1b[F!".to_vec();
    script.extend([CTRL_S, CTRL_Q]);

    let mut editor = editor_with(Script::new(&script), io, SessionConfig::default());
    editor.open("notes.txt").unwrap();
    editor.run().unwrap();

    assert_eq!(editor.io().file("notes.txt"), Some(&b"first\nsecond!\n"[..]));
    assert!(!editor.session().is_dirty());
    assert!(screen_text(&editor).contains("14 bytes written to disk"));
}

#[test]
fn test_save_as_prompt_for_new_document() {
    let mut script = b"hello".to_vec();
    script.push(CTRL_S);
    script.extend_from_slice(b"out.txt\r");
    script.push(CTRL_Q);

    let mut editor = editor_with(Script::new(&script), MemoryEditorIo::new(), SessionConfig::default());
    editor.run().unwrap();

    assert_eq!(editor.io().file("out.txt"), Some(&b"hello\n"[..]));
    assert_eq!(editor.session().filename(), Some("out.txt"));
    let screen = screen_text(&editor);
    assert!(screen.contains("Save as: out.txt (ESC to cancel)"));
    assert!(screen.contains("out.txt - 1 lines"));
}

#[test]
fn test_save_as_escape_aborts() {
    let mut script = b"x".to_vec();
    script.push(CTRL_S);
    script.extend_from_slice(b"name");
    // Lone ESC, cut short by the timeout
    script.push(0x1b);

    let mut editor = editor_with(
        Script::new(&script).with_pauses(),
        MemoryEditorIo::new(),
        SessionConfig::default(),
    );
    // One step per key plus one per pause; the final ESC consumes its own
    for _ in 0..(script.len() * 2 - 1) {
        editor.step().unwrap();
    }

    assert_eq!(editor.session().mode(), EditorMode::Edit);
    assert_eq!(editor.session().filename(), None);
    assert_eq!(editor.status_message().text(), "Save aborted");
    assert!(editor.session().is_dirty());
}

#[test]
fn test_quit_needs_confirmation_when_dirty() {
    let script = [b'x', CTRL_Q, CTRL_Q];
    let mut editor = editor_with(Script::new(&script), MemoryEditorIo::new(), SessionConfig::default());

    assert_eq!(editor.step().unwrap(), EditorAction::Continue);
    assert_eq!(editor.step().unwrap(), EditorAction::Continue);
    assert!(editor.status_message().text().starts_with("WARNING!!"));
    assert_eq!(editor.step().unwrap(), EditorAction::Quit);
}

#[test]
fn test_quit_counter_resets_on_other_key() {
    let script = [b'x', CTRL_Q, b'y', CTRL_Q, CTRL_Q];
    let mut editor = editor_with(Script::new(&script), MemoryEditorIo::new(), SessionConfig::default());

    let actions: Vec<_> = (0..script.len()).map(|_| editor.step().unwrap()).collect();
    assert_eq!(
        actions,
        vec![
            EditorAction::Continue,
            EditorAction::Continue,
            EditorAction::Continue,
            EditorAction::Continue,
            EditorAction::Quit,
        ]
    );
}

#[test]
fn test_configured_quit_times() {
    let script = [b'x', CTRL_Q, CTRL_Q, CTRL_Q];
    let config = SessionConfig {
        quit_times: 2,
        ..SessionConfig::default()
    };
    let mut editor = editor_with(Script::new(&script), MemoryEditorIo::new(), config);
    editor.run().unwrap();
    assert!(editor.status_message().text().contains("1 more time to quit"));
}

#[test]
fn test_script_exhaustion_is_input_error() {
    let mut editor = editor_with(Script::new(b"abc"), MemoryEditorIo::new(), SessionConfig::default());
    let err = editor.run().unwrap_err();
    assert!(matches!(err, EditorError::Input(_)));
}

#[test]
fn test_scrolls_to_keep_cursor_visible() {
    let content: String = (0..40).map(|i| format!("row {}\n", i)).collect();
    let io = MemoryEditorIo::new().with_file("long.txt", content.into_bytes());
    // Fifteen Down arrows, then Page Down
    let mut script = b"\x1b[B".repeat(15);
    script.extend_from_slice(b"\x1b[6~");

    let mut editor = editor_with(Script::new(&script), io, SessionConfig::default());
    editor.open("long.txt").unwrap();
    for _ in 0..16 {
        editor.step().unwrap();
    }

    assert_eq!(editor.session().cursor().row, 25);

    editor.output_mut().clear();
    editor.refresh_screen().unwrap();
    assert_eq!(editor.session().viewport().row_offset, 16);
    let screen = screen_text(&editor);
    assert!(screen.contains("row 25"));
    assert!(!screen.contains("row 5\x1b[K"));
    assert!(screen.contains("26/40"));
}

#[test]
fn test_tabs_render_expanded() {
    let io = MemoryEditorIo::new().with_file("tabs.txt", b"\tindented\n".to_vec());
    let mut editor = editor_with(Script::new(b"\x1b[F"), io, SessionConfig::default());
    editor.open("tabs.txt").unwrap();
    editor.step().unwrap();

    editor.output_mut().clear();
    editor.refresh_screen().unwrap();
    let screen = screen_text(&editor);
    assert!(screen.contains("        indented\x1b[K"));
    // End of "\tindented" is render column 16, so screen column 17
    assert!(screen.ends_with("\x1b[1;17H\x1b[?25h"));
}

#[test]
fn test_file_backed_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disk.txt").to_string_lossy().into_owned();
    std::fs::write(&path, b"abc\r\ndef\n").unwrap();

    let mut script = b"\x1b[3~".to_vec();
    script.extend([CTRL_S, CTRL_Q]);

    let mut editor = editor_with(Script::new(&script), FileEditorIo::new(), SessionConfig::default());
    editor.open(&path).unwrap();
    editor.run().unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"bc\ndef\n");
}

#[test]
fn test_welcome_banner_on_empty_start() {
    let mut editor = editor_with(Script::new(&[CTRL_Q]), MemoryEditorIo::new(), SessionConfig::default());
    editor.run().unwrap();
    let screen = screen_text(&editor);
    assert!(screen.contains("BeDIT editor -- version"));
    assert!(screen.contains("HELP: Ctrl-S = save | Ctrl-Q = quit"));
}
