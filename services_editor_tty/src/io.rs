//! Document I/O operations

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;

use editor_core::split_lines;
use thiserror::Error;

/// Permission bits for newly created files
pub const NEW_FILE_MODE: u32 = 0o644;

/// Document I/O error
#[derive(Debug, Error)]
pub enum IoError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Editor I/O abstraction.
pub trait EditorIo {
    /// Read a document as lines without their terminators
    ///
    /// A path that does not exist yet loads as an empty document.
    fn load(&mut self, path: &str) -> Result<Vec<Vec<u8>>, IoError>;

    /// Create or truncate `path` and write `content`, returning the byte count
    fn save(&mut self, path: &str, content: &[u8]) -> Result<usize, IoError>;
}

/// Local filesystem I/O
#[derive(Debug, Default, Clone, Copy)]
pub struct FileEditorIo;

impl FileEditorIo {
    pub fn new() -> Self {
        Self
    }
}

impl EditorIo for FileEditorIo {
    fn load(&mut self, path: &str) -> Result<Vec<Vec<u8>>, IoError> {
        match fs::read(path) {
            Ok(bytes) => Ok(split_lines(&bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(IoError::Read {
                path: path.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, path: &str, content: &[u8]) -> Result<usize, IoError> {
        let write_err = |source| IoError::Write {
            path: path.to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(NEW_FILE_MODE)
            .open(path)
            .map_err(write_err)?;
        file.write_all(content).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        Ok(content.len())
    }
}

/// In-memory I/O keyed by path
///
/// Useful for tests and for scripted sessions that must not touch the disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryEditorIo {
    files: BTreeMap<String, Vec<u8>>,
    read_only: bool,
}

impl MemoryEditorIo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    /// Make every save fail with `PermissionDenied`
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }
}

impl EditorIo for MemoryEditorIo {
    fn load(&mut self, path: &str) -> Result<Vec<Vec<u8>>, IoError> {
        Ok(self
            .files
            .get(path)
            .map(|bytes| split_lines(bytes))
            .unwrap_or_default())
    }

    fn save(&mut self, path: &str, content: &[u8]) -> Result<usize, IoError> {
        if self.read_only {
            return Err(IoError::Write {
                path: path.to_string(),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        self.files.insert(path.to_string(), content.to_vec());
        Ok(content.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn path_string(dir: &tempfile::TempDir, name: &str) -> String {
        dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_load_strips_terminators() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_string(&dir, "doc.txt");
        fs::write(&path, b"abc\r\ndef\n").unwrap();

        let lines = FileEditorIo::new().load(&path).unwrap();
        assert_eq!(lines, vec![b"abc".to_vec(), b"def".to_vec()]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let lines = FileEditorIo::new()
            .load(&path_string(&dir, "new.txt"))
            .unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_load_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        let err = FileEditorIo::new().load(&path).unwrap_err();
        assert!(matches!(err, IoError::Read { .. }));
    }

    #[test]
    fn test_save_creates_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_string(&dir, "out.txt");
        let mut io = FileEditorIo::new();

        assert_eq!(io.save(&path, b"a long first version\n").unwrap(), 21);
        assert_eq!(io.save(&path, b"short\n").unwrap(), 6);
        assert_eq!(fs::read(&path).unwrap(), b"short\n");

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o600, 0o600);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_string(&dir, "rt.txt");
        let mut io = FileEditorIo::new();
        io.save(&path, b"abc\ndef\n").unwrap();
        assert_eq!(
            io.load(&path).unwrap(),
            vec![b"abc".to_vec(), b"def".to_vec()]
        );
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = path_string(&dir, "missing/out.txt");
        let err = FileEditorIo::new().save(&path, b"x").unwrap_err();
        assert!(matches!(err, IoError::Write { .. }));
        assert!(err.to_string().starts_with("cannot write"));
    }

    #[test]
    fn test_memory_io() {
        let mut io = MemoryEditorIo::new().with_file("a.txt", b"one\ntwo\n".to_vec());
        assert_eq!(io.load("a.txt").unwrap().len(), 2);
        assert!(io.load("b.txt").unwrap().is_empty());

        io.save("b.txt", b"x\n").unwrap();
        assert_eq!(io.file("b.txt"), Some(&b"x\n"[..]));

        io.set_read_only(true);
        assert!(io.save("b.txt", b"y\n").is_err());
        assert_eq!(io.file("b.txt"), Some(&b"x\n"[..]));
    }
}
