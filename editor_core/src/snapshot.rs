//! Session snapshot for deterministic replay testing

use crate::{buffer::Position, mode::EditorMode, viewport::Viewport};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Complete session state, comparable across runs
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EditorSnapshot {
    pub mode: EditorMode,
    pub cursor: Position,
    pub buffer_lines: Vec<Vec<u8>>,
    pub dirty: u64,
    pub viewport: Viewport,
    pub filename: Option<String>,
    pub prompt: String,
}

impl EditorSnapshot {
    /// Compute a deterministic hash of the snapshot state
    /// This is used for fast comparison in replay tests
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update([self.mode as u8]);
        hasher.update(self.cursor.row.to_le_bytes());
        hasher.update(self.cursor.col.to_le_bytes());

        for line in &self.buffer_lines {
            hasher.update(line);
            hasher.update(b"\n");
        }

        hasher.update(self.dirty.to_le_bytes());
        hasher.update(self.viewport.row_offset.to_le_bytes());
        hasher.update(self.viewport.col_offset.to_le_bytes());
        if let Some(name) = &self.filename {
            hasher.update(name.as_bytes());
        }
        hasher.update([0]);
        hasher.update(self.prompt.as_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}
