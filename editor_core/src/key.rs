//! Logical key representation

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// One decoded key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Key {
    /// A literal byte (printable ASCII, or any byte >= 0x80)
    Char(u8),
    /// Ctrl combined with a lowercase letter or one of `@ \ ] ^ _`
    Ctrl(u8),

    // Navigation
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    // Special keys
    Enter,
    Backspace,
    Delete,
    Escape,
}

/// Code sent for the Ctrl-modified version of `letter`
pub const fn ctrl_code(letter: u8) -> u8 {
    letter & 0x1f
}

impl Key {
    pub const TAB: Key = Key::Ctrl(b'i');

    /// Convert a single byte to a key
    ///
    /// 0x1b maps to a bare Escape; escape sequences are the decoder's job.
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            0x1b => Key::Escape,
            b'\r' => Key::Enter,
            0x7f => Key::Backspace,
            0x00..=0x1f => Key::Ctrl(control_symbol(byte)),
            other => Key::Char(other),
        }
    }

    /// True for the Ctrl combination of `letter`
    pub fn is_ctrl(&self, letter: u8) -> bool {
        matches!(self, Key::Ctrl(l) if *l == letter)
    }

    /// The byte to insert into the document, if this key inserts text
    pub fn text_byte(&self) -> Option<u8> {
        match *self {
            Key::Char(byte) => Some(byte),
            Key::Ctrl(b'i') => Some(b'\t'),
            _ => None,
        }
    }
}

fn control_symbol(byte: u8) -> u8 {
    match byte {
        0x01..=0x1a => b'a' + byte - 1,
        other => other | 0x40,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte() {
        assert_eq!(Key::from_byte(b'h'), Key::Char(b'h'));
        assert_eq!(Key::from_byte(b'Z'), Key::Char(b'Z'));
        assert_eq!(Key::from_byte(b' '), Key::Char(b' '));
        assert_eq!(Key::from_byte(0x1b), Key::Escape);
        assert_eq!(Key::from_byte(b'\r'), Key::Enter);
        assert_eq!(Key::from_byte(0x7f), Key::Backspace);
        assert_eq!(Key::from_byte(0xc3), Key::Char(0xc3));
    }

    #[test]
    fn test_control_bytes() {
        assert_eq!(Key::from_byte(ctrl_code(b'q')), Key::Ctrl(b'q'));
        assert_eq!(Key::from_byte(ctrl_code(b's')), Key::Ctrl(b's'));
        assert_eq!(Key::from_byte(b'\t'), Key::TAB);
        assert_eq!(Key::from_byte(0x08), Key::Ctrl(b'h'));
        assert_eq!(Key::from_byte(0x00), Key::Ctrl(b'@'));
        assert_eq!(Key::from_byte(0x1c), Key::Ctrl(b'\\'));
        assert_eq!(Key::from_byte(0x1f), Key::Ctrl(b'_'));
    }

    #[test]
    fn test_text_byte() {
        assert_eq!(Key::Char(b'x').text_byte(), Some(b'x'));
        assert_eq!(Key::TAB.text_byte(), Some(b'\t'));
        assert_eq!(Key::Ctrl(b'q').text_byte(), None);
        assert_eq!(Key::Enter.text_byte(), None);
    }

    #[test]
    fn test_is_ctrl() {
        assert!(Key::Ctrl(b'q').is_ctrl(b'q'));
        assert!(!Key::Char(b'q').is_ctrl(b'q'));
    }
}
