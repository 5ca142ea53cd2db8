//! Byte stream to key decoding
//!
//! The decoder pulls bytes from a [`ByteSource`] that waits a bounded time
//! for each byte. A timeout is not an error: before any byte arrives it
//! yields [`KeyPoll::Idle`], and in the middle of an escape sequence it
//! cuts the sequence short and yields a bare Escape.
//!
//! Recognized sequences:
//!
//! | Bytes            | Key                  |
//! |------------------|----------------------|
//! | `ESC [ A`..`D`   | Up, Down, Right, Left|
//! | `ESC [ H` / `F`  | Home / End           |
//! | `ESC O H` / `F`  | Home / End           |
//! | `ESC O A`..`D`   | arrows               |
//! | `ESC [ 1~` `7~`  | Home                 |
//! | `ESC [ 3~`       | Delete               |
//! | `ESC [ 4~` `8~`  | End                  |
//! | `ESC [ 5~` / `6~`| PageUp / PageDown    |
//!
//! Anything else collapses to Escape.

use crate::key::Key;

/// Longest CSI parameter run consumed before giving up on a sequence
const MAX_CSI_PARAMS: usize = 16;

/// Most bytes skipped while looking for the end of an unusable sequence
const MAX_DRAIN: usize = 16;

/// A byte-at-a-time input with a bounded wait
pub trait ByteSource {
    type Error;

    /// `Ok(None)` means no byte arrived within the wait.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

/// Result of a single decode attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPoll {
    Key(Key),
    /// No input arrived within the wait
    Idle,
}

impl KeyPoll {
    pub fn key(self) -> Option<Key> {
        match self {
            KeyPoll::Key(key) => Some(key),
            KeyPoll::Idle => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    Idle,
    EscapeSeen,
    Csi,
    Ss3,
    CsiExtended { value: u32, params: usize, plain: bool },
    /// Skipping the rest of a sequence that can only end as Escape
    Drain { skipped: usize },
}

/// Escape sequence decoder
///
/// Holds no state between calls; every call decodes exactly one key or
/// reports idle.
#[derive(Debug, Default)]
pub struct KeyDecoder;

impl KeyDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode the next key from `source`
    ///
    /// Only errors from the source itself are returned.
    pub fn read_key<S: ByteSource>(&mut self, source: &mut S) -> Result<KeyPoll, S::Error> {
        let mut state = DecodeState::Idle;

        loop {
            let Some(byte) = source.read_byte()? else {
                return Ok(match state {
                    DecodeState::Idle => KeyPoll::Idle,
                    _ => KeyPoll::Key(Key::Escape),
                });
            };

            state = match state {
                DecodeState::Idle => match byte {
                    0x1b => DecodeState::EscapeSeen,
                    other => return Ok(KeyPoll::Key(Key::from_byte(other))),
                },
                DecodeState::EscapeSeen => match byte {
                    b'[' => DecodeState::Csi,
                    b'O' => DecodeState::Ss3,
                    _ => return Ok(KeyPoll::Key(Key::Escape)),
                },
                DecodeState::Csi => match byte {
                    b'0'..=b'9' => DecodeState::CsiExtended {
                        value: u32::from(byte - b'0'),
                        params: 1,
                        plain: true,
                    },
                    b';' => DecodeState::CsiExtended {
                        value: 0,
                        params: 1,
                        plain: false,
                    },
                    0x20..=0x3f => DecodeState::Drain { skipped: 0 },
                    final_byte => return Ok(KeyPoll::Key(letter_key(final_byte))),
                },
                DecodeState::Ss3 => return Ok(KeyPoll::Key(letter_key(byte))),
                DecodeState::CsiExtended {
                    value,
                    params,
                    plain,
                } => match byte {
                    b'0'..=b'9' | b';' if params >= MAX_CSI_PARAMS => {
                        DecodeState::Drain { skipped: 0 }
                    }
                    b'0'..=b'9' => DecodeState::CsiExtended {
                        value: value.saturating_mul(10).saturating_add(u32::from(byte - b'0')),
                        params: params + 1,
                        plain,
                    },
                    b';' => DecodeState::CsiExtended {
                        value,
                        params: params + 1,
                        plain: false,
                    },
                    b'~' if plain => return Ok(KeyPoll::Key(tilde_key(value))),
                    // Sub-parameters and intermediates
                    0x20..=0x3f => DecodeState::Drain { skipped: 0 },
                    // Final byte of an unmapped sequence, or garbage
                    _ => return Ok(KeyPoll::Key(Key::Escape)),
                },
                DecodeState::Drain { skipped } => match byte {
                    0x40..=0x7e => return Ok(KeyPoll::Key(Key::Escape)),
                    _ if skipped + 1 >= MAX_DRAIN => return Ok(KeyPoll::Key(Key::Escape)),
                    _ => DecodeState::Drain {
                        skipped: skipped + 1,
                    },
                },
            };
        }
    }
}

fn letter_key(byte: u8) -> Key {
    match byte {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        _ => Key::Escape,
    }
}

fn tilde_key(value: u32) -> Key {
    match value {
        1 | 7 => Key::Home,
        3 => Key::Delete,
        4 | 8 => Key::End,
        5 => Key::PageUp,
        6 => Key::PageDown,
        _ => Key::Escape,
    }
}
