#![cfg_attr(not(test), no_std)]

//! # Editor Core
//!
//! Terminal-independent text editing logic for the BeDIT editor.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same key trace => same session state
//! - **Mechanism over policy**: Core describes frames, hosts decide how to draw them
//! - **No ambient authority**: IO requests are explicit, never automatic
//!
//! ## Design
//!
//! The core provides:
//! - TextBuffer: lines in stored and tab-expanded render form
//! - KeyDecoder: escape sequence decoding over any ByteSource
//! - EditSession: key dispatch, cursor movement and the save-as prompt
//! - Frame: what the host should draw for one refresh
//! - EditorSnapshot: deterministic state for replay testing

extern crate alloc;

pub mod buffer;
pub mod core;
pub mod decoder;
pub mod frame;
pub mod key;
pub mod mode;
pub mod snapshot;
pub mod viewport;

pub use buffer::{split_lines, Line, Position, TextBuffer, DEFAULT_TAB_STOP};
pub use core::{CoreIoRequest, CoreOutcome, EditSession, SessionConfig, DEFAULT_QUIT_TIMES};
pub use decoder::{ByteSource, KeyDecoder, KeyPoll};
pub use frame::{Frame, FrameRow, STATUS_NAME_WIDTH};
pub use key::Key;
pub use mode::EditorMode;
pub use snapshot::EditorSnapshot;
pub use viewport::{ScreenSize, Viewport};
