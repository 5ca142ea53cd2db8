//! Byte source over a blocking reader with a bounded wait

use std::io::{self, Read};

use editor_core::ByteSource;

/// Reads one byte at a time from a raw-mode reader
///
/// In raw mode with `VMIN = 0` a read that times out returns zero bytes;
/// that, `WouldBlock` and `Interrupted` all count as "no byte yet".
#[derive(Debug)]
pub struct ByteReader<R> {
    reader: R,
}

impl ByteReader<io::Stdin> {
    pub fn stdin() -> Self {
        Self::new(io::stdin())
    }
}

impl<R: Read> ByteReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: Read> ByteSource for ByteReader<R> {
    type Error = io::Error;

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(byte[0])),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
                ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
