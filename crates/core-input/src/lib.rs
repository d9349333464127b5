//! Terminal byte decoding shared across the runtime.
//!
//! `TerminalDecoder` is a pure state machine fed one byte at a time;
//! `ByteDecoder` wraps any `Read` (raw-mode stdin in the binary, a byte slice
//! in tests) and yields decoded commands until end of input.

mod decoder;
mod tables;

pub use decoder::{MAX_CSI_PARAMS, TerminalDecoder};

use core_events::Decoded;
use std::io::{self, ErrorKind, Read};
use tracing::debug;

/// Blocking iterator of decoded commands over a byte source.
pub struct ByteDecoder<R> {
    reader: R,
    decoder: TerminalDecoder,
    bytes_read: u64,
    done: bool,
}

impl<R: Read> ByteDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: TerminalDecoder::new(),
            bytes_read: 0,
            done: false,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: Read> Iterator for ByteDecoder<R> {
    type Item = io::Result<Decoded>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    self.decoder.finish();
                    self.done = true;
                    debug!(target: "input.decoder", bytes = self.bytes_read, "end_of_input");
                    return None;
                }
                Ok(_) => {
                    self.bytes_read += 1;
                    if let Some(decoded) = self.decoder.feed(byte[0]) {
                        return Some(Ok(decoded));
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
