//! Byte sources feeding the packet framer.
//!
//! A source owns the transport and its read-ahead buffer. The framer only ever
//! asks for "the next byte" or "the next N bytes"; short reads are retried
//! inside the source, so callers never see a partial result. End of stream is
//! an error (`SourceError::Disconnected`), not a sentinel value.

mod device;
mod stream;

pub use device::DeviceSource;
pub use stream::{DEFAULT_CHUNK_SIZE, StreamByteSource};

use thiserror::Error;

/// Blocking byte-level transport consumed by [`crate::PacketFramer`].
pub trait ByteSource {
    /// Make the source ready to deliver bytes.
    ///
    /// Sources that are ready on construction keep the default no-op.
    fn connect(&mut self) -> Result<(), SourceError> {
        Ok(())
    }

    /// Block until one byte is available and return it.
    fn read_byte(&mut self) -> Result<u8, SourceError>;

    /// Block until exactly `count` bytes are available and return them.
    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SourceError>;

    /// Release every byte already handed out to the caller.
    fn discard_consumed(&mut self);
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn connect(&mut self) -> Result<(), SourceError> {
        (**self).connect()
    }

    fn read_byte(&mut self) -> Result<u8, SourceError> {
        (**self).read_byte()
    }

    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SourceError> {
        (**self).read_bytes(count)
    }

    fn discard_consumed(&mut self) {
        (**self).discard_consumed()
    }
}

/// Transport failures. All of them are fatal for the current read.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("byte stream closed by the device")]
    Disconnected,
    #[error("byte source is not connected")]
    NotConnected,
}

impl SourceError {
    /// True when the stream ended cleanly rather than failing mid-read.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, SourceError::Disconnected)
    }
}
