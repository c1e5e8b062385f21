use std::io::{ErrorKind, Read};

use super::{ByteSource, SourceError};

/// Read-ahead size used when refilling the buffer.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// `ByteSource` over any blocking reader (serial node, socket, capture file).
///
/// Bytes are appended to a growable buffer and handed out through a cursor.
/// `discard_consumed` compacts the buffer so it only holds unread bytes; the
/// framer calls it after every accepted packet. A refill also compacts once a
/// chunk's worth of bytes has been handed out, so noise and rejected packets
/// never pile up between accepted packets.
pub struct StreamByteSource<R> {
    inner: R,
    buffer: Vec<u8>,
    position: usize,
    chunk_size: usize,
}

impl<R: Read> StreamByteSource<R> {
    pub fn new(inner: R) -> Self {
        Self::with_chunk_size(inner, DEFAULT_CHUNK_SIZE)
    }

    /// A chunk size of zero is treated as one byte.
    pub fn with_chunk_size(inner: R, chunk_size: usize) -> Self {
        Self {
            inner,
            buffer: Vec::with_capacity(chunk_size.max(1) * 2),
            position: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Number of bytes buffered but not yet handed out.
    pub fn available(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Number of bytes handed out since the last `discard_consumed`.
    pub fn consumed(&self) -> usize {
        self.position
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Block until `needed` unread bytes are buffered, retrying `Interrupted`
    /// reads; end of input becomes `SourceError::Disconnected`.
    fn ensure_available(&mut self, needed: usize) -> Result<(), SourceError> {
        while self.available() < needed {
            if self.position >= self.chunk_size {
                self.compact();
            }
            let missing = needed - self.available();
            let start = self.buffer.len();
            self.buffer.resize(start + missing.max(self.chunk_size), 0);
            let result = self.inner.read(&mut self.buffer[start..]);
            match result {
                Ok(0) => {
                    self.buffer.truncate(start);
                    return Err(SourceError::Disconnected);
                }
                Ok(read) => self.buffer.truncate(start + read),
                Err(err) if err.kind() == ErrorKind::Interrupted => self.buffer.truncate(start),
                Err(err) => {
                    self.buffer.truncate(start);
                    return Err(SourceError::Io(err));
                }
            }
        }
        Ok(())
    }

    fn compact(&mut self) {
        self.buffer.drain(..self.position);
        self.position = 0;
    }
}

impl<R: Read> ByteSource for StreamByteSource<R> {
    fn read_byte(&mut self) -> Result<u8, SourceError> {
        self.ensure_available(1)?;
        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(byte)
    }

    fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SourceError> {
        self.ensure_available(count)?;
        let bytes = self.buffer[self.position..self.position + count].to_vec();
        self.position += count;
        Ok(bytes)
    }

    fn discard_consumed(&mut self) {
        self.compact();
    }
}
