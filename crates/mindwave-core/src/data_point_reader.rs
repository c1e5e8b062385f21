use std::collections::VecDeque;

use thiserror::Error;
use tracing::{debug, info};

use crate::data_point::DataPoint;
use crate::protocols::thinkgear::{DecodeError, FramerStats, PacketFramer, parse_payload};
use crate::source::{ByteSource, SourceError};

/// Errors surfaced by [`DataPointReader::read_next_data_point`].
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl ReaderError {
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, ReaderError::Source(err) if err.is_end_of_stream())
    }
}

/// Pull-based reader handing out one data point at a time.
///
/// Data points from one packet are queued in wire order; the next packet is
/// only framed once the queue is empty.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use mindwave_core::{DataPointReader, Reading, StreamByteSource, encode_packet};
///
/// let bytes = encode_packet(&[0x04, 0x25, 0x05, 0x35])?;
/// let mut reader = DataPointReader::new(StreamByteSource::new(Cursor::new(bytes)));
/// reader.start()?;
///
/// let first = reader.read_next_data_point()?;
/// assert!(matches!(first.reading, Reading::Attention(a) if a.level == 0x25));
/// let second = reader.read_next_data_point()?;
/// assert!(matches!(second.reading, Reading::Meditation(m) if m.level == 0x35));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct DataPointReader<S> {
    framer: PacketFramer<S>,
    queue: VecDeque<DataPoint>,
}

impl<S: ByteSource> DataPointReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            framer: PacketFramer::new(source),
            queue: VecDeque::new(),
        }
    }

    /// Ready the underlying source.
    ///
    /// # Errors
    /// Returns `ReaderError::Source` when the source cannot connect.
    pub fn start(&mut self) -> Result<(), ReaderError> {
        self.framer.source_mut().connect()?;
        info!("data point reader started");
        Ok(())
    }

    /// Block until the next data point is available.
    ///
    /// # Errors
    /// Source failures (including end of stream) and decode failures are
    /// returned as-is. After a decode failure the offending packet is gone and
    /// the next call continues with the packet after it.
    pub fn read_next_data_point(&mut self) -> Result<DataPoint, ReaderError> {
        loop {
            if let Some(point) = self.queue.pop_front() {
                return Ok(point);
            }
            self.fill_queue()?;
        }
    }

    /// Data points already decoded but not yet returned.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> FramerStats {
        self.framer.stats()
    }

    pub fn source(&self) -> &S {
        self.framer.source()
    }

    pub fn into_source(self) -> S {
        self.framer.into_source()
    }

    fn fill_queue(&mut self) -> Result<(), ReaderError> {
        let payload = self.framer.next_payload()?;
        let points = parse_payload(&payload).inspect_err(|err| {
            debug!(%err, len = payload.len(), "dropping undecodable payload");
        })?;
        self.queue.extend(points);
        Ok(())
    }
}
