use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::source::{ByteSource, SourceError};

use super::layout;
use super::packet::Packet;

/// Counters kept by the framer across packets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FramerStats {
    /// Packets whose checksum matched.
    pub packets_accepted: u64,
    /// Packets dropped on checksum mismatch.
    pub packets_rejected: u64,
    /// Accepted packets with a payload length of 170 or more.
    pub oversized_payloads: u64,
    /// Bytes read while hunting for a sync pair, excluding the pair itself.
    pub bytes_skipped: u64,
}

/// Turns a byte stream into checksum-valid payloads.
///
/// Framing runs as a loop: seek `AA AA`, read the length, payload and
/// checksum, validate. A mismatch drops the packet and seeking resumes right
/// after its checksum byte. Source errors are returned immediately.
pub struct PacketFramer<S> {
    source: S,
    stats: FramerStats,
}

impl<S: ByteSource> PacketFramer<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            stats: FramerStats::default(),
        }
    }

    pub fn stats(&self) -> FramerStats {
        self.stats
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Block until the next packet with a valid checksum and return its payload.
    ///
    /// # Errors
    /// Returns `SourceError` when the underlying source fails or closes.
    pub fn next_payload(&mut self) -> Result<Vec<u8>, SourceError> {
        loop {
            self.seek_sync()?;
            let packet = self.read_packet()?;
            if packet.is_valid() {
                self.source.discard_consumed();
                self.stats.packets_accepted += 1;
                if packet.is_oversized() {
                    self.stats.oversized_payloads += 1;
                    debug!(len = packet.payload.len(), "payload length outside protocol bounds");
                }
                trace!(len = packet.payload.len(), "packet accepted");
                return Ok(packet.payload);
            }
            self.stats.packets_rejected += 1;
            warn!(
                len = packet.payload.len(),
                expected = packet.expected_checksum(),
                actual = packet.checksum,
                "checksum mismatch, discarding packet"
            );
        }
    }

    fn seek_sync(&mut self) -> Result<(), SourceError> {
        loop {
            if self.source.read_byte()? != layout::SYNC_BYTE {
                self.stats.bytes_skipped += 1;
                continue;
            }
            if self.source.read_byte()? == layout::SYNC_BYTE {
                return Ok(());
            }
            self.stats.bytes_skipped += 2;
        }
    }

    fn read_packet(&mut self) -> Result<Packet, SourceError> {
        let len = self.source.read_byte()? as usize;
        let payload = self.source.read_bytes(len)?;
        let checksum = self.source.read_byte()?;
        Ok(Packet { payload, checksum })
    }
}
