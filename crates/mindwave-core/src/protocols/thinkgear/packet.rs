use super::error::FrameError;
use super::layout;

/// One framed packet as read off the wire, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub payload: Vec<u8>,
    pub checksum: u8,
}

impl Packet {
    pub fn is_valid(&self) -> bool {
        checksum(&self.payload) == self.checksum
    }

    pub fn expected_checksum(&self) -> u8 {
        checksum(&self.payload)
    }

    /// Payloads at or above 170 bytes are framed but outside the protocol.
    pub fn is_oversized(&self) -> bool {
        self.payload.len() >= layout::MAX_VALID_PAYLOAD_LEN
    }
}

/// One's complement of the low eight bits of the payload sum.
///
/// # Examples
/// ```
/// use mindwave_core::checksum;
///
/// assert_eq!(checksum(&[]), 0xFF);
/// assert_eq!(checksum(&[0x04, 0x25]), 0xD6);
/// ```
pub fn checksum(payload: &[u8]) -> u8 {
    let sum = payload.iter().fold(0u8, |acc, byte| acc.wrapping_add(*byte));
    !sum
}

/// Build the wire form `AA AA len payload checksum`.
///
/// # Errors
/// Returns `FrameError::PayloadTooLong` when the payload does not fit the
/// one-byte length field.
pub fn encode_packet(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    let len = u8::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLong {
        len: payload.len(),
        max: layout::MAX_ENCODABLE_PAYLOAD_LEN,
    })?;
    let mut packet = Vec::with_capacity(payload.len() + 4);
    packet.extend([layout::SYNC_BYTE, layout::SYNC_BYTE, len]);
    packet.extend_from_slice(payload);
    packet.push(checksum(payload));
    Ok(packet)
}
