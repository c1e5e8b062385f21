use super::error::DecodeError;
use super::layout;

/// Cursor over one validated payload.
///
/// All byte access goes through here so the parser never indexes the payload
/// directly and every overrun becomes `DecodeError::Truncated`.
pub struct PayloadReader<'a> {
    payload: &'a [u8],
    position: usize,
}

impl<'a> PayloadReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self {
            payload,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.payload.len()
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let byte = self
            .payload
            .get(self.position)
            .copied()
            .ok_or(DecodeError::Truncated {
                needed: self.position + 1,
                actual: self.payload.len(),
            })?;
        self.position += 1;
        Ok(byte)
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.position + len;
        let bytes = self
            .payload
            .get(self.position..end)
            .ok_or(DecodeError::Truncated {
                needed: end,
                actual: self.payload.len(),
            })?;
        self.position = end;
        Ok(bytes)
    }

    /// Skip extended-code marker bytes and return the row code that follows.
    pub fn read_row_code(&mut self) -> Result<u8, DecodeError> {
        loop {
            let byte = self.read_u8()?;
            if byte != layout::EXTENDED_CODE_BYTE {
                return Ok(byte);
            }
        }
    }

    /// Length of the value that follows `code`: explicit for multi-byte codes.
    pub fn read_value_len(&mut self, code: u8) -> Result<usize, DecodeError> {
        if code > layout::SINGLE_BYTE_CODE_MAX {
            Ok(self.read_u8()? as usize)
        } else {
            Ok(layout::SINGLE_BYTE_VALUE_LEN)
        }
    }
}

/// Require a value slice of exactly `N` bytes for `code`.
pub fn fixed_value<const N: usize>(code: u8, value: &[u8]) -> Result<[u8; N], DecodeError> {
    value
        .try_into()
        .map_err(|_| DecodeError::InvalidValueLength {
            code,
            expected: N,
            actual: value.len(),
        })
}

/// Big-endian two's-complement 16-bit value.
pub fn i16_be(bytes: [u8; 2]) -> i16 {
    i16::from_be_bytes(bytes)
}

/// Big-endian unsigned 24-bit value, MSB first.
pub fn u24_be(bytes: &[u8; layout::EEG_BAND_LEN]) -> u32 {
    ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | bytes[2] as u32
}
