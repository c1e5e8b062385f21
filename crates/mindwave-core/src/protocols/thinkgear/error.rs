use thiserror::Error;

/// Errors returned by payload decoding.
///
/// Any of these aborts decoding of the whole payload; no partial list of data
/// points is returned.
///
/// # Examples
/// ```
/// use mindwave_core::DecodeError;
///
/// let err = DecodeError::UnknownRowCode { code: 0x99, offset: 0 };
/// assert!(err.to_string().contains("unknown row code 0x99"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown row code 0x{code:02x} at payload offset {offset}")]
    UnknownRowCode { code: u8, offset: usize },
    #[error("payload too short: need {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
    #[error("invalid value length for row code 0x{code:02x}: expected {expected}, got {actual}")]
    InvalidValueLength {
        code: u8,
        expected: usize,
        actual: usize,
    },
}

/// Errors returned when building packets for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("payload too long for one packet: {len} bytes (max {max})")]
    PayloadTooLong { len: usize, max: usize },
}
