pub const SYNC_BYTE: u8 = 0xAA;
pub const EXTENDED_CODE_BYTE: u8 = 0x55;

/// Row codes above this value carry an explicit length byte.
pub const SINGLE_BYTE_CODE_MAX: u8 = 0x7F;
pub const SINGLE_BYTE_VALUE_LEN: usize = 1;

/// Payload lengths at or above this bound are outside the protocol.
pub const MAX_VALID_PAYLOAD_LEN: usize = 170;
pub const MAX_ENCODABLE_PAYLOAD_LEN: usize = u8::MAX as usize;

pub const CODE_POOR_SIGNAL: u8 = 0x02;
pub const CODE_ATTENTION: u8 = 0x04;
pub const CODE_MEDITATION: u8 = 0x05;
pub const CODE_BLINK: u8 = 0x16;
pub const CODE_RAW: u8 = 0x80;
pub const CODE_EEG_POWERS: u8 = 0x83;

/// Row codes this decoder understands.
pub const KNOWN_ROW_CODES: [u8; 6] = [
    CODE_POOR_SIGNAL,
    CODE_ATTENTION,
    CODE_MEDITATION,
    CODE_BLINK,
    CODE_RAW,
    CODE_EEG_POWERS,
];

pub const RAW_VALUE_LEN: usize = 2;
pub const EEG_BAND_LEN: usize = 3;
pub const EEG_BAND_COUNT: usize = 8;
pub const EEG_POWERS_VALUE_LEN: usize = EEG_BAND_LEN * EEG_BAND_COUNT;

/// Noise levels below this value mean the sensor touches the skin.
pub const SKIN_CONTACT_NOISE_LIMIT: u8 = 200;
/// eSense levels (attention, meditation) emitted by the device top out here.
pub const ESENSE_LEVEL_MAX: u8 = 100;
