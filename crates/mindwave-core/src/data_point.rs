//! Typed readings decoded from ThinkGear payload rows.
//!
//! Each row code maps to exactly one [`Reading`] variant. A [`DataPoint`] pairs
//! the reading with the value bytes it was decoded from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocols::thinkgear::layout;

/// One decoded payload row.
///
/// # Examples
/// ```
/// use mindwave_core::{Attention, DataPoint, Reading};
///
/// let point = DataPoint::new(Reading::Attention(Attention { level: 37 }), vec![37]);
/// assert_eq!(point.row_code(), 0x04);
/// assert_eq!(point.to_string(), "Attention Level: 37");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(flatten)]
    pub reading: Reading,
    /// Value bytes of the row, as received.
    pub raw_bytes: Vec<u8>,
}

impl DataPoint {
    pub fn new(reading: Reading, raw_bytes: Vec<u8>) -> Self {
        Self { reading, raw_bytes }
    }

    pub fn row_code(&self) -> u8 {
        self.reading.row_code()
    }

    pub fn is_raw(&self) -> bool {
        matches!(self.reading, Reading::Raw(_))
    }
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.reading, f)
    }
}

/// Closed set of readings the headset emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reading {
    PoorSignalLevel(PoorSignalLevel),
    Attention(Attention),
    Meditation(Meditation),
    Blink(Blink),
    Raw(RawSample),
    EegPowers(EegPowers),
}

impl Reading {
    pub fn row_code(&self) -> u8 {
        match self {
            Reading::PoorSignalLevel(_) => layout::CODE_POOR_SIGNAL,
            Reading::Attention(_) => layout::CODE_ATTENTION,
            Reading::Meditation(_) => layout::CODE_MEDITATION,
            Reading::Blink(_) => layout::CODE_BLINK,
            Reading::Raw(_) => layout::CODE_RAW,
            Reading::EegPowers(_) => layout::CODE_EEG_POWERS,
        }
    }

    /// Stable snake_case name, matching the serialized `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Reading::PoorSignalLevel(_) => "poor_signal_level",
            Reading::Attention(_) => "attention",
            Reading::Meditation(_) => "meditation",
            Reading::Blink(_) => "blink",
            Reading::Raw(_) => "raw",
            Reading::EegPowers(_) => "eeg_powers",
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::PoorSignalLevel(signal) => {
                write!(f, "Poor Signal Level: {}", signal.noise)?;
                if !signal.has_skin_contact() {
                    write!(f, " - NO CONTACT TO SKIN")?;
                }
                Ok(())
            }
            Reading::Attention(attention) => write!(f, "Attention Level: {}", attention.level),
            Reading::Meditation(meditation) => {
                write!(f, "Meditation Level: {}", meditation.level)
            }
            Reading::Blink(blink) => write!(f, "Blink Level: {}", blink.strength),
            Reading::Raw(raw) => write!(f, "Raw Value: {}", raw.value),
            Reading::EegPowers(powers) => write!(
                f,
                "EEG Powers: delta={} theta={} lowAlpha={} highAlpha={} lowBeta={} highBeta={} lowGamma={} midGamma={}",
                powers.delta,
                powers.theta,
                powers.low_alpha,
                powers.high_alpha,
                powers.low_beta,
                powers.high_beta,
                powers.low_gamma,
                powers.mid_gamma
            ),
        }
    }
}

/// Signal quality; higher means noisier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoorSignalLevel {
    pub noise: u8,
}

impl PoorSignalLevel {
    /// # Examples
    /// ```
    /// use mindwave_core::PoorSignalLevel;
    ///
    /// assert!(PoorSignalLevel { noise: 199 }.has_skin_contact());
    /// assert!(!PoorSignalLevel { noise: 200 }.has_skin_contact());
    /// ```
    pub fn has_skin_contact(&self) -> bool {
        self.noise < layout::SKIN_CONTACT_NOISE_LIMIT
    }
}

/// eSense attention, 0–100 on real devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attention {
    pub level: u8,
}

/// eSense meditation, 0–100 on real devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meditation {
    pub level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blink {
    pub strength: u8,
}

/// One raw EEG sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSample {
    pub value: i16,
}

/// Relative power per EEG band (unitless, 24-bit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EegPowers {
    pub delta: u32,
    pub theta: u32,
    pub low_alpha: u32,
    pub high_alpha: u32,
    pub low_beta: u32,
    pub high_beta: u32,
    pub low_gamma: u32,
    pub mid_gamma: u32,
}

impl EegPowers {
    /// Bands in wire order, delta first.
    pub fn bands(&self) -> [u32; layout::EEG_BAND_COUNT] {
        [
            self.delta,
            self.theta,
            self.low_alpha,
            self.high_alpha,
            self.low_beta,
            self.high_beta,
            self.low_gamma,
            self.mid_gamma,
        ]
    }
}
