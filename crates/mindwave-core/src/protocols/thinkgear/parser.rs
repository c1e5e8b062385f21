use crate::data_point::{
    Attention, Blink, DataPoint, EegPowers, Meditation, PoorSignalLevel, RawSample, Reading,
};

use super::error::DecodeError;
use super::layout;
use super::reader::{PayloadReader, fixed_value, i16_be, u24_be};

/// Decode every row of a validated payload, in wire order.
///
/// # Examples
/// ```
/// use mindwave_core::{Reading, parse_payload};
///
/// let points = parse_payload(&[0x02, 0x55, 0x04, 0x25, 0x80, 0x02, 0x60, 0x00])?;
/// assert_eq!(points.len(), 3);
/// assert!(matches!(points[2].reading, Reading::Raw(raw) if raw.value == 0x6000));
/// # Ok::<(), mindwave_core::DecodeError>(())
/// ```
///
/// # Errors
/// Returns `DecodeError` on an unknown row code, a row that overruns the
/// payload, or a value whose length does not fit its row code.
pub fn parse_payload(payload: &[u8]) -> Result<Vec<DataPoint>, DecodeError> {
    let mut reader = PayloadReader::new(payload);
    let mut points = Vec::new();
    while !reader.is_at_end() {
        points.push(parse_row(&mut reader)?);
    }
    Ok(points)
}

fn parse_row(reader: &mut PayloadReader<'_>) -> Result<DataPoint, DecodeError> {
    let offset = reader.position();
    let code = reader.read_row_code()?;
    if !layout::KNOWN_ROW_CODES.contains(&code) {
        return Err(DecodeError::UnknownRowCode { code, offset });
    }
    let len = reader.read_value_len(code)?;
    let value = reader.read_slice(len)?;
    let reading = decode_reading(code, value, offset)?;
    Ok(DataPoint::new(reading, value.to_vec()))
}

fn decode_reading(code: u8, value: &[u8], offset: usize) -> Result<Reading, DecodeError> {
    let reading = match code {
        layout::CODE_POOR_SIGNAL => {
            let [noise] = fixed_value::<1>(code, value)?;
            Reading::PoorSignalLevel(PoorSignalLevel { noise })
        }
        layout::CODE_ATTENTION => {
            let [level] = fixed_value::<1>(code, value)?;
            Reading::Attention(Attention { level })
        }
        layout::CODE_MEDITATION => {
            let [level] = fixed_value::<1>(code, value)?;
            Reading::Meditation(Meditation { level })
        }
        layout::CODE_BLINK => {
            let [strength] = fixed_value::<1>(code, value)?;
            Reading::Blink(Blink { strength })
        }
        layout::CODE_RAW => {
            let bytes = fixed_value::<{ layout::RAW_VALUE_LEN }>(code, value)?;
            Reading::Raw(RawSample {
                value: i16_be(bytes),
            })
        }
        layout::CODE_EEG_POWERS => {
            let bytes = fixed_value::<{ layout::EEG_POWERS_VALUE_LEN }>(code, value)?;
            Reading::EegPowers(decode_eeg_powers(&bytes))
        }
        _ => return Err(DecodeError::UnknownRowCode { code, offset }),
    };
    Ok(reading)
}

fn decode_eeg_powers(bytes: &[u8; layout::EEG_POWERS_VALUE_LEN]) -> EegPowers {
    let mut bands = [0u32; layout::EEG_BAND_COUNT];
    for (band, chunk) in bands
        .iter_mut()
        .zip(bytes.chunks_exact(layout::EEG_BAND_LEN))
    {
        let mut triple = [0u8; layout::EEG_BAND_LEN];
        triple.copy_from_slice(chunk);
        *band = u24_be(&triple);
    }
    let [
        delta,
        theta,
        low_alpha,
        high_alpha,
        low_beta,
        high_beta,
        low_gamma,
        mid_gamma,
    ] = bands;
    EegPowers {
        delta,
        theta,
        low_alpha,
        high_alpha,
        low_beta,
        high_beta,
        low_gamma,
        mid_gamma,
    }
}
