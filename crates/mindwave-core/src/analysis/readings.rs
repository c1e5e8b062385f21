use crate::data_point::{DataPoint, Reading};
use crate::{ReadingSummary, SignalSummary};

/// Running per-kind counts and eSense means for one capture.
#[derive(Debug, Default)]
pub(crate) struct ReadingStats {
    summary: ReadingSummary,
    no_contact_count: u64,
    last_poor_signal: Option<u8>,
    attention: MeanAccumulator,
    meditation: MeanAccumulator,
}

#[derive(Debug, Default)]
struct MeanAccumulator {
    sum: u64,
    count: u64,
}

impl MeanAccumulator {
    fn push(&mut self, value: u8) {
        self.sum += value as u64;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}

impl ReadingStats {
    pub(crate) fn observe(&mut self, point: &DataPoint) {
        self.summary.total += 1;
        match point.reading {
            Reading::PoorSignalLevel(signal) => {
                self.summary.poor_signal_level += 1;
                self.last_poor_signal = Some(signal.noise);
                if !signal.has_skin_contact() {
                    self.no_contact_count += 1;
                }
            }
            Reading::Attention(attention) => {
                self.summary.attention += 1;
                self.attention.push(attention.level);
            }
            Reading::Meditation(meditation) => {
                self.summary.meditation += 1;
                self.meditation.push(meditation.level);
            }
            Reading::Blink(_) => self.summary.blink += 1,
            Reading::Raw(_) => self.summary.raw += 1,
            Reading::EegPowers(_) => self.summary.eeg_powers += 1,
        }
    }

    pub(crate) fn finish(self) -> (ReadingSummary, SignalSummary) {
        let signal = SignalSummary {
            no_contact_count: self.no_contact_count,
            last_poor_signal: self.last_poor_signal,
            attention_mean: self.attention.mean(),
            meditation_mean: self.meditation.mean(),
        };
        (self.summary, signal)
    }
}

#[cfg(test)]
mod tests {
    use super::ReadingStats;
    use crate::data_point::{Attention, Blink, DataPoint, PoorSignalLevel, Reading};

    fn point(reading: Reading) -> DataPoint {
        DataPoint::new(reading, Vec::new())
    }

    #[test]
    fn counts_kinds_and_contact_loss() {
        let mut stats = ReadingStats::default();
        stats.observe(&point(Reading::PoorSignalLevel(PoorSignalLevel { noise: 0 })));
        stats.observe(&point(Reading::PoorSignalLevel(PoorSignalLevel { noise: 200 })));
        stats.observe(&point(Reading::Blink(Blink { strength: 50 })));

        let (summary, signal) = stats.finish();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.poor_signal_level, 2);
        assert_eq!(summary.blink, 1);
        assert_eq!(signal.no_contact_count, 1);
        assert_eq!(signal.last_poor_signal, Some(200));
        assert_eq!(signal.attention_mean, None);
    }

    #[test]
    fn attention_mean_over_samples() {
        let mut stats = ReadingStats::default();
        for level in [10, 20, 60] {
            stats.observe(&point(Reading::Attention(Attention { level })));
        }
        let (_, signal) = stats.finish();
        let mean = signal.attention_mean.expect("attention mean");
        assert!((mean - 30.0).abs() < f64::EPSILON);
    }
}
