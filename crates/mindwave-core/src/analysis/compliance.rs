use std::collections::BTreeMap;

use crate::Violation;
use crate::data_point::{DataPoint, Reading};
use crate::protocols::thinkgear::{DecodeError, FramerStats, layout};

pub(crate) const SEVERITY_ERROR: &str = "error";
pub(crate) const SEVERITY_WARNING: &str = "warning";

const MAX_EXAMPLES: usize = 3;

/// Collects protocol violations keyed by stable id.
#[derive(Debug, Default)]
pub(crate) struct ViolationTracker {
    entries: BTreeMap<&'static str, Violation>,
}

impl ViolationTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn check_data_point(&mut self, point: &DataPoint, packet: u64) {
        match point.reading {
            Reading::Attention(attention) if attention.level > layout::ESENSE_LEVEL_MAX => {
                self.record(
                    "MW-ATTENTION-RANGE",
                    SEVERITY_WARNING,
                    "Attention level above 100",
                    packet,
                );
            }
            Reading::Meditation(meditation) if meditation.level > layout::ESENSE_LEVEL_MAX => {
                self.record(
                    "MW-MEDITATION-RANGE",
                    SEVERITY_WARNING,
                    "Meditation level above 100",
                    packet,
                );
            }
            _ => {}
        }
    }

    pub(crate) fn check_decode_error(&mut self, err: &DecodeError, packet: u64) {
        let (id, message) = match err {
            DecodeError::UnknownRowCode { .. } => {
                ("MW-UNKNOWN-ROW-CODE", "Payload contains an unknown row code")
            }
            DecodeError::Truncated { .. } => {
                ("MW-TRUNCATED-ROW", "Payload row overruns the payload length")
            }
            DecodeError::InvalidValueLength { .. } => (
                "MW-VALUE-LENGTH",
                "Row value length does not match its row code",
            ),
        };
        self.record(id, SEVERITY_ERROR, message, packet);
    }

    pub(crate) fn check_framer_stats(&mut self, stats: &FramerStats) {
        self.record_count(
            "MW-CHECKSUM",
            SEVERITY_WARNING,
            "Packets dropped on checksum mismatch",
            stats.packets_rejected,
        );
        self.record_count(
            "MW-PAYLOAD-LENGTH",
            SEVERITY_WARNING,
            "Payload length of 170 bytes or more",
            stats.oversized_payloads,
        );
    }

    /// Violations ordered by severity (errors first), then id.
    pub(crate) fn finish(self) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self.entries.into_values().collect();
        violations.sort_by(|a, b| {
            severity_rank(&a.severity)
                .cmp(&severity_rank(&b.severity))
                .then_with(|| a.id.cmp(&b.id))
        });
        violations
    }

    fn record(&mut self, id: &'static str, severity: &str, message: &str, packet: u64) {
        let entry = self.entry(id, severity, message);
        entry.count += 1;
        if entry.examples.len() < MAX_EXAMPLES {
            entry.examples.push(format!("packet #{packet}"));
        }
    }

    fn record_count(&mut self, id: &'static str, severity: &str, message: &str, count: u64) {
        if count == 0 {
            return;
        }
        self.entry(id, severity, message).count += count;
    }

    fn entry(&mut self, id: &'static str, severity: &str, message: &str) -> &mut Violation {
        self.entries.entry(id).or_insert_with(|| Violation {
            id: id.to_string(),
            severity: severity.to_string(),
            message: message.to_string(),
            count: 0,
            examples: Vec::new(),
        })
    }
}

fn severity_rank(severity: &str) -> u8 {
    match severity {
        SEVERITY_ERROR => 0,
        SEVERITY_WARNING => 1,
        _ => 2,
    }
}
