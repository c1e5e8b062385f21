//! MindWave core library: ThinkGear byte stream decoding.
//!
//! This crate turns the serial byte stream of a NeuroSky MindWave headset into
//! typed readings. It is a strict pull pipeline: a [`ByteSource`] hands out
//! bytes, the [`PacketFramer`] syncs on `AA AA` and validates checksums, the
//! payload parser expands each packet into [`DataPoint`]s, and
//! [`DataPointReader`] serves them one at a time. Protocol conventions are
//! captured in `protocols::thinkgear` (layout/reader/parser) so decoding stays
//! pure; all I/O lives in `source`.
//!
//! Invariants:
//! - Data points come out in wire order, one packet at a time.
//! - A corrupted packet is dropped and framing resumes; it is never surfaced.
//! - Unknown row codes and overrunning rows fail the whole payload.
//!
//! # Examples
//! ```no_run
//! use mindwave_core::{DataPointReader, DeviceSource};
//!
//! let mut reader = DataPointReader::new(DeviceSource::new("/dev/rfcomm0"));
//! reader.start()?;
//! loop {
//!     let point = reader.read_next_data_point()?;
//!     if !point.is_raw() {
//!         println!("{point}");
//!     }
//! }
//! # Ok::<(), mindwave_core::ReaderError>(())
//! ```

use serde::{Deserialize, Serialize};

mod analysis;
mod data_point;
mod data_point_reader;
pub mod protocols;
mod source;

pub use analysis::{AnalysisError, analyze_capture_file, analyze_source};
pub use data_point::{
    Attention, Blink, DataPoint, EegPowers, Meditation, PoorSignalLevel, RawSample, Reading,
};
pub use data_point_reader::{DataPointReader, ReaderError};
pub use protocols::thinkgear::{
    DecodeError, FrameError, FramerStats, Packet, PacketFramer, checksum, encode_packet,
    parse_payload,
};
pub use source::{ByteSource, DEFAULT_CHUNK_SIZE, DeviceSource, SourceError, StreamByteSource};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Summary of one decoded capture, with protocol violations.
///
/// # Examples
/// ```
/// use mindwave_core::make_stub_report;
///
/// let report = make_stub_report("capture.bin", 123);
/// assert_eq!(report.report_version, mindwave_core::REPORT_VERSION);
/// assert!(report.violations.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input capture metadata.
    pub input: InputInfo,
    /// Framing counters.
    pub packets: FramerStats,
    /// Decoded data point counts per kind.
    pub readings: ReadingSummary,
    /// Signal quality and eSense summary.
    pub signal: SignalSummary,
    /// Violations sorted by severity and ID.
    pub violations: Vec<Violation>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Number of decoded data points per reading kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingSummary {
    pub total: u64,
    pub poor_signal_level: u64,
    pub attention: u64,
    pub meditation: u64,
    pub blink: u64,
    pub raw: u64,
    pub eeg_powers: u64,
}

/// Signal quality and eSense averages over a capture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalSummary {
    /// Poor-signal readings at or above the no-contact threshold (200).
    pub no_contact_count: u64,
    /// Noise level of the last poor-signal reading, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_poor_signal: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attention_mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meditation_mean: Option<f64>,
}

/// Single protocol violation record.
///
/// # Examples
/// ```
/// use mindwave_core::Violation;
///
/// let violation = Violation {
///     id: "MW-UNKNOWN-ROW-CODE".to_string(),
///     severity: "error".to_string(),
///     message: "Payload contains an unknown row code".to_string(),
///     count: 1,
///     examples: vec!["packet #4".to_string()],
/// };
/// assert_eq!(violation.count, 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Stable violation identifier (e.g., `MW-CHECKSUM`).
    pub id: String,
    /// Severity label (`error` or `warning`).
    pub severity: String,
    pub message: String,
    /// Number of occurrences aggregated into this violation.
    pub count: u64,
    /// At most three example contexts, formatted as `packet #N`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Build a report with base fields filled and empty aggregates.
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> CaptureReport {
    CaptureReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "mindwave".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        packets: FramerStats::default(),
        readings: ReadingSummary::default(),
        signal: SignalSummary::default(),
        violations: vec![],
    }
}
