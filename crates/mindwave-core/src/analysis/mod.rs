use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::data_point_reader::{DataPointReader, ReaderError};
use crate::source::{ByteSource, DeviceSource, SourceError};
use crate::{CaptureReport, make_stub_report};

mod compliance;
mod readings;

use compliance::ViolationTracker;
use readings::ReadingStats;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Decode a recorded byte capture to its end and summarize it.
///
/// # Errors
/// Returns `AnalysisError` when the file cannot be opened or read.
pub fn analyze_capture_file(path: &Path) -> Result<CaptureReport, AnalysisError> {
    let bytes = path.metadata()?.len();
    let mut source = DeviceSource::new(path);
    source.connect()?;
    analyze_source(&path.display().to_string(), bytes, source)
}

/// Drain `source` until end of stream and build a report.
///
/// Decode failures are recorded as violations and reading continues with the
/// next packet; any other source error aborts the analysis.
pub fn analyze_source<S: ByteSource>(
    input_path: &str,
    input_bytes: u64,
    source: S,
) -> Result<CaptureReport, AnalysisError> {
    let mut reader = DataPointReader::new(source);
    let mut readings = ReadingStats::default();
    let mut violations = ViolationTracker::new();

    loop {
        match reader.read_next_data_point() {
            Ok(point) => {
                let packet = reader.stats().packets_accepted;
                readings.observe(&point);
                violations.check_data_point(&point, packet);
            }
            Err(ReaderError::Decode(err)) => {
                violations.check_decode_error(&err, reader.stats().packets_accepted);
            }
            Err(err) if err.is_end_of_stream() => break,
            Err(ReaderError::Source(err)) => return Err(err.into()),
        }
    }

    let stats = reader.stats();
    debug!(
        accepted = stats.packets_accepted,
        rejected = stats.packets_rejected,
        "capture drained"
    );
    violations.check_framer_stats(&stats);

    let (reading_summary, signal) = readings.finish();
    let mut report = make_stub_report(input_path, input_bytes);
    report.packets = stats;
    report.readings = reading_summary;
    report.signal = signal;
    report.violations = violations.finish();
    Ok(report)
}
