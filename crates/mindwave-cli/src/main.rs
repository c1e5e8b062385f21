use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mindwave_core::{
    CaptureReport, DEFAULT_CHUNK_SIZE, DataPoint, DataPointReader, DeviceSource, ReaderError,
};
use serde::Serialize;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("MINDWAVE_BUILD_COMMIT"),
    ", ",
    env!("MINDWAVE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "mindwave")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Reader for NeuroSky MindWave headsets (ThinkGear serial protocol).",
    long_about = None,
    after_help = "Examples:\n  mindwave read /dev/rfcomm0\n  mindwave read capture.bin --json --include-raw\n  mindwave inspect capture.bin -o report.json"
)]
struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print decoded data points from a serial device node or byte capture.
    Read(ReadArgs),
    /// Decode a byte capture and generate a JSON protocol report.
    #[command(alias = "analyze")]
    #[command(
        after_help = "Examples:\n  mindwave inspect capture.bin -o report.json\n  mindwave analyze capture.bin --stdout --pretty"
    )]
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct ReadArgs {
    /// Serial device node (e.g. /dev/rfcomm0) or recorded byte capture
    input: PathBuf,

    /// Stop after this many printed data points
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Also print raw EEG samples (hidden by default, ~512 per second)
    #[arg(long)]
    include_raw: bool,

    /// Print one JSON object per line
    #[arg(long)]
    json: bool,

    /// Log undecodable packets and keep reading instead of failing
    #[arg(long)]
    keep_going: bool,

    /// Read-ahead size in bytes for the device
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Suppress the end-of-stream summary
    #[arg(long)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Path to a recorded byte capture
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if protocol violations are present
    #[arg(long)]
    strict: bool,

    /// List protocol violations after analysis
    #[arg(long)]
    list_violations: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Read(args) => cmd_read(args),
        Commands::Inspect(args) => cmd_inspect(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

#[derive(Serialize)]
struct DataPointLine<'a> {
    received_at: String,
    #[serde(flatten)]
    point: &'a DataPoint,
}

fn cmd_read(args: ReadArgs) -> Result<(), CliError> {
    validate_input_exists(&args.input, "use a serial device node or a byte capture")?;

    let source = DeviceSource::with_chunk_size(&args.input, args.chunk_size);
    let mut reader = DataPointReader::new(source);
    reader.start().map_err(|err| {
        CliError::new(
            format!("cannot open {}: {}", args.input.display(), err),
            Some("check that the headset is paired and the device node exists".to_string()),
        )
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut printed = 0u64;
    while args.count.is_none_or(|limit| printed < limit) {
        let point = match reader.read_next_data_point() {
            Ok(point) => point,
            Err(err) if err.is_end_of_stream() => break,
            Err(ReaderError::Decode(err)) if args.keep_going => {
                warn!(%err, "skipping undecodable packet");
                continue;
            }
            Err(err) => {
                return Err(CliError::new(
                    format!("read failed: {err}"),
                    Some("use --keep-going to skip undecodable packets".to_string()),
                ));
            }
        };
        if point.is_raw() && !args.include_raw {
            continue;
        }
        write_point(&mut out, &point, args.json)?;
        printed += 1;
    }
    out.flush().context("Failed to flush stdout")?;

    if !args.quiet {
        let stats = reader.stats();
        eprintln!(
            "end of stream: {} packets accepted, {} rejected, {} data points printed",
            stats.packets_accepted, stats.packets_rejected, printed
        );
    }
    Ok(())
}

fn write_point(out: &mut impl Write, point: &DataPoint, json: bool) -> Result<(), CliError> {
    if json {
        let line = DataPointLine {
            received_at: now_rfc3339(),
            point,
        };
        let encoded = serde_json::to_string(&line).context("JSON serialization failed")?;
        writeln!(out, "{encoded}").context("Failed to write to stdout")?;
    } else {
        writeln!(out, "{point}").context("Failed to write to stdout")?;
    }
    Ok(())
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

fn cmd_inspect(args: InspectArgs) -> Result<(), CliError> {
    validate_input_exists(&args.input, "use a recorded byte capture")?;
    let meta = fs::metadata(&args.input)
        .with_context(|| format!("Failed to read input file: {}", args.input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", args.input.display()),
            Some("record the device stream to a file first".to_string()),
        ));
    }

    let report_path = if args.stdout {
        None
    } else {
        let path = args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        ensure_distinct_paths(&args.input, &path)?;
        Some(path)
    };

    let rep = mindwave_core::analyze_capture_file(&args.input).context("capture analysis failed")?;
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    match report_path {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !args.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if args.list_violations && !args.quiet {
        print_violations(&rep);
    }
    if args.strict && !rep.violations.is_empty() {
        return Err(CliError::new(
            "protocol violations detected",
            Some("use --list-violations to inspect".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_paths(input: &Path, report: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent).ok(),
        _ => fs::canonicalize(".").ok(),
    };
    let Some(report_dir) = report_dir else {
        return Ok(());
    };
    let file_name = report
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("report path must differ from input: {}", report.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &CaptureReport, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_violations(rep: &CaptureReport) {
    eprintln!("Protocol violations:");
    for violation in &rep.violations {
        eprintln!(
            "  {} {} ({})",
            violation.severity, violation.id, violation.count
        );
    }
}

fn validate_input_exists(input: &Path, hint: &str) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input not found: {}", input.display()),
            Some(hint.to_string()),
        ));
    }
    Ok(())
}
