use std::path::{Path, PathBuf};

use assert_cmd::Command;
use mindwave_core::encode_packet;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("mindwave"))
}

fn write_capture(dir: &Path, name: &str, payloads: &[&[u8]]) -> PathBuf {
    let mut bytes = Vec::new();
    for payload in payloads {
        bytes.extend(encode_packet(payload).expect("encode packet"));
    }
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("write capture");
    path
}

fn clean_capture(dir: &Path) -> PathBuf {
    write_capture(
        dir,
        "clean.bin",
        &[
            &[0x02, 0x00, 0x04, 0x30, 0x05, 0x40],
            &[0x80, 0x02, 0x00, 0x10],
            &[0x16, 0x2A],
        ],
    )
}

fn noisy_capture(dir: &Path) -> PathBuf {
    write_capture(dir, "noisy.bin", &[&[0x04, 0x30], &[0x99], &[0x05, 0x65]])
}

#[test]
fn help_supports_inspect_and_analyze() {
    cmd().arg("inspect").arg("--help").assert().success();
    cmd().arg("analyze").arg("--help").assert().success();
}

#[test]
fn read_prints_readings_without_raw() {
    let temp = TempDir::new().expect("tempdir");
    let input = clean_capture(temp.path());

    cmd()
        .arg("read")
        .arg(input)
        .assert()
        .success()
        .stdout(
            contains("Poor Signal Level: 0")
                .and(contains("Attention Level: 48"))
                .and(contains("Meditation Level: 64"))
                .and(contains("Blink Level: 42"))
                .and(contains("Raw Value").not()),
        )
        .stderr(contains("end of stream"));
}

#[test]
fn read_json_lines_include_raw_when_asked() {
    let temp = TempDir::new().expect("tempdir");
    let input = clean_capture(temp.path());

    let assert = cmd()
        .arg("read")
        .arg(input)
        .arg("--json")
        .arg("--include-raw")
        .arg("--quiet")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3]["kind"], "raw");
    assert_eq!(lines[3]["value"], 16);
    assert!(lines[0]["received_at"].is_string());
}

#[test]
fn read_stops_after_count() {
    let temp = TempDir::new().expect("tempdir");
    let input = clean_capture(temp.path());

    let assert = cmd()
        .arg("read")
        .arg(input)
        .arg("-n")
        .arg("2")
        .arg("--quiet")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    assert_eq!(stdout.lines().count(), 2);
}

#[test]
fn read_fails_on_unknown_row_code_without_keep_going() {
    let temp = TempDir::new().expect("tempdir");
    let input = noisy_capture(temp.path());

    cmd()
        .arg("read")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("unknown row code 0x99").and(contains("hint:")));

    cmd()
        .arg("read")
        .arg(&input)
        .arg("--keep-going")
        .assert()
        .success()
        .stdout(contains("Meditation Level: 101"));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn inspect_stdout_outputs_json_report() {
    let temp = TempDir::new().expect("tempdir");
    let input = clean_capture(temp.path());

    let assert = cmd()
        .arg("inspect")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let report: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(report["packets"]["packets_accepted"], 3);
    assert_eq!(report["readings"]["total"], 5);
    assert_eq!(report["tool"]["name"], "mindwave");
}

#[test]
fn inspect_writes_report_file() {
    let temp = TempDir::new().expect("tempdir");
    let input = clean_capture(temp.path());
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("inspect")
        .arg(input)
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let written = std::fs::read_to_string(&report).expect("report written");
    let _: Value = serde_json::from_str(&written).expect("valid json");
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = clean_capture(temp.path());
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(input)
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn report_path_must_differ_from_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = clean_capture(temp.path());

    cmd()
        .arg("inspect")
        .arg(&input)
        .arg("-o")
        .arg(&input)
        .assert()
        .failure()
        .stderr(contains("report path must differ from input"));
}

#[test]
fn list_violations_outputs_ids() {
    let temp = TempDir::new().expect("tempdir");
    let input = noisy_capture(temp.path());
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--list-violations")
        .assert()
        .success()
        .stderr(
            contains("Protocol violations:")
                .and(contains("MW-UNKNOWN-ROW-CODE"))
                .and(contains("MW-MEDITATION-RANGE")),
        );
}

#[test]
fn strict_fails_when_violations_present() {
    let temp = TempDir::new().expect("tempdir");
    let input = noisy_capture(temp.path());
    let report = temp.path().join("report.json");

    cmd()
        .arg("inspect")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("protocol violations detected"));
}

#[test]
fn strict_passes_on_clean_capture() {
    let temp = TempDir::new().expect("tempdir");
    let input = clean_capture(temp.path());

    cmd()
        .arg("inspect")
        .arg(input)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}
