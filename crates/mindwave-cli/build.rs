use std::env;
use std::process::Command;

// Commit and date end up in `mindwave --version`.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=MINDWAVE_COMMIT");

    let commit = env::var("MINDWAVE_COMMIT")
        .ok()
        .filter(|v| !v.is_empty())
        .map(|v| v.chars().take(8).collect())
        .or_else(|| git(&["rev-parse", "--short=8", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let date = git(&["log", "-1", "--format=%cs"]).unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=MINDWAVE_BUILD_COMMIT={commit}");
    println!("cargo:rustc-env=MINDWAVE_BUILD_DATE={date}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!value.is_empty()).then_some(value)
}
