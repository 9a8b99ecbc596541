//! End to end tests for the sched-analyzer binary.
//!
//! These run the built binary and check its exit status and the JSON it
//! hands to the collection engine on stdout.

use std::process::{Command, Output};

use serde_json::Value;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sched-analyzer"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run sched-analyzer")
}

/// Run with the given arguments, expect success and return the parsed JSON.
fn run_ok(args: &[&str]) -> Value {
    let output = run(args);
    assert!(
        output.status.success(),
        "sched-analyzer {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn toggles(config: &Value) -> Vec<&str> {
    config["toggles"]
        .as_array()
        .expect("toggles is an array")
        .iter()
        .map(|t| t.as_str().expect("toggle is a string"))
        .collect()
}

#[test]
fn test_defaults() {
    let config = run_ok(&[]);
    assert_eq!(config["mode"], "system");
    assert_eq!(config["output"], "sched-analyzer.perfetto-trace");
    assert_eq!(config["output_path"], Value::Null);
    assert_eq!(config["max_size"], 250 * 1024 * 1024);
    assert_eq!(config["pid"], 0);
    assert_eq!(config["comm"], "");
    assert!(toggles(&config).is_empty());
}

#[test]
fn test_full_command_line() {
    let config = run_ok(&[
        "--app",
        "--output",
        "run.perfetto-trace",
        "--output_path",
        "/tmp",
        "--max_size",
        "0x400",
        "--load_avg",
        "--cpu_nr_running",
        "--pid",
        "42",
        "--comm",
        "kworker",
    ]);
    assert_eq!(config["mode"], "app");
    assert_eq!(config["output"], "run.perfetto-trace");
    assert_eq!(config["output_path"], "/tmp");
    assert_eq!(config["max_size"], 1_048_576);
    assert_eq!(config["pid"], 42);
    assert_eq!(config["comm"], "kworker");
    assert_eq!(
        toggles(&config),
        ["load_avg_cpu", "load_avg_task", "cpu_nr_running"]
    );
}

#[test]
fn test_util_avg_umbrella() {
    let umbrella = run_ok(&["--util_avg"]);
    let individual = run_ok(&[
        "--util_avg_cpu",
        "--util_avg_task",
        "--util_avg_rt",
        "--util_avg_dl",
        "--util_avg_irq",
        "--util_avg_thermal",
    ]);
    assert_eq!(umbrella["toggles"], individual["toggles"]);
    assert_eq!(toggles(&umbrella).len(), 6);
}

#[test]
fn test_comm_is_truncated() {
    let config = run_ok(&["--comm", "a_very_long_process_name"]);
    assert_eq!(config["comm"], "a_very_long_pro");
}

#[test]
fn test_positional_is_rejected() {
    let output = run(&["extra_token"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("extra_token"), "{stderr}");
    assert!(stderr.contains("Usage"), "{stderr}");
}

#[test]
fn test_invalid_number() {
    let output = run(&["--max_size", "abc"]);
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no digits were found"), "{stderr}");
}

#[test]
fn test_numeric_overflow() {
    let output = run(&["--pid", "99999999999"]);
    assert_eq!(output.status.code(), Some(libc::ERANGE));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_numeric_overflow_reported_before_unknown_flag() {
    let output = run(&["--max_size", "99999999999999999999", "--bogus"]);
    assert_eq!(output.status.code(), Some(libc::ERANGE));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_size"), "{stderr}");
    assert!(!stderr.contains("bogus"), "{stderr}");
}

#[test]
fn test_unknown_flag() {
    let output = run(&["--not_a_flag"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_help_and_version() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    assert!(help.contains("--util_avg_thermal"));
    assert!(help.contains("--max_size <SIZE(KiB)>"));

    let output = run(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}
