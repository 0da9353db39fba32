//! Integration tests for riftctl
//!
//! Every command that needs hardware runs against the simulated tracker
//! behind the hidden `--mock` flag.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn riftctl() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("riftctl")?;
    cmd.env_remove("RUST_LOG").env_remove("RIFTCTL_CONFIG");
    Ok(cmd)
}

fn stdout_json(output: &std::process::Output) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_cli_help() -> TestResult {
    riftctl()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("monitor"))
        .stdout(predicate::str::contains("set-flags"));
    Ok(())
}

#[test]
fn test_cli_version() -> TestResult {
    riftctl()?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("riftctl"));
    Ok(())
}

#[test]
fn test_completion_generation() -> TestResult {
    riftctl()?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("riftctl"));
    Ok(())
}

#[test]
fn test_list_json() -> TestResult {
    let output = riftctl()?.args(["--mock", "list", "--json"]).output()?;
    assert!(output.status.success());

    let json = stdout_json(&output)?;
    assert_eq!(json["success"], true);
    assert_eq!(json["devices"][0]["vendor_id"], 0x2833);
    assert_eq!(json["devices"][0]["product_id"], 0x0001);
    Ok(())
}

#[test]
fn test_info_json() -> TestResult {
    let output = riftctl()?.args(["--mock", "info", "--json"]).output()?;
    assert!(output.status.success());

    let json = stdout_json(&output)?;
    assert_eq!(json["state"], "Ready");
    assert_eq!(json["display_info"]["h_resolution"], 1280);
    assert_eq!(json["display_info"]["v_resolution"], 800);
    assert_eq!(json["range"]["gyro_scale"], 2000);
    assert_eq!(json["keep_alive_interval_ms"], 1000);
    Ok(())
}

#[test]
fn test_info_human() -> TestResult {
    riftctl()?
        .args(["--mock", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolution: 1280x800"))
        .stdout(predicate::str::contains("Keep-alive: 1000 ms"));
    Ok(())
}

#[test]
fn test_device_not_found_exit_code() -> TestResult {
    riftctl()?
        .args(["--mock", "--pid", "0x0021", "info"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Tracker not found: 2833:0021"));
    Ok(())
}

#[test]
fn test_device_not_found_json_error() -> TestResult {
    let output = riftctl()?
        .args(["--mock", "--vid", "0x1234", "monitor", "--json"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let json = stdout_json(&output)?;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["exit_code"], 2);
    Ok(())
}

#[test]
fn test_monitor_json_lines() -> TestResult {
    let output = riftctl()?
        .args(["--mock", "monitor", "--duration-secs", "0", "--json"])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);

    let reading: Value = serde_json::from_str(lines.first().copied().unwrap_or_default())?;
    let accel_y = reading["acceleration"]["y"].as_f64().unwrap_or_default();
    assert!((accel_y - 9.81).abs() < 1e-3);
    assert_eq!(reading["temperature"], 2950);
    Ok(())
}

#[test]
fn test_set_flags() -> TestResult {
    riftctl()?
        .args(["--mock", "set-flags", "0x40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SENSOR_COORDINATES"));
    Ok(())
}

#[test]
fn test_set_flags_invalid_hex() -> TestResult {
    riftctl()?
        .args(["--mock", "set-flags", "zz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid hex value"));
    Ok(())
}

#[test]
fn test_config_file_is_applied() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rift.yaml");
    fs::write(&path, "raw_scale: 0.001\n")?;

    let output = riftctl()?
        .arg("--config")
        .arg(&path)
        .args(["--mock", "monitor", "--duration-secs", "0", "--json"])
        .output()?;
    assert!(output.status.success());

    let reading: Value = serde_json::from_slice(&output.stdout)?;
    let accel_y = reading["acceleration"]["y"].as_f64().unwrap_or_default();
    assert!((accel_y - 98.1).abs() < 1e-2);
    Ok(())
}

#[test]
fn test_invalid_config_exit_code() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rift.yaml");
    fs::write(&path, "raw_scale: 0.0\n")?;

    riftctl()?
        .arg("--config")
        .arg(&path)
        .args(["--mock", "info"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}
