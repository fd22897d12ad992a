use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const SCRIPT: &str = r#"
- op: key_down
  key: shift
- op: click
  element: { id: "submit", size: { width: 80, height: 24 } }
- op: key_up
  key: shift
"#;

fn workspace() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("script.yaml"), SCRIPT).expect("write script");
    fs::write(dir.path().join("config.yaml"), "log_level: warn\n").expect("write config");
    dir
}

#[test]
fn plan_prints_aligned_payload() {
    let dir = workspace();
    let mut cmd = Command::cargo_bin("wd-actions").expect("binary");
    let assert = cmd
        .arg("--config")
        .arg(dir.path().join("config.yaml"))
        .arg("plan")
        .arg("--script")
        .arg(dir.path().join("script.yaml"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    let payloads: Value = serde_json::from_str(stdout.trim()).expect("valid json");
    let payloads = payloads.as_array().unwrap();
    assert_eq!(payloads.len(), 1);

    let devices = payloads[0]["actions"].as_array().unwrap();
    assert_eq!(devices.len(), 2);
    for device in devices {
        assert_eq!(device["actions"].as_array().unwrap().len(), 5);
    }
    assert_eq!(devices[0]["id"], "mouse");
    assert_eq!(devices[1]["actions"][4]["type"], "keyUp");
}

#[test]
fn plan_in_async_mode_skips_padding() {
    let dir = workspace();
    let mut cmd = Command::cargo_bin("wd-actions").expect("binary");
    let assert = cmd
        .arg("--config")
        .arg(dir.path().join("config.yaml"))
        .arg("plan")
        .arg("--async")
        .arg("--script")
        .arg(dir.path().join("script.yaml"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    let payloads: Value = serde_json::from_str(stdout.trim()).expect("valid json");
    let devices = payloads[0]["actions"].as_array().unwrap();
    assert_eq!(devices[0]["actions"].as_array().unwrap().len(), 3);
    assert_eq!(devices[1]["actions"].as_array().unwrap().len(), 2);
}

#[test]
fn plan_reports_invalid_steps() {
    let dir = workspace();
    fs::write(
        dir.path().join("bad.yaml"),
        "- op: move_to_location\n  x: -1\n  y: 0\n",
    )
    .expect("write script");

    let mut cmd = Command::cargo_bin("wd-actions").expect("binary");
    cmd.arg("--config")
        .arg(dir.path().join("config.yaml"))
        .arg("plan")
        .arg("--script")
        .arg(dir.path().join("bad.yaml"))
        .assert()
        .failure();
}

#[test]
fn devices_lists_configured_defaults() {
    let dir = workspace();
    fs::write(
        dir.path().join("touch.yaml"),
        "pointer_id: finger\npointer_kind: touch\n",
    )
    .expect("write config");

    let mut cmd = Command::cargo_bin("wd-actions").expect("binary");
    let assert = cmd
        .env_remove("WD_ACTIONS_POINTER_ID")
        .env_remove("WD_ACTIONS_POINTER_KIND")
        .arg("--config")
        .arg(dir.path().join("touch.yaml"))
        .arg("devices")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    let summary: Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(summary["async"], false);
    assert_eq!(summary["devices"][0]["id"], "finger");
    assert_eq!(summary["devices"][0]["pointerType"], "touch");
    assert_eq!(summary["devices"][1]["type"], "key");
}
