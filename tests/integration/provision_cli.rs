//! Fail-fast paths of the provisioning commands.
//!
//! Configuration errors must surface on stderr with a failing exit code
//! before any host command runs.

#![allow(clippy::expect_used)]

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn bosun() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bosun"));
    cmd.env("NO_COLOR", "1");
    cmd
}

fn manifest_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    writeln!(file, "{content}").expect("write manifest");
    file
}

#[test]
fn test_bootstrap_with_missing_manifest_fails_before_provisioning() {
    bosun()
        .args(["bootstrap", "--config", "/nonexistent/bosun.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest not found"));
}

#[test]
fn test_update_with_missing_manifest_fails_before_provisioning() {
    bosun()
        .args(["update", "--config", "/nonexistent/bosun.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest not found"));
}

#[test]
fn test_status_with_missing_manifest_fails() {
    bosun()
        .args(["status", "--config", "/nonexistent/bosun.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest not found"));
}

#[test]
fn test_relative_working_dir_in_manifest_is_rejected() {
    let file = manifest_file("working_dir: relative/dir");
    bosun()
        .args(["bootstrap", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute path"));
}

#[test]
fn test_relative_working_dir_flag_is_rejected() {
    let file = manifest_file("channel: staging");
    bosun()
        .args(["bootstrap", "--working-dir", "relative/dir", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("absolute path"));
}

#[test]
fn test_bootstrap_refuses_a_remote_target() {
    bosun()
        .args([
            "bootstrap",
            "--working-dir",
            "/var/tmp/bosun-it",
            "--remote",
            "ops@10.0.0.7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Bootstrap cannot target a remote host",
        ));
}

#[test]
fn test_malformed_manifest_names_the_file() {
    let file = manifest_file("release: [unclosed");
    bosun()
        .args(["update", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot parse"));
}

#[test]
fn test_json_mode_reports_config_errors_as_json() {
    bosun()
        .args(["bootstrap", "--json", "--config", "/nonexistent/bosun.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""error": true"#))
        .stdout(predicate::str::contains("manifest not found"));
}

#[test]
fn test_empty_channel_override_is_rejected() {
    let file = manifest_file("channel: staging");
    bosun()
        .args(["bootstrap", "--channel", "  ", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Channel must not be empty"));
}
