//! Coverage of the command-line surface itself: help text, version
//! reporting, the shared provisioning flags, and parse failures.

use assert_cmd::Command;
use predicates::prelude::*;

fn bosun() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bosun"));
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_bare_invocation_shows_help_on_stderr() {
    // arg_required_else_help sends the help screen to stderr with code 2.
    bosun().assert().code(2).stderr(predicate::str::contains(
        "Host provisioning for the Hyperspace orchestration stack",
    ));
}

#[test]
fn test_help_screen_lists_every_subcommand() {
    let mut assert = bosun().arg("--help").assert().success();
    for needle in ["Usage:", "Commands:", "bootstrap", "update", "status", "version"] {
        assert = assert.stdout(predicate::str::contains(needle));
    }
}

#[test]
fn test_version_is_reported_by_flag_and_subcommand() {
    for invocation in ["--version", "version"] {
        bosun()
            .arg(invocation)
            .assert()
            .success()
            .stdout(predicate::str::contains("bosun 0.1.0"));
    }
}

#[test]
fn test_version_json_carries_name_and_version() {
    bosun()
        .args(["version", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name":"bosun""#))
        .stdout(predicate::str::contains(r#""version":"0.1.0""#));
}

#[test]
fn test_provisioning_flags_are_shared_by_bootstrap_and_update() {
    for subcommand in ["bootstrap", "update"] {
        let mut assert = bosun().args([subcommand, "--help"]).assert().success();
        for flag in [
            "--working-dir",
            "--release",
            "--channel",
            "--remote",
            "--asset-dir",
            "--config",
        ] {
            assert = assert.stdout(predicate::str::contains(flag));
        }
    }
}

#[test]
fn test_status_accepts_the_configuration_flags() {
    bosun()
        .args(["status", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--working-dir"))
        .stdout(predicate::str::contains("--remote"));
}

#[test]
fn test_global_flags_parse_on_either_side_of_the_subcommand() {
    bosun()
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""version":"#));
    bosun().args(["version", "--quiet"]).assert().success();
    bosun().args(["--no-color", "version"]).assert().success();
}

#[test]
fn test_no_color_env_accepts_conventional_values() {
    for value in ["1", "true"] {
        bosun()
            .env("NO_COLOR", value)
            .arg("version")
            .assert()
            .success()
            .stdout(predicate::str::contains("bosun 0.1.0"));
    }
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    bosun()
        .arg("teleport")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_unexpected_flag_is_reported_on_stderr() {
    bosun()
        .args(["bootstrap", "--frobnicate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}
