//! Effective-configuration assembly through the manifest file and the
//! channel environment variable.
//!
//! `std::env::set_var` is an unsafe fn in edition 2024; the mutations here
//! are confined to `#[serial]` tests so no other test observes them.

#![allow(unsafe_code)]
#![allow(clippy::expect_used)]

use std::io::Write;
use std::path::{Path, PathBuf};

use serial_test::serial;
use tempfile::NamedTempFile;

use bosun_cli::domain::Overrides;
use bosun_cli::domain::config::CHANNEL_ENV;
use bosun_cli::infra::config::resolve_config;

fn manifest_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("tempfile");
    writeln!(file, "{content}").expect("write manifest");
    file
}

#[test]
#[serial]
fn env_channel_beats_the_manifest() {
    let file = manifest_file("channel: staging");

    unsafe { std::env::set_var(CHANNEL_ENV, "hotfix") };
    let config = resolve_config(Some(file.path()), &Overrides::default()).expect("resolve");
    unsafe { std::env::remove_var(CHANNEL_ENV) };

    assert_eq!(config.channel, "hotfix");
}

#[test]
#[serial]
fn cli_override_beats_the_environment() {
    let file = manifest_file("channel: staging");
    let overrides = Overrides {
        channel: Some("release-9".into()),
        ..Overrides::default()
    };

    unsafe { std::env::set_var(CHANNEL_ENV, "hotfix") };
    let config = resolve_config(Some(file.path()), &overrides).expect("resolve");
    unsafe { std::env::remove_var(CHANNEL_ENV) };

    assert_eq!(config.channel, "release-9");
}

#[test]
#[serial]
fn empty_env_channel_falls_through_to_the_manifest() {
    let file = manifest_file("channel: staging");

    unsafe { std::env::set_var(CHANNEL_ENV, "") };
    let config = resolve_config(Some(file.path()), &Overrides::default()).expect("resolve");
    unsafe { std::env::remove_var(CHANNEL_ENV) };

    assert_eq!(config.channel, "staging");
}

#[test]
#[serial]
fn manifest_feeds_every_resolved_field() {
    let file = manifest_file(
        "working_dir: /srv/bosun\n\
         release: 9.9.0\n\
         channel: staging\n\
         remote: ops@10.0.0.7\n\
         asset_dir: /srv/assets\n\
         startup_timeout_secs: 25",
    );

    unsafe { std::env::remove_var(CHANNEL_ENV) };
    let config = resolve_config(Some(file.path()), &Overrides::default()).expect("resolve");

    assert_eq!(config.working_dir, PathBuf::from("/srv/bosun"));
    assert_eq!(config.release, "9.9.0");
    assert_eq!(config.channel, "staging");
    assert_eq!(config.remote.as_deref(), Some("ops@10.0.0.7"));
    assert_eq!(config.asset_dir, PathBuf::from("/srv/assets"));
    assert_eq!(config.startup_timeout_secs, 25);
}

#[test]
#[serial]
fn missing_explicit_manifest_fails_resolution() {
    let err = resolve_config(Some(Path::new("/nonexistent/bosun.yaml")), &Overrides::default())
        .expect_err("missing manifest");
    assert!(err.to_string().contains("manifest not found"));
}
