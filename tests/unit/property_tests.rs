//! Property-based tests for critical domain invariants.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use proptest::prelude::*;
use regex::Regex;

use bosun_cli::application::BEACON_PID_PATTERN;
use bosun_cli::domain::{BootstrapConfig, Liveness, ManagedProcess, Manifest, Overrides};

fn home() -> Option<PathBuf> {
    Some(PathBuf::from("/home/crew"))
}

// ============================================================================
// ManagedProcess lifecycle property tests
// ============================================================================

proptest! {
    /// The first announced pid wins, whatever arrives afterwards.
    #[test]
    fn prop_first_pid_announcement_wins(
        first in 1u32..=u32::MAX,
        later in proptest::collection::vec(1u32..=u32::MAX, 0..8),
    ) {
        let mut process = ManagedProcess::new();
        prop_assert!(process.record_pid(first));
        for pid in later {
            prop_assert!(!process.record_pid(pid));
        }
        prop_assert_eq!(process.pid(), Some(first));
    }

    /// Once terminal, no sequence of transition attempts moves the lifecycle.
    #[test]
    fn prop_terminal_liveness_is_stable(
        terminal in prop_oneof![Just(Liveness::Ready), Just(Liveness::Failed)],
        attempts in proptest::collection::vec(
            prop_oneof![
                Just(Liveness::NotStarted),
                Just(Liveness::Starting),
                Just(Liveness::Ready),
                Just(Liveness::Failed),
            ],
            0..8,
        ),
    ) {
        let mut process = ManagedProcess::new();
        prop_assert!(process.mark(Liveness::Starting));
        prop_assert!(process.mark(terminal));
        for next in attempts {
            prop_assert!(!process.mark(next));
            prop_assert_eq!(process.liveness(), terminal);
        }
    }

    /// Output lines survive verbatim and in arrival order. Lines here are
    /// printable ASCII, so joining on newlines is lossless.
    #[test]
    fn prop_output_preserves_lines_verbatim(
        lines in proptest::collection::vec("[ -~]{0,40}", 0..12),
    ) {
        let mut process = ManagedProcess::new();
        for line in &lines {
            process.record_line(line);
        }
        prop_assert_eq!(process.output(), &lines[..]);
        prop_assert_eq!(process.joined_output(), lines.join("\n"));
    }
}

#[test]
fn test_adopted_process_needs_no_transitions() {
    let process = ManagedProcess::adopted(1204);
    assert_eq!(process.liveness(), Liveness::Ready);
    assert_eq!(process.pid(), Some(1204));
}

// ============================================================================
// BootstrapConfig resolution property tests
// ============================================================================

proptest! {
    /// Channel precedence is total: CLI flag beats env, env beats manifest,
    /// and the default only applies when all three are absent.
    #[test]
    fn prop_channel_precedence_is_total(
        cli in proptest::option::of("[a-z][a-z0-9-]{0,12}"),
        env in proptest::option::of("[a-z][a-z0-9-]{0,12}"),
        manifest_channel in proptest::option::of("[a-z][a-z0-9-]{0,12}"),
    ) {
        let manifest = Manifest {
            channel: manifest_channel.clone(),
            ..Manifest::default()
        };
        let overrides = Overrides {
            channel: cli.clone(),
            ..Overrides::default()
        };
        let config = BootstrapConfig::resolve(&manifest, env.clone(), home(), &overrides)
            .expect("resolve");

        let expected = cli
            .or(env)
            .or(manifest_channel)
            .unwrap_or_else(|| "main".to_string());
        prop_assert_eq!(config.channel, expected);
    }

    /// The resolved channel lands verbatim in every plugin archive URL.
    #[test]
    fn prop_plugin_archive_url_embeds_the_channel(
        channel in "[a-z][a-z0-9-]{0,16}",
        repo in "[a-z][a-z0-9-]{0,16}",
    ) {
        let overrides = Overrides {
            channel: Some(channel.clone()),
            ..Overrides::default()
        };
        let config = BootstrapConfig::resolve(&Manifest::default(), None, home(), &overrides)
            .expect("resolve");

        prop_assert_eq!(
            config.plugin_archive_url(&repo),
            format!("https://github.com/bosun-dev/{repo}/archive/{channel}.zip")
        );
    }

    /// The release is embedded in the jar name for any non-empty release.
    #[test]
    fn prop_jar_name_embeds_the_release(release in "[a-zA-Z0-9][a-zA-Z0-9.-]{0,20}") {
        let overrides = Overrides {
            release: Some(release.clone()),
            ..Overrides::default()
        };
        let config = BootstrapConfig::resolve(&Manifest::default(), None, home(), &overrides)
            .expect("resolve");

        prop_assert_eq!(
            config.orchestrator_jar_name(),
            format!("bosun-orchestrator-{release}-all")
        );
    }
}

// ============================================================================
// Pid announcement pattern property tests
// ============================================================================

proptest! {
    /// The pid pattern extracts any announced pid from its surrounding line.
    #[test]
    fn prop_pid_pattern_captures_any_pid(
        pid in 1u32..=u32::MAX,
        pad in "[ \\t]{0,4}",
    ) {
        let pattern = Regex::new(BEACON_PID_PATTERN).expect("pattern compiles");
        let line = format!("Forked server process: PID{pad} {pid} (daemon)");
        let captured = pattern
            .captures(&line)
            .and_then(|caps| caps.get(1))
            .and_then(|digits| digits.as_str().parse::<u32>().ok());
        prop_assert_eq!(captured, Some(pid));
    }

    /// Lines without an announcement never match.
    #[test]
    fn prop_pid_pattern_ignores_other_lines(noise in "[a-zA-Z ]{0,40}") {
        let pattern = Regex::new(BEACON_PID_PATTERN).expect("pattern compiles");
        prop_assert!(pattern.captures(&noise).is_none());
    }
}
