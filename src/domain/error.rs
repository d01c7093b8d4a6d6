//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Command errors ────────────────────────────────────────────────────────────

/// Errors from running a provisioning command against the target host.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed [exit_code={exit_code}, stdout={stdout}, stderr={stderr}]")]
    Failed {
        command: String,
        stdout: String,
        stderr: String,
        exit_code: i32,
    },

    #[error("Command '{command}' exceeded the {timeout_secs}s deadline and was killed.")]
    Deadline { command: String, timeout_secs: u64 },
}

// ── Discovery errors ──────────────────────────────────────────────────────────

/// Process-table lookup failures.
///
/// "No matching process" is *not* an error; `find_process` returns
/// `Ok(None)` for that. This enum covers only a failed table query.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Process table query failed: {0}")]
    Query(#[from] CommandError),
}

// ── Startup errors ────────────────────────────────────────────────────────────

/// Errors from supervising a service process until it reports ready.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Service did not report ready within {waited:?}. Output so far:\n{output}")]
    Timeout {
        waited: std::time::Duration,
        output: String,
    },

    #[error("Service exited before reporting ready. Output:\n{output}")]
    Exited { output: String },

    #[error("Failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Beacon server is not running. Run 'bosun bootstrap' to install and start it.")]
    NotRunning,

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}

// ── Pipeline errors ───────────────────────────────────────────────────────────

/// First failure of a pipeline run: the step that failed, the steps that
/// finished before it, and the underlying cause.
#[derive(Debug, Error)]
#[error("Step '{step}' failed after {} completed step(s)", completed.len())]
pub struct PipelineAbort {
    pub step: String,
    pub completed: Vec<String>,
    #[source]
    pub source: anyhow::Error,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to bootstrap configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Working directory must be an absolute path: {0}")]
    RelativeWorkingDir(String),

    #[error("Release must not be empty.")]
    EmptyRelease,

    #[error("Channel must not be empty.")]
    EmptyChannel,

    #[error(
        "Bootstrap cannot target a remote host: the event router is launched \
         where bosun runs. Use --remote with update and status, or run \
         'bosun bootstrap' on the host itself."
    )]
    RemoteBootstrap,

    #[error("Cannot determine a home directory for the default working dir. Pass --working-dir.")]
    NoHomeDir,
}
