//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`. Traits are `async_trait` objects so
//! pipeline steps can hold them as `Arc<dyn …>`.

use std::path::Path;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::io::AsyncRead;

use crate::domain::{CommandError, DiscoveryError, ProcessEntry, StartupError};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Process-table signature identifying a running beacon server.
pub const BEACON_SIGNATURE: &str = "beacon.jar";

/// Program that launches the beacon server; takes the config path as its
/// single argument.
pub const BEACON_PROGRAM: &str = "beacon";

/// Line announcing the forked server pid. The launcher prints it; the process
/// handle never carries it.
pub const BEACON_PID_PATTERN: &str = r"PID\s+(\d+)";

/// Banner the beacon server prints once initialization finished.
pub const BEACON_READY_PATTERN: &str = "Hyperspace core online";

// ── Value Types ───────────────────────────────────────────────────────────────

/// Captured result of a successfully-exited command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured stdout with trailing newlines trimmed.
    pub stdout: String,
    pub exit_code: i32,
}

/// Line-oriented stdout of a launched service, read by the supervisor.
pub type ServiceStream = Box<dyn AsyncRead + Send + Unpin>;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Shell execution against the provisioning target.
///
/// The target (local shell or a remote host) is fixed when the implementation
/// is constructed; one pipeline run talks to exactly one target.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned, exits non-zero
    /// (carrying the command text, captured output, and exit code), or
    /// overruns the implementation's deadline.
    async fn run(&self, command: &str) -> Result<CommandOutput, CommandError>;

    /// Run a command with elevation. Same contract as [`run`](Self::run).
    async fn sudo(&self, command: &str) -> Result<CommandOutput, CommandError>;

    /// Run a command with `input` piped to its stdin. Same contract as
    /// [`run`](Self::run). Used to write files on the target through `tee`.
    async fn run_with_stdin(
        &self,
        command: &str,
        input: &[u8],
    ) -> Result<CommandOutput, CommandError>;
}

// ── Process Table Port ────────────────────────────────────────────────────────

/// Read-only snapshot of the target's process listing.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProcessTable: Send + Sync {
    /// List `(pid, command line)` for every visible process.
    ///
    /// # Errors
    ///
    /// Returns an error only when the query itself fails; an empty listing
    /// is a successful result.
    async fn snapshot(&self) -> Result<Vec<ProcessEntry>, DiscoveryError>;
}

// ── Service Launcher Port ─────────────────────────────────────────────────────

/// Spawns the supervised service and hands back its stdout stream.
///
/// Implementations must not tie the child's lifetime to the returned stream:
/// the supervisor deliberately leaves the service running after it stops
/// reading (readiness seen, or wait abandoned).
#[async_trait]
pub trait ServiceLauncher: Send + Sync {
    /// Launch `program config_path` with stdout piped.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    async fn launch(&self, program: &str, config_path: &Path)
    -> Result<ServiceStream, StartupError>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
