//! Domain types for supervised service processes.
//!
//! Pure data and transitions: no I/O, no async. The supervisor service owns
//! one `ManagedProcess` per supervision cycle and drives it through the
//! `Liveness` state machine.

use std::path::PathBuf;

use serde::Serialize;

// ── Liveness state machine ───────────────────────────────────────────────────

/// Lifecycle of a supervised service process.
///
/// Transitions only move forward (`NotStarted → Starting → Ready | Failed`);
/// `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Liveness {
    NotStarted,
    Starting,
    Ready,
    Failed,
}

impl Liveness {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    fn rank(self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::Starting => 1,
            Self::Ready | Self::Failed => 2,
        }
    }
}

// ── Managed process ──────────────────────────────────────────────────────────

/// One supervision cycle's view of a service process: its pid once announced,
/// every output line read so far, and where it is in its lifecycle.
///
/// Owned by exactly one party at a time. The supervisor's reader task holds it
/// while lines arrive and hands it to the caller over the readiness signal, so
/// no two actors ever mutate it concurrently.
#[derive(Debug)]
pub struct ManagedProcess {
    pid: Option<u32>,
    output: Vec<String>,
    liveness: Liveness,
}

impl ManagedProcess {
    /// A fresh cycle for a process about to be launched.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pid: None,
            output: Vec::new(),
            liveness: Liveness::NotStarted,
        }
    }

    /// A cycle adopting an already-running process found by discovery.
    /// No launch happened, so there is no output to collect.
    #[must_use]
    pub fn adopted(pid: u32) -> Self {
        Self {
            pid: Some(pid),
            output: Vec::new(),
            liveness: Liveness::Ready,
        }
    }

    #[must_use]
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    #[must_use]
    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Collected output joined in read order, for diagnostics.
    #[must_use]
    pub fn joined_output(&self) -> String {
        self.output.join("\n")
    }

    /// Append one output line verbatim. Empty lines are kept; postmortems
    /// need the stream exactly as the process wrote it.
    pub fn record_line(&mut self, line: &str) {
        self.output.push(line.to_string());
    }

    /// Record the announced pid. The first announcement wins; later matches
    /// are ignored and `false` is returned.
    pub fn record_pid(&mut self, pid: u32) -> bool {
        if self.pid.is_some() {
            return false;
        }
        self.pid = Some(pid);
        true
    }

    /// Advance the lifecycle. Regressions and transitions out of a terminal
    /// state are refused; returns whether the transition applied.
    pub fn mark(&mut self, next: Liveness) -> bool {
        if self.liveness.is_terminal() || next.rank() <= self.liveness.rank() {
            return false;
        }
        self.liveness = next;
        true
    }
}

impl Default for ManagedProcess {
    fn default() -> Self {
        Self::new()
    }
}

// ── Service handles ──────────────────────────────────────────────────────────

/// What the event-router step hands forward: the confirmed pid and the config
/// locations later steps wire into the worker environment. Plain values;
/// moved through the pipeline context, never re-discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHandles {
    pub pid: u32,
    pub config_path: PathBuf,
    pub template_path: PathBuf,
}

// ── Process table entry ──────────────────────────────────────────────────────

/// One row of the OS process listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub command: String,
}

// ── Unit tests ───────────────────────────────────────────────────────────────
