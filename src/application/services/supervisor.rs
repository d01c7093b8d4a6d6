//! Beacon startup supervision.
//!
//! Starting the beacon server is the one step that cannot just shell out and
//! check an exit code: the launcher returns immediately and the real server
//! announces itself on stdout. The supervisor watches that stream for two
//! markers (the forked pid, then the ready banner) under a bounded wait, and
//! keeps every line it saw so a failed start can be diagnosed from the error
//! alone.

use std::path::Path;
use std::time::Duration;

use regex::Regex;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tokio::time::timeout;

use crate::application::ports::{
    BEACON_PID_PATTERN, BEACON_PROGRAM, BEACON_READY_PATTERN, BEACON_SIGNATURE, ProcessTable,
    ServiceLauncher, ServiceStream,
};
use crate::application::services::discovery::find_process;
use crate::domain::{Liveness, ManagedProcess, StartupError};

/// Supervises one beacon startup cycle: discovery short-circuit, launch,
/// readiness detection, bounded wait.
pub struct StartupSupervisor {
    pid_pattern: Regex,
    ready_pattern: Regex,
    wait: Duration,
}

impl StartupSupervisor {
    /// Create a supervisor with the beacon marker patterns and the given
    /// readiness bound.
    ///
    /// # Panics
    ///
    /// Panics if the built-in marker patterns fail to compile (they are
    /// compile-time constants and will not panic).
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(wait: Duration) -> Self {
        Self {
            pid_pattern: Regex::new(BEACON_PID_PATTERN).expect("valid pid pattern"),
            ready_pattern: Regex::new(BEACON_READY_PATTERN).expect("valid ready pattern"),
            wait,
        }
    }

    /// Start the beacon server and wait until it reports ready.
    ///
    /// If discovery finds a process matching [`BEACON_SIGNATURE`], that
    /// process is adopted and nothing is launched; starting twice never
    /// forks a twin. Otherwise the service is launched and its stdout is
    /// followed line by line until the ready banner appears.
    ///
    /// A wait that expires does not kill the launched process: a re-run will
    /// adopt it through discovery if it finished starting late.
    ///
    /// # Errors
    ///
    /// Returns an error if discovery fails, the launch fails, the process
    /// exits before the banner, or the bound expires. Timeout and exit errors
    /// carry the full collected output in read order.
    pub async fn start(
        &self,
        table: &(impl ProcessTable + ?Sized),
        launcher: &(impl ServiceLauncher + ?Sized),
        config_path: &Path,
    ) -> Result<ManagedProcess, StartupError> {
        if let Some(pid) = find_process(table, BEACON_SIGNATURE).await? {
            return Ok(ManagedProcess::adopted(pid));
        }

        let stream = launcher.launch(BEACON_PROGRAM, config_path).await?;

        let mut managed = ManagedProcess::new();
        managed.mark(Liveness::Starting);

        let (stop_tx, stop_rx) = oneshot::channel();
        let mut done_rx = self.spawn_reader(stream, managed, stop_rx);

        match timeout(self.wait, &mut done_rx).await {
            Ok(received) => {
                let managed = received.unwrap_or_default();
                if managed.liveness() == Liveness::Ready {
                    Ok(managed)
                } else {
                    Err(StartupError::Exited {
                        output: managed.joined_output(),
                    })
                }
            }
            Err(_elapsed) => {
                // Recover the collected output from the reader before giving
                // up; a timeout with no diagnostic context is useless.
                let _ = stop_tx.send(());
                let output = done_rx
                    .await
                    .map(|managed| managed.joined_output())
                    .unwrap_or_default();
                Err(StartupError::Timeout {
                    waited: self.wait,
                    output,
                })
            }
        }
    }

    /// Spawn the single reader task for this cycle. It owns the
    /// `ManagedProcess` until a terminal event, then hands it back over the
    /// returned channel: ready banner seen, end of stream, or a stop request
    /// (a dropped caller counts as one).
    fn spawn_reader(
        &self,
        stream: ServiceStream,
        mut managed: ManagedProcess,
        mut stop_rx: oneshot::Receiver<()>,
    ) -> oneshot::Receiver<ManagedProcess> {
        let (done_tx, done_rx) = oneshot::channel();
        let pid_pattern = self.pid_pattern.clone();
        let ready_pattern = self.ready_pattern.clone();

        tokio::spawn(async move {
            let mut lines = BufReader::new(stream).lines();
            loop {
                tokio::select! {
                    next = lines.next_line() => match next {
                        Ok(Some(line)) => {
                            managed.record_line(&line);
                            if managed.pid().is_none() {
                                // First announcement wins; a line carrying
                                // both markers is consumed as the pid line.
                                if let Some(pid) = extract_pid(&pid_pattern, &line) {
                                    managed.record_pid(pid);
                                }
                            } else if ready_pattern.is_match(&line) {
                                managed.mark(Liveness::Ready);
                                let _ = done_tx.send(managed);
                                return;
                            }
                        }
                        Ok(None) | Err(_) => {
                            managed.mark(Liveness::Failed);
                            let _ = done_tx.send(managed);
                            return;
                        }
                    },
                    _ = &mut stop_rx => {
                        managed.mark(Liveness::Failed);
                        let _ = done_tx.send(managed);
                        return;
                    }
                }
            }
        });

        done_rx
    }
}

fn extract_pid(pattern: &Regex, line: &str) -> Option<u32> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
