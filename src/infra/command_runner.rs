//! Infrastructure implementation of the `CommandRunner` port.
//!
//! `ShellRunner` executes provisioning commands through `bash -lc` on the
//! local host, or through `ssh <host> -- bash -lc` when the bootstrap
//! targets a remote machine, with a guaranteed deadline and kill on overrun.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use crate::application::ports::{CommandOutput, CommandRunner};
use crate::domain::CommandError;

/// Provisioning commands fetch packages and archives; give them room.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(600);

/// Where commands execute. Both targets run the command through a `bash -lc`
/// login shell, so pip console scripts stay on PATH remotely too.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Local,
    Remote { host: String },
}

/// Production `CommandRunner` over tokio process execution.
///
/// `tokio::time::timeout` around `.output().await` drops the future but
/// leaves the OS process running; this implementation uses `tokio::select!`
/// with an explicit `child.kill()` so an overrun never leaks a process.
pub struct ShellRunner {
    target: Target,
    deadline: Duration,
}

impl ShellRunner {
    #[must_use]
    pub fn new(target: Target) -> Self {
        Self::with_deadline(target, DEFAULT_DEADLINE)
    }

    #[must_use]
    pub fn with_deadline(target: Target, deadline: Duration) -> Self {
        Self { target, deadline }
    }

    fn invocation(&self, command: &str) -> (String, Vec<String>) {
        match &self.target {
            Target::Local => (
                "bash".to_string(),
                vec!["-lc".to_string(), command.to_string()],
            ),
            // ssh rejoins its command arguments with spaces before the remote
            // shell re-parses them; quoting here keeps the command one word.
            Target::Remote { host } => (
                "ssh".to_string(),
                vec![
                    host.clone(),
                    "--".to_string(),
                    "bash".to_string(),
                    "-lc".to_string(),
                    shell_quote(command),
                ],
            ),
        }
    }

    async fn dispatch(
        &self,
        command: &str,
        input: Option<&[u8]>,
    ) -> Result<CommandOutput, CommandError> {
        let (program, args) = self.invocation(command);
        let mut child = Command::new(program)
            .args(args)
            .stdin(if input.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CommandError::Spawn {
                command: command.to_string(),
                source,
            })?;

        // Writer task owns the handle; dropping it on completion closes the
        // child's stdin so filters like `tee` see EOF.
        let stdin_task = child
            .stdin
            .take()
            .zip(input.map(<[u8]>::to_vec))
            .map(|(mut stdin, bytes)| {
                tokio::spawn(async move {
                    use tokio::io::AsyncWriteExt;
                    let _ = stdin.write_all(&bytes).await;
                })
            });

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        tokio::select! {
            outcome = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    read_stream(&mut stdout_handle),
                    read_stream(&mut stderr_handle),
                );
                if let Some(task) = stdin_task {
                    let _ = task.await;
                }
                let status = status.map_err(|source| CommandError::Spawn {
                    command: command.to_string(),
                    source,
                })?;
                let stdout = capture_text(&stdout);
                let stderr = capture_text(&stderr);
                let exit_code = status.code().unwrap_or(-1);
                if status.success() {
                    Ok(CommandOutput { stdout, exit_code })
                } else {
                    Err(CommandError::Failed {
                        command: command.to_string(),
                        stdout,
                        stderr,
                        exit_code,
                    })
                }
            } => outcome,
            () = tokio::time::sleep(self.deadline) => {
                let _ = child.kill().await;
                Err(CommandError::Deadline {
                    command: command.to_string(),
                    timeout_secs: self.deadline.as_secs(),
                })
            }
        }
    }
}

async fn read_stream(handle: &mut Option<impl AsyncRead + Unpin>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(h) = handle {
        let _ = h.read_to_end(&mut buf).await;
    }
    buf
}

fn capture_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\n')
        .to_string()
}

fn shell_quote(command: &str) -> String {
    format!("'{}'", command.replace('\'', r"'\''"))
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput, CommandError> {
        self.dispatch(command, None).await
    }

    async fn sudo(&self, command: &str) -> Result<CommandOutput, CommandError> {
        self.dispatch(&format!("sudo {command}"), None).await
    }

    async fn run_with_stdin(
        &self,
        command: &str,
        input: &[u8],
    ) -> Result<CommandOutput, CommandError> {
        self.dispatch(command, Some(input)).await
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
