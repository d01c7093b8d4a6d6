//! Infrastructure implementation of the `ServiceLauncher` port.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{ServiceLauncher, ServiceStream};
use crate::domain::StartupError;

/// Spawns the service detached: no `kill_on_drop`, no retained `Child`.
/// Dropping the handle after taking stdout leaves the process running, which
/// is the launcher contract: the service must outlive the supervisor.
pub struct TokioLauncher;

#[async_trait]
impl ServiceLauncher for TokioLauncher {
    async fn launch(
        &self,
        program: &str,
        config_path: &Path,
    ) -> Result<ServiceStream, StartupError> {
        let command = format!("{program} {}", config_path.display());
        let mut child = Command::new(program)
            .arg(config_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| StartupError::Launch {
                command: command.clone(),
                source,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| StartupError::Launch {
            command,
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout not captured"),
        })?;
        Ok(Box::new(stdout))
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
