//! Pipeline step implementations.
//!
//! Grouped by concern: OS-level prerequisites (`system`), the supervised
//! event-router install (`beacon`), the orchestrator artifact (`artifact`),
//! and the task worker with its plugins (`deckhand`). Step structs hold their
//! port handles; assembly order lives in `services::plan`.

pub mod artifact;
pub mod beacon;
pub mod deckhand;
pub mod system;

use std::path::Path;

use crate::application::ports::{CommandOutput, CommandRunner};
use crate::domain::CommandError;

/// Package-manager and download vocabulary shared by the install steps.
/// Thin wrappers so step bodies read as intent rather than format strings.
pub(crate) struct HostShell<'a> {
    runner: &'a dyn CommandRunner,
    working_dir: &'a Path,
}

impl<'a> HostShell<'a> {
    pub(crate) fn new(runner: &'a dyn CommandRunner, working_dir: &'a Path) -> Self {
        Self {
            runner,
            working_dir,
        }
    }

    pub(crate) async fn apt_get(&self, args: &str) -> Result<CommandOutput, CommandError> {
        self.runner.sudo(&format!("apt-get {args}")).await
    }

    pub(crate) async fn add_apt(&self, args: &str) -> Result<CommandOutput, CommandError> {
        self.runner.sudo(&format!("add-apt-repository {args}")).await
    }

    pub(crate) async fn apt_key(&self, path: &str) -> Result<CommandOutput, CommandError> {
        self.runner.sudo(&format!("apt-key add {path}")).await
    }

    pub(crate) async fn pip(&self, package: &str) -> Result<CommandOutput, CommandError> {
        self.runner
            .sudo(&format!("pip install --timeout=120 {package}"))
            .await
    }

    /// Download into the working directory, skipping when already current.
    pub(crate) async fn wget(&self, url: &str) -> Result<CommandOutput, CommandError> {
        self.runner
            .run(&format!("wget -N {url} -P {}/", self.working_dir.display()))
            .await
    }
}
