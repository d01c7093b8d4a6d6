//! Event-router installation and supervised startup.
//!
//! The one step that waits on an external process. Package and config layout
//! go through the command runner like every other step; the startup itself is
//! delegated to the supervisor, and the confirmed pid plus config locations
//! are left in the pipeline context for the worker step.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;

use crate::application::ports::{CommandRunner, ProcessTable, ServiceLauncher};
use crate::application::services::pipeline::{PipelineContext, StepAction};
use crate::application::services::steps::HostShell;
use crate::application::services::supervisor::StartupSupervisor;
use crate::domain::ServiceHandles;

/// Beacon release installed by the full bootstrap.
pub const BEACON_RELEASE: &str = "0.2.2";

pub struct InstallEventRouter {
    runner: Arc<dyn CommandRunner>,
    table: Arc<dyn ProcessTable>,
    launcher: Arc<dyn ServiceLauncher>,
}

impl InstallEventRouter {
    #[must_use]
    pub fn new(
        runner: &Arc<dyn CommandRunner>,
        table: &Arc<dyn ProcessTable>,
        launcher: &Arc<dyn ServiceLauncher>,
    ) -> Self {
        Self {
            runner: Arc::clone(runner),
            table: Arc::clone(table),
            launcher: Arc::clone(launcher),
        }
    }
}

#[async_trait]
impl StepAction for InstallEventRouter {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        let config = ctx.config.clone();
        let shell = HostShell::new(self.runner.as_ref(), &config.working_dir);

        let deb = format!("beacon_{BEACON_RELEASE}_all.deb");
        shell
            .wget(&format!(
                "https://github.com/bosun-dev/beacon/releases/download/v{BEACON_RELEASE}/{deb}"
            ))
            .await?;
        self.runner
            .sudo(&format!("dpkg -i {}/{deb}", config.working_dir.display()))
            .await?;

        let work_dir = config.beacon_work_dir();
        let config_path = config.beacon_config_path();
        let template_path = config.beacon_template_path();
        self.runner
            .run(&format!("rm -rf {}", work_dir.display()))
            .await?;
        self.runner
            .run(&format!("mkdir -p {}", work_dir.display()))
            .await?;
        // The live config starts empty; the worker fills it from the template.
        self.runner
            .run_with_stdin(&format!("tee {}", config_path.display()), b"")
            .await?;
        self.runner
            .run(&format!(
                "cp {}/beacon.config.template {}",
                config.asset_dir.display(),
                template_path.display()
            ))
            .await?;

        let supervisor = StartupSupervisor::new(config.startup_timeout());
        let managed = supervisor
            .start(self.table.as_ref(), self.launcher.as_ref(), &config_path)
            .await?;
        let pid = managed
            .pid()
            .ok_or_else(|| anyhow!("beacon reported ready without announcing a pid"))?;

        ctx.handles = Some(ServiceHandles {
            pid,
            config_path,
            template_path,
        });
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
