//! Task-worker lifecycle: install with plugins, stop, and state cleanup.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{BEACON_SIGNATURE, CommandRunner, ProcessTable};
use crate::application::services::discovery::find_process;
use crate::application::services::pipeline::{PipelineContext, StepAction};
use crate::application::services::steps::HostShell;
use crate::domain::{ServiceHandles, StartupError};

/// Install order is part of the worker's task-resolution contract. Each
/// entry pairs the registration identity the worker resolves tasks under
/// with the repository its archive is fetched from.
const WORKER_PLUGINS: [(&str, &str); 3] = [
    (
        "bosun.artifacts.plugin.router_configurer",
        "bosun-plugin-router-configurer",
    ),
    (
        "bosun.artifacts.plugin.agent_installer",
        "bosun-plugin-agent-installer",
    ),
    (
        "bosun.artifacts.plugin.host_provisioner",
        "bosun-plugin-host-provisioner",
    ),
];

/// Installs the deckhand worker and registers its plugins against a live
/// event router. Runs in both modes: bootstrap reaches it with handles
/// already in the pipeline context, update rediscovers the router first.
pub struct InstallTaskWorker {
    runner: Arc<dyn CommandRunner>,
    table: Arc<dyn ProcessTable>,
}

impl InstallTaskWorker {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>, table: &Arc<dyn ProcessTable>) -> Self {
        Self {
            runner: Arc::clone(runner),
            table: Arc::clone(table),
        }
    }

    async fn router_handles(&self, ctx: &mut PipelineContext) -> anyhow::Result<ServiceHandles> {
        if let Some(handles) = ctx.handles.clone() {
            return Ok(handles);
        }
        let pid = find_process(self.table.as_ref(), BEACON_SIGNATURE)
            .await?
            .ok_or(StartupError::NotRunning)?;
        let handles = ServiceHandles {
            pid,
            config_path: ctx.config.beacon_config_path(),
            template_path: ctx.config.beacon_template_path(),
        };
        ctx.handles = Some(handles.clone());
        Ok(handles)
    }
}

#[async_trait]
impl StepAction for InstallTaskWorker {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        let handles = self.router_handles(ctx).await?;
        let config = ctx.config.clone();
        let shell = HostShell::new(self.runner.as_ref(), &config.working_dir);
        let wd = config.working_dir.display().to_string();

        shell
            .pip(&config.plugin_archive_url("bosun-plugin-agent-installer"))
            .await?;

        let user = self.runner.run("whoami").await?.stdout.trim().to_string();
        let mut manifest = serde_json::to_vec_pretty(&worker_manifest(&user, &handles))?;
        manifest.push(b'\n');

        self.runner.run(&format!("mkdir -p {wd}/deckhand")).await?;
        self.runner
            .run_with_stdin(&format!("tee {wd}/deckhand/worker.json"), &manifest)
            .await?;
        self.runner
            .sudo(&format!("deckhand-ctl install --config {wd}/deckhand/worker.json"))
            .await?;

        shell
            .pip(&config.plugin_archive_url("bosun-plugin-kit"))
            .await?;
        for (name, repo) in WORKER_PLUGINS {
            self.runner
                .run(&format!(
                    "bosun-plugin-kit install {name} {}",
                    config.plugin_archive_url(repo)
                ))
                .await?;
        }

        self.runner
            .sudo(&format!("deckhand-ctl start --config {wd}/deckhand/worker.json"))
            .await?;
        // The kit only exists to register plugins; leaving it installed would
        // shadow the worker's own task modules.
        self.runner.sudo("pip uninstall -y bosun-plugin-kit").await?;
        Ok(())
    }
}

fn worker_manifest(user: &str, handles: &ServiceHandles) -> serde_json::Value {
    serde_json::json!({
        "user": user,
        "management_ip": "127.0.0.1",
        "broker": "amqp://",
        "env": {
            "HOME": format!("/home/{user}"),
            "MACHINE_PROVIDER": "multipass",
            "BEACON_PID": handles.pid,
            "BEACON_CONFIG": handles.config_path.display().to_string(),
            "BEACON_CONFIG_TEMPLATE": handles.template_path.display().to_string(),
        }
    })
}

/// Stops the running worker service ahead of an update.
pub struct StopWorker {
    runner: Arc<dyn CommandRunner>,
}

impl StopWorker {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for StopWorker {
    async fn execute(&self, _ctx: &mut PipelineContext) -> anyhow::Result<()> {
        self.runner.sudo("service deckhand stop").await?;
        Ok(())
    }
}

/// Removes worker state left by a previous install so the reinstall starts
/// from a clean slate.
pub struct ClearWorkerState {
    runner: Arc<dyn CommandRunner>,
}

impl ClearWorkerState {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for ClearWorkerState {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        let wd = ctx.config.working_dir.display().to_string();
        self.runner.run(&format!("rm -rf {wd}/deckhand")).await?;
        self.runner
            .run(&format!("rm -rf {wd}/deckhand_common-0.1.0.egg-info"))
            .await?;
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
