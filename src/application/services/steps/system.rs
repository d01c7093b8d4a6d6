//! OS-level prerequisite steps: packages, broker, container runtime, kernel,
//! Java, and the machine driver the host-provisioner plugin drives.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::CommandRunner;
use crate::application::services::pipeline::{PipelineContext, StepAction};
use crate::application::services::steps::HostShell;

/// Path of the driver shim library the host-provisioner plugin loads.
pub const DRIVER_SHIM_PATH: &str = "/usr/local/lib/deckhand/machine_driver.py";

/// Protobuf runtime for the orchestrator wire format.
pub struct InstallBasePackages {
    runner: Arc<dyn CommandRunner>,
}

impl InstallBasePackages {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for InstallBasePackages {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        let shell = HostShell::new(self.runner.as_ref(), &ctx.config.working_dir);
        shell.apt_get("install -q -y libprotobuf-dev").await?;
        Ok(())
    }
}

/// RabbitMQ with the management and tracing plugins enabled.
pub struct InstallMessageBroker {
    runner: Arc<dyn CommandRunner>,
}

impl InstallMessageBroker {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for InstallMessageBroker {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        let working_dir = ctx.config.working_dir.clone();
        let shell = HostShell::new(self.runner.as_ref(), &working_dir);

        self.runner
            .sudo("sed -i '2i deb http://www.rabbitmq.com/debian/ testing main' /etc/apt/sources.list")
            .await?;
        shell
            .wget("http://www.rabbitmq.com/rabbitmq-signing-key-public.asc")
            .await?;
        shell
            .apt_key(&format!(
                "{}/rabbitmq-signing-key-public.asc",
                working_dir.display()
            ))
            .await?;
        shell.apt_get("update").await?;
        shell.apt_get("install -q -y erlang-nox").await?;
        shell.apt_get("install -y -f").await?;
        shell.apt_get("install -q -y rabbitmq-server").await?;
        self.runner
            .sudo("rabbitmq-plugins enable rabbitmq_management")
            .await?;
        self.runner
            .sudo("rabbitmq-plugins enable rabbitmq_tracing")
            .await?;
        self.runner.sudo("service rabbitmq-server restart").await?;
        self.runner.sudo("rabbitmqctl trace_on").await?;
        Ok(())
    }
}

/// Container runtime from the LXC docker PPA.
pub struct InstallContainerRuntime {
    runner: Arc<dyn CommandRunner>,
}

impl InstallContainerRuntime {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for InstallContainerRuntime {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        let shell = HostShell::new(self.runner.as_ref(), &ctx.config.working_dir);
        shell
            .apt_get("install -q -y software-properties-common")
            .await?;
        shell.apt_get("update -qq").await?;
        shell.add_apt("-y ppa:dotcloud/lxc-docker").await?;
        shell.apt_get("update -qq").await?;
        shell.apt_get("install -q -y lxc-docker").await?;
        Ok(())
    }
}

/// Kernel image the container runtime needs.
pub struct InstallKernelImage {
    runner: Arc<dyn CommandRunner>,
}

impl InstallKernelImage {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for InstallKernelImage {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        let shell = HostShell::new(self.runner.as_ref(), &ctx.config.working_dir);
        shell.add_apt("-y ppa:ubuntu-x-swat/r-lts-backport").await?;
        shell.apt_get("update -qq").await?;
        shell
            .apt_get("install -q -y linux-image-3.8.0-19-generic")
            .await?;
        Ok(())
    }
}

/// JVM for the beacon server and the orchestrator jar.
pub struct InstallJavaRuntime {
    runner: Arc<dyn CommandRunner>,
}

impl InstallJavaRuntime {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for InstallJavaRuntime {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        let shell = HostShell::new(self.runner.as_ref(), &ctx.config.working_dir);
        shell.apt_get("install -y openjdk-11-jdk").await?;
        Ok(())
    }
}

/// VM driver for deployments; skipped when one already answers.
pub struct InstallMachineDriver {
    runner: Arc<dyn CommandRunner>,
}

impl InstallMachineDriver {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for InstallMachineDriver {
    async fn execute(&self, _ctx: &mut PipelineContext) -> anyhow::Result<()> {
        if self.runner.run("multipass version").await.is_ok() {
            return Ok(());
        }
        self.runner.sudo("snap install multipass").await?;
        Ok(())
    }
}

/// Update-mode replacement of the driver shim with the patched copy shipped
/// in the asset directory.
pub struct PatchMachineDriver {
    runner: Arc<dyn CommandRunner>,
}

impl PatchMachineDriver {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for PatchMachineDriver {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        self.runner
            .sudo(&format!("rm -f {DRIVER_SHIM_PATH}"))
            .await?;
        self.runner
            .sudo(&format!(
                "cp {}/machine_driver.py {DRIVER_SHIM_PATH}",
                ctx.config.asset_dir.display()
            ))
            .await?;
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
