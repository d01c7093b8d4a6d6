//! Orchestrator artifact installation: release jar, launcher script, alias.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::CommandRunner;
use crate::application::services::pipeline::{PipelineContext, StepAction};
use crate::application::services::steps::HostShell;

const RELEASE_REPOSITORY: &str = "https://releases.bosun.dev/orchestrator";

pub struct InstallOrchestrator {
    runner: Arc<dyn CommandRunner>,
}

impl InstallOrchestrator {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl StepAction for InstallOrchestrator {
    async fn execute(&self, ctx: &mut PipelineContext) -> anyhow::Result<()> {
        let config = &ctx.config;
        let shell = HostShell::new(self.runner.as_ref(), &config.working_dir);
        let wd = config.working_dir.display().to_string();
        let jar = config.orchestrator_jar_name();

        shell
            .wget(&format!("{RELEASE_REPOSITORY}/{jar}.jar"))
            .await?;
        self.runner
            .run(&format!("ln -sfn {wd}/{jar}.jar {wd}/orchestrator.jar"))
            .await?;
        self.runner
            .run(&format!("cp {}/log4j.properties {wd}/", config.asset_dir.display()))
            .await?;

        self.runner
            .run_with_stdin(
                &format!("tee {wd}/orchestrator.sh"),
                launcher_script(&wd).as_bytes(),
            )
            .await?;
        self.runner
            .run(&format!("chmod +x {wd}/orchestrator.sh"))
            .await?;
        self.runner
            .run_with_stdin(
                "tee $HOME/.bash_aliases",
                format!("alias orchestrator='{wd}/orchestrator.sh'\n").as_bytes(),
            )
            .await?;
        Ok(())
    }
}

/// Shell entry point installed next to the jar. `undeploy` tears down every
/// machine a deployment created; anything else is forwarded to the JVM.
fn launcher_script(working_dir: &str) -> String {
    format!(
        r#"#!/bin/sh
if [ $# -gt 0 ] && [ "$1" = "undeploy" ]
then
        echo "Undeploying..."
        for name in $(multipass list --format csv | tail -n +2 | cut -d, -f1)
        do
                multipass delete --purge "$name" > /dev/null 2>&1
        done
        rm -rf /tmp/bosun-machines/*
        echo "done!"
else
        ARGS="$@"
        java -Xms512m -Xmx1024m -Dlog4j.configuration=file://{working_dir}/log4j.properties -jar {working_dir}/orchestrator.jar $ARGS
fi
"#
    )
}

// ── Unit tests ───────────────────────────────────────────────────────────────
