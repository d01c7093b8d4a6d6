//! The provisioning roster: every step, in execution order, tagged with the
//! mode(s) it serves. `run_pipeline` filters this single list per run.

use std::sync::Arc;

use crate::application::ports::{CommandRunner, ProcessTable, ServiceLauncher};
use crate::application::services::pipeline::{Step, StepMode};
use crate::application::services::steps::artifact::InstallOrchestrator;
use crate::application::services::steps::beacon::InstallEventRouter;
use crate::application::services::steps::deckhand::{
    ClearWorkerState, InstallTaskWorker, StopWorker,
};
use crate::application::services::steps::system::{
    InstallBasePackages, InstallContainerRuntime, InstallJavaRuntime, InstallKernelImage,
    InstallMachineDriver, InstallMessageBroker, PatchMachineDriver,
};

/// Build the full tagged roster. Order is the contract: a completed-steps
/// prefix from one run must mean the same thing in the next.
#[must_use]
pub fn provisioning_plan(
    runner: &Arc<dyn CommandRunner>,
    table: &Arc<dyn ProcessTable>,
    launcher: &Arc<dyn ServiceLauncher>,
) -> Vec<Step> {
    vec![
        Step::new(
            "base-packages",
            StepMode::Full,
            InstallBasePackages::new(runner),
        ),
        Step::new(
            "message-broker",
            StepMode::Full,
            InstallMessageBroker::new(runner),
        ),
        Step::new(
            "container-runtime",
            StepMode::Full,
            InstallContainerRuntime::new(runner),
        ),
        Step::new(
            "kernel-image",
            StepMode::Full,
            InstallKernelImage::new(runner),
        ),
        Step::new(
            "event-router",
            StepMode::Full,
            InstallEventRouter::new(runner, table, launcher),
        ),
        Step::new(
            "machine-driver",
            StepMode::Full,
            InstallMachineDriver::new(runner),
        ),
        Step::new(
            "java-runtime",
            StepMode::Full,
            InstallJavaRuntime::new(runner),
        ),
        Step::new(
            "orchestrator",
            StepMode::Full,
            InstallOrchestrator::new(runner),
        ),
        Step::new(
            "driver-patch",
            StepMode::Update,
            PatchMachineDriver::new(runner),
        ),
        Step::new("stop-worker", StepMode::Update, StopWorker::new(runner)),
        Step::new(
            "clear-worker-state",
            StepMode::Update,
            ClearWorkerState::new(runner),
        ),
        Step::new(
            "task-worker",
            StepMode::Both,
            InstallTaskWorker::new(runner, table),
        ),
    ]
}

// ── Unit tests ───────────────────────────────────────────────────────────────
