//! End-to-end pipeline runs over the real provisioning roster with mocked
//! ports: command ordering across steps, fail-fast prefixes, and the two
//! paths to a live event router.

#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::sync::Arc;

use bosun_cli::application::services::pipeline::{Mode, PipelineContext, Step, run_pipeline};
use bosun_cli::application::services::plan::provisioning_plan;
use bosun_cli::application::{CommandRunner, ProcessTable, ServiceLauncher};
use bosun_cli::domain::{BootstrapConfig, Manifest, Overrides};

use crate::mocks::{CommandRecorder, EventLogReporter, FixedTable, LineLauncher};

const FULL_STEPS: [&str; 9] = [
    "base-packages",
    "message-broker",
    "container-runtime",
    "kernel-image",
    "event-router",
    "machine-driver",
    "java-runtime",
    "orchestrator",
    "task-worker",
];

fn ctx() -> PipelineContext {
    let config = BootstrapConfig::resolve(
        &Manifest::default(),
        None,
        Some(PathBuf::from("/home/crew")),
        &Overrides::default(),
    )
    .expect("config");
    PipelineContext::new(config)
}

fn wire(
    recorder: CommandRecorder,
    table: FixedTable,
    launcher: LineLauncher,
) -> (Arc<CommandRecorder>, Arc<LineLauncher>, Vec<Step>) {
    let recorder = Arc::new(recorder);
    let launcher = Arc::new(launcher);
    let runner: Arc<dyn CommandRunner> = recorder.clone();
    let table: Arc<dyn ProcessTable> = Arc::new(table);
    let launcher_port: Arc<dyn ServiceLauncher> = launcher.clone();
    let steps = provisioning_plan(&runner, &table, &launcher_port);
    (recorder, launcher, steps)
}

#[tokio::test]
async fn full_bootstrap_completes_every_step_in_order() {
    let (recorder, launcher, steps) = wire(
        CommandRecorder::new().respond("whoami", "crew\n"),
        FixedTable::empty(),
        LineLauncher::ready(4821),
    );
    let reporter = EventLogReporter::new();
    let mut ctx = ctx();

    let report = run_pipeline(&steps, Mode::Full, &mut ctx, &reporter).await;

    assert!(report.is_success());
    assert_eq!(report.completed, FULL_STEPS);
    assert_eq!(launcher.launches(), 1);
    assert_eq!(ctx.handles.expect("handles").pid, 4821);

    // Steps touch the host in roster order.
    let broker = recorder
        .position("install -q -y rabbitmq-server")
        .expect("broker installed");
    let beacon = recorder.position("dpkg -i").expect("beacon installed");
    let worker = recorder
        .position("deckhand-ctl install")
        .expect("worker installed");
    assert!(broker < beacon && beacon < worker);
    assert_eq!(
        recorder.position("pip uninstall -y bosun-plugin-kit"),
        Some(recorder.commands().len() - 1)
    );
    // The driver version check answered, so no install was attempted.
    assert!(recorder.ran("multipass version"));
    assert!(!recorder.ran("snap install multipass"));

    let expected: Vec<String> = FULL_STEPS
        .iter()
        .flat_map(|name| [format!("step:{name}"), format!("success:{name}")])
        .collect();
    assert_eq!(reporter.events(), expected);
}

#[tokio::test]
async fn broker_failure_stops_the_run_after_base_packages() {
    let (recorder, launcher, steps) = wire(
        CommandRecorder::new().fail_on("erlang-nox"),
        FixedTable::empty(),
        LineLauncher::ready(4821),
    );
    let reporter = EventLogReporter::new();
    let mut ctx = ctx();

    let report = run_pipeline(&steps, Mode::Full, &mut ctx, &reporter).await;

    assert_eq!(report.completed, ["base-packages"]);
    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.step, "message-broker");
    assert_eq!(failure.completed, ["base-packages"]);
    assert!(failure.source.to_string().contains("erlang-nox"));

    // Nothing past the failing step touched the host.
    assert!(!recorder.ran("lxc-docker"));
    assert!(!recorder.ran("dpkg -i"));
    assert_eq!(launcher.launches(), 0);
    assert!(ctx.handles.is_none());
    assert_eq!(
        reporter.events().last().map(String::as_str),
        Some("step:message-broker")
    );
}

#[tokio::test]
async fn update_reuses_the_running_beacon_without_launching() {
    let (recorder, launcher, steps) = wire(
        CommandRecorder::new().respond("whoami", "crew\n"),
        FixedTable::with_beacon(9314),
        LineLauncher::new(&["never read"]),
    );
    let reporter = EventLogReporter::new();
    let mut ctx = ctx();

    let report = run_pipeline(&steps, Mode::Update, &mut ctx, &reporter).await;

    assert!(report.is_success());
    assert_eq!(
        report.completed,
        ["driver-patch", "stop-worker", "clear-worker-state", "task-worker"]
    );
    assert_eq!(launcher.launches(), 0);

    // Old worker is stopped and wiped before the reinstall.
    let patch = recorder
        .position("rm -f /usr/local/lib/deckhand")
        .expect("shim removed");
    let stop = recorder
        .position("service deckhand stop")
        .expect("worker stopped");
    let wipe = recorder
        .position("rm -rf /home/crew/bosun-work/deckhand")
        .expect("state cleared");
    let install = recorder
        .position("deckhand-ctl install")
        .expect("worker installed");
    assert!(patch < stop && stop < wipe && wipe < install);

    // The rediscovered pid flows into the worker manifest.
    let manifest = recorder.stdin_for("worker.json").expect("manifest written");
    let manifest: serde_json::Value = serde_json::from_slice(&manifest).expect("valid json");
    assert_eq!(manifest["env"]["BEACON_PID"], 9314);
}

#[tokio::test]
async fn update_without_a_beacon_aborts_at_the_worker_step() {
    let (recorder, launcher, steps) = wire(
        CommandRecorder::new(),
        FixedTable::empty(),
        LineLauncher::new(&["never read"]),
    );
    let reporter = EventLogReporter::new();
    let mut ctx = ctx();

    let report = run_pipeline(&steps, Mode::Update, &mut ctx, &reporter).await;

    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.step, "task-worker");
    assert_eq!(
        report.completed,
        ["driver-patch", "stop-worker", "clear-worker-state"]
    );
    assert!(failure.source.to_string().contains("not running"));
    assert!(!recorder.ran("deckhand-ctl install"));
    assert_eq!(launcher.launches(), 0);
}
