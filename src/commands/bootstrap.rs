//! `bosun bootstrap`: provision a host from scratch and start the stack.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::{CommandRunner, ProcessTable, ProgressReporter, ServiceLauncher};
use crate::application::services::pipeline::{
    Mode, PipelineContext, PipelineReport, run_pipeline,
};
use crate::application::services::plan::provisioning_plan;
use crate::commands::ProvisionArgs;
use crate::infra::command_runner::{ShellRunner, Target};
use crate::infra::config::resolve_config;
use crate::infra::launcher::TokioLauncher;
use crate::infra::process_table::PsProcessTable;
use crate::output::reporter::PipelineReporter;

/// Run `bosun bootstrap`.
///
/// # Errors
///
/// Returns an error when configuration cannot be resolved. Pipeline failures
/// are rendered and reported through the exit code instead.
pub async fn run(app: &AppContext, args: &ProvisionArgs) -> Result<ExitCode> {
    provision(app, args, Mode::Full).await
}

/// Shared driver for `bootstrap` and `update`: resolve configuration, wire
/// the adapters for the target host, run the filtered plan, render.
pub(crate) async fn provision(
    app: &AppContext,
    args: &ProvisionArgs,
    mode: Mode,
) -> Result<ExitCode> {
    let config = resolve_config(args.config.as_deref(), &args.overrides())?;
    if matches!(mode, Mode::Full) {
        config.ensure_local_target()?;
    }

    let target = match &config.remote {
        Some(host) => Target::Remote { host: host.clone() },
        None => Target::Local,
    };
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::new(target));
    let table: Arc<dyn ProcessTable> = Arc::new(PsProcessTable::new(&runner));
    let launcher: Arc<dyn ServiceLauncher> = Arc::new(TokioLauncher);

    let steps = provisioning_plan(&runner, &table, &launcher);
    let mut ctx = PipelineContext::new(config);

    let out = &app.output;
    let reporter = PipelineReporter::new(out);
    let report = if app.is_json() {
        run_pipeline(&steps, mode, &mut ctx, &MuteReporter).await
    } else {
        out.header(&format!("Provisioning ({})", mode.as_str()));
        run_pipeline(&steps, mode, &mut ctx, &reporter).await
    };

    if app.is_json() {
        println!("{}", render_json(&report)?);
    } else if let Some(failure) = &report.failure {
        reporter.abandon(&failure.step);
        out.error(&failure.to_string());
        out.error(&format!("cause: {:#}", failure.source));
    } else {
        out.success(&format!("{} step(s) completed", report.completed.len()));
        if let Some(handles) = &ctx.handles {
            out.kv("beacon pid", &handles.pid.to_string());
            out.kv("config", &handles.config_path.display().to_string());
        }
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn render_json(report: &PipelineReport) -> Result<String> {
    let failure = report.failure.as_ref().map(|abort| {
        serde_json::json!({
            "step": abort.step,
            "message": format!("{:#}", abort.source),
        })
    });
    let obj = serde_json::json!({
        "mode": report.mode.as_str(),
        "completed": report.completed,
        "failure": failure,
        "started_at": report.started_at.to_rfc3339(),
        "finished_at": report.finished_at.to_rfc3339(),
    });
    Ok(serde_json::to_string_pretty(&obj)?)
}

/// Keeps stdout clean for the JSON report.
struct MuteReporter;

impl ProgressReporter for MuteReporter {
    fn step(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
