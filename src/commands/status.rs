//! `bosun status`: report whether the event router is running.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::{BEACON_SIGNATURE, CommandRunner};
use crate::application::services::discovery::find_process;
use crate::commands::ProvisionArgs;
use crate::infra::command_runner::{ShellRunner, Target};
use crate::infra::config::resolve_config;
use crate::infra::process_table::PsProcessTable;

/// Run `bosun status`.
///
/// # Errors
///
/// Returns an error when configuration cannot be resolved or the process
/// table cannot be queried.
pub async fn run(app: &AppContext, args: &ProvisionArgs) -> Result<ExitCode> {
    let config = resolve_config(args.config.as_deref(), &args.overrides())?;

    let target = match &config.remote {
        Some(host) => Target::Remote { host: host.clone() },
        None => Target::Local,
    };
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::new(target));
    let table = PsProcessTable::new(&runner);

    let pid = find_process(&table, BEACON_SIGNATURE).await?;

    if app.is_json() {
        let obj = serde_json::json!({
            "running": pid.is_some(),
            "pid": pid,
            "config": config.beacon_config_path().display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
        return Ok(ExitCode::SUCCESS);
    }

    let out = &app.output;
    out.header("Beacon");
    match pid {
        Some(pid) => {
            out.success("event router is running");
            out.kv("pid", &pid.to_string());
            out.kv("config", &config.beacon_config_path().display().to_string());
        }
        None => {
            out.warn("event router is not running");
            out.info("Provision it: bosun bootstrap");
        }
    }
    Ok(ExitCode::SUCCESS)
}
