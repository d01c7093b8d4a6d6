//! `bosun update`: refresh the machine driver and task worker on a
//! provisioned host. The event router keeps running throughout.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::pipeline::Mode;
use crate::commands::{ProvisionArgs, bootstrap};

/// Run `bosun update`.
///
/// # Errors
///
/// Returns an error when configuration cannot be resolved. Pipeline failures
/// are rendered and reported through the exit code instead.
pub async fn run(app: &AppContext, args: &ProvisionArgs) -> Result<ExitCode> {
    bootstrap::provision(app, args, Mode::Update).await
}
