//! Command implementations

pub mod bootstrap;
pub mod status;
pub mod update;
pub mod version;

use std::path::PathBuf;

use clap::Args;

use crate::domain::Overrides;

/// Configuration flags shared by the provisioning commands.
#[derive(Args)]
pub struct ProvisionArgs {
    /// Directory for downloaded artifacts and service state
    #[arg(long, value_name = "DIR")]
    pub working_dir: Option<PathBuf>,

    /// Release version of the orchestrator artifacts
    #[arg(long)]
    pub release: Option<String>,

    /// Source channel for plugin archives
    #[arg(long)]
    pub channel: Option<String>,

    /// Provision a remote host over ssh (user@host)
    #[arg(long, value_name = "HOST")]
    pub remote: Option<String>,

    /// Directory holding the shipped config templates
    #[arg(long, value_name = "DIR")]
    pub asset_dir: Option<PathBuf>,

    /// Path to a bosun.yaml manifest
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ProvisionArgs {
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            working_dir: self.working_dir.clone(),
            release: self.release.clone(),
            channel: self.channel.clone(),
            remote: self.remote.clone(),
            asset_dir: self.asset_dir.clone(),
        }
    }
}
