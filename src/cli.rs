//! Command-line surface: global flags, subcommands, dispatch.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::AppContext;
use crate::commands;
use crate::output::json;

/// Host provisioning for the Hyperspace orchestration stack
#[derive(Parser)]
#[command(
    name = "bosun",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Print errors only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable ANSI colors (the NO_COLOR variable works too)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Provision a host from scratch and start the full stack
    Bootstrap(commands::ProvisionArgs),

    /// Refresh the machine driver and task worker on a provisioned host
    Update(commands::ProvisionArgs),

    /// Show whether the event router is running
    Status(commands::ProvisionArgs),

    /// Print the bosun version
    Version,
}

impl Cli {
    /// Dispatch the parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails before producing a report.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            command,
        } = self;
        let app = AppContext::new(json, no_color, quiet);
        let result = match command {
            Command::Bootstrap(args) => commands::bootstrap::run(&app, &args).await,
            Command::Update(args) => commands::update::run(&app, &args).await,
            Command::Status(args) => commands::status::run(&app, &args).await,
            Command::Version => {
                commands::version::run(json);
                Ok(ExitCode::SUCCESS)
            }
        };
        match result {
            // JSON consumers get an error object on stdout, not loose text.
            Err(err) if json => {
                println!("{}", json::format_error(&format!("{err:#}"), "command_failed")?);
                Ok(ExitCode::FAILURE)
            }
            other => other,
        }
    }
}
