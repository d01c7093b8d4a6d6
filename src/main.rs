//! Bosun CLI - host provisioning for the Hyperspace orchestration stack

use std::process::ExitCode;

use clap::Parser;

use bosun_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
