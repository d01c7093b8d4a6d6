//! Process-table adapter over `ps`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{CommandRunner, ProcessTable};
use crate::domain::{DiscoveryError, ProcessEntry};

/// Wide output, no headers: one `pid args` row per process.
const LISTING_COMMAND: &str = "ps -wweo pid=,args=";

pub struct PsProcessTable {
    runner: Arc<dyn CommandRunner>,
}

impl PsProcessTable {
    #[must_use]
    pub fn new(runner: &Arc<dyn CommandRunner>) -> Self {
        Self {
            runner: Arc::clone(runner),
        }
    }
}

#[async_trait]
impl ProcessTable for PsProcessTable {
    async fn snapshot(&self) -> Result<Vec<ProcessEntry>, DiscoveryError> {
        let output = self.runner.run(LISTING_COMMAND).await?;
        // The listing includes its own `ps` invocation (and the shell that
        // wraps it); drop those rows so a query never matches itself.
        Ok(parse_process_listing(&output.stdout)
            .into_iter()
            .filter(|entry| !entry.command.contains("pid=,args="))
            .collect())
    }
}

/// Parse `ps` rows into entries. Lines that do not open with a numeric pid
/// (headers, truncation noise) are skipped rather than treated as errors.
fn parse_process_listing(listing: &str) -> Vec<ProcessEntry> {
    listing
        .lines()
        .filter_map(|line| {
            let (pid, command) = line.trim_start().split_once(char::is_whitespace)?;
            let pid = pid.parse::<u32>().ok()?;
            Some(ProcessEntry {
                pid,
                command: command.trim().to_string(),
            })
        })
        .collect()
}

// ── Unit tests ───────────────────────────────────────────────────────────────
