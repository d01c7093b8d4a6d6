//! Process discovery: read-only lookup of an already-running service.
//!
//! Makes startup idempotent: the supervisor asks here before launching, so a
//! second bootstrap run adopts the running server instead of forking a twin.

use crate::application::ports::ProcessTable;
use crate::domain::DiscoveryError;

/// Find the pid of the first process whose command line contains `signature`.
///
/// Returns `Ok(None)` when nothing matches. The two failure shapes are kept
/// distinct: a failed table query surfaces as an error, never as "not found".
///
/// # Errors
///
/// Returns an error if the process-table query itself fails.
pub async fn find_process(
    table: &(impl ProcessTable + ?Sized),
    signature: &str,
) -> Result<Option<u32>, DiscoveryError> {
    let entries = table.snapshot().await?;
    Ok(entries
        .into_iter()
        .find(|entry| entry.command.contains(signature))
        .map(|entry| entry.pid))
}

// ── Unit tests ───────────────────────────────────────────────────────────────
