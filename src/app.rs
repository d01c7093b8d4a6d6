//! Shared state for one CLI invocation.
//!
//! Built once from the global flags in `Cli::run()` and handed to every
//! command as `&AppContext`, so a new cross-cutting flag lands here instead
//! of in every handler signature.

use crate::output::OutputContext;

/// State every command handler receives.
pub struct AppContext {
    /// Printing surface shared by every command.
    pub output: OutputContext,
    json: bool,
}

impl AppContext {
    #[must_use]
    pub fn new(json: bool, no_color: bool, quiet: bool) -> Self {
        Self {
            output: OutputContext::new(no_color, quiet),
            json,
        }
    }

    /// Whether stdout belongs to a machine consumer.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.json
    }
}
