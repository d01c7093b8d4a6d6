//! JSON rendering for machine consumers.
//!
//! Under `--json` every command keeps stdout parseable: reports and errors
//! are serialized objects, never loose text.

use anyhow::{Context, Result};
use serde::Serialize;

/// Error object printed on stdout when a `--json` command fails.
#[derive(Serialize)]
struct ErrorBody<'a> {
    error: bool,
    message: &'a str,
    code: &'a str,
}

/// Render the error object, pretty-printed, with `error` fixed to `true`
/// plus the human-readable `message` and a stable `code` for scripts to
/// match on.
///
/// # Errors
///
/// Returns an error if serialization fails, which cannot happen for this
/// shape (no floats, no non-string keys).
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let body = ErrorBody {
        error: true,
        message,
        code,
    };
    serde_json::to_string_pretty(&body).context("JSON serialization failed")
}
