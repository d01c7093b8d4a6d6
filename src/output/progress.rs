//! Step spinners for interactive runs, built on indicatif.

#![allow(clippy::expect_used)] // Template literals cannot fail to parse.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Start a spinner line for one pipeline step. Indented two columns so it
/// lines up with the glyph-prefixed rows around it.
pub fn start(msg: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(TICK_FRAMES)
            .template("  {spinner:.cyan} {msg}")
            .expect("spinner template"),
    );
    bar.set_message(msg.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Freeze the spinner into a `✓` line.
pub fn complete(bar: &ProgressBar, msg: &str) {
    freeze(bar, "✓", msg);
}

/// Freeze the spinner into a `✗` line.
pub fn fail(bar: &ProgressBar, msg: &str) {
    freeze(bar, "✗", msg);
}

fn freeze(bar: &ProgressBar, glyph: &str, msg: &str) {
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("  {prefix} {msg}")
            .expect("spinner template"),
    );
    bar.set_prefix(glyph.to_string());
    bar.finish_with_message(msg.to_string());
}
