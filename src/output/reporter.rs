//! Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` so application services can emit progress events
//! without depending on any presentation type directly. On a TTY each step
//! gets a spinner; otherwise plain prefixed lines.

use std::cell::RefCell;

use indicatif::ProgressBar;
use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::{OutputContext, progress};

pub struct PipelineReporter<'a> {
    ctx: &'a OutputContext,
    active: RefCell<Option<ProgressBar>>,
}

impl<'a> PipelineReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            active: RefCell::new(None),
        }
    }

    /// Close a still-running spinner line after a step failure. No-op when
    /// no spinner is live (quiet mode, non-TTY, or nothing started).
    pub fn abandon(&self, message: &str) {
        if let Some(bar) = self.active.borrow_mut().take() {
            progress::fail(&bar, message);
        }
    }
}

impl ProgressReporter for PipelineReporter<'_> {
    fn step(&self, message: &str) {
        if self.ctx.show_progress() {
            *self.active.borrow_mut() = Some(progress::start(message));
        } else if !self.ctx.quiet {
            println!("  {} {message}", "→".style(self.ctx.styles.info));
        }
    }

    fn success(&self, message: &str) {
        if let Some(bar) = self.active.borrow_mut().take() {
            progress::complete(&bar, message);
        } else if !self.ctx.quiet {
            println!("  {} {message}", "✓".style(self.ctx.styles.success));
        }
    }

    fn warn(&self, message: &str) {
        self.ctx.warn(message);
    }
}
