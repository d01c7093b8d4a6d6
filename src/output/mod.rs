//! Terminal output: glyph-prefixed lines, section headers, aligned key/value
//! rows. All printing goes through [`OutputContext`] so `--quiet`,
//! `--no-color`, and JSON mode stay consistent across commands.

pub mod json;
pub mod progress;
pub mod reporter;
pub mod styles;

use owo_colors::{OwoColorize as _, Style};
pub use styles::Styles;

/// Carries the stylesheet and terminal state for one CLI invocation.
pub struct OutputContext {
    /// Active stylesheet, no-op unless colors are wanted.
    pub styles: Styles,
    /// True when stdout is an interactive terminal.
    pub is_tty: bool,
    /// Drop everything except errors.
    pub quiet: bool,
}

impl OutputContext {
    /// Build the context from the global flags. Colors require a TTY, no
    /// `--no-color`, and an unset `NO_COLOR` environment variable.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let is_tty = console::Term::stdout().is_term();
        let want_color = is_tty && !no_color && std::env::var("NO_COLOR").is_err();
        Self {
            styles: if want_color {
                Styles::colored()
            } else {
                Styles::default()
            },
            is_tty,
            quiet,
        }
    }

    /// Whether step spinners should be drawn. They need a TTY and are
    /// pointless under `--quiet`.
    #[must_use]
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.is_tty
    }

    fn glyph_line(&self, glyph: &str, style: Style, msg: &str) {
        if self.quiet {
            return;
        }
        println!("  {} {msg}", glyph.style(style));
    }

    /// Section title line. Suppressed when `quiet`.
    pub fn header(&self, msg: &str) {
        if self.quiet {
            return;
        }
        let title = msg.style(self.styles.header);
        println!("  {title}");
    }

    /// `✓`-prefixed confirmation. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        self.glyph_line("✓", self.styles.success, msg);
    }

    /// `ℹ`-prefixed note. Suppressed when `quiet`.
    pub fn info(&self, msg: &str) {
        self.glyph_line("ℹ", self.styles.info, msg);
    }

    /// `⚠`-prefixed warning. Suppressed when `quiet`.
    pub fn warn(&self, msg: &str) {
        self.glyph_line("⚠", self.styles.warning, msg);
    }

    /// `✗`-prefixed error on stderr. Never suppressed, not even by `quiet`.
    pub fn error(&self, msg: &str) {
        let glyph = "✗".style(self.styles.error);
        eprintln!("  {glyph} {msg}");
    }

    /// Key/value row with the key dimmed and padded into a column. The key
    /// is padded before styling so ANSI escapes do not break the alignment.
    pub fn kv(&self, key: &str, value: &str) {
        if self.quiet {
            return;
        }
        let padded = format!("{key:<10}");
        println!("  {}  {value}", padded.style(self.styles.dim));
    }
}
