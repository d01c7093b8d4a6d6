//! Stylesheet for terminal output, owo-colors style-struct pattern.

use owo_colors::Style;

/// Styles shared by every command's terminal output.
///
/// Defaults are no-op styles, so `--no-color`, `NO_COLOR`, and non-TTY runs
/// print plain text without any branching at the call sites.
#[derive(Default, Clone, Copy)]
pub struct Styles {
    /// Success glyphs and confirmations (green)
    pub success: Style,
    /// Warning glyphs (yellow)
    pub warning: Style,
    /// Error glyphs (red)
    pub error: Style,
    /// Informational glyphs and progress arrows (blue)
    pub info: Style,
    /// Secondary text such as key labels
    pub dim: Style,
    /// Section titles
    pub header: Style,
}

impl Styles {
    /// The full palette, for runs that want color.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            info: Style::new().blue(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
        }
    }
}
