//! # Terminal Output
//!
//! Status lines printed by the command-line tool. Whether they carry color
//! and emoji depends on the `--color` flag and the environment:
//!
//! - `--color=always|never` wins over everything else.
//! - In `auto` mode, `NO_COLOR` (any value) and `CLICOLOR=0` switch color off,
//!   `CLICOLOR_FORCE` switches it on, `TERM=dumb` switches it off, and
//!   otherwise `console` decides from the terminal.
//!
//! Converted text files never contain color codes; only messages on the
//! terminal do.

use std::env;
use std::path::Path;
use std::time::Duration;

use console::style;

use crate::phases::orchestrator::ConversionReport;

/// When to use color and emoji in terminal messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

/// Output configuration for terminal messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    pub fn new(choice: ColorChoice) -> Self {
        let use_color = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => detect_color_support(),
        };
        Self { use_color }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Pick the emoji or its plain text stand-in
    pub fn emoji<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    /// Summary printed after a successful conversion
    pub fn conversion_summary(&self, report: &ConversionReport, elapsed: Duration) -> String {
        let mut lines = vec![format!(
            "{} Converted {} component(s) from {} model(s) in {:.2}s",
            self.emoji("✅", "[OK]"),
            report.artifact_count(),
            report.groups.len(),
            elapsed.as_secs_f64()
        )];

        for file in report.files() {
            lines.push(format!("   {}", self.path(file)));
        }
        lines.join("\n")
    }

    /// Headline printed to stderr before an error
    pub fn failure(&self, what: &str) -> String {
        let headline = format!("{} {} failed", self.emoji("❌", "[ERROR]"), what);
        if self.use_color {
            style(headline).force_styling(true).red().bold().to_string()
        } else {
            headline
        }
    }

    /// Section heading, bold when color is on
    pub fn heading(&self, text: &str) -> String {
        if self.use_color {
            style(text).force_styling(true).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn path(&self, path: &Path) -> String {
        if self.use_color {
            style(path.display()).force_styling(true).cyan().to_string()
        } else {
            path.display().to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}

fn detect_color_support() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
        return false;
    }
    if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }
    if env::var("TERM").is_ok_and(|v| v == "dumb") {
        return false;
    }

    console::Term::stdout().features().colors_supported()
}
