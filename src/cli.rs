//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use eventb_to_txt::output::{ColorChoice, OutputConfig};

use crate::commands;

/// Convert Event-B models from the Rodin platform into plain text
#[derive(Parser, Debug)]
#[command(name = "eventb-to-txt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output
    #[arg(long, global = true, value_name = "WHEN", value_enum, default_value_t = ColorWhen::Auto)]
    color: ColorWhen,

    /// Set log level (RUST_LOG takes precedence)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert context and machine files into text files
    Convert(commands::convert::ConvertArgs),

    /// Show the reference hierarchy and print order of each model
    Tree(commands::tree::TreeArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorChoice {
    fn from(when: ColorWhen) -> Self {
        match when {
            ColorWhen::Auto => ColorChoice::Auto,
            ColorWhen::Always => ColorChoice::Always,
            ColorWhen::Never => ColorChoice::Never,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        self.init_logging();
        let output = OutputConfig::new(self.color.into());

        match self.command {
            Commands::Convert(args) => commands::convert::execute(args, &output),
            Commands::Tree(args) => commands::tree::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }

    fn init_logging(&self) {
        let env = env_logger::Env::default().default_filter_or(self.log_level.as_str());
        let write_style = match self.color {
            ColorWhen::Auto => env_logger::WriteStyle::Auto,
            ColorWhen::Always => env_logger::WriteStyle::Always,
            ColorWhen::Never => env_logger::WriteStyle::Never,
        };

        // Ignore a logger installed earlier in the same process
        let _ = env_logger::Builder::from_env(env)
            .write_style(write_style)
            .format_timestamp(None)
            .try_init();
    }
}
