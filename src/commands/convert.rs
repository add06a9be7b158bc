//! Convert command implementation
//!
//! Runs the whole conversion pipeline:
//! 1. Load the optional configuration file and apply command-line overrides
//! 2. Unpack the input if it is a zip archive
//! 3. Discover, extract and (when merging) resolve every model
//! 4. Write the text files

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context as _, Result};
use clap::Args;
use log::debug;

use eventb_to_txt::config::{self, Overrides};
use eventb_to_txt::output::OutputConfig;
use eventb_to_txt::phases::orchestrator::{self, ConvertOptions};
use eventb_to_txt::phases::OutputMode;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Model directory or zip archive of one
    #[arg(value_name = "INPUT", default_value = ".")]
    pub input: PathBuf,

    /// Output directory (defaults to the current directory)
    #[arg(short, long, value_name = "DIR", env = "EVENTB_TO_TXT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Write one file per model directory, dependencies first
    #[arg(short, long)]
    pub merge: bool,

    /// Indentation width in spaces (positive and even)
    #[arg(long, value_name = "N")]
    pub tab_size: Option<usize>,

    /// Configuration file (defaults to .eventb-to-txt.yaml when present)
    #[arg(long, value_name = "FILE", env = "EVENTB_TO_TXT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the convert command
pub fn execute(args: ConvertArgs, output: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();
    let working_dir = env::current_dir().context("Failed to determine the current directory")?;

    let file_config = config::load(args.config.as_deref(), &working_dir)?;
    let settings = file_config.resolve(
        Overrides {
            merge: args.merge,
            tab_size: args.tab_size,
            output: args.output,
        },
        &working_dir,
    )?;
    debug!("Effective settings: {:?}", settings);

    let options = ConvertOptions {
        output_dir: settings.output,
        mode: if settings.merge {
            OutputMode::Merge
        } else {
            OutputMode::Separate
        },
        render: settings.render,
    };

    match orchestrator::convert(&args.input, &options) {
        Ok(report) => {
            if !args.quiet {
                println!(
                    "{}",
                    output.conversion_summary(&report, start_time.elapsed())
                );
            }
            Ok(())
        }
        Err(e) => {
            if !args.quiet {
                eprintln!("{}", output.failure("Conversion"));
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: PathBuf, output: PathBuf) -> ConvertArgs {
        ConvertArgs {
            input,
            output: Some(output),
            merge: false,
            tab_size: None,
            config: None,
            quiet: true,
        }
    }

    #[test]
    fn test_execute_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let result = execute(
            args(temp_dir.path().join("missing"), temp_dir.path().to_path_buf()),
            &OutputConfig::plain(),
        );

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_execute_converts_directory() {
        let input = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::write(
            input.path().join("C0.buc"),
            "<org.eventb.core.contextFile/>",
        )
        .unwrap();

        execute(
            args(input.path().to_path_buf(), out.path().to_path_buf()),
            &OutputConfig::plain(),
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(out.path().join("C0.txt")).unwrap(),
            "context C0\n\nend\n"
        );
    }

    #[test]
    fn test_execute_rejects_invalid_tab_size() {
        let input = TempDir::new().unwrap();
        let mut args = args(input.path().to_path_buf(), input.path().to_path_buf());
        args.tab_size = Some(5);

        let err = execute(args, &OutputConfig::plain()).unwrap_err();
        assert!(err.to_string().contains("tab size"));
    }
}
