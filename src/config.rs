//! # Configuration File
//!
//! An optional `.eventb-to-txt.yaml` file supplies defaults for the `convert`
//! command, so a project can pin its output layout:
//!
//! ```yaml
//! merge: true
//! tab_size: 2
//! output: docs/models
//! ```
//!
//! Every key is optional and unknown keys are rejected. Command-line flags
//! always win over values from the file. A relative `output` is taken
//! relative to the directory the command runs in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::render::RenderOptions;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".eventb-to-txt.yaml";

/// Defaults read from a configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Write one file per model directory instead of one per component
    pub merge: Option<bool>,
    /// Indentation width in spaces
    pub tab_size: Option<usize>,
    /// Output directory
    pub output: Option<PathBuf>,
}

/// Parse a YAML configuration document
///
/// An empty document yields the default configuration.
pub fn parse(yaml_content: &str) -> Result<FileConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(FileConfig::default());
    }

    let config: FileConfig = serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some("supported keys are 'merge', 'tab_size' and 'output'".to_string()),
    })?;

    if let Some(tab_size) = config.tab_size {
        RenderOptions::with_tab_size(tab_size)?;
    }
    Ok(config)
}

/// Read and parse a configuration file
pub fn from_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|e| Error::ConfigParse {
        message: format!("cannot read {}: {}", path.display(), e),
        hint: None,
    })?;
    parse(&content)
}

/// Load the configuration for a run
///
/// An explicit path must exist. Without one, [`CONFIG_FILE_NAME`] in
/// `working_dir` is used when present, otherwise the defaults.
pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<FileConfig> {
    match explicit {
        Some(path) => from_file(path),
        None => {
            let path = working_dir.join(CONFIG_FILE_NAME);
            if path.is_file() {
                from_file(&path)
            } else {
                Ok(FileConfig::default())
            }
        }
    }
}

/// Effective settings after applying command-line overrides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub merge: bool,
    pub render: RenderOptions,
    pub output: PathBuf,
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub merge: bool,
    pub tab_size: Option<usize>,
    pub output: Option<PathBuf>,
}

impl FileConfig {
    /// Combine with command-line overrides
    ///
    /// `--merge` can only switch merging on; `merge: true` in the file is
    /// kept when the flag is absent.
    pub fn resolve(&self, overrides: Overrides, working_dir: &Path) -> Result<Settings> {
        let merge = overrides.merge || self.merge.unwrap_or(false);

        let render = match overrides.tab_size.or(self.tab_size) {
            Some(tab_size) => RenderOptions::with_tab_size(tab_size)?,
            None => RenderOptions::default(),
        };

        let output = overrides
            .output
            .or_else(|| self.output.clone())
            .map(|path| working_dir.join(path))
            .unwrap_or_else(|| working_dir.to_path_buf());

        Ok(Settings {
            merge,
            render,
            output,
        })
    }
}
