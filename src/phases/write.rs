//! Phase 5: Writing to Disk
//!
//! This is the final phase of the `eventb-to-txt` pipeline. It maps the
//! artifacts of a model group to output files and writes their rendered text.
//!
//! ## Process
//!
//! 1.  **Plan**: Every queued artifact is assigned a destination path. In
//!     [`OutputMode::Separate`] each artifact gets `<out>/<name>.txt`; in
//!     [`OutputMode::Merge`] artifacts from the same directory share
//!     `<out>/<directory name>.txt`.
//!
//! 2.  **Check**: Plans of all groups are compared before anything is
//!     written. Two groups targeting the same path fail with
//!     [`Error::OutputCollision`].
//!
//! 3.  **Render**: Artifacts sharing a destination are concatenated in plan
//!     order, separated by one blank line.
//!
//! 4.  **Write**: The output directory is created if needed and each file is
//!     written once, replacing any previous content.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{group_name, ModelGroup, OutputMode};
use crate::error::{Error, Result};
use crate::model::Artifact;
use crate::render::RenderOptions;

/// Extension of every output file
pub const OUTPUT_EXTENSION: &str = "txt";

/// Destination of every artifact of one model group
#[derive(Debug, Clone)]
pub struct WritePlan<'a> {
    /// Name of the model group, used in collision reports
    pub group: String,
    /// Artifacts in write order with their destination path
    pub entries: Vec<(&'a Artifact, PathBuf)>,
}

impl WritePlan<'_> {
    /// Distinct destination paths in first-use order
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = Vec::new();
        for (_, path) in &self.entries {
            if !paths.contains(&path.as_path()) {
                paths.push(path);
            }
        }
        paths
    }
}

/// A rendered output file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub content: String,
}

/// Assign a destination path to every queued artifact
pub fn plan<'a>(
    group: &ModelGroup,
    queue: Vec<&'a Artifact>,
    mode: OutputMode,
    output_dir: &Path,
) -> WritePlan<'a> {
    let entries = queue
        .into_iter()
        .map(|artifact| {
            let stem = match mode {
                OutputMode::Separate => artifact.name().to_string(),
                OutputMode::Merge => group_name(artifact.model_group()),
            };
            let path = output_dir.join(format!("{}.{}", stem, OUTPUT_EXTENSION));
            (artifact, path)
        })
        .collect();

    WritePlan {
        group: group.name(),
        entries,
    }
}

/// Fail if two plans write to the same destination
pub fn check_collisions(plans: &[WritePlan<'_>]) -> Result<()> {
    let mut owners: HashMap<&Path, &str> = HashMap::new();

    for plan in plans {
        for path in plan.paths() {
            if let Some(first) = owners.insert(path, &plan.group) {
                return Err(Error::OutputCollision {
                    path: path.to_path_buf(),
                    first: first.to_string(),
                    second: plan.group.clone(),
                });
            }
        }
    }

    Ok(())
}

/// Render a plan into the files it produces, in first-use order
pub fn render(plan: &WritePlan<'_>, options: &RenderOptions) -> Vec<OutputFile> {
    let mut files: Vec<OutputFile> = Vec::new();

    for (artifact, path) in &plan.entries {
        let text = artifact.render(options);
        match files.iter_mut().find(|file| &file.path == path) {
            Some(file) => {
                file.content.push('\n');
                file.content.push_str(&text);
            }
            None => files.push(OutputFile {
                path: path.clone(),
                content: text,
            }),
        }
    }

    files
}

/// Execute Phase 5: render a plan and write it to disk
///
/// Returns the written paths in first-use order.
pub fn execute(plan: &WritePlan<'_>, options: &RenderOptions) -> Result<Vec<PathBuf>> {
    let files = render(plan, options);
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }

        fs::write(&file.path, &file.content).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", file.path.display(), e),
        })?;
        debug!("Wrote {} byte(s) to {}", file.content.len(), file.path.display());

        written.push(file.path);
    }

    info!("Model '{}': wrote {} file(s)", plan.group, written.len());
    Ok(written)
}
