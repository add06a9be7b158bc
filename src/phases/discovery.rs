//! Phase 1: Discovery
//!
//! This is the first phase of the `eventb-to-txt` pipeline. It walks the input
//! directory and collects every Rodin context (`.buc`) and machine (`.bum`)
//! file.
//!
//! ## Process
//!
//! 1.  **Walk**: The input tree is traversed recursively with entries sorted by
//!     file name, so discovery order never depends on the host filesystem.
//!
//! 2.  **Group**: Files are grouped by their containing directory. Each Rodin
//!     project lives in its own directory, and references between components
//!     are resolved by name within that directory only.
//!
//! 3.  **Order**: Inside a group, contexts come before machines and each kind
//!     is sorted by file name. This is the registration order used by later
//!     phases.
//!
//! Paths are made absolute first, so every group directory has a base name
//! that can name a merged output file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use super::ModelGroup;
use crate::error::{Error, Result};
use crate::model::ArtifactKind;

/// Execute Phase 1: find all model groups below `input`
///
/// Fails with [`Error::NoModels`] when the tree holds no model files.
pub fn execute(input: &Path) -> Result<Vec<ModelGroup>> {
    let root = input.canonicalize().map_err(|e| Error::InvalidInput {
        path: input.to_path_buf(),
        message: format!("path does not exist or is not accessible: {}", e),
    })?;

    if !root.is_dir() {
        return Err(Error::InvalidInput {
            path: input.to_path_buf(),
            message: "expected a model directory".to_string(),
        });
    }

    let groups = group_files(find_model_files(&root));
    if groups.is_empty() {
        return Err(Error::NoModels {
            path: input.to_path_buf(),
        });
    }

    for group in &groups {
        debug!(
            "Discovered model '{}' with {} file(s)",
            group.dir.display(),
            group.files.len()
        );
    }
    Ok(groups)
}

/// Recursively list context and machine files, sorted by path
pub fn find_model_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file()
                    && ArtifactKind::from_path(entry.path()).is_some()
                {
                    files.push(entry.into_path());
                }
            }
            Err(e) => warn!("Skipping unreadable entry below {}: {}", root.display(), e),
        }
    }

    files
}

/// Group files by containing directory; contexts first, then machines
pub fn group_files(files: Vec<PathBuf>) -> Vec<ModelGroup> {
    let mut by_dir: BTreeMap<PathBuf, (Vec<PathBuf>, Vec<PathBuf>)> = BTreeMap::new();

    for file in files {
        let Some(kind) = ArtifactKind::from_path(&file) else {
            continue;
        };
        let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();
        let (contexts, machines) = by_dir.entry(dir).or_default();
        match kind {
            ArtifactKind::Context => contexts.push(file),
            ArtifactKind::Machine => machines.push(file),
        }
    }

    by_dir
        .into_iter()
        .map(|(dir, (mut contexts, mut machines))| {
            contexts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            machines.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
            contexts.append(&mut machines);
            ModelGroup::new(dir, contexts)
        })
        .collect()
}
