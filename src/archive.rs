//! Model sources: a directory tree or a zip archive of one
//!
//! Rodin exports projects as zip archives. An archive input is unpacked into a
//! temporary directory that lives as long as the returned [`ModelSource`], so
//! the rest of the pipeline only ever sees directories. Entries land below a
//! directory named after the archive's file stem, so models stored at the
//! archive root are grouped as `<stem>` rather than under the temporary name.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::TempDir;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// A directory holding model files, possibly backed by an unpacked archive
#[derive(Debug)]
pub struct ModelSource {
    root: PathBuf,
    /// Removed when the source is dropped
    unpacked: Option<TempDir>,
}

impl ModelSource {
    /// Directory to discover models in
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Turn an input path into a directory of models
///
/// Directories are used as they are. Regular files must be zip archives.
pub fn prepare(input: &Path) -> Result<ModelSource> {
    if input.is_dir() {
        return Ok(ModelSource {
            root: input.to_path_buf(),
            unpacked: None,
        });
    }

    if !input.is_file() {
        return Err(Error::InvalidInput {
            path: input.to_path_buf(),
            message: "path does not exist".to_string(),
        });
    }

    let file = File::open(input)?;
    let mut archive = ZipArchive::new(file).map_err(|e| Error::InvalidInput {
        path: input.to_path_buf(),
        message: format!("expected a model directory or a zip archive ({})", e),
    })?;

    let stem = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_else(|| "model".into());
    let temp = TempDir::new()?;
    let root = temp.path().join(stem);
    archive.extract(&root)?;
    debug!(
        "Unpacked {} archive entries from {} into {}",
        archive.len(),
        input.display(),
        root.display()
    );

    Ok(ModelSource {
        root,
        unpacked: Some(temp),
    })
}
