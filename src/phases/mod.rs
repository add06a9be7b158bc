//! Implementation of the 5 phases of a conversion run.
//!
//! ## Overview
//!
//! A conversion run follows 5 phases:
//! 1. Discovery - Find context and machine files and group them by model directory
//! 2. Extraction - Parse every file of a group into a `Registry`
//! 3. Graph Building - Derive each artifact's dependency list from its references
//! 4. Ordering - Resolve the print queue so dependencies precede dependents
//! 5. Writing - Map queued artifacts to output files and write the rendered text
//!
//! Phases 2-4 run independently for every model group. All groups are fully
//! resolved and planned before phase 5 writes anything, so a broken model
//! never leaves partial output behind.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::model::Artifact;
use crate::registry::Registry;

// Phase modules
pub mod discovery;
pub mod extraction;
pub mod graph;
pub mod orchestrator;
pub mod ordering;
pub mod write;

// Re-export phase modules under their pipeline position
pub use discovery as phase1;
pub use extraction as phase2;
pub use graph as phase3;
pub use ordering as phase4;
pub use write as phase5;

/// The files of one model directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelGroup {
    /// Directory containing the files
    pub dir: PathBuf,
    /// Context files followed by machine files, each sorted by file name
    pub files: Vec<PathBuf>,
}

impl ModelGroup {
    pub fn new(dir: PathBuf, files: Vec<PathBuf>) -> Self {
        Self { dir, files }
    }

    /// Base name of the model directory, used for merged output files
    pub fn name(&self) -> String {
        group_name(&self.dir)
    }
}

/// Base name of a model directory, falling back to `model` for a filesystem root
pub fn group_name(dir: &std::path::Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string())
}

/// Dependency lists of every artifact in a registry
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// `(artifact name, referenced names)` in registration order
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the ordered references of an artifact
    pub fn insert(&mut self, name: String, references: Vec<String>) {
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = references,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, references));
            }
        }
    }

    /// Names the artifact depends on, in reference order
    pub fn references(&self, name: &str) -> &[String] {
        self.index
            .get(name)
            .map(|&i| self.entries[i].1.as_slice())
            .unwrap_or(&[])
    }

    /// Artifacts that no other artifact references, in registration order
    pub fn roots(&self) -> Vec<&str> {
        let referenced: std::collections::HashSet<&str> = self
            .entries
            .iter()
            .flat_map(|(_, references)| references.iter().map(String::as_str))
            .collect();

        self.entries
            .iter()
            .map(|(name, _)| name.as_str())
            .filter(|name| !referenced.contains(name))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, references)| (name.as_str(), references.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved print order: every dependency precedes its dependents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintQueue {
    /// Artifact names in print order
    pub order: Vec<String>,
}

impl PrintQueue {
    pub fn new(order: Vec<String>) -> Self {
        Self { order }
    }

    /// Look up the queued artifacts in the registry they were resolved from
    pub fn artifacts<'a>(&self, registry: &'a Registry) -> Vec<&'a Artifact> {
        self.order
            .iter()
            .filter_map(|name| registry.get(name))
            .collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|queued| queued == name)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

/// Progress of resolving one registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Idle,
    BuildingGraph,
    Traversing,
    Resolved,
    Failed,
}

impl fmt::Display for ResolutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::BuildingGraph => "building graph",
            Self::Traversing => "traversing",
            Self::Resolved => "resolved",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How artifacts are mapped to output files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One file per artifact, in discovery order (references are still resolved)
    #[default]
    Separate,
    /// One file per model directory, in resolved print order
    Merge,
}
