//! Artifact registry: every artifact of one conversion run, keyed by name
//!
//! The registry keeps artifacts in registration order. That order is the
//! default output order for separate-file mode and the tie-breaker wherever
//! the resolver has to choose between independent artifacts.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::Artifact;

/// In-memory collection of the artifacts of one run
#[derive(Debug, Clone, Default)]
pub struct Registry {
    artifacts: Vec<Artifact>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an artifact.
    ///
    /// Names must be unique: registering a second artifact under an existing
    /// name fails with [`Error::NamingCollision`] and leaves the registry
    /// unchanged.
    pub fn register(&mut self, artifact: Artifact) -> Result<()> {
        if let Some(&existing) = self.index.get(artifact.name()) {
            return Err(Error::NamingCollision {
                name: artifact.name().to_string(),
                first: self.artifacts[existing].source_path().to_path_buf(),
                second: artifact.source_path().to_path_buf(),
            });
        }

        self.index
            .insert(artifact.name().to_string(), self.artifacts.len());
        self.artifacts.push(artifact);
        Ok(())
    }

    /// Find an artifact by name
    pub fn get(&self, name: &str) -> Option<&Artifact> {
        self.index.get(name).map(|&i| &self.artifacts[i])
    }

    /// Resolve a reference from artifact `from` to the artifact named `to`
    pub fn lookup(&self, from: &str, to: &str) -> Result<&Artifact> {
        self.get(to).ok_or_else(|| Error::UnknownReference {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Registration position of an artifact
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Artifact at a registration position
    pub fn at(&self, position: usize) -> Option<&Artifact> {
        self.artifacts.get(position)
    }

    /// Check if an artifact with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate artifacts in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Artifact;
    type IntoIter = std::slice::Iter<'a, Artifact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
