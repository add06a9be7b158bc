//! Phase 2: Extraction
//!
//! Parses every file of one model group and registers the resulting artifacts
//! in discovery order. A duplicated component name (for example `Foo.buc` next
//! to `Foo.bum`) is reported as a naming collision instead of letting one file
//! silently shadow the other.

use log::debug;

use super::ModelGroup;
use crate::error::Result;
use crate::extract;
use crate::registry::Registry;

/// Execute Phase 2: build the registry of one model group
pub fn execute(group: &ModelGroup) -> Result<Registry> {
    let mut registry = Registry::new();

    for file in &group.files {
        let artifact = extract::extract_file(file)?;
        debug!(
            "Extracted {} '{}' from {}",
            artifact.kind(),
            artifact.name(),
            file.display()
        );
        registry.register(artifact)?;
    }

    Ok(registry)
}
