//! Phase 3: Dependency Graph Building
//!
//! Derives, for every artifact in a registry, the ordered list of artifact
//! names it depends on:
//!
//! - a context depends on the contexts it extends, in declaration order;
//! - a machine depends on the machine it refines, then on the contexts it
//!   sees, in declaration order.
//!
//! The graph is a pure function of the registry. References are not checked
//! here; an unknown name is reported by the ordering phase, which knows the
//! traversal path that led to it.

use super::DependencyGraph;
use crate::registry::Registry;

/// Execute Phase 3: build the dependency graph of a registry
pub fn execute(registry: &Registry) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for artifact in registry {
        let references = artifact
            .references()
            .into_iter()
            .map(str::to_string)
            .collect();
        graph.insert(artifact.name().to_string(), references);
    }

    graph
}
