//! Phase 4: Determining Print Order
//!
//! This is the fourth phase of the `eventb-to-txt` pipeline. Its main
//! responsibility is to order the artifacts of a model so that every
//! referenced artifact is printed before the artifact that references it.
//!
//! ## Process
//!
//! 1.  **Depth-First Traversal**: To place an artifact, its references are
//!     placed first, recursively and in reference order, then the artifact
//!     itself (post-order traversal).
//!
//! 2.  **Roots First**: Traversal starts from every root (an artifact nothing
//!     else references) in registration order, so a registry holding several
//!     independent hierarchies is printed one hierarchy after the other.
//!
//! 3.  **Visit States**: Each artifact is `Unvisited`, `InProgress` or `Done`.
//!     A `Done` artifact is never placed twice. Reaching an `InProgress`
//!     artifact means the references form a cycle, which is reported as
//!     [`Error::CyclicReference`] instead of recursing forever.
//!
//! 4.  **Leftovers**: Artifacts not reached from any root can only sit on a
//!     cycle. They are traversed last, which surfaces that cycle.
//!
//! A reference to a name missing from the registry fails with
//! [`Error::UnknownReference`]. Both failures abort resolution; the caller
//! writes nothing.

use log::debug;

use super::{graph, DependencyGraph, PrintQueue, ResolutionState};
use crate::error::{Error, Result};
use crate::model::Artifact;
use crate::registry::Registry;

/// Execute Phase 4: resolve the print queue of a whole registry
pub fn execute(registry: &Registry, graph: &DependencyGraph) -> Result<PrintQueue> {
    let mut resolver = Resolver::new(registry, graph);

    for root in graph.roots() {
        resolver.visit_named(root)?;
    }
    for artifact in registry {
        resolver.visit_named(artifact.name())?;
    }

    Ok(resolver.into_queue())
}

/// Resolve a registry from scratch: build its graph, then traverse it
///
/// Every state transition is logged at debug level.
pub fn resolve(registry: &Registry) -> Result<PrintQueue> {
    let mut state = ResolutionState::Idle;
    let mut transition = |next: ResolutionState| {
        debug!("Resolution: {} -> {}", state, next);
        state = next;
    };

    transition(ResolutionState::BuildingGraph);
    let graph = graph::execute(registry);

    transition(ResolutionState::Traversing);
    match execute(registry, &graph) {
        Ok(queue) => {
            transition(ResolutionState::Resolved);
            Ok(queue)
        }
        Err(e) => {
            transition(ResolutionState::Failed);
            Err(e)
        }
    }
}

/// Compute the print queue needed to print a single artifact
///
/// The queue holds the artifact's whole dependency closure followed by the
/// artifact itself. Fails with [`Error::UnknownArtifact`] if `name` is not
/// registered.
pub fn print_queue_for(
    registry: &Registry,
    graph: &DependencyGraph,
    name: &str,
) -> Result<PrintQueue> {
    if !registry.contains(name) {
        return Err(Error::UnknownArtifact {
            name: name.to_string(),
        });
    }
    let mut resolver = Resolver::new(registry, graph);
    resolver.visit_named(name)?;
    Ok(resolver.into_queue())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

struct Resolver<'a> {
    registry: &'a Registry,
    graph: &'a DependencyGraph,
    /// Visit state per registry position
    states: Vec<VisitState>,
    /// Registry positions on the current traversal path
    path: Vec<usize>,
    /// Registry positions in print order
    order: Vec<usize>,
}

impl<'a> Resolver<'a> {
    fn new(registry: &'a Registry, graph: &'a DependencyGraph) -> Self {
        Self {
            registry,
            graph,
            states: vec![VisitState::Unvisited; registry.len()],
            path: Vec::new(),
            order: Vec::new(),
        }
    }

    fn visit_named(&mut self, name: &str) -> Result<()> {
        match self.registry.position(name) {
            Some(position) => self.visit(position),
            None => Ok(()),
        }
    }

    fn visit(&mut self, position: usize) -> Result<()> {
        match self.states[position] {
            VisitState::Done => return Ok(()),
            VisitState::InProgress => return Err(self.cycle_error(position)),
            VisitState::Unvisited => {}
        }

        self.states[position] = VisitState::InProgress;
        self.path.push(position);

        let (registry, graph) = (self.registry, self.graph);
        let name = self.name_at(position);
        for reference in graph.references(name) {
            let target = registry.lookup(name, reference)?;
            self.visit_named(target.name())?;
        }

        self.path.pop();
        self.states[position] = VisitState::Done;
        self.order.push(position);
        Ok(())
    }

    /// Describe the cycle closed by re-entering `position`
    fn cycle_error(&self, position: usize) -> Error {
        let start = self
            .path
            .iter()
            .position(|&p| p == position)
            .unwrap_or(0);
        let mut cycle: Vec<String> = self.path[start..]
            .iter()
            .map(|&p| self.name_at(p).to_string())
            .collect();
        cycle.push(self.name_at(position).to_string());

        Error::CyclicReference { cycle }
    }

    fn name_at(&self, position: usize) -> &'a str {
        let registry: &'a Registry = self.registry;
        registry.at(position).map(Artifact::name).unwrap_or_default()
    }

    fn into_queue(self) -> PrintQueue {
        let order = self
            .order
            .iter()
            .map(|&p| self.name_at(p).to_string())
            .collect();
        PrintQueue::new(order)
    }
}
