//! Property-based tests for print queue resolution.
//!
//! Random acyclic context hierarchies are registered in random order and the
//! resolved queue is checked against the ordering guarantees.

#[cfg(test)]
mod proptest_tests {
    use crate::error::Error;
    use crate::model::{Artifact, Context};
    use crate::phases::ordering::resolve;
    use crate::registry::Registry;
    use proptest::prelude::*;

    /// Node count, adjacency matrix and a registration permutation.
    ///
    /// Node `i` may only extend nodes `j < i`, so the hierarchy is acyclic.
    fn hierarchy() -> impl Strategy<Value = (Vec<Vec<bool>>, Vec<usize>)> {
        (1usize..12).prop_flat_map(|n| {
            (
                proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n),
                Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
            )
        })
    }

    fn name(i: usize) -> String {
        format!("C{}", i)
    }

    fn build(edges: &[Vec<bool>], order: &[usize]) -> Registry {
        let mut registry = Registry::new();
        for &i in order {
            let mut context = Context::new(name(i), format!("m/{}.buc", name(i)));
            context.extends = (0..i).filter(|&j| edges[i][j]).map(name).collect();
            registry.register(Artifact::from(context)).unwrap();
        }
        registry
    }

    proptest! {
        /// Property: every extended context is printed before its extension
        #[test]
        fn references_precede_referrers((edges, order) in hierarchy()) {
            let registry = build(&edges, &order);
            let queue = resolve(&registry).unwrap();

            for artifact in &registry {
                let position = queue.position(artifact.name()).unwrap();
                for reference in artifact.references() {
                    let reference_position = queue.position(reference).unwrap();
                    prop_assert!(
                        reference_position < position,
                        "{} printed after {}",
                        reference,
                        artifact.name()
                    );
                }
            }
        }

        /// Property: every artifact is printed exactly once
        #[test]
        fn queue_is_complete_without_duplicates((edges, order) in hierarchy()) {
            let registry = build(&edges, &order);
            let queue = resolve(&registry).unwrap();

            prop_assert_eq!(queue.len(), registry.len());
            let mut names = queue.order.clone();
            names.sort();
            names.dedup();
            prop_assert_eq!(names.len(), registry.len());
        }

        /// Property: resolving the same registry twice gives the same queue
        #[test]
        fn resolution_is_deterministic((edges, order) in hierarchy()) {
            let registry = build(&edges, &order);
            prop_assert_eq!(resolve(&registry).unwrap(), resolve(&registry).unwrap());
        }

        /// Property: a reference back to the newest context closes a cycle
        #[test]
        fn back_reference_is_reported_as_cycle((edges, order) in hierarchy()) {
            let n = edges.len();
            let mut edges = edges;
            // Chain every node to its predecessor so the back edge closes a cycle
            for (i, row) in edges.iter_mut().enumerate().skip(1) {
                row[i - 1] = true;
            }
            let mut registry = Registry::new();
            for &i in &order {
                let mut context = Context::new(name(i), format!("m/{}.buc", name(i)));
                context.extends = (0..i).filter(|&j| edges[i][j]).map(name).collect();
                if i == 0 {
                    context.extends.push(name(n - 1));
                }
                registry.register(Artifact::from(context)).unwrap();
            }

            match resolve(&registry) {
                Err(Error::CyclicReference { cycle }) => {
                    prop_assert!(cycle.len() >= 2);
                    prop_assert_eq!(cycle.first(), cycle.last());
                }
                other => prop_assert!(false, "Expected CyclicReference, got {:?}", other),
            }
        }
    }
}
