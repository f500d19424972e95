//! Container Splicing
//!
//! Containers (classes, defined types, ...) group other resources. Ordering
//! declared against a container really applies to everything inside it.
//! Splicing rewrites the graph so that it only holds relationships between
//! real resources.
//!
//! # Algorithm
//!
//! For every container vertex of the requested kind, in insertion order:
//!
//! 1. Look up its leaf resources in the snapshot graph, which still has the
//!    full container nesting.
//! 2. If there are none, drop the container and move on.
//! 3. For each incoming and each outgoing edge of the container, resolve the
//!    other endpoint to its own leaves if it is a container too.
//! 4. Connect every resolved endpoint to every leaf with a copy of the
//!    original label, skipping pairs that are already connected.
//! 5. Remove the container.
//!
//! The graph is checked for cycles after every added edge. A cycle means the
//! declared ordering cannot be satisfied and the splice fails.
//!
//! That check walks the whole graph each time, so a splice costs
//! O(new edges * graph size). Fine for hundreds of resources.

use smallvec::{smallvec, SmallVec};
use tracing::debug;

use super::{ContainerKind, Label, RelationshipGraph, Resource};
use crate::error::{GraphError, GraphResult};
use crate::graph::Direction;

/// What a successful splice did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpliceStats {
    /// Container vertices removed, empty ones included.
    pub containers_removed: usize,
    /// New edges between leaf resources.
    pub edges_added: usize,
    /// Rewired pairs that were already connected.
    pub duplicates_skipped: usize,
}

impl RelationshipGraph {
    /// Replace every container of `kind` with direct relationships to its
    /// leaf resources, using `snapshot` to find what each container holds.
    ///
    /// On error the graph is left half-spliced and should be discarded.
    pub fn splice(
        &mut self,
        snapshot: &RelationshipGraph,
        kind: &ContainerKind,
    ) -> GraphResult<SpliceStats> {
        let mut stats = SpliceStats::default();

        for container in self.container_vertices(kind) {
            let children = snapshot.leaves(&container);

            if children.is_empty() {
                debug!(container = %container, "removing empty container");
                self.remove_vertex(&container);
                stats.containers_removed += 1;
                continue;
            }

            for direction in [Direction::Incoming, Direction::Outgoing] {
                let edges: Vec<(Resource, Label)> = self
                    .digraph()
                    .adjacent_edges(&container, direction)
                    .map(|edge| {
                        let neighbour = match direction {
                            Direction::Incoming => edge.source,
                            Direction::Outgoing => edge.target,
                        };
                        (neighbour.clone(), edge.label.clone())
                    })
                    .collect();

                for (neighbour, label) in edges {
                    let neighbours: SmallVec<[Resource; 1]> = if neighbour.is_container_of(kind) {
                        SmallVec::from_vec(snapshot.leaves(&neighbour))
                    } else {
                        smallvec![neighbour]
                    };

                    for child in &children {
                        for resolved in &neighbours {
                            let (source, target) = match direction {
                                Direction::Incoming => (resolved, child),
                                Direction::Outgoing => (child, resolved),
                            };
                            self.rewire(source, target, &label, kind, &mut stats)?;
                        }
                    }
                }
            }

            debug!(container = %container, leaves = children.len(), "spliced container");
            self.remove_vertex(&container);
            stats.containers_removed += 1;
        }

        Ok(stats)
    }

    fn rewire(
        &mut self,
        source: &Resource,
        target: &Resource,
        label: &Label,
        kind: &ContainerKind,
        stats: &mut SpliceStats,
    ) -> GraphResult<()> {
        if source.is_container_of(kind) {
            return Err(GraphError::container_source(source.reference()));
        }
        if target.is_container_of(kind) {
            return Err(GraphError::container_target(target.reference()));
        }

        if self.has_edge(source, target) {
            stats.duplicates_skipped += 1;
            return Ok(());
        }

        self.add_edge(source.clone(), target.clone(), label.clone());
        stats.edges_added += 1;

        if self.digraph().is_cyclic() {
            return Err(GraphError::cycle(source.reference(), target.reference()));
        }

        debug!(source = %source, target = %target, "rewired relationship");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationship::EventSpec;

    fn file(title: &str) -> Resource {
        Resource::new("file", title)
    }

    fn component() -> ContainerKind {
        ContainerKind::new("component")
    }

    fn container(title: &str) -> Resource {
        Resource::container("component", title, component())
    }

    /// Snapshot where each container holds the given files.
    fn snapshot(contents: Vec<(&Resource, Vec<Resource>)>) -> RelationshipGraph {
        let mut graph = RelationshipGraph::new();
        for (container, members) in contents {
            graph.add_vertex(container.clone());
            for member in members {
                graph.add_edge(container.clone(), member, Label::new());
            }
        }
        graph
    }

    #[test]
    fn no_containers_is_a_noop() {
        let mut graph = RelationshipGraph::new();
        graph.add_edge(file("a"), file("b"), Label::new());

        let stats = graph.splice(&RelationshipGraph::new(), &component()).unwrap();

        assert_eq!(stats, SpliceStats::default());
        assert_eq!(graph.vertex_count(), 2);
        assert!(graph.has_edge(&file("a"), &file("b")));
    }

    #[test]
    fn outgoing_edge_is_copied_to_every_leaf() {
        let group = container("group");
        let label = Label::subscribe(EventSpec::AllEvents, "refresh");
        let snapshot = snapshot(vec![(&group, vec![file("a"), file("b")])]);

        let mut graph = RelationshipGraph::new();
        graph.add_vertex(file("a"));
        graph.add_vertex(file("b"));
        graph.add_edge(group.clone(), file("c"), label.clone());

        let stats = graph.splice(&snapshot, &component()).unwrap();

        assert!(!graph.contains(&group));
        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.digraph().label(&file("a"), &file("c")), Some(&label));
        assert_eq!(graph.digraph().label(&file("b"), &file("c")), Some(&label));
        assert_eq!(stats.containers_removed, 1);
        assert_eq!(stats.edges_added, 2);
    }

    #[test]
    fn incoming_edge_is_copied_to_every_leaf() {
        let group = container("group");
        let snapshot = snapshot(vec![(&group, vec![file("a"), file("b")])]);

        let mut graph = RelationshipGraph::new();
        graph.add_edge(file("pre"), group.clone(), Label::new());

        graph.splice(&snapshot, &component()).unwrap();

        assert!(graph.has_edge(&file("pre"), &file("a")));
        assert!(graph.has_edge(&file("pre"), &file("b")));
        assert!(!graph.contains(&group));
    }

    #[test]
    fn empty_container_is_removed_without_rewiring() {
        let empty = container("empty");
        let snapshot = snapshot(vec![(&empty, vec![])]);

        let mut graph = RelationshipGraph::new();
        graph.add_edge(file("a"), empty.clone(), Label::new());
        graph.add_edge(empty.clone(), file("b"), Label::new());
        graph.add_edge(file("a"), file("b"), Label::new());

        let stats = graph.splice(&snapshot, &component()).unwrap();

        assert!(!graph.contains(&empty));
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(&file("a"), &file("b")));
        assert_eq!(stats.edges_added, 0);
        assert_eq!(stats.containers_removed, 1);
    }

    #[test]
    fn existing_pairs_are_not_duplicated() {
        let group = container("group");
        let original = Label::new().with_callback("first");
        let snapshot = snapshot(vec![(&group, vec![file("a")])]);

        let mut graph = RelationshipGraph::new();
        graph.add_edge(file("a"), file("c"), original.clone());
        graph.add_edge(group.clone(), file("c"), Label::new().with_callback("second"));

        let stats = graph.splice(&snapshot, &component()).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.digraph().label(&file("a"), &file("c")), Some(&original));
        assert_eq!(stats.duplicates_skipped, 1);
        assert_eq!(stats.edges_added, 0);
    }

    #[test]
    fn container_neighbours_resolve_to_their_leaves() {
        let first = container("first");
        let second = container("second");
        let snapshot = snapshot(vec![
            (&first, vec![file("a"), file("b")]),
            (&second, vec![file("x"), file("y")]),
        ]);

        let mut graph = RelationshipGraph::new();
        graph.add_edge(first.clone(), second.clone(), Label::new());

        let stats = graph.splice(&snapshot, &component()).unwrap();

        assert!(graph.container_vertices(&component()).is_empty());
        for source in [file("a"), file("b")] {
            for target in [file("x"), file("y")] {
                assert!(graph.has_edge(&source, &target), "{source} => {target}");
            }
        }
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(stats.containers_removed, 2);
    }

    #[test]
    fn mutually_dependent_containers_fail_with_a_cycle() {
        let one = container("one");
        let two = container("two");
        let snapshot = snapshot(vec![(&one, vec![file("a")]), (&two, vec![file("b")])]);

        let mut graph = RelationshipGraph::new();
        graph.add_edge(one.clone(), two.clone(), Label::new());
        graph.add_edge(two.clone(), one.clone(), Label::new());

        let result = graph.splice(&snapshot, &component());
        assert!(matches!(result, Err(GraphError::Cycle { .. })));
    }

    #[test]
    fn nested_container_leaf_is_rejected() {
        let outer = container("outer");
        let inner = container("inner");
        // The inner container is empty, so it is itself a leaf of the outer one.
        let snapshot = snapshot(vec![(&outer, vec![inner.clone()])]);

        let mut graph = RelationshipGraph::new();
        graph.add_edge(outer.clone(), file("c"), Label::new());

        let result = graph.splice(&snapshot, &component());
        match result {
            Err(GraphError::ContainerSource { resource }) => {
                assert_eq!(resource, "Component[inner]");
            }
            other => panic!("expected ContainerSource, got {other:?}"),
        }
    }

    #[test]
    fn nested_container_leaf_is_rejected_as_target() {
        let outer = container("outer");
        let inner = container("inner");
        let snapshot = snapshot(vec![(&outer, vec![inner.clone()])]);

        let mut graph = RelationshipGraph::new();
        graph.add_edge(file("pre"), outer.clone(), Label::new());

        let result = graph.splice(&snapshot, &component());
        match result {
            Err(GraphError::ContainerTarget { resource }) => {
                assert_eq!(resource, "Component[inner]");
            }
            other => panic!("expected ContainerTarget, got {other:?}"),
        }
        assert!(!graph.has_edge(&file("pre"), &inner));
    }

    #[test]
    fn other_container_kinds_are_left_alone() {
        let stage = Resource::container("stage", "main", ContainerKind::new("stage"));
        let mut graph = RelationshipGraph::new();
        graph.add_edge(stage.clone(), file("a"), Label::new());

        graph.splice(&RelationshipGraph::new(), &component()).unwrap();

        assert!(graph.contains(&stage));
        assert!(graph.has_edge(&stage, &file("a")));
    }
}
