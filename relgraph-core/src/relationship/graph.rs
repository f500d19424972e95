//! Relationship Graph
//!
//! The relationship graph holds declared resources and the ordering
//! relationships between them, and answers "what comes after / before this
//! resource" queries.
//!
//! # Reversal cache
//!
//! Ancestor queries walk a transposed copy of the graph forwards instead of
//! walking this graph backwards. The copy is built lazily and tagged with the
//! mutation epoch it was built at. Every structural mutation bumps the epoch,
//! so a stale copy is detected on the next query and rebuilt.

use std::cell::RefCell;

use tracing::trace;

use super::{ContainerKind, Label, Relationship, Resource};
use crate::graph::{Digraph, Direction, EdgeRef};

/// The graph of resources and their relationships.
pub type ResourceDigraph = Digraph<Resource, Label>;

/// A transposed copy of the graph and the epoch it was built at.
#[derive(Debug, Clone)]
struct ReversalCache {
    built_at: u64,
    reversal: ResourceDigraph,
}

/// Resources and the relationships between them.
///
/// # Example
///
/// ```
/// use relgraph_core::relationship::{Label, RelationshipGraph, Resource};
///
/// let package = Resource::new("package", "ntp");
/// let config = Resource::new("file", "/etc/ntp.conf");
/// let service = Resource::new("service", "ntpd");
///
/// let mut graph = RelationshipGraph::new();
/// graph.add_edge(package.clone(), config.clone(), Label::new());
/// graph.add_edge(config.clone(), service.clone(), Label::new());
///
/// assert_eq!(graph.dependents(&package), vec![config.clone(), service.clone()]);
/// assert_eq!(graph.dependencies(&service).len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    graph: ResourceDigraph,
    /// Bumped by every structural mutation.
    epoch: u64,
    reversal: RefCell<Option<ReversalCache>>,
}

impl RelationshipGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the underlying graph.
    pub fn digraph(&self) -> &ResourceDigraph {
        &self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn contains(&self, resource: &Resource) -> bool {
        self.graph.contains_vertex(resource)
    }

    pub fn has_edge(&self, source: &Resource, target: &Resource) -> bool {
        self.graph.has_edge(source, target)
    }

    /// All resources in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Resource> + '_ {
        self.graph.vertices()
    }

    /// All relationship edges.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_, Resource, Label>> + '_ {
        self.graph.edges()
    }

    /// All relationship edges as owned values.
    pub fn relationships(&self) -> Vec<Relationship> {
        self.graph
            .edges()
            .map(|edge| {
                Relationship::new(edge.source.clone(), edge.target.clone(), edge.label.clone())
            })
            .collect()
    }

    /// Add a resource.
    pub fn add_vertex(&mut self, resource: Resource) -> bool {
        self.invalidate();
        self.graph.add_vertex(resource)
    }

    /// Add a relationship edge, inserting missing endpoints.
    pub fn add_edge(&mut self, source: Resource, target: Resource, label: Label) {
        self.invalidate();
        self.graph.add_edge(source, target, label);
    }

    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.add_edge(relationship.source, relationship.target, relationship.label);
    }

    /// Remove a resource and every relationship touching it.
    pub fn remove_vertex(&mut self, resource: &Resource) -> bool {
        self.invalidate();
        self.graph.remove_vertex(resource)
    }

    /// Remove every resource and relationship, keeping the graph for reuse.
    pub fn clear(&mut self) {
        self.invalidate();
        self.graph.clear();
    }

    fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Whether the cached reversal matches the current structure.
    #[cfg(test)]
    pub(crate) fn reversal_is_current(&self) -> bool {
        self.reversal
            .borrow()
            .as_ref()
            .is_some_and(|cache| cache.built_at == self.epoch)
    }

    /// Every resource reachable from `resource` along outgoing edges.
    ///
    /// `resource` itself is only included when a cycle leads back to it.
    /// An unknown resource has no dependents.
    pub fn dependents(&self, resource: &Resource) -> Vec<Resource> {
        self.graph.reachable(resource, Direction::Outgoing)
    }

    /// Every resource with a path leading to `resource`.
    ///
    /// Walks the cached reversal forwards, rebuilding it first if the graph
    /// changed since it was built.
    pub fn dependencies(&self, resource: &Resource) -> Vec<Resource> {
        let mut cache = self.reversal.borrow_mut();
        if cache
            .as_ref()
            .is_some_and(|cache| cache.built_at != self.epoch)
        {
            *cache = None;
        }
        let cache = cache.get_or_insert_with(|| {
            trace!(
                epoch = self.epoch,
                vertices = self.graph.vertex_count(),
                "rebuilding reversal graph"
            );
            ReversalCache {
                built_at: self.epoch,
                reversal: self.graph.reversal(),
            }
        });

        cache.reversal.reachable(resource, Direction::Outgoing)
    }

    /// The leaf resources below `resource`: its dependents with no outgoing
    /// edges.
    pub fn leaves(&self, resource: &Resource) -> Vec<Resource> {
        self.leaves_in_direction(resource, Direction::Outgoing)
    }

    /// Walk from `resource` in `direction` and keep the reached resources
    /// that have no outgoing edges.
    pub fn leaves_in_direction(&self, resource: &Resource, direction: Direction) -> Vec<Resource> {
        self.graph
            .reachable(resource, direction)
            .into_iter()
            .filter(|reached| self.graph.degree(reached, Direction::Outgoing) == 0)
            .collect()
    }

    /// Resources tagged as containers of `kind`, in insertion order.
    pub fn container_vertices(&self, kind: &ContainerKind) -> Vec<Resource> {
        self.graph
            .vertices()
            .filter(|resource| resource.is_container_of(kind))
            .cloned()
            .collect()
    }
}
