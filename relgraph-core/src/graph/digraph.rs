//! Labeled Directed Graph
//!
//! `Digraph` is the storage layer: vertices, labeled edges and adjacency in
//! both directions. Higher-level queries live in `TreeWalker` and in the
//! relationship graph that wraps this type.

use std::collections::HashMap;
use std::hash::Hash;

use indexmap::IndexMap;

use super::walker::{PredecessorMap, TreeWalker};
use super::Direction;

/// Adjacency of a single vertex.
///
/// The label is stored on both sides so incoming edges can be enumerated
/// without a lookup in the neighbour's entry.
#[derive(Debug, Clone)]
struct Adjacency<V, E> {
    outgoing: IndexMap<V, E>,
    incoming: IndexMap<V, E>,
}

impl<V, E> Adjacency<V, E> {
    fn new() -> Self {
        Self {
            outgoing: IndexMap::new(),
            incoming: IndexMap::new(),
        }
    }

    fn side(&self, direction: Direction) -> &IndexMap<V, E> {
        match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        }
    }
}

/// A borrowed view of one edge.
#[derive(Debug)]
pub struct EdgeRef<'a, V, E> {
    pub source: &'a V,
    pub target: &'a V,
    pub label: &'a E,
}

impl<'a, V, E> Clone for EdgeRef<'a, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, V, E> Copy for EdgeRef<'a, V, E> {}

/// A directed graph with labeled edges.
///
/// Vertices, and the neighbours of each vertex, are kept in insertion order.
#[derive(Debug, Clone)]
pub struct Digraph<V, E> {
    vertices: IndexMap<V, Adjacency<V, E>>,
    edge_count: usize,
}

impl<V, E> Default for Digraph<V, E> {
    fn default() -> Self {
        Self {
            vertices: IndexMap::new(),
            edge_count: 0,
        }
    }
}

impl<V, E> Digraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Clone,
{
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Add a vertex. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, vertex: V) -> bool {
        if self.vertices.contains_key(&vertex) {
            return false;
        }
        self.vertices.insert(vertex, Adjacency::new());
        true
    }

    /// Add an edge `source -> target`.
    ///
    /// Missing endpoints are added first. If the edge already exists its
    /// label is replaced and the edge keeps its position in both adjacency
    /// lists.
    pub fn add_edge(&mut self, source: V, target: V, label: E) {
        self.add_vertex(source.clone());
        self.add_vertex(target.clone());

        let replaced = match self.vertices.get_mut(&source) {
            Some(adjacency) => adjacency
                .outgoing
                .insert(target.clone(), label.clone())
                .is_some(),
            None => false,
        };
        if let Some(adjacency) = self.vertices.get_mut(&target) {
            adjacency.incoming.insert(source, label);
        }

        if !replaced {
            self.edge_count += 1;
        }
    }

    /// Remove a vertex and every edge touching it.
    ///
    /// Returns `false` if the vertex was not present.
    pub fn remove_vertex(&mut self, vertex: &V) -> bool {
        let Some(adjacency) = self.vertices.shift_remove(vertex) else {
            return false;
        };

        for target in adjacency.outgoing.keys() {
            if let Some(neighbour) = self.vertices.get_mut(target) {
                neighbour.incoming.shift_remove(vertex);
            }
        }
        for source in adjacency.incoming.keys() {
            if let Some(neighbour) = self.vertices.get_mut(source) {
                neighbour.outgoing.shift_remove(vertex);
            }
        }

        // A self-loop shows up on both sides but is one edge.
        let self_loop = usize::from(adjacency.outgoing.contains_key(vertex));
        self.edge_count -= adjacency.outgoing.len() + adjacency.incoming.len() - self_loop;
        true
    }

    /// Remove every vertex and edge.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edge_count = 0;
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.vertices.contains_key(vertex)
    }

    /// The stored copy of `vertex`, borrowed for as long as the graph.
    pub(super) fn stored(&self, vertex: &V) -> Option<&V> {
        self.vertices.get_key_value(vertex).map(|(stored, _)| stored)
    }

    /// Check whether the edge `source -> target` exists.
    pub fn has_edge(&self, source: &V, target: &V) -> bool {
        self.label(source, target).is_some()
    }

    /// Get the label of the edge `source -> target`.
    pub fn label(&self, source: &V, target: &V) -> Option<&E> {
        self.vertices
            .get(source)
            .and_then(|adjacency| adjacency.outgoing.get(target))
    }

    /// All vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.vertices.keys()
    }

    /// All edges, grouped by source vertex.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_, V, E>> + '_ {
        self.vertices.iter().flat_map(|(source, adjacency)| {
            adjacency
                .outgoing
                .iter()
                .map(move |(target, label)| EdgeRef {
                    source,
                    target,
                    label,
                })
        })
    }

    /// Neighbours of `vertex` in the given direction.
    ///
    /// An absent vertex has no neighbours.
    pub fn adjacent<'a>(
        &'a self,
        vertex: &V,
        direction: Direction,
    ) -> impl DoubleEndedIterator<Item = &'a V> + 'a {
        self.vertices
            .get(vertex)
            .into_iter()
            .flat_map(move |adjacency| adjacency.side(direction).keys())
    }

    /// Edges touching `vertex` in the given direction, in adjacency order.
    pub fn adjacent_edges<'a>(
        &'a self,
        vertex: &V,
        direction: Direction,
    ) -> impl Iterator<Item = EdgeRef<'a, V, E>> + 'a {
        self.vertices
            .get_key_value(vertex)
            .into_iter()
            .flat_map(move |(vertex, adjacency)| {
                adjacency
                    .side(direction)
                    .iter()
                    .map(move |(neighbour, label)| match direction {
                        Direction::Outgoing => EdgeRef {
                            source: vertex,
                            target: neighbour,
                            label,
                        },
                        Direction::Incoming => EdgeRef {
                            source: neighbour,
                            target: vertex,
                            label,
                        },
                    })
            })
    }

    /// Number of edges touching `vertex` in the given direction.
    pub fn degree(&self, vertex: &V, direction: Direction) -> usize {
        self.vertices
            .get(vertex)
            .map_or(0, |adjacency| adjacency.side(direction).len())
    }

    /// Build the transposed graph.
    ///
    /// The outgoing neighbours of each vertex in the result are ordered like
    /// its incoming neighbours here.
    pub fn reversal(&self) -> Self {
        let mut reversed = Self::new();
        for vertex in self.vertices.keys() {
            reversed.add_vertex(vertex.clone());
        }
        for (vertex, adjacency) in &self.vertices {
            for (source, label) in &adjacency.incoming {
                reversed.add_edge(vertex.clone(), source.clone(), label.clone());
            }
        }
        reversed
    }

    /// Check whether the graph contains a directed cycle.
    ///
    /// Iterative depth-first search with three-colour marking. A self-loop
    /// is a cycle.
    pub fn is_cyclic(&self) -> bool {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Visiting,
            Done,
        }

        let mut marks: HashMap<&V, Mark> = HashMap::with_capacity(self.vertices.len());

        for root in self.vertices.keys() {
            if marks.contains_key(root) {
                continue;
            }
            marks.insert(root, Mark::Visiting);
            let mut stack = vec![(root, self.adjacent(root, Direction::Outgoing))];

            while let Some((vertex, children)) = stack.last_mut() {
                let vertex = *vertex;
                match children.next() {
                    Some(child) => match marks.get(child) {
                        // Back edge
                        Some(Mark::Visiting) => return true,
                        Some(Mark::Done) => {}
                        None => {
                            marks.insert(child, Mark::Visiting);
                            stack.push((child, self.adjacent(child, Direction::Outgoing)));
                        }
                    },
                    None => {
                        marks.insert(vertex, Mark::Done);
                        stack.pop();
                    }
                }
            }
        }

        false
    }

    /// Copy of the graph restricted to `vertices` and the edges between them.
    ///
    /// Vertices not present in this graph are ignored.
    pub fn induced_subgraph<'a, I>(&self, vertices: I) -> Self
    where
        I: IntoIterator<Item = &'a V>,
        V: 'a,
    {
        let mut subgraph = Self::new();
        for vertex in vertices {
            if self.contains_vertex(vertex) {
                subgraph.add_vertex(vertex.clone());
            }
        }
        for (source, adjacency) in &self.vertices {
            if !subgraph.contains_vertex(source) {
                continue;
            }
            for (target, label) in &adjacency.outgoing {
                if subgraph.contains_vertex(target) {
                    subgraph.add_edge(source.clone(), target.clone(), label.clone());
                }
            }
        }
        subgraph
    }

    /// Walk from `start` in `direction`. See [`TreeWalker::walk`].
    pub fn walk<'a, F>(&'a self, start: &V, direction: Direction, visit: F)
    where
        F: FnMut(&'a V, &'a V),
    {
        TreeWalker::new(self, direction).walk(start, visit);
    }

    /// Predecessor map of a walk from `start`. See [`TreeWalker::tree_from_vertex`].
    pub fn tree_from_vertex(&self, start: &V, direction: Direction) -> PredecessorMap<V> {
        TreeWalker::new(self, direction).tree_from_vertex(start)
    }

    /// Vertices reachable from `start` in `direction`. See [`TreeWalker::reachable`].
    pub fn reachable(&self, start: &V, direction: Direction) -> Vec<V> {
        TreeWalker::new(self, direction).reachable(start)
    }
}
