//! Tree Walker
//!
//! Depth-first walks from a single vertex, following edges in one direction.
//!
//! # Algorithm
//!
//! `walk` is a pre-order depth-first search that does **not** remember
//! which vertices it has already seen. A vertex reachable through several
//! paths is visited once per path, and the callback sees every traversed
//! edge:
//!
//! 1. For each neighbour of the current vertex, in adjacency order:
//!    a. call `visit(current, neighbour)`
//!    b. walk the neighbour completely before moving to the next sibling
//!
//! The walk runs on an explicit stack, so long dependency chains cannot
//! exhaust the call stack.
//!
//! The vertices on the current path are tracked. An edge leading back onto
//! the path is still reported to `visit`, but the walk does not descend
//! through it, so cyclic regions terminate. On acyclic graphs that guard
//! never fires.
//!
//! Enumerating every path is exponential on layered graphs, so the queries
//! (`reachable`, `tree_from_vertex`) never call `walk`. They use a search
//! that expands each vertex once:
//!
//! - The order in which it first reaches vertices is the order `walk` first
//!   reaches them.
//! - Run over reversed adjacency lists, the first parent it finds for a
//!   vertex is the last parent `walk` would report. Two paths to the same
//!   vertex of an acyclic graph split at some vertex, and reversing the
//!   sibling order swaps which branch is taken first.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use indexmap::IndexMap;

use super::{Digraph, Direction};

/// Maps each vertex reached by a walk to the parent it was last reached from.
///
/// Keys are in first-reached order. When a vertex is reachable through more
/// than one path the value is overwritten, so the parent recorded is the one
/// from the last path the walk took.
pub type PredecessorMap<V> = IndexMap<V, V>;

/// Walks a graph from a start vertex in a fixed direction.
pub struct TreeWalker<'g, V, E> {
    graph: &'g Digraph<V, E>,
    direction: Direction,
}

impl<'g, V, E> TreeWalker<'g, V, E>
where
    V: Clone + Eq + Hash,
    E: Clone,
{
    pub fn new(graph: &'g Digraph<V, E>, direction: Direction) -> Self {
        Self { graph, direction }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Walk from `start`, calling `visit(parent, child)` for every traversed
    /// edge before descending into `child`.
    ///
    /// Does nothing if `start` is not in the graph.
    pub fn walk<F>(&self, start: &V, mut visit: F)
    where
        F: FnMut(&'g V, &'g V),
    {
        let graph = self.graph;
        let direction = self.direction;
        let Some(start) = graph.stored(start) else {
            return;
        };

        let mut on_path: HashSet<&'g V> = HashSet::new();
        on_path.insert(start);
        let mut stack = vec![(start, graph.adjacent(start, direction))];

        while let Some((parent, children)) = stack.last_mut() {
            let parent = *parent;
            match children.next() {
                Some(child) => {
                    visit(parent, child);
                    if on_path.insert(child) {
                        stack.push((child, graph.adjacent(child, direction)));
                    }
                }
                None => {
                    on_path.remove(parent);
                    stack.pop();
                }
            }
        }
    }

    /// Build the predecessor map of a walk from `start`.
    ///
    /// Equal to recording `visit(parent, child)` as `child -> parent` over a
    /// full `walk`, without enumerating every path.
    /// `start` only appears as a key if the walk leads back to it.
    pub fn tree_from_vertex(&self, start: &V) -> PredecessorMap<V> {
        let (graph, direction) = (self.graph, self.direction);
        let Some(start) = graph.stored(start) else {
            return PredecessorMap::new();
        };

        let mut last_parent: HashMap<&'g V, &'g V> = HashMap::new();
        Self::search(
            start,
            |vertex| graph.adjacent(vertex, direction).rev(),
            |parent, child| {
                last_parent.insert(child, parent);
            },
        );

        let mut predecessors = PredecessorMap::with_capacity(last_parent.len());
        Self::search(
            start,
            |vertex| graph.adjacent(vertex, direction),
            |_, child| {
                if let Some(parent) = last_parent.get(child) {
                    predecessors.insert(child.clone(), (*parent).clone());
                }
            },
        );
        predecessors
    }

    /// Every vertex reachable from `start`, in the order a walk first
    /// reaches them.
    ///
    /// `start` is only included if a path leads back to it.
    pub fn reachable(&self, start: &V) -> Vec<V> {
        let (graph, direction) = (self.graph, self.direction);
        let Some(start) = graph.stored(start) else {
            return Vec::new();
        };

        let mut reached = Vec::new();
        Self::search(
            start,
            |vertex| graph.adjacent(vertex, direction),
            |_, child| reached.push(child.clone()),
        );
        reached
    }

    /// Depth-first search that expands each vertex at most once and calls
    /// `reach(parent, child)` the first time `child` is seen.
    fn search<N, I, F>(start: &'g V, neighbours: N, mut reach: F)
    where
        N: Fn(&'g V) -> I,
        I: Iterator<Item = &'g V>,
        F: FnMut(&'g V, &'g V),
    {
        let mut seen: HashSet<&'g V> = HashSet::new();
        let mut stack = vec![(start, neighbours(start))];

        while let Some((parent, children)) = stack.last_mut() {
            let parent = *parent;
            match children.next() {
                Some(child) => {
                    if seen.insert(child) {
                        reach(parent, child);
                        // the start is already being expanded
                        if child != start {
                            stack.push((child, neighbours(child)));
                        }
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }
}
