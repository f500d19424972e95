//! Directed Graph Core
//!
//! This module implements the generic directed-graph primitive the rest of the
//! crate is built on. It knows nothing about resources or relationships: a
//! vertex is any hashable value and an edge carries an arbitrary label.
//!
//! # Overview
//!
//! - `Digraph<V, E>` stores vertices and labeled edges
//! - `TreeWalker` walks the graph from a start vertex in one direction and
//!   builds predecessor maps
//!
//! # Design Decisions
//!
//! 1. Adjacency is kept in both directions, so incoming and outgoing
//!    neighbours are equally cheap to enumerate.
//!
//! 2. Every collection is insertion ordered (`indexmap`). Traversal order is
//!    observable through predecessor maps, so it has to be deterministic.
//!
//! 3. At most one edge exists per ordered vertex pair. Adding an edge that
//!    already exists replaces its label.
//!
//! 4. The label type is a type parameter. Derived graphs (the reversal, an
//!    induced subgraph) clone labels, so they carry the caller's edge type.

mod digraph;
mod walker;

pub use digraph::{Digraph, EdgeRef};
pub use walker::{PredecessorMap, TreeWalker};

/// Which way to follow edges from a vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow edges from source to target.
    #[default]
    Outgoing,
    /// Follow edges from target back to source.
    Incoming,
}
