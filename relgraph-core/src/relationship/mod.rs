//! Relationship Graph
//!
//! This module specializes the generic graph for configuration management:
//! vertices are declared resources and edges are ordering relationships,
//! optionally subscribed to events from their source.
//!
//! # Overview
//!
//! - `RelationshipGraph` answers dependency queries, backed by a cached
//!   reversal for ancestor lookups
//! - `splice` flattens container resources into direct relationships between
//!   their leaf members
//! - `matching_edges` routes fired events to the edges subscribed to them
//! - `to_dot` / `write_dot` export the graph for Graphviz
//!
//! # Direction
//!
//! An edge `a -> b` means `a` is ordered before `b`. The *dependents* of a
//! resource are everything reachable from it; its *dependencies* are
//! everything that reaches it.

mod export;
mod graph;
mod label;
mod resource;
mod router;
mod splice;

pub use export::ExportConfig;
pub use graph::{RelationshipGraph, ResourceDigraph};
pub use label::{Event, EventSpec, Label, Relationship};
pub use resource::{ContainerKind, Resource};
pub use splice::SpliceStats;
