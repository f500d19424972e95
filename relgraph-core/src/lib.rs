//! Relgraph Core
//!
//! This crate provides the relationship graph at the heart of a
//! configuration-management run. It implements:
//!
//! - A generic labeled directed graph with iterative traversal
//! - Dependency and dependent queries over declared resources
//! - Container splicing, which flattens nested scopes into direct
//!   relationships and rejects unsatisfiable orderings
//! - Event routing from changed resources to subscribed callbacks
//! - Graphviz export
//!
//! # Architecture
//!
//! The crate is organized into two modules:
//!
//! - `graph`: Generic directed-graph primitive and tree walker
//! - `relationship`: Resources, labels and the relationship graph built on it
//!
//! Everything is single-threaded and synchronous. Diagnostics go through
//! `tracing`; installing a subscriber is up to the application.
//!
//! # Example
//!
//! ```rust
//! use relgraph_core::relationship::{
//!     ContainerKind, Event, EventSpec, Label, RelationshipGraph, Resource,
//! };
//!
//! let component = ContainerKind::new("component");
//! let web = Resource::container("component", "web", component.clone());
//! let config = Resource::new("file", "/etc/nginx.conf");
//! let site = Resource::new("file", "/var/www/index.html");
//! let nginx = Resource::new("service", "nginx");
//!
//! // What the container holds.
//! let mut containment = RelationshipGraph::new();
//! containment.add_edge(web.clone(), config.clone(), Label::new());
//! containment.add_edge(web.clone(), site.clone(), Label::new());
//!
//! // Ordering declared against the container.
//! let mut relationships = RelationshipGraph::new();
//! relationships.add_vertex(config.clone());
//! relationships.add_vertex(site.clone());
//! relationships.add_edge(
//!     web.clone(),
//!     nginx.clone(),
//!     Label::subscribe(EventSpec::AllEvents, "refresh"),
//! );
//!
//! relationships.splice(&containment, &component).unwrap();
//! assert!(relationships.has_edge(&config, &nginx));
//! assert!(relationships.has_edge(&site, &nginx));
//!
//! // A changed config file refreshes the service.
//! let triggered = relationships.matching_edges(&[Event::new(config, "changed")], None);
//! assert_eq!(triggered[0].target, nginx);
//! ```

pub mod error;
pub mod graph;
pub mod relationship;

pub use error::{GraphError, GraphResult};
pub use graph::{Digraph, Direction, EdgeRef, PredecessorMap, TreeWalker};
pub use relationship::{
    ContainerKind, Event, EventSpec, ExportConfig, Label, Relationship, RelationshipGraph,
    Resource, SpliceStats,
};
