//! Event Routing
//!
//! When a resource changes during a run it emits events. The router finds the
//! relationship edges leaving that resource whose label subscribes to the
//! event, so the caller can schedule the callbacks on their targets.

use tracing::{info, warn};

use super::{Event, RelationshipGraph, Relationship, Resource};
use crate::graph::Direction;

impl RelationshipGraph {
    /// Collect the edges triggered by `events`.
    ///
    /// Each event is routed from its own source, or from `base` for every
    /// event when given. Results keep event order, then adjacency order, and
    /// are not deduplicated across events. An event from a resource that is
    /// not in the graph is skipped with a warning.
    pub fn matching_edges(&self, events: &[Event], base: Option<&Resource>) -> Vec<Relationship> {
        let mut matched = Vec::new();

        for event in events {
            let source = base.unwrap_or(&event.source);

            if !self.contains(source) {
                warn!(source = %source, "got an event from invalid vertex {}", source);
                continue;
            }

            let triggered = self
                .digraph()
                .adjacent_edges(source, Direction::Outgoing)
                .filter(|edge| edge.label.matches(event.name.as_deref()));

            for edge in triggered {
                info!(
                    source = %source,
                    callback = edge.label.callback.as_deref().unwrap_or_default(),
                    target = %edge.target,
                    "scheduling callback"
                );
                matched.push(Relationship::new(
                    edge.source.clone(),
                    edge.target.clone(),
                    edge.label.clone(),
                ));
            }
        }

        matched
    }
}
