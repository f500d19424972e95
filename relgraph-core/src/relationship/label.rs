//! Edge labels and events
//!
//! A relationship edge may subscribe to events from its source resource and
//! name a callback to run on its target when a subscribed event fires.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Resource;

/// The events a relationship subscribes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSpec {
    /// Explicitly subscribe to nothing.
    Nothing,
    /// Subscribe to every event the source emits.
    AllEvents,
    /// Subscribe to one named event.
    Named(String),
}

impl EventSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Display for EventSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSpec::Nothing => f.write_str("NONE"),
            EventSpec::AllEvents => f.write_str("ALL_EVENTS"),
            EventSpec::Named(name) => f.write_str(name),
        }
    }
}

/// The label carried by a relationship edge.
///
/// Labels are plain data. Splicing copies them verbatim onto rewired edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
}

impl Label {
    /// A label with neither an event nor a callback: pure ordering.
    pub fn new() -> Self {
        Self::default()
    }

    /// A label that runs `callback` when `event` fires.
    pub fn subscribe(event: EventSpec, callback: impl Into<String>) -> Self {
        Self {
            event: Some(event),
            callback: Some(callback.into()),
        }
    }

    pub fn with_event(mut self, event: EventSpec) -> Self {
        self.event = Some(event);
        self
    }

    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.event.is_none() && self.callback.is_none()
    }

    /// Check whether an event called `fired` should trigger this edge.
    ///
    /// A missing event on either side never matches, and neither does
    /// [`EventSpec::Nothing`].
    pub fn matches(&self, fired: Option<&str>) -> bool {
        match (&self.event, fired) {
            (None, _) | (_, None) => false,
            (Some(EventSpec::Nothing), _) => false,
            (Some(EventSpec::AllEvents), Some(_)) => true,
            (Some(EventSpec::Named(name)), Some(fired)) => name == fired,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.event, &self.callback) {
            (Some(event), Some(callback)) => write!(f, "{} => {}", event, callback),
            (Some(event), None) => write!(f, "{}", event),
            (None, Some(callback)) => write!(f, "=> {}", callback),
            (None, None) => Ok(()),
        }
    }
}

/// A state-change notification emitted by a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Resource,
    /// `None` means the resource changed nothing worth reporting.
    pub name: Option<String>,
}

impl Event {
    pub fn new(source: Resource, name: impl Into<String>) -> Self {
        Self {
            source,
            name: Some(name.into()),
        }
    }

    /// An event that carries no name and so matches no subscription.
    pub fn none(source: Resource) -> Self {
        Self { source, name: None }
    }
}

/// An owned relationship edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub source: Resource,
    pub target: Resource,
    pub label: Label,
}

impl Relationship {
    pub fn new(source: Resource, target: Resource, label: Label) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    pub fn callback(&self) -> Option<&str> {
        self.label.callback.as_deref()
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.source, self.target)
    }
}
