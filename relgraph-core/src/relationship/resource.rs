//! Resources
//!
//! A resource is one unit of declared system state and the vertex type of the
//! relationship graph.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Identifies a kind of container resource (a class, a defined type, ...).
///
/// Containers are tagged when the resource is built. The splicer asks the
/// tag, it never inspects the resource any other way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerKind(String);

impl ContainerKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct ResourceData {
    type_name: String,
    title: String,
    reference: String,
    container: Option<ContainerKind>,
}

/// A declared resource.
///
/// Identity is the pair (type name, title). Clones share their data, so
/// handing resources around the graph is cheap.
///
/// # Example
///
/// ```
/// use relgraph_core::relationship::{ContainerKind, Resource};
///
/// let file = Resource::new("file", "/etc/motd");
/// assert_eq!(file.reference(), "File[/etc/motd]");
///
/// let class = Resource::container("class", "ntp", ContainerKind::new("class"));
/// assert!(class.is_container_of(&ContainerKind::new("class")));
/// ```
#[derive(Clone)]
pub struct Resource {
    data: Arc<ResourceData>,
}

impl Resource {
    /// Create a plain resource.
    pub fn new(type_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self::build(type_name.into(), title.into(), None)
    }

    /// Create a container resource of the given kind.
    pub fn container(
        type_name: impl Into<String>,
        title: impl Into<String>,
        kind: ContainerKind,
    ) -> Self {
        Self::build(type_name.into(), title.into(), Some(kind))
    }

    fn build(type_name: String, title: String, container: Option<ContainerKind>) -> Self {
        let reference = format!("{}[{}]", capitalize(&type_name), title);
        Self {
            data: Arc::new(ResourceData {
                type_name,
                title,
                reference,
                container,
            }),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.data.type_name
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    /// Human-readable reference, `Type[title]`.
    pub fn reference(&self) -> &str {
        &self.data.reference
    }

    /// The container kind this resource was tagged with, if any.
    pub fn container_kind(&self) -> Option<&ContainerKind> {
        self.data.container.as_ref()
    }

    /// Check whether this resource is a container of `kind`.
    pub fn is_container_of(&self, kind: &ContainerKind) -> bool {
        self.data.container.as_ref() == Some(kind)
    }
}

/// Capitalize each `::`-separated segment, so `foo::bar` becomes `Foo::Bar`.
fn capitalize(type_name: &str) -> String {
    type_name
        .split("::")
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("::")
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
            || (self.data.type_name == other.data.type_name
                && self.data.title == other.data.title)
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data.type_name.hash(state);
        self.data.title.hash(state);
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.reference)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data.container {
            Some(kind) => write!(f, "Resource({}, container: {})", self, kind),
            None => write!(f, "Resource({})", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn reference_capitalizes_type() {
        assert_eq!(Resource::new("file", "/tmp/x").reference(), "File[/tmp/x]");
        assert_eq!(
            Resource::new("apache::vhost", "site").reference(),
            "Apache::Vhost[site]"
        );
    }

    #[test]
    fn identity_is_type_and_title() {
        let a = Resource::new("file", "/tmp/x");
        let b = Resource::new("file", "/tmp/x");
        let c = Resource::new("package", "/tmp/x");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn container_tag() {
        let kind = ContainerKind::new("component");
        let other = ContainerKind::new("stage");
        let group = Resource::container("component", "web", kind.clone());
        let file = Resource::new("file", "/tmp/x");

        assert_eq!(group.container_kind(), Some(&kind));
        assert!(group.is_container_of(&kind));
        assert!(!group.is_container_of(&other));
        assert!(!file.is_container_of(&kind));
        assert!(file.container_kind().is_none());
    }

    #[test]
    fn display_and_debug() {
        let group = Resource::container("class", "ntp", ContainerKind::new("class"));
        assert_eq!(group.to_string(), "Class[ntp]");
        assert_eq!(format!("{:?}", group), "Resource(Class[ntp], container: class)");
    }
}
