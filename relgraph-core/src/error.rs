//! Error types for graph operations
//!
//! Query operations never fail: an unknown resource simply has no
//! dependencies. Errors come from splicing and from exporting.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur during graph operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GraphError {
    /// A rewired edge would start at a container that was not flattened.
    ///
    /// Containers were resolved out of order; the splice is aborted.
    #[error("Source {resource} is still a container")]
    ContainerSource {
        /// Reference of the offending resource
        resource: String,
    },

    /// A rewired edge would end at a container that was not flattened.
    #[error("Target {resource} is still a container")]
    ContainerTarget {
        /// Reference of the offending resource
        resource: String,
    },

    /// A rewired edge closed a dependency cycle.
    #[error("{source_ref} => {target_ref} results in a loop")]
    Cycle {
        /// Reference of the new edge's source
        source_ref: String,
        /// Reference of the new edge's target
        target_ref: String,
    },

    /// Writing an export file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Export options could not be parsed.
    #[error("Invalid export configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

impl GraphError {
    pub fn container_source(resource: impl Into<String>) -> Self {
        Self::ContainerSource {
            resource: resource.into(),
        }
    }

    pub fn container_target(resource: impl Into<String>) -> Self {
        Self::ContainerTarget {
            resource: resource.into(),
        }
    }

    pub fn cycle(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::Cycle {
            source_ref: source.into(),
            target_ref: target.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
