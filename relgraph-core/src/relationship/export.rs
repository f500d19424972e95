//! Graphviz export
//!
//! Renders the relationship graph as DOT text and writes it to disk. Turning
//! the `.dot` file into an image is left to the `dot` tool.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::RelationshipGraph;
use crate::error::{GraphError, GraphResult};
use crate::graph::Direction;

/// Options for DOT export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Name of the generated `digraph`.
    pub graph_name: String,
    /// Graphviz `rankdir` (`TB`, `LR`, ...).
    pub rankdir: String,
    /// Print event and callback on edges.
    pub label_edges: bool,
    /// Emit resources that have no relationships.
    pub include_isolated: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            graph_name: "relationships".to_string(),
            rankdir: "TB".to_string(),
            label_edges: true,
            include_isolated: true,
        }
    }
}

impl ExportConfig {
    /// Parse options from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Quote a DOT identifier.
fn quote(id: &str) -> String {
    let mut quoted = String::with_capacity(id.len() + 2);
    quoted.push('"');
    for c in id.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

impl RelationshipGraph {
    /// Render the graph as DOT.
    pub fn to_dot(&self, config: &ExportConfig) -> String {
        let graph = self.digraph().induced_subgraph(self.vertices());
        let mut dot = String::new();

        // Writing to a String cannot fail.
        let _ = writeln!(dot, "digraph {} {{", quote(&config.graph_name));
        let _ = writeln!(dot, "    rankdir={};", config.rankdir);

        for resource in graph.vertices() {
            let connected = graph.degree(resource, Direction::Outgoing) > 0
                || graph.degree(resource, Direction::Incoming) > 0;
            if connected || config.include_isolated {
                let _ = writeln!(dot, "    {};", quote(resource.reference()));
            }
        }

        for edge in graph.edges() {
            let _ = write!(
                dot,
                "    {} -> {}",
                quote(edge.source.reference()),
                quote(edge.target.reference())
            );
            if config.label_edges && !edge.label.is_empty() {
                let _ = write!(dot, " [label={}]", quote(&edge.label.to_string()));
            }
            dot.push_str(";\n");
        }

        dot.push_str("}\n");
        dot
    }

    /// Write the DOT rendering to `<dir>/<name>.dot` and return the path.
    pub fn write_dot(
        &self,
        dir: impl AsRef<Path>,
        name: &str,
        config: &ExportConfig,
    ) -> GraphResult<PathBuf> {
        let path = dir.as_ref().join(format!("{name}.dot"));
        fs::write(&path, self.to_dot(config)).map_err(|e| GraphError::io(&path, e))?;

        info!(
            path = %path.display(),
            vertices = self.vertex_count(),
            edges = self.edge_count(),
            "wrote relationship graph"
        );
        Ok(path)
    }
}
