//! JSON graph files.
//!
//! ```json
//! {
//!   "nodes": [{"id": 1, "label": "Person", "document": {"name": "Alice"}}],
//!   "edges": [{"id": 10, "source": 1, "target": 2, "label": "KNOWS"}]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pathweave_core::graph::{GraphEdge, GraphNode, InMemoryEdgeStore, InMemoryGraph};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct GraphFile {
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<GraphEdge>,
}

/// Reads and seals the graph stored at `path`.
pub fn load_graph(path: &Path) -> Result<InMemoryGraph> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;
    parse_graph(&content).with_context(|| format!("Invalid graph file {}", path.display()))
}

/// Builds a sealed graph from JSON text.
pub fn parse_graph(content: &str) -> Result<InMemoryGraph> {
    let file: GraphFile = serde_json::from_str(content).context("Malformed graph JSON")?;
    let mut store = InMemoryEdgeStore::with_capacity(file.edges.len(), file.nodes.len());
    let node_count = file.nodes.len();
    let edge_count = file.edges.len();

    for node in file.nodes {
        store.add_node(node)?;
    }
    for edge in file.edges {
        // Re-run label validation skipped by deserialization
        let mut checked = GraphEdge::new(edge.id(), edge.source(), edge.target(), edge.label())?;
        if let Some(document) = edge.document() {
            checked = checked.with_document(document.clone());
        }
        store.add_edge(checked)?;
    }

    debug!(nodes = node_count, edges = edge_count, "Parsed graph file");
    Ok(store.seal()?)
}
