//! Mutable build phase of an in-memory graph.
//!
//! Nodes and edges are added to an [`InMemoryEdgeStore`], then
//! [`seal`](InMemoryEdgeStore::seal) checks the edges and freezes everything
//! into an [`InMemoryGraph`] for traversal.

use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::error::{Error, Result};

use super::handle::InMemoryGraph;
use super::types::{GraphEdge, GraphNode};

/// Edge IDs incident to one node, per direction, in insertion order.
#[derive(Debug, Default)]
struct Adjacency {
    out: Vec<u64>,
    inbound: Vec<u64>,
    out_by_label: FxHashMap<String, Vec<u64>>,
    in_by_label: FxHashMap<String, Vec<u64>>,
}

impl Adjacency {
    fn link(&mut self, outgoing: bool, label: &str, edge_id: u64) {
        let (all, by_label) = if outgoing {
            (&mut self.out, &mut self.out_by_label)
        } else {
            (&mut self.inbound, &mut self.in_by_label)
        };
        all.push(edge_id);
        by_label.entry(label.to_owned()).or_default().push(edge_id);
    }

    fn unlink(&mut self, outgoing: bool, label: &str, edge_id: u64) {
        let (all, by_label) = if outgoing {
            (&mut self.out, &mut self.out_by_label)
        } else {
            (&mut self.inbound, &mut self.in_by_label)
        };
        all.retain(|&id| id != edge_id);
        if let Some(ids) = by_label.get_mut(label) {
            ids.retain(|&id| id != edge_id);
            if ids.is_empty() {
                by_label.remove(label);
            }
        }
    }

    fn ids(&self, outgoing: bool, label: Option<&str>) -> &[u64] {
        match (outgoing, label) {
            (true, None) => self.out.as_slice(),
            (false, None) => self.inbound.as_slice(),
            (true, Some(label)) => self.out_by_label.get(label).map_or(&[], Vec::as_slice),
            (false, Some(label)) => self.in_by_label.get(label).map_or(&[], Vec::as_slice),
        }
    }
}

/// Graph under construction.
///
/// Every node keeps its incident edge IDs per direction, both unfiltered and
/// grouped by label, so neighbor lookups never scan unrelated edges. Edge
/// endpoints may be added in any order; they are only checked on
/// [`seal`](Self::seal).
#[derive(Debug, Default)]
pub struct InMemoryEdgeStore {
    nodes: FxHashMap<u64, GraphNode>,
    edges: FxHashMap<u64, GraphEdge>,
    adjacency: FxHashMap<u64, Adjacency>,
}

impl InMemoryEdgeStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store sized for the given counts.
    #[must_use]
    pub fn with_capacity(expected_edges: usize, expected_nodes: usize) -> Self {
        Self {
            nodes: FxHashMap::with_capacity_and_hasher(expected_nodes, FxBuildHasher),
            edges: FxHashMap::with_capacity_and_hasher(expected_edges, FxBuildHasher),
            adjacency: FxHashMap::with_capacity_and_hasher(expected_nodes, FxBuildHasher),
        }
    }

    /// Inserts a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NodeExists`] if the ID is taken.
    pub fn add_node(&mut self, node: GraphNode) -> Result<()> {
        let id = node.id();
        if self.nodes.contains_key(&id) {
            return Err(Error::NodeExists(id));
        }
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Inserts an edge and indexes it under both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EdgeExists`] if the ID is taken.
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<()> {
        let id = edge.id();
        if self.edges.contains_key(&id) {
            return Err(Error::EdgeExists(id));
        }
        self.adjacency
            .entry(edge.source())
            .or_default()
            .link(true, edge.label(), id);
        self.adjacency
            .entry(edge.target())
            .or_default()
            .link(false, edge.label(), id);
        self.edges.insert(id, edge);
        Ok(())
    }

    /// Deletes a node together with every edge touching it.
    pub fn remove_node(&mut self, id: u64) -> Option<GraphNode> {
        let node = self.nodes.remove(&id)?;
        if let Some(adjacency) = self.adjacency.remove(&id) {
            for edge_id in adjacency.out.into_iter().chain(adjacency.inbound) {
                self.remove_edge(edge_id);
            }
        }
        Some(node)
    }

    /// Deletes an edge and its index entries.
    pub fn remove_edge(&mut self, id: u64) -> Option<GraphEdge> {
        let edge = self.edges.remove(&id)?;
        for (node, outgoing) in [(edge.source(), true), (edge.target(), false)] {
            if let Some(adjacency) = self.adjacency.get_mut(&node) {
                adjacency.unlink(outgoing, edge.label(), id);
            }
        }
        Some(edge)
    }

    /// Node record by ID.
    #[must_use]
    pub fn node(&self, id: u64) -> Option<&GraphNode> {
        self.nodes.get(&id)
    }

    /// Edge record by ID.
    #[must_use]
    pub fn edge(&self, id: u64) -> Option<&GraphEdge> {
        self.edges.get(&id)
    }

    /// Returns true if the node was added.
    #[must_use]
    pub fn contains_node(&self, id: u64) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Returns true if the edge was added.
    #[must_use]
    pub fn contains_edge(&self, id: u64) -> bool {
        self.edges.contains_key(&id)
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node IDs in ascending order.
    #[must_use]
    pub fn node_ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// IDs of edges leaving `node`, optionally restricted to one label.
    #[must_use]
    pub fn out_edge_ids(&self, node: u64, label: Option<&str>) -> &[u64] {
        self.adjacency
            .get(&node)
            .map_or(&[], |adjacency| adjacency.ids(true, label))
    }

    /// IDs of edges entering `node`, optionally restricted to one label.
    #[must_use]
    pub fn in_edge_ids(&self, node: u64, label: Option<&str>) -> &[u64] {
        self.adjacency
            .get(&node)
            .map_or(&[], |adjacency| adjacency.ids(false, label))
    }

    /// Edges leaving `node`.
    pub fn out_edges(&self, node: u64) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.out_edge_ids(node, None)
            .iter()
            .filter_map(|id| self.edges.get(id))
    }

    /// Edges entering `node`.
    pub fn in_edges(&self, node: u64) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.in_edge_ids(node, None)
            .iter()
            .filter_map(|id| self.edges.get(id))
    }

    /// Number of edges leaving `node`.
    #[must_use]
    pub fn out_degree(&self, node: u64) -> usize {
        self.out_edge_ids(node, None).len()
    }

    /// Number of edges entering `node`.
    #[must_use]
    pub fn in_degree(&self, node: u64) -> usize {
        self.in_edge_ids(node, None).len()
    }

    /// Checks every edge endpoint and freezes the store.
    ///
    /// Edges are checked in ascending ID order, so the reported edge is
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DanglingEdge`] for the first edge naming a node that
    /// was never added.
    pub fn seal(self) -> Result<InMemoryGraph> {
        let mut edge_ids: Vec<u64> = self.edges.keys().copied().collect();
        edge_ids.sort_unstable();
        let mut self_loops = 0_usize;
        for id in edge_ids {
            let Some(edge) = self.edges.get(&id) else {
                continue;
            };
            if let Some(node) = [edge.source(), edge.target()]
                .into_iter()
                .find(|node| !self.nodes.contains_key(node))
            {
                return Err(Error::DanglingEdge { edge: id, node });
            }
            if edge.source() == edge.target() {
                self_loops += 1;
            }
        }
        if self_loops > 0 {
            tracing::warn!(self_loops, "Sealed graph contains self-loops");
        }
        tracing::debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "Sealed in-memory graph"
        );
        Ok(InMemoryGraph::from_store(self))
    }
}
