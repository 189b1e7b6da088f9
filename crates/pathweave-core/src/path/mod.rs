//! Path tracking: decorate vertices and edges with traversal lineage.
//!
//! [`PathVertex`] and [`PathEdge`] wrap raw elements and implement the same
//! [`Vertex`] / [`Edge`] contract, so every combinator works on them
//! unchanged. Neighbor queries on a wrapped element delegate to the raw
//! element and re-wrap each result with a back-link to the element they were
//! reached from. Lineage therefore accumulates hop by hop, only along the
//! routes a traversal actually follows, with no central bookkeeping.
//!
//! Equality and hashing of a wrapped element are those of the raw element:
//! two wrappers around the same vertex are equal whatever their lineage.
//!
//! ```rust
//! use pathweave_core::graph::{GraphEdge, GraphNode, InMemoryEdgeStore, Graph};
//! use pathweave_core::path::{Lineage, WithPath};
//! use pathweave_core::traversal::{in_v, out_e};
//!
//! let mut store = InMemoryEdgeStore::new();
//! store.add_node(GraphNode::new(1, "A")).unwrap();
//! store.add_node(GraphNode::new(2, "B")).unwrap();
//! store.add_edge(GraphEdge::new(10, 1, 2, "NEXT").unwrap()).unwrap();
//! let graph = store.seal().unwrap();
//!
//! let start = graph.get_vertex(1).unwrap().with_path();
//! let reached: Vec<_> = in_v(out_e(Some(start))).collect();
//! let ids: Vec<u64> = reached[0].path().iter().map(|step| step.id()).collect();
//! assert_eq!(ids, vec![1, 10, 2]);
//! ```

mod lineage;

#[cfg(test)]
mod path_tests;

pub use lineage::{with_repeated_edge, without_repeated_edge, Lineage, ReversePath};

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::Value;

use crate::graph::{
    Edge, EdgeHandle, Element, Graph, InMemoryGraph, Labels, Step, Vertex, VertexHandle,
};

/// One link of a lineage chain: a raw step and its predecessor.
pub(crate) struct Link<V: Vertex> {
    pub(crate) step: Step<V, V::Edge>,
    pub(crate) via_out: Option<bool>,
    pub(crate) back: Option<Arc<Link<V>>>,
}

/// A vertex carrying the lineage it was reached through.
pub struct PathVertex<V: Vertex> {
    raw: V,
    back: Option<Arc<Link<V>>>,
}

/// An edge carrying the lineage it was reached through and the direction it
/// was followed in.
pub struct PathEdge<V: Vertex> {
    raw: V::Edge,
    via_out: Option<bool>,
    back: Option<Arc<Link<V>>>,
}

impl<V: Vertex> PathVertex<V> {
    /// Starts a new lineage at `raw`.
    ///
    /// Unlike [`WithPath::with_path`], this always adds a layer, even when
    /// `raw` is itself path-tracked.
    #[must_use]
    pub fn root(raw: V) -> Self {
        Self { raw, back: None }
    }

    /// The wrapped element.
    #[must_use]
    pub fn raw(&self) -> &V {
        &self.raw
    }

    /// The wrapped element that preceded this one, or `None` at a root.
    #[must_use]
    pub fn previous(&self) -> Option<Step<PathVertex<V>, PathEdge<V>>> {
        self.back.as_deref().map(Link::rewrap)
    }

    fn link(&self) -> Arc<Link<V>> {
        Arc::new(Link {
            step: Step::Vertex(self.raw.clone()),
            via_out: None,
            back: self.back.clone(),
        })
    }

    fn wrap_edges(&self, edges: Vec<V::Edge>, via_out: bool) -> Vec<PathEdge<V>> {
        if edges.is_empty() {
            return Vec::new();
        }
        let link = self.link();
        edges
            .into_iter()
            .map(|raw| PathEdge {
                raw,
                via_out: Some(via_out),
                back: Some(Arc::clone(&link)),
            })
            .collect()
    }
}

impl<V: Vertex> PathEdge<V> {
    /// Starts a new lineage at `raw`. The traversal direction is unknown.
    #[must_use]
    pub fn root(raw: V::Edge) -> Self {
        Self {
            raw,
            via_out: None,
            back: None,
        }
    }

    /// The wrapped edge.
    #[must_use]
    pub fn raw(&self) -> &V::Edge {
        &self.raw
    }

    /// The wrapped element that preceded this one, or `None` at a root.
    #[must_use]
    pub fn previous(&self) -> Option<Step<PathVertex<V>, PathEdge<V>>> {
        self.back.as_deref().map(Link::rewrap)
    }

    fn link(&self) -> Arc<Link<V>> {
        Arc::new(Link {
            step: Step::Edge(self.raw.clone()),
            via_out: self.via_out,
            back: self.back.clone(),
        })
    }

    fn wrap_vertex(&self, raw: V) -> PathVertex<V> {
        PathVertex {
            raw,
            back: Some(self.link()),
        }
    }
}

impl<V: Vertex> Link<V> {
    fn rewrap(&self) -> Step<PathVertex<V>, PathEdge<V>> {
        match &self.step {
            Step::Vertex(raw) => Step::Vertex(PathVertex {
                raw: raw.clone(),
                back: self.back.clone(),
            }),
            Step::Edge(raw) => Step::Edge(PathEdge {
                raw: raw.clone(),
                via_out: self.via_out,
                back: self.back.clone(),
            }),
        }
    }
}

// ── Identity: wrappers are transparent to equality and hashing ─────────

impl<V: Vertex> Clone for PathVertex<V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            back: self.back.clone(),
        }
    }
}

impl<V: Vertex> PartialEq for PathVertex<V> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<V: Vertex> Eq for PathVertex<V> {}

impl<V: Vertex> Hash for PathVertex<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<V: Vertex> fmt::Debug for PathVertex<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathVertex").field(&self.raw).finish()
    }
}

impl<V: Vertex> Clone for PathEdge<V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            via_out: self.via_out,
            back: self.back.clone(),
        }
    }
}

impl<V: Vertex> PartialEq for PathEdge<V> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<V: Vertex> Eq for PathEdge<V> {}

impl<V: Vertex> Hash for PathEdge<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<V: Vertex> fmt::Debug for PathEdge<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PathEdge").field(&self.raw).finish()
    }
}

// ── Storage contract, delegated with re-wrapping ───────────────────────

impl<V: Vertex> Element for PathVertex<V> {
    fn id(&self) -> u64 {
        self.raw.id()
    }

    fn kind(&self) -> &str {
        self.raw.kind()
    }

    fn document(&self) -> Option<&Value> {
        self.raw.document()
    }

    fn is_path_tracked(&self) -> bool {
        true
    }
}

impl<V: Vertex> Vertex for PathVertex<V> {
    type Edge = PathEdge<V>;

    fn out_edges(&self, labels: &Labels) -> Vec<PathEdge<V>> {
        self.wrap_edges(self.raw.out_edges(labels), true)
    }

    fn in_edges(&self, labels: &Labels) -> Vec<PathEdge<V>> {
        self.wrap_edges(self.raw.in_edges(labels), false)
    }
}

impl<V: Vertex> Element for PathEdge<V> {
    fn id(&self) -> u64 {
        self.raw.id()
    }

    fn kind(&self) -> &str {
        self.raw.kind()
    }

    fn document(&self) -> Option<&Value> {
        self.raw.document()
    }

    fn is_path_tracked(&self) -> bool {
        true
    }
}

impl<V: Vertex> Edge for PathEdge<V> {
    type Vertex = PathVertex<V>;

    fn label(&self) -> &str {
        self.raw.label()
    }

    fn out_vertex(&self) -> PathVertex<V> {
        self.wrap_vertex(self.raw.out_vertex())
    }

    fn in_vertex(&self) -> PathVertex<V> {
        self.wrap_vertex(self.raw.in_vertex())
    }

    fn traversed_out(&self) -> Option<bool> {
        self.via_out
    }
}

/// A graph source whose vertices start new lineages.
#[derive(Debug, Clone)]
pub struct PathGraph<G> {
    graph: G,
}

impl<G: Graph> PathGraph<G> {
    /// Wraps a graph source.
    #[must_use]
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    /// The wrapped graph source.
    #[must_use]
    pub fn inner(&self) -> &G {
        &self.graph
    }
}

impl<G: Graph> Graph for PathGraph<G> {
    type Vertex = PathVertex<G::Vertex>;

    fn all_vertices(&self) -> Vec<Self::Vertex> {
        self.graph
            .all_vertices()
            .into_iter()
            .map(PathVertex::root)
            .collect()
    }

    fn get_vertex(&self, id: u64) -> Option<Self::Vertex> {
        self.graph.get_vertex(id).map(PathVertex::root)
    }
}

// ── Entering and leaving path tracking ─────────────────────────────────

/// Begins lineage tracking.
///
/// Raw elements and graphs are wrapped as roots. Elements that are already
/// tracked are re-rooted: their back-link is dropped, no layer is added.
pub trait WithPath {
    /// The tracked form.
    type Tracked;

    /// Starts tracking lineage from this value.
    fn with_path(self) -> Self::Tracked;
}

impl WithPath for VertexHandle {
    type Tracked = PathVertex<VertexHandle>;

    fn with_path(self) -> Self::Tracked {
        PathVertex::root(self)
    }
}

impl WithPath for EdgeHandle {
    type Tracked = PathEdge<VertexHandle>;

    fn with_path(self) -> Self::Tracked {
        PathEdge::root(self)
    }
}

impl WithPath for InMemoryGraph {
    type Tracked = PathGraph<InMemoryGraph>;

    fn with_path(self) -> Self::Tracked {
        PathGraph::new(self)
    }
}

impl<V: Vertex> WithPath for PathVertex<V> {
    type Tracked = Self;

    fn with_path(self) -> Self {
        Self {
            raw: self.raw,
            back: None,
        }
    }
}

impl<V: Vertex> WithPath for PathEdge<V> {
    type Tracked = Self;

    fn with_path(self) -> Self {
        Self {
            raw: self.raw,
            via_out: self.via_out,
            back: None,
        }
    }
}

impl<G: Graph> WithPath for PathGraph<G> {
    type Tracked = Self;

    fn with_path(self) -> Self {
        self
    }
}

/// Removes path-tracking layers.
///
/// Both operations are no-ops on raw elements.
pub trait Strip {
    /// Type one layer down.
    type Inner;
    /// Raw storage type at the bottom of every layer.
    type Raw;

    /// Removes one layer of path tracking.
    fn strip_one_path_layer(&self) -> Self::Inner;

    /// Removes every layer of path tracking.
    fn strip_all_path_layers(&self) -> Self::Raw;

    /// Number of path-tracking layers around the raw element.
    fn wrap_depth(&self) -> usize;
}

impl Strip for VertexHandle {
    type Inner = Self;
    type Raw = Self;

    fn strip_one_path_layer(&self) -> Self {
        self.clone()
    }

    fn strip_all_path_layers(&self) -> Self {
        self.clone()
    }

    fn wrap_depth(&self) -> usize {
        0
    }
}

impl Strip for EdgeHandle {
    type Inner = Self;
    type Raw = Self;

    fn strip_one_path_layer(&self) -> Self {
        self.clone()
    }

    fn strip_all_path_layers(&self) -> Self {
        self.clone()
    }

    fn wrap_depth(&self) -> usize {
        0
    }
}

impl<V: Vertex + Strip> Strip for PathVertex<V> {
    type Inner = V;
    type Raw = V::Raw;

    fn strip_one_path_layer(&self) -> V {
        self.raw.clone()
    }

    fn strip_all_path_layers(&self) -> V::Raw {
        self.raw.strip_all_path_layers()
    }

    fn wrap_depth(&self) -> usize {
        1 + self.raw.wrap_depth()
    }
}

impl<V> Strip for PathEdge<V>
where
    V: Vertex,
    V::Edge: Strip,
{
    type Inner = V::Edge;
    type Raw = <V::Edge as Strip>::Raw;

    fn strip_one_path_layer(&self) -> V::Edge {
        self.raw.clone()
    }

    fn strip_all_path_layers(&self) -> Self::Raw {
        self.raw.strip_all_path_layers()
    }

    fn wrap_depth(&self) -> usize {
        1 + self.raw.wrap_depth()
    }
}
