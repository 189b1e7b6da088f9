//! Storage contract consumed by the traversal engine.
//!
//! Any graph store can be traversed by implementing [`Vertex`], [`Edge`] and
//! [`Graph`] for its element handles. The engine only ever calls the methods
//! declared here; it never mutates storage.
//!
//! The element set is closed: a traversal step is either a vertex or an edge
//! (see [`Step`]), and graph sources are the entry points that produce
//! vertices. Path tracking is layered on top by decorators in
//! [`crate::path`] that implement these same traits.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use serde_json::Value;
use smallvec::SmallVec;

/// Behaviour shared by vertices and edges.
///
/// Equality and hashing must depend only on element identity, so that
/// decorated elements compare equal to the raw element they wrap.
pub trait Element: Clone + Eq + Hash + fmt::Debug {
    /// Stable identifier of the element within its graph.
    fn id(&self) -> u64;

    /// Derived kind: the node label for vertices, the edge label for edges.
    fn kind(&self) -> &str;

    /// Attached document, if any.
    fn document(&self) -> Option<&Value>;

    /// Returns true if this element carries traversal lineage.
    fn is_path_tracked(&self) -> bool {
        false
    }
}

/// A vertex: produces its incident edges in either direction.
pub trait Vertex: Element {
    /// Edge type produced by this vertex.
    type Edge: Edge<Vertex = Self>;

    /// Outgoing edges (this vertex is the source), restricted to `labels`.
    fn out_edges(&self, labels: &Labels) -> Vec<Self::Edge>;

    /// Incoming edges (this vertex is the target), restricted to `labels`.
    fn in_edges(&self, labels: &Labels) -> Vec<Self::Edge>;
}

/// An edge: a label and two endpoints fixed by the edge's own direction.
pub trait Edge: Element {
    /// Vertex type at either endpoint.
    type Vertex: Vertex<Edge = Self>;

    /// Edge label.
    fn label(&self) -> &str;

    /// Source endpoint.
    fn out_vertex(&self) -> Self::Vertex;

    /// Target endpoint.
    fn in_vertex(&self) -> Self::Vertex;

    /// Direction this edge was followed in to reach it, when known.
    ///
    /// `Some(true)` means it was reached by following an outgoing edge from
    /// its source. Raw storage edges have no traversal history and return
    /// `None`.
    fn traversed_out(&self) -> Option<bool> {
        None
    }
}

/// A graph source: entry point producing vertices.
pub trait Graph {
    /// Vertex type of this graph.
    type Vertex: Vertex;

    /// All vertices, in a stable order.
    fn all_vertices(&self) -> Vec<Self::Vertex>;

    /// Looks up a vertex by ID.
    fn get_vertex(&self, id: u64) -> Option<Self::Vertex>;
}

/// One step of a traversal lineage: either a vertex or an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step<V, E> {
    /// A vertex step.
    Vertex(V),
    /// An edge step.
    Edge(E),
}

impl<V, E> Step<V, E> {
    /// Returns true for vertex steps.
    #[must_use]
    pub fn is_vertex(&self) -> bool {
        matches!(self, Step::Vertex(_))
    }

    /// Returns true for edge steps.
    #[must_use]
    pub fn is_edge(&self) -> bool {
        matches!(self, Step::Edge(_))
    }

    /// Returns the vertex, if this is a vertex step.
    #[must_use]
    pub fn as_vertex(&self) -> Option<&V> {
        match self {
            Step::Vertex(v) => Some(v),
            Step::Edge(_) => None,
        }
    }

    /// Returns the edge, if this is an edge step.
    #[must_use]
    pub fn as_edge(&self) -> Option<&E> {
        match self {
            Step::Edge(e) => Some(e),
            Step::Vertex(_) => None,
        }
    }
}

impl<V: Element, E: Element> Step<V, E> {
    /// ID of the underlying element.
    #[must_use]
    pub fn id(&self) -> u64 {
        match self {
            Step::Vertex(v) => v.id(),
            Step::Edge(e) => e.id(),
        }
    }
}

/// A set of edge labels used to restrict neighbor queries.
///
/// The empty set matches every label. Cloning is cheap, so a label set can be
/// moved into lazy iterators freely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels(SmallVec<[Arc<str>; 2]>);

impl Labels {
    /// Matches any label.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches exactly the given labels (an empty input matches any label).
    #[must_use]
    pub fn of<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: SmallVec<[Arc<str>; 2]> = SmallVec::new();
        for label in labels {
            let label = label.as_ref();
            if !set.iter().any(|l| l.as_ref() == label) {
                set.push(Arc::from(label));
            }
        }
        Self(set)
    }

    /// Returns true if this set places no restriction.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `label` passes this set.
    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        self.is_any() || self.0.iter().any(|l| l.as_ref() == label)
    }

    /// Returns the label when the set names exactly one.
    #[must_use]
    pub fn single(&self) -> Option<&str> {
        match self.0.as_slice() {
            [only] => Some(only.as_ref()),
            _ => None,
        }
    }

    /// Iterates the named labels.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(AsRef::as_ref)
    }
}

impl From<&str> for Labels {
    fn from(label: &str) -> Self {
        Self::of([label])
    }
}

impl From<String> for Labels {
    fn from(label: String) -> Self {
        Self::of([label])
    }
}

impl From<&[&str]> for Labels {
    fn from(labels: &[&str]) -> Self {
        Self::of(labels)
    }
}

impl<const N: usize> From<[&str; N]> for Labels {
    fn from(labels: [&str; N]) -> Self {
        Self::of(labels)
    }
}

impl From<Vec<&str>> for Labels {
    fn from(labels: Vec<&str>) -> Self {
        Self::of(labels)
    }
}

impl From<Vec<String>> for Labels {
    fn from(labels: Vec<String>) -> Self {
        Self::of(labels)
    }
}
