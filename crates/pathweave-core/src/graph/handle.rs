//! Sealed, shareable graph and its element handles.
//!
//! An [`InMemoryGraph`] is an `Arc` around a sealed [`InMemoryEdgeStore`].
//! Handles carry a clone of that `Arc` plus an ID, so they are cheap to copy
//! around, outlive any traversal, and can be sent to other threads.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde_json::Value;

use super::edge_store::InMemoryEdgeStore;
use super::model::{Edge, Element, Graph, Labels, Vertex};

/// Read-only graph produced by [`InMemoryEdgeStore::seal`].
#[derive(Clone)]
pub struct InMemoryGraph {
    store: Arc<InMemoryEdgeStore>,
}

impl InMemoryGraph {
    pub(crate) fn from_store(store: InMemoryEdgeStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns the underlying store for read access.
    #[must_use]
    pub fn store(&self) -> &InMemoryEdgeStore {
        &self.store
    }

    /// Looks up an edge handle by ID.
    #[must_use]
    pub fn get_edge(&self, id: u64) -> Option<EdgeHandle> {
        self.store.contains_edge(id).then(|| EdgeHandle {
            store: Arc::clone(&self.store),
            id,
        })
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.store.node_count()
    }
}

impl fmt::Debug for InMemoryGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryGraph")
            .field("nodes", &self.store.node_count())
            .field("edges", &self.store.edge_count())
            .finish()
    }
}

impl Graph for InMemoryGraph {
    type Vertex = VertexHandle;

    fn all_vertices(&self) -> Vec<VertexHandle> {
        self.store
            .node_ids()
            .into_iter()
            .map(|id| VertexHandle {
                store: Arc::clone(&self.store),
                id,
            })
            .collect()
    }

    fn get_vertex(&self, id: u64) -> Option<VertexHandle> {
        self.store.contains_node(id).then(|| VertexHandle {
            store: Arc::clone(&self.store),
            id,
        })
    }
}

/// Vertex of an [`InMemoryGraph`].
#[derive(Clone)]
pub struct VertexHandle {
    store: Arc<InMemoryEdgeStore>,
    id: u64,
}

impl VertexHandle {
    fn edges(&self, ids: &[u64]) -> Vec<EdgeHandle> {
        ids.iter()
            .map(|&id| EdgeHandle {
                store: Arc::clone(&self.store),
                id,
            })
            .collect()
    }

    fn incident(&self, labels: &Labels, outgoing: bool) -> Vec<EdgeHandle> {
        let store = &self.store;
        let ids_for = |label: Option<&str>| {
            if outgoing {
                store.out_edge_ids(self.id, label)
            } else {
                store.in_edge_ids(self.id, label)
            }
        };
        if let Some(label) = labels.single() {
            return self.edges(ids_for(Some(label)));
        }
        let ids = ids_for(None);
        if labels.is_any() {
            return self.edges(ids);
        }
        let kept: Vec<u64> = ids
            .iter()
            .copied()
            .filter(|id| {
                store
                    .edge(*id)
                    .is_some_and(|edge| labels.matches(edge.label()))
            })
            .collect();
        self.edges(&kept)
    }
}

impl PartialEq for VertexHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.store, &other.store)
    }
}

impl Eq for VertexHandle {}

impl Hash for VertexHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for VertexHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v[{}]", self.id)
    }
}

impl Element for VertexHandle {
    fn id(&self) -> u64 {
        self.id
    }

    fn kind(&self) -> &str {
        self.store.node(self.id).map_or("", |node| node.label())
    }

    fn document(&self) -> Option<&Value> {
        self.store.node(self.id)?.document()
    }
}

impl Vertex for VertexHandle {
    type Edge = EdgeHandle;

    fn out_edges(&self, labels: &Labels) -> Vec<EdgeHandle> {
        self.incident(labels, true)
    }

    fn in_edges(&self, labels: &Labels) -> Vec<EdgeHandle> {
        self.incident(labels, false)
    }
}

/// Edge of an [`InMemoryGraph`].
#[derive(Clone)]
pub struct EdgeHandle {
    store: Arc<InMemoryEdgeStore>,
    id: u64,
}

impl EdgeHandle {
    fn endpoint(&self, outgoing: bool) -> VertexHandle {
        // Sealed graphs have no dangling edges, so the record is present.
        let id = self.store.edge(self.id).map_or(0, |edge| {
            if outgoing {
                edge.source()
            } else {
                edge.target()
            }
        });
        VertexHandle {
            store: Arc::clone(&self.store),
            id,
        }
    }
}

impl PartialEq for EdgeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.store, &other.store)
    }
}

impl Eq for EdgeHandle {}

impl Hash for EdgeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EdgeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e[{}]", self.id)
    }
}

impl Element for EdgeHandle {
    fn id(&self) -> u64 {
        self.id
    }

    fn kind(&self) -> &str {
        self.label()
    }

    fn document(&self) -> Option<&Value> {
        self.store.edge(self.id)?.document()
    }
}

impl Edge for EdgeHandle {
    type Vertex = VertexHandle;

    fn label(&self) -> &str {
        self.store.edge(self.id).map_or("", |edge| edge.label())
    }

    fn out_vertex(&self) -> VertexHandle {
        self.endpoint(true)
    }

    fn in_vertex(&self) -> VertexHandle {
        self.endpoint(false)
    }
}
