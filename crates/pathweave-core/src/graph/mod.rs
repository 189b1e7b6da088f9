//! Graph storage: the contract the engine traverses and a reference store.
//!
//! The traversal engine only depends on the traits in [`model`]. The
//! in-memory store is one implementation of them: build it with
//! [`InMemoryEdgeStore`], then [`seal`](InMemoryEdgeStore::seal) it into an
//! immutable [`InMemoryGraph`] before reading.
//!
//! # Example
//!
//! ```rust
//! use pathweave_core::graph::{GraphEdge, GraphNode, InMemoryEdgeStore};
//! use pathweave_core::graph::{Edge, Element, Graph, Labels, Vertex};
//!
//! let mut store = InMemoryEdgeStore::new();
//! store.add_node(GraphNode::new(1, "Person")).unwrap();
//! store.add_node(GraphNode::new(2, "Company")).unwrap();
//! store.add_edge(GraphEdge::new(100, 1, 2, "WORKS_AT").unwrap()).unwrap();
//! let graph = store.seal().unwrap();
//!
//! let alice = graph.get_vertex(1).unwrap();
//! let jobs = alice.out_edges(&Labels::from("WORKS_AT"));
//! assert_eq!(jobs.len(), 1);
//! assert_eq!(jobs[0].in_vertex().kind(), "Company");
//! ```

mod edge_store;
mod handle;
pub mod model;
mod types;

#[cfg(test)]
mod edge_store_tests;
#[cfg(test)]
mod handle_tests;

pub use edge_store::InMemoryEdgeStore;
pub use handle::{EdgeHandle, InMemoryGraph, VertexHandle};
pub use model::{Edge, Element, Graph, Labels, Step, Vertex};
pub use types::{GraphEdge, GraphNode};
