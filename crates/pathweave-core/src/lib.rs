//! # pathweave Core
//!
//! Lazy graph traversal engine.
//!
//! Traversals are built by composing plain functions over routes: anything
//! iterable of graph elements. Nothing touches the graph until the result is
//! iterated, and a consumer that stops early never pays for the rest.
//!
//! ## Features
//!
//! - **Path tracking**: wrap an element with [`path::WithPath`] and every step
//!   from it carries its lineage, without mutating the graph
//! - **Combinators**: directional steps, filters, lookaheads, repeat guards,
//!   branch/merge in [`traversal`]
//! - **Recursive descent**: a control-driven walk with cycle cutting, depth
//!   bounds and a hidden-cycle failsafe in [`descend`]
//! - **Reference store**: [`graph::InMemoryEdgeStore`], sealed into an
//!   immutable, thread-safe [`graph::InMemoryGraph`]
//!
//! ## Quick Start
//!
//! ```rust
//! use pathweave_core::descend::{all_cycle_paths, deepest};
//! use pathweave_core::graph::{Element, Graph, GraphEdge, GraphNode, InMemoryEdgeStore};
//! use pathweave_core::path::WithPath;
//! use pathweave_core::traversal::out_by;
//!
//! fn main() -> pathweave_core::Result<()> {
//!     let mut store = InMemoryEdgeStore::new();
//!     for id in 1..=4 {
//!         store.add_node(GraphNode::new(id, "Task"))?;
//!     }
//!     store.add_edge(GraphEdge::new(10, 1, 2, "BLOCKS")?)?;
//!     store.add_edge(GraphEdge::new(11, 2, 3, "BLOCKS")?)?;
//!     store.add_edge(GraphEdge::new(12, 3, 1, "BLOCKS")?)?;
//!     store.add_edge(GraphEdge::new(13, 3, 4, "BLOCKS")?)?;
//!     let graph = store.seal()?;
//!
//!     // Tasks nothing else waits on
//!     let ends: Vec<u64> = deepest(|v| out_by("BLOCKS", Some(v.clone())), graph.get_vertex(1))
//!         .map(|v| v.id())
//!         .collect();
//!     assert_eq!(ends, vec![4]);
//!
//!     // Dependency loops through task 1
//!     let start = graph.get_vertex(1).map(|v| v.with_path());
//!     let loops: Vec<Vec<u64>> = all_cycle_paths(4, |v| out_by("BLOCKS", Some(v.clone())), start)?
//!         .map(|path| path.iter().map(Element::id).collect())
//!         .collect();
//!     assert_eq!(loops, vec![vec![1, 2, 3, 1]]);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::single_match_else,
        clippy::cast_possible_truncation,
        clippy::manual_assert
    )
)]

pub mod config;
#[cfg(test)]
mod config_tests;
pub mod descend;
pub mod error;
pub mod graph;
pub mod path;
pub mod traversal;

pub use config::PathweaveConfig;
pub use error::{Error, Result};
