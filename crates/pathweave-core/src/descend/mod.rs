//! Generic recursive descent.
//!
//! A descent walks a tree implied by a `children(path, element)` function,
//! asking a `control(path, element)` function for an [`Instruction`] at
//! every element: whether to emit it, whether to expand it, and whether to
//! keep visiting its siblings. Graph reachability, leaf finding and cycle
//! discovery are all descents with a particular rule; see [`all`],
//! [`deepest`] and [`all_cycles`].
//!
//! # Example
//!
//! ```rust
//! use pathweave_core::descend::{all, all_cycles};
//! use pathweave_core::graph::{Element, GraphEdge, GraphNode, InMemoryEdgeStore, Graph};
//! use pathweave_core::path::WithPath;
//! use pathweave_core::traversal::out;
//!
//! let mut store = InMemoryEdgeStore::new();
//! for id in 1..=3 {
//!     store.add_node(GraphNode::new(id, "Step")).unwrap();
//! }
//! store.add_edge(GraphEdge::new(10, 1, 2, "NEXT").unwrap()).unwrap();
//! store.add_edge(GraphEdge::new(11, 2, 3, "NEXT").unwrap()).unwrap();
//! store.add_edge(GraphEdge::new(12, 3, 1, "NEXT").unwrap()).unwrap();
//! let graph = store.seal().unwrap();
//!
//! let reached: Vec<u64> = all(|v| out(Some(v.clone())), graph.get_vertex(1))
//!     .map(|v| v.id())
//!     .collect();
//! assert_eq!(reached, vec![2, 3, 1]);
//!
//! let start = graph.get_vertex(1).map(|v| v.with_path());
//! let cycles: Vec<_> = all_cycles(3, |v| out(Some(v.clone())), start).unwrap().collect();
//! assert_eq!(cycles.len(), 1);
//! ```

mod algorithms;
mod build_all;
mod engine;
mod failsafe;

#[cfg(test)]
mod algorithms_tests;

pub use algorithms::{
    all, all_cycle_paths, all_cycles, all_paths, all_paths_with_cycles, all_with_cycles, cycle,
    cycle_search, deepest, deepest_paths, leaves, no_cycle, reachability,
};
pub use build_all::{BuildAll, CutEntry, CutKey, Predicate, SeenSet};
pub use engine::{descend, descents, Descend, Descent, Descents, Instruction};
pub use failsafe::{
    Checkpoint, DescentConfig, Failsafe, FailsafeAction, FailsafePolicy, PolicyFn,
    DEFAULT_CEILING, DEFAULT_INTERVAL,
};
