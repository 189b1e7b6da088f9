//! Traversal combinators over routes.
//!
//! A route is anything implementing [`IntoIterator`]: a single element
//! (`Some(v)`), absence (`None`), a `Vec`, or another combinator's output.
//! Every combinator takes its route last and returns a lazy iterator, so
//! traversals compose by nesting calls:
//!
//! ```rust
//! use pathweave_core::graph::{Element, Graph, GraphEdge, GraphNode, InMemoryEdgeStore};
//! use pathweave_core::traversal::{of_kind, out_by};
//!
//! let mut store = InMemoryEdgeStore::new();
//! store.add_node(GraphNode::new(1, "Person")).unwrap();
//! store.add_node(GraphNode::new(2, "Person")).unwrap();
//! store.add_node(GraphNode::new(3, "Company")).unwrap();
//! store.add_edge(GraphEdge::new(10, 1, 2, "KNOWS").unwrap()).unwrap();
//! store.add_edge(GraphEdge::new(11, 2, 3, "WORKS_AT").unwrap()).unwrap();
//! let graph = store.seal().unwrap();
//!
//! let friends = out_by("KNOWS", graph.get_vertex(1));
//! let employers: Vec<u64> = of_kind("Company", out_by("WORKS_AT", friends))
//!     .map(|v| v.id())
//!     .collect();
//! assert_eq!(employers, vec![3]);
//! ```
//!
//! Nothing is read from the graph until the result is iterated. Absent
//! sources propagate as empty routes without special cases.

mod filter;
mod guard;
mod lookahead;
mod merge;
mod steps;


pub use filter::{filter_by, is, is_in, is_not, of_kind, with_id, with_label, Matcher};
pub use guard::{
    fail_on_repeat, fail_on_repeat_with, truncate_on_repeat, FailOnRepeat, RepeatCondition,
    Resolution, TruncateOnRepeat,
};
pub use lookahead::{lookahead, lookahead_bounded, neg_lookahead, neg_lookahead_bounded, Bounds};
pub use merge::{
    branch, dedup_by_identity, drop_take, merge_exhaustive, merge_round_robin,
    merge_round_robin_chunked, take_drop, BranchFn, DropTake, RoundRobin,
};
pub use steps::{
    both, both_by, both_e, both_e_by, both_e_with, both_v, both_with, edges, edges_with, in_,
    in_by, in_e, in_e_by, in_e_with, in_v, in_with, other_v, other_v_with, out, out_by, out_e,
    out_e_by, out_e_with, out_v, out_with, same_v, same_v_with, vertices, vertices_with,
    Direction,
};

/// A boxed, lazily evaluated route.
pub type Route<'a, T> = Box<dyn Iterator<Item = T> + 'a>;
