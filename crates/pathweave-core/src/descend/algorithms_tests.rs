//! Tests for the ready-made descents.

use super::algorithms::*;
use crate::error::Error;
use crate::graph::{
    Element, Graph, GraphEdge, GraphNode, InMemoryEdgeStore, InMemoryGraph, Step,
};
use crate::path::{Lineage, WithPath};
use crate::traversal::{out, out_by};

/// 0 -> 1 -> 2 -> 0, 3 -> 4
fn small(n: &u32) -> Vec<u32> {
    match n {
        0 => vec![1],
        1 => vec![2],
        2 => vec![0],
        3 => vec![4],
        _ => Vec::new(),
    }
}

/// 1 -> 2, 3; 2 -> 4, 5; 3 -> 6, 7
fn tree(n: &u32) -> Vec<u32> {
    if *n < 4 {
        vec![n * 2, n * 2 + 1]
    } else {
        Vec::new()
    }
}

/// 0 -> 1, 2; 1 -> 3; 2 -> 3
fn diamond(n: &u32) -> Vec<u32> {
    match n {
        0 => vec![1, 2],
        1 | 2 => vec![3],
        _ => Vec::new(),
    }
}

/// a(1) -L-> b(2) -L-> c(3) -L-> a(1), c -M-> d(4)
fn triangle() -> InMemoryGraph {
    let mut store = InMemoryEdgeStore::new();
    for id in 1..=4 {
        store.add_node(GraphNode::new(id, "Node")).unwrap();
    }
    store.add_edge(GraphEdge::new(10, 1, 2, "L").unwrap()).unwrap();
    store.add_edge(GraphEdge::new(11, 2, 3, "L").unwrap()).unwrap();
    store.add_edge(GraphEdge::new(12, 3, 1, "L").unwrap()).unwrap();
    store.add_edge(GraphEdge::new(13, 3, 4, "M").unwrap()).unwrap();
    store.seal().unwrap()
}

#[test]
fn test_all_reaches_everything_once() {
    let reached: Vec<u32> = all(small, [0]).collect();
    assert_eq!(reached, vec![1, 2, 0]);

    let reached: Vec<u32> = all(diamond, [0]).collect();
    assert_eq!(reached, vec![1, 3, 2]);

    assert_eq!(all(small, [4]).count(), 0);
}

#[test]
fn test_all_paths() {
    let paths: Vec<Vec<u32>> = all_paths(small, [0]).collect();
    assert_eq!(paths, vec![vec![0, 1], vec![0, 1, 2], vec![0, 1, 2, 0]]);
}

#[test]
fn test_all_with_cycles_is_unbounded() {
    let reached: Vec<u32> = all_with_cycles(small, [0]).take(5).collect();
    assert_eq!(reached, vec![1, 2, 0, 1, 2]);

    let paths: Vec<Vec<u32>> = all_paths_with_cycles(diamond, [0]).collect();
    assert_eq!(
        paths,
        vec![vec![0, 1], vec![0, 1, 3], vec![0, 2], vec![0, 2, 3]]
    );
}

#[test]
fn test_deepest_emits_leaves_only() {
    let leaves: Vec<u32> = deepest(tree, [1]).collect();
    assert_eq!(leaves, vec![4, 5, 6, 7]);

    let paths: Vec<Vec<u32>> = deepest_paths(tree, [1]).collect();
    assert_eq!(
        paths,
        vec![vec![1, 2, 4], vec![1, 2, 5], vec![1, 3, 6], vec![1, 3, 7]]
    );
}

#[test]
fn test_deepest_on_shared_leaf_and_leaf_root() {
    let leaves: Vec<u32> = deepest(diamond, [0]).collect();
    assert_eq!(leaves, vec![3]);

    let leaves: Vec<u32> = deepest(tree, [5]).collect();
    assert_eq!(leaves, vec![5]);
}

#[test]
fn test_deepest_step_calls() {
    use std::cell::Cell;

    let calls = Cell::new(0_usize);
    let counted = |n: &u32| {
        calls.set(calls.get() + 1);
        tree(n)
    };
    let leaves: Vec<u32> = deepest(counted, [1]).collect();
    assert_eq!(leaves, vec![4, 5, 6, 7]);
    // One candidate check for each of the 7 elements, plus one expansion
    // for each of the 3 inner ones
    assert_eq!(calls.get(), 10);
}

#[test]
fn test_all_cycles_returns_to_origin() {
    let cycles: Vec<u32> = all_cycles(3, small, [0]).unwrap().collect();
    assert_eq!(cycles, vec![0]);

    let paths: Vec<Vec<u32>> = all_cycle_paths(3, small, [0, 3]).unwrap().collect();
    assert_eq!(paths, vec![vec![0, 1, 2, 0]]);

    // Too short to close the loop
    assert_eq!(all_cycles(2, small, [0]).unwrap().count(), 0);
}

#[test]
fn test_cycle_length_must_be_positive() {
    assert!(matches!(
        all_cycles(0, small, [0]).map(Iterator::count),
        Err(Error::InvalidArgument(_))
    ));
    assert!(cycle(0, small, [0]).is_err());
    assert!(no_cycle(0, small, [0]).is_err());
}

#[test]
fn test_cycle_membership() {
    let on_cycle: Vec<u32> = cycle(3, small, 0..5).unwrap().collect();
    assert_eq!(on_cycle, vec![0, 1, 2]);

    let off_cycle: Vec<u32> = no_cycle(3, small, 0..5).unwrap().collect();
    assert_eq!(off_cycle, vec![3, 4]);

    let short: Vec<u32> = cycle(2, small, 0..5).unwrap().collect();
    assert!(short.is_empty());
}

#[test]
fn test_graph_cycle_through_path_tracking() {
    let graph = triangle();
    let a = graph.get_vertex(1).map(|v| v.with_path());

    let cycles: Vec<_> = all_cycles(3, |v| out_by("L", Some(v.clone())), a)
        .unwrap()
        .collect();
    assert_eq!(cycles.len(), 1);

    let closing = &cycles[0];
    assert_eq!(closing.id(), 1);
    let hops: Vec<u64> = closing
        .path()
        .iter()
        .filter(|step| step.is_vertex())
        .map(Step::id)
        .collect();
    assert_eq!(hops, vec![1, 2, 3, 1]);
}

#[test]
fn test_graph_reachability_and_leaves() {
    let graph = triangle();

    let mut reached: Vec<u64> = all(|v| out(Some(v.clone())), graph.get_vertex(2))
        .map(|v| v.id())
        .collect();
    reached.sort_unstable();
    assert_eq!(reached, vec![1, 2, 3, 4]);

    let leaves: Vec<u64> = deepest(|v| out(Some(v.clone())), graph.get_vertex(1))
        .map(|v| v.id())
        .collect();
    assert_eq!(leaves, vec![4]);

    let on_cycle: Vec<u64> = cycle(3, |v| out(Some(v.clone())), graph.all_vertices())
        .unwrap()
        .map(|v| v.id())
        .collect();
    assert_eq!(on_cycle, vec![1, 2, 3]);
}

#[test]
fn test_reachability_builder_takes_config() {
    let config = crate::descend::DescentConfig::new().with_max_depth(1).unwrap();
    let reached: Vec<u32> = reachability(small)
        .config(config)
        .build()
        .unwrap()
        .descend([0])
        .collect();
    assert_eq!(reached, vec![1]);
}
