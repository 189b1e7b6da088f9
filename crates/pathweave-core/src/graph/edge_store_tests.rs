//! Tests for the graph build phase.

use super::edge_store::InMemoryEdgeStore;
use super::types::{GraphEdge, GraphNode};
use crate::error::Error;

/// alice(1) -KNOWS-> bob(2), alice -WORKS_AT-> acme(3), bob -WORKS_AT-> acme
fn org_chart() -> InMemoryEdgeStore {
    let mut store = InMemoryEdgeStore::new();
    for (id, label) in [(1, "Person"), (2, "Person"), (3, "Company")] {
        store.add_node(GraphNode::new(id, label)).unwrap();
    }
    for (id, source, target, label) in [
        (100, 1, 2, "KNOWS"),
        (101, 1, 3, "WORKS_AT"),
        (102, 2, 3, "WORKS_AT"),
    ] {
        store
            .add_edge(GraphEdge::new(id, source, target, label).unwrap())
            .unwrap();
    }
    store
}

#[test]
fn test_node_lookup() {
    let store = org_chart();
    assert!(store.contains_node(3));
    assert!(!store.contains_node(4));
    assert_eq!(store.node(3).map(GraphNode::label), Some("Company"));
    assert_eq!(store.node_count(), 3);
}

#[test]
fn test_duplicate_ids_rejected() {
    let mut store = org_chart();
    assert_eq!(
        store.add_node(GraphNode::new(2, "Robot")),
        Err(Error::NodeExists(2))
    );
    assert_eq!(
        store.add_edge(GraphEdge::new(101, 3, 1, "EMPLOYS").unwrap()),
        Err(Error::EdgeExists(101))
    );
    // The rejected edge left no index entries behind
    assert_eq!(store.out_degree(3), 0);
}

#[test]
fn test_edges_keep_insertion_order() {
    let store = org_chart();
    let targets: Vec<u64> = store.out_edges(1).map(GraphEdge::target).collect();
    assert_eq!(targets, vec![2, 3]);
    let sources: Vec<u64> = store.in_edges(3).map(GraphEdge::source).collect();
    assert_eq!(sources, vec![1, 2]);
}

#[test]
fn test_label_index() {
    let store = org_chart();
    assert_eq!(store.out_edge_ids(1, Some("WORKS_AT")), &[101]);
    assert_eq!(store.out_edge_ids(1, Some("KNOWS")), &[100]);
    assert_eq!(store.out_edge_ids(1, None), &[100, 101]);
    assert_eq!(store.in_edge_ids(3, Some("WORKS_AT")), &[101, 102]);
    assert!(store.in_edge_ids(3, Some("KNOWS")).is_empty());
}

#[test]
fn test_degrees() {
    let store = org_chart();
    let degrees: Vec<(usize, usize)> = (1..=3)
        .map(|id| (store.out_degree(id), store.in_degree(id)))
        .collect();
    assert_eq!(degrees, vec![(2, 0), (1, 1), (0, 2)]);
}

#[test]
fn test_remove_edge_clears_indices() {
    let mut store = org_chart();
    let removed = store.remove_edge(100).unwrap();
    assert_eq!(removed.label(), "KNOWS");
    assert!(!store.contains_edge(100));
    assert!(store.remove_edge(100).is_none());

    assert_eq!(store.out_edge_ids(1, None), &[101]);
    assert!(store.out_edge_ids(1, Some("KNOWS")).is_empty());
    assert!(store.in_edge_ids(2, Some("KNOWS")).is_empty());
}

#[test]
fn test_remove_node_takes_its_edges() {
    let mut store = org_chart();
    assert!(store.remove_node(1).is_some());
    assert_eq!(store.node_count(), 2);
    assert_eq!(store.edge_count(), 1);
    assert!(store.contains_edge(102));
    assert_eq!(store.in_degree(2), 0);
    assert_eq!(store.in_edge_ids(3, Some("WORKS_AT")), &[102]);
    assert!(store.remove_node(1).is_none());
}

#[test]
fn test_remove_node_with_self_loop() {
    let mut store = InMemoryEdgeStore::new();
    store.add_node(GraphNode::new(1, "Loop")).unwrap();
    store
        .add_edge(GraphEdge::new(7, 1, 1, "SELF").unwrap())
        .unwrap();
    assert!(store.remove_node(1).is_some());
    assert_eq!(store.edge_count(), 0);
}

#[test]
fn test_node_ids_sorted() {
    let mut store = InMemoryEdgeStore::with_capacity(0, 3);
    for id in [30, 10, 20] {
        store.add_node(GraphNode::new(id, "Node")).unwrap();
    }
    assert_eq!(store.node_ids(), vec![10, 20, 30]);
}

#[test]
fn test_seal_reports_lowest_dangling_edge() {
    let mut store = org_chart();
    store
        .add_edge(GraphEdge::new(300, 3, 77, "OWNS").unwrap())
        .unwrap();
    store
        .add_edge(GraphEdge::new(200, 99, 3, "OWNS").unwrap())
        .unwrap();
    assert_eq!(
        store.seal().unwrap_err(),
        Error::DanglingEdge { edge: 200, node: 99 }
    );
}

#[test]
fn test_seal_keeps_contents() {
    let graph = org_chart().seal().unwrap();
    assert_eq!(graph.store().node_count(), 3);
    assert_eq!(graph.store().edge_count(), 3);
    assert_eq!(graph.vertex_count(), 3);
}

#[test]
fn test_unknown_node_queries_are_empty() {
    let store = InMemoryEdgeStore::new();
    assert_eq!(store.out_edges(999).count(), 0);
    assert_eq!(store.in_edges(999).count(), 0);
    assert!(store.out_edge_ids(999, Some("X")).is_empty());
    assert!(store.node(999).is_none());
    assert!(store.edge(999).is_none());
    assert_eq!(store.out_degree(999), 0);
}
