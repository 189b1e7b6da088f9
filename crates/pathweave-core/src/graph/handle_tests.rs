//! Tests for sealed-graph handles and the storage contract.

use std::collections::HashSet;

use serde_json::json;

use super::edge_store::InMemoryEdgeStore;
use super::handle::InMemoryGraph;
use super::model::{Edge, Element, Graph, Labels, Step, Vertex};
use super::types::{GraphEdge, GraphNode};

/// 1 -KNOWS-> 2, 1 -LIKES-> 2, 2 -KNOWS-> 3, 3 -SELF-> 3
fn build_graph() -> InMemoryGraph {
    let mut store = InMemoryEdgeStore::new();
    store
        .add_node(GraphNode::new(1, "Person").with_document(json!({"name": "Ada"})))
        .unwrap();
    store.add_node(GraphNode::new(2, "Person")).unwrap();
    store.add_node(GraphNode::new(3, "Company")).unwrap();
    store
        .add_edge(GraphEdge::new(10, 1, 2, "KNOWS").unwrap())
        .unwrap();
    store
        .add_edge(GraphEdge::new(11, 1, 2, "LIKES").unwrap())
        .unwrap();
    store
        .add_edge(GraphEdge::new(12, 2, 3, "KNOWS").unwrap())
        .unwrap();
    store
        .add_edge(GraphEdge::new(13, 3, 3, "SELF").unwrap())
        .unwrap();
    store.seal().unwrap()
}

fn ids<E: Element>(items: &[E]) -> Vec<u64> {
    items.iter().map(Element::id).collect()
}

#[test]
fn test_all_vertices_sorted() {
    let graph = build_graph();
    assert_eq!(ids(&graph.all_vertices()), vec![1, 2, 3]);
    assert!(graph.get_vertex(4).is_none());
}

#[test]
fn test_vertex_element_contract() {
    let graph = build_graph();
    let v1 = graph.get_vertex(1).unwrap();
    assert_eq!(v1.id(), 1);
    assert_eq!(v1.kind(), "Person");
    assert_eq!(v1.document(), Some(&json!({"name": "Ada"})));
    assert!(!v1.is_path_tracked());
    assert!(graph.get_vertex(2).unwrap().document().is_none());
}

#[test]
fn test_out_edges_label_filtering() {
    let graph = build_graph();
    let v1 = graph.get_vertex(1).unwrap();
    assert_eq!(ids(&v1.out_edges(&Labels::any())), vec![10, 11]);
    assert_eq!(ids(&v1.out_edges(&Labels::from("LIKES"))), vec![11]);
    assert_eq!(
        ids(&v1.out_edges(&Labels::from(["KNOWS", "LIKES"]))),
        vec![10, 11]
    );
    assert!(v1.out_edges(&Labels::from("NOPE")).is_empty());
    assert!(v1.in_edges(&Labels::any()).is_empty());
}

#[test]
fn test_in_edges() {
    let graph = build_graph();
    let v2 = graph.get_vertex(2).unwrap();
    assert_eq!(ids(&v2.in_edges(&Labels::any())), vec![10, 11]);
    assert_eq!(ids(&v2.in_edges(&Labels::from("KNOWS"))), vec![10]);
}

#[test]
fn test_edge_endpoints_are_fixed() {
    let graph = build_graph();
    let edge = graph.get_edge(12).unwrap();
    assert_eq!(edge.label(), "KNOWS");
    assert_eq!(edge.kind(), "KNOWS");
    assert_eq!(edge.out_vertex().id(), 2);
    assert_eq!(edge.in_vertex().id(), 3);
    assert_eq!(edge.traversed_out(), None);
}

#[test]
fn test_handles_hash_by_identity() {
    let graph = build_graph();
    let a = graph.get_vertex(3).unwrap();
    let b = graph.get_edge(13).unwrap().in_vertex();
    assert_eq!(a, b);

    let set: HashSet<_> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_handles_from_different_graphs_differ() {
    let a = build_graph().get_vertex(1).unwrap();
    let b = build_graph().get_vertex(1).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_step_discrimination() {
    let graph = build_graph();
    let v: Step<_, super::handle::EdgeHandle> = Step::Vertex(graph.get_vertex(1).unwrap());
    let e: Step<super::handle::VertexHandle, _> = Step::Edge(graph.get_edge(10).unwrap());
    assert!(v.is_vertex());
    assert!(!v.is_edge());
    assert!(e.is_edge());
    assert_eq!(v.id(), 1);
    assert_eq!(e.id(), 10);
    assert_eq!(e.as_edge().map(Edge::label), Some("KNOWS"));
}

#[test]
fn test_labels_set_semantics() {
    let labels = Labels::of(["A", "B", "A"]);
    assert_eq!(labels.iter().collect::<Vec<_>>(), vec!["A", "B"]);
    assert!(labels.matches("B"));
    assert!(!labels.matches("C"));
    assert!(labels.single().is_none());

    let empty = Labels::of(Vec::<String>::new());
    assert!(empty.is_any());
    assert!(empty.matches("anything"));
    assert_eq!(Labels::from("X").single(), Some("X"));
}

#[test]
fn test_graph_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<InMemoryGraph>();
    assert_send_sync::<super::handle::VertexHandle>();
    assert_send_sync::<super::handle::EdgeHandle>();
}
