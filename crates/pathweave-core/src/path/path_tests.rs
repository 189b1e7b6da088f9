//! Tests for path-tracked elements.

use std::collections::HashSet;

use super::{
    with_repeated_edge, without_repeated_edge, Lineage, PathEdge, PathVertex, Strip, WithPath,
};
use crate::graph::{
    Edge, Element, Graph, GraphEdge, GraphNode, InMemoryEdgeStore, InMemoryGraph, Labels, Step,
    Vertex, VertexHandle,
};

/// a(1) -L-> b(2) -L-> c(3) -L-> a(1), plus b -M-> d(4)
fn triangle() -> InMemoryGraph {
    let mut store = InMemoryEdgeStore::new();
    for (id, label) in [(1, "a"), (2, "b"), (3, "c"), (4, "d")] {
        store.add_node(GraphNode::new(id, label)).unwrap();
    }
    store.add_edge(GraphEdge::new(10, 1, 2, "L").unwrap()).unwrap();
    store.add_edge(GraphEdge::new(11, 2, 3, "L").unwrap()).unwrap();
    store.add_edge(GraphEdge::new(12, 3, 1, "L").unwrap()).unwrap();
    store.add_edge(GraphEdge::new(13, 2, 4, "M").unwrap()).unwrap();
    store.seal().unwrap()
}

fn step_ids<V: Element, E: Element>(steps: &[Step<V, E>]) -> Vec<u64> {
    steps.iter().map(Step::id).collect()
}

/// Follows the first outgoing edge `hops` times.
fn walk_out(start: PathVertex<VertexHandle>, hops: usize) -> PathVertex<VertexHandle> {
    let mut current = start;
    for _ in 0..hops {
        let edge = current.out_edges(&Labels::from("L")).remove(0);
        current = edge.in_vertex();
    }
    current
}

#[test]
fn test_root_path_is_itself() {
    let graph = triangle();
    let a = graph.get_vertex(1).unwrap().with_path();
    assert_eq!(step_ids(&a.path()), vec![1]);
    assert_eq!(a.depth(), 0);
    assert!(a.previous().is_none());
    assert!(a.is_path_tracked());
}

#[test]
fn test_root_of_each_lineage_shape() {
    let graph = triangle();
    let a = graph.get_vertex(1).unwrap().with_path();
    assert_eq!(a.root(), Step::Vertex(graph.get_vertex(1).unwrap()));

    let first_hop = graph.get_edge(10).unwrap().with_path();
    let b = first_hop.in_vertex();
    assert_eq!(step_ids(&b.path()), vec![10, 2]);
    assert!(b.root().is_edge());
    assert_eq!(b.root().id(), 10);
}

#[test]
fn test_lineage_accumulates_per_hop() {
    let graph = triangle();
    let a = graph.get_vertex(1).unwrap().with_path();
    let c = walk_out(a, 2);

    assert_eq!(step_ids(&c.path()), vec![1, 10, 2, 11, 3]);
    let reversed: Vec<_> = c.reverse_path().collect();
    assert_eq!(step_ids(&reversed), vec![3, 11, 2, 10, 1]);
    assert_eq!(c.depth(), 4);
    assert_eq!(c.root().id(), 1);
    assert!(c.root().is_vertex());
}

#[test]
fn test_reverse_path_is_restartable() {
    let graph = triangle();
    let b = walk_out(graph.get_vertex(1).unwrap().with_path(), 1);
    let first: Vec<_> = b.reverse_path().collect();
    let second: Vec<_> = b.reverse_path().collect();
    assert_eq!(first, second);
}

#[test]
fn test_lineage_is_only_grown_along_followed_routes() {
    let graph = triangle();
    let b = walk_out(graph.get_vertex(1).unwrap().with_path(), 1);
    let edges = b.out_edges(&Labels::any());
    assert_eq!(edges.len(), 2);
    for edge in &edges {
        assert_eq!(edge.depth(), 3);
        assert_eq!(step_ids(&edge.path())[..3].to_vec(), vec![1, 10, 2]);
    }
    // The vertex itself did not grow
    assert_eq!(b.depth(), 2);
}

#[test]
fn test_previous_rewraps_predecessor() {
    let graph = triangle();
    let b = walk_out(graph.get_vertex(1).unwrap().with_path(), 1);
    let Some(Step::Edge(edge)) = b.previous() else {
        panic!("expected an edge before b");
    };
    assert_eq!(edge.id(), 10);
    assert_eq!(edge.traversed_out(), Some(true));
    assert_eq!(edge.depth(), 1);
}

#[test]
fn test_direction_flag_recorded() {
    let graph = triangle();
    let b = graph.get_vertex(2).unwrap().with_path();
    let out: Vec<_> = b.out_edges(&Labels::any());
    let incoming: Vec<_> = b.in_edges(&Labels::any());
    assert!(out.iter().all(|e| e.traversed_out() == Some(true)));
    assert!(incoming.iter().all(|e| e.traversed_out() == Some(false)));

    let root_edge = graph.get_edge(10).unwrap().with_path();
    assert_eq!(root_edge.traversed_out(), None);
    assert_eq!(step_ids(&root_edge.path()), vec![10]);
}

#[test]
fn test_equality_ignores_lineage() {
    let graph = triangle();
    let a = graph.get_vertex(1).unwrap();
    let direct = a.clone().with_path();
    let around = walk_out(direct.clone(), 3);

    assert_eq!(around.id(), 1);
    assert_eq!(direct, around);
    assert_ne!(direct.depth(), around.depth());

    let set: HashSet<_> = [direct, around].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_with_path_reroots_tracked_element() {
    let graph = triangle();
    let c = walk_out(graph.get_vertex(1).unwrap().with_path(), 2);
    let rerooted = c.clone().with_path();
    assert_eq!(rerooted.depth(), 0);
    assert_eq!(rerooted.wrap_depth(), 1);
    assert_eq!(rerooted, c);
}

#[test]
fn test_strip_layers() {
    let graph = triangle();
    let raw = graph.get_vertex(3).unwrap();
    assert_eq!(raw.wrap_depth(), 0);
    assert_eq!(raw.strip_one_path_layer(), raw);
    assert_eq!(raw.strip_all_path_layers(), raw);

    let nested = PathVertex::root(PathVertex::root(raw.clone()));
    assert_eq!(nested.wrap_depth(), 2);
    assert_eq!(nested.strip_one_path_layer().wrap_depth(), 1);
    assert_eq!(nested.strip_all_path_layers(), raw);
    assert!(!nested.strip_all_path_layers().is_path_tracked());
}

#[test]
fn test_nested_wrappers_delegate_through_layers() {
    let graph = triangle();
    let nested = PathVertex::root(PathVertex::root(graph.get_vertex(1).unwrap()));
    let edge = nested.out_edges(&Labels::any()).remove(0);
    assert_eq!(edge.id(), 10);
    let b = edge.in_vertex();
    assert_eq!(b.id(), 2);
    assert_eq!(step_ids(&b.path()), vec![1, 10, 2]);
    // The inner layer tracked the same hops
    assert_eq!(step_ids(&b.strip_one_path_layer().path()), vec![1, 10, 2]);
}

#[test]
fn test_edge_strip() {
    let graph = triangle();
    let raw = graph.get_edge(11).unwrap();
    let wrapped: PathEdge<VertexHandle> = raw.clone().with_path();
    assert_eq!(wrapped.wrap_depth(), 1);
    assert_eq!(wrapped.strip_one_path_layer(), raw);
    assert_eq!(wrapped.strip_all_path_layers(), raw);
}

#[test]
fn test_find_repeated_edge() {
    let graph = triangle();
    let start = graph.get_vertex(1).unwrap().with_path();

    let once_around = walk_out(start.clone(), 3);
    assert!(once_around.find_repeated_edge(None).is_none());

    // a b c a b: edge 10 is seen twice, non-adjacently
    let past_start = walk_out(start, 4);
    let repeated = past_start.find_repeated_edge(None).unwrap();
    assert_eq!(repeated.id(), 10);

    // The second sighting is 7 links back
    assert!(past_start.find_repeated_edge(Some(6)).is_none());
    assert!(past_start.find_repeated_edge(Some(7)).is_some());
}

#[test]
fn test_repeated_edge_route_filters() {
    let graph = triangle();
    let start = graph.get_vertex(1).unwrap().with_path();
    let walks = vec![walk_out(start.clone(), 2), walk_out(start, 5)];

    let with: Vec<_> = with_repeated_edge(None, walks.clone()).collect();
    let without: Vec<_> = without_repeated_edge(None, walks).collect();
    assert_eq!(with.len(), 1);
    assert_eq!(with[0].depth(), 10);
    assert_eq!(without.len(), 1);
    assert_eq!(without[0].depth(), 4);
}

#[test]
fn test_path_graph_yields_roots() {
    let graph = triangle().with_path();
    let vertices = graph.all_vertices();
    assert_eq!(vertices.len(), 4);
    assert!(vertices.iter().all(|v| v.is_path_tracked() && v.depth() == 0));
    assert_eq!(graph.get_vertex(2).unwrap().kind(), "b");
    assert!(graph.get_vertex(99).is_none());
    assert_eq!(graph.inner().vertex_count(), 4);
}
