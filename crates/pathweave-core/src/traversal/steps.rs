//! Directional neighbor steps.
//!
//! Every step takes a route of sources and returns a lazy iterator over the
//! neighbors of each source, in source order. Labeled forms restrict the
//! edges followed; `_with` forms hand each source's neighbor group to a
//! post-processing function before it is flattened into the output.

use tracing::trace;

use crate::graph::{Edge, Labels, Vertex};

/// Direction of a neighbor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow incoming edges, toward their sources.
    In,
    /// Follow outgoing edges, toward their targets.
    Out,
    /// Incoming first, then outgoing.
    Both,
}

fn incident_edges<V: Vertex>(
    vertex: &V,
    labels: &Labels,
    direction: Direction,
) -> Vec<V::Edge> {
    match direction {
        Direction::Out => vertex.out_edges(labels),
        Direction::In => vertex.in_edges(labels),
        Direction::Both => {
            let mut edges = vertex.in_edges(labels);
            edges.extend(vertex.out_edges(labels));
            edges
        }
    }
}

fn adjacent_vertices<V: Vertex>(
    vertex: &V,
    labels: &Labels,
    direction: Direction,
) -> Vec<V> {
    let sources = || vertex.in_edges(labels).into_iter().map(|e| e.out_vertex());
    let targets = || vertex.out_edges(labels).into_iter().map(|e| e.in_vertex());
    match direction {
        Direction::Out => targets().collect(),
        Direction::In => sources().collect(),
        Direction::Both => sources().chain(targets()).collect(),
    }
}

/// Incident edges of every source in `direction`, grouped and post-processed.
pub fn edges_with<R, L, F, I>(
    direction: Direction,
    labels: L,
    mut post: F,
    route: R,
) -> impl Iterator<Item = I::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
    F: FnMut(Vec<<R::Item as Vertex>::Edge>) -> I,
    I: IntoIterator,
{
    let labels = labels.into();
    route
        .into_iter()
        .flat_map(move |vertex| post(incident_edges(&vertex, &labels, direction)))
}

/// Adjacent vertices of every source in `direction`, grouped and
/// post-processed.
pub fn vertices_with<R, L, F, I>(
    direction: Direction,
    labels: L,
    mut post: F,
    route: R,
) -> impl Iterator<Item = I::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
    F: FnMut(Vec<R::Item>) -> I,
    I: IntoIterator,
{
    let labels = labels.into();
    route
        .into_iter()
        .flat_map(move |vertex| post(adjacent_vertices(&vertex, &labels, direction)))
}

/// Incident edges of every source in `direction`.
pub fn edges<R, L>(
    direction: Direction,
    labels: L,
    route: R,
) -> impl Iterator<Item = <R::Item as Vertex>::Edge>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
{
    edges_with(direction, labels, std::convert::identity, route)
}

/// Adjacent vertices of every source in `direction`.
pub fn vertices<R, L>(direction: Direction, labels: L, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
{
    vertices_with(direction, labels, std::convert::identity, route)
}

// ── vertex → edge ──────────────────────────────────────────────────────

/// Outgoing edges.
pub fn out_e<R>(route: R) -> impl Iterator<Item = <R::Item as Vertex>::Edge>
where
    R: IntoIterator,
    R::Item: Vertex,
{
    edges(Direction::Out, Labels::any(), route)
}

/// Outgoing edges carrying one of `labels`.
pub fn out_e_by<R, L>(labels: L, route: R) -> impl Iterator<Item = <R::Item as Vertex>::Edge>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
{
    edges(Direction::Out, labels, route)
}

/// Outgoing edges carrying one of `labels`, post-processed per source.
pub fn out_e_with<R, L, F, I>(labels: L, post: F, route: R) -> impl Iterator<Item = I::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
    F: FnMut(Vec<<R::Item as Vertex>::Edge>) -> I,
    I: IntoIterator,
{
    edges_with(Direction::Out, labels, post, route)
}

/// Incoming edges.
pub fn in_e<R>(route: R) -> impl Iterator<Item = <R::Item as Vertex>::Edge>
where
    R: IntoIterator,
    R::Item: Vertex,
{
    edges(Direction::In, Labels::any(), route)
}

/// Incoming edges carrying one of `labels`.
pub fn in_e_by<R, L>(labels: L, route: R) -> impl Iterator<Item = <R::Item as Vertex>::Edge>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
{
    edges(Direction::In, labels, route)
}

/// Incoming edges carrying one of `labels`, post-processed per source.
pub fn in_e_with<R, L, F, I>(labels: L, post: F, route: R) -> impl Iterator<Item = I::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
    F: FnMut(Vec<<R::Item as Vertex>::Edge>) -> I,
    I: IntoIterator,
{
    edges_with(Direction::In, labels, post, route)
}

/// Incoming then outgoing edges. A self loop appears once in each group.
pub fn both_e<R>(route: R) -> impl Iterator<Item = <R::Item as Vertex>::Edge>
where
    R: IntoIterator,
    R::Item: Vertex,
{
    edges(Direction::Both, Labels::any(), route)
}

/// Incoming then outgoing edges carrying one of `labels`.
pub fn both_e_by<R, L>(labels: L, route: R) -> impl Iterator<Item = <R::Item as Vertex>::Edge>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
{
    edges(Direction::Both, labels, route)
}

/// Incoming then outgoing edges carrying one of `labels`, post-processed
/// per source as a single group.
pub fn both_e_with<R, L, F, I>(labels: L, post: F, route: R) -> impl Iterator<Item = I::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
    F: FnMut(Vec<<R::Item as Vertex>::Edge>) -> I,
    I: IntoIterator,
{
    edges_with(Direction::Both, labels, post, route)
}

// ── vertex → vertex ────────────────────────────────────────────────────

/// Targets of outgoing edges.
pub fn out<R>(route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
{
    vertices(Direction::Out, Labels::any(), route)
}

/// Targets of outgoing edges carrying one of `labels`.
pub fn out_by<R, L>(labels: L, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
{
    vertices(Direction::Out, labels, route)
}

/// Targets of outgoing edges carrying one of `labels`, post-processed per
/// source.
pub fn out_with<R, L, F, I>(labels: L, post: F, route: R) -> impl Iterator<Item = I::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
    F: FnMut(Vec<R::Item>) -> I,
    I: IntoIterator,
{
    vertices_with(Direction::Out, labels, post, route)
}

/// Sources of incoming edges.
pub fn in_<R>(route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
{
    vertices(Direction::In, Labels::any(), route)
}

/// Sources of incoming edges carrying one of `labels`.
pub fn in_by<R, L>(labels: L, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
{
    vertices(Direction::In, labels, route)
}

/// Sources of incoming edges carrying one of `labels`, post-processed per
/// source.
pub fn in_with<R, L, F, I>(labels: L, post: F, route: R) -> impl Iterator<Item = I::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
    F: FnMut(Vec<R::Item>) -> I,
    I: IntoIterator,
{
    vertices_with(Direction::In, labels, post, route)
}

/// Neighbors across incoming, then outgoing, edges.
pub fn both<R>(route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
{
    vertices(Direction::Both, Labels::any(), route)
}

/// Neighbors across incoming, then outgoing, edges carrying one of `labels`.
pub fn both_by<R, L>(labels: L, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
{
    vertices(Direction::Both, labels, route)
}

/// Neighbors in both directions, post-processed per source.
pub fn both_with<R, L, F, I>(labels: L, post: F, route: R) -> impl Iterator<Item = I::Item>
where
    R: IntoIterator,
    R::Item: Vertex,
    L: Into<Labels>,
    F: FnMut(Vec<R::Item>) -> I,
    I: IntoIterator,
{
    vertices_with(Direction::Both, labels, post, route)
}

// ── edge → vertex ──────────────────────────────────────────────────────

/// Source endpoint of each edge.
pub fn out_v<R>(route: R) -> impl Iterator<Item = <R::Item as Edge>::Vertex>
where
    R: IntoIterator,
    R::Item: Edge,
{
    route.into_iter().map(|edge| edge.out_vertex())
}

/// Target endpoint of each edge.
pub fn in_v<R>(route: R) -> impl Iterator<Item = <R::Item as Edge>::Vertex>
where
    R: IntoIterator,
    R::Item: Edge,
{
    route.into_iter().map(|edge| edge.in_vertex())
}

/// Source, then target, of each edge.
pub fn both_v<R>(route: R) -> impl Iterator<Item = <R::Item as Edge>::Vertex>
where
    R: IntoIterator,
    R::Item: Edge,
{
    route
        .into_iter()
        .flat_map(|edge| [edge.out_vertex(), edge.in_vertex()])
}

/// Resolves the direction an edge was followed in, consulting `on_unknown`
/// when the edge carries no record of it.
fn followed_out<E, H>(edge: &E, on_unknown: &mut H) -> bool
where
    E: Edge,
    H: FnMut(&E) -> bool,
{
    match edge.traversed_out() {
        Some(out) => out,
        None => {
            let out = on_unknown(edge);
            trace!(edge = ?edge, outgoing = out, "Traversal direction unknown");
            out
        }
    }
}

fn assume_outgoing<E>(_: &E) -> bool {
    true
}

/// The endpoint of each edge that was not used to arrive at it.
///
/// Edges without a recorded direction are treated as followed outgoing.
pub fn other_v<R>(route: R) -> impl Iterator<Item = <R::Item as Edge>::Vertex>
where
    R: IntoIterator,
    R::Item: Edge,
{
    other_v_with(assume_outgoing::<R::Item>, route)
}

/// Like [`other_v`], resolving unknown directions with `on_unknown`
/// (`true` for outgoing).
pub fn other_v_with<R, H>(
    mut on_unknown: H,
    route: R,
) -> impl Iterator<Item = <R::Item as Edge>::Vertex>
where
    R: IntoIterator,
    R::Item: Edge,
    H: FnMut(&R::Item) -> bool,
{
    route.into_iter().map(move |edge| {
        if followed_out(&edge, &mut on_unknown) {
            edge.in_vertex()
        } else {
            edge.out_vertex()
        }
    })
}

/// The endpoint of each edge that was used to arrive at it.
///
/// Edges without a recorded direction are treated as followed outgoing.
pub fn same_v<R>(route: R) -> impl Iterator<Item = <R::Item as Edge>::Vertex>
where
    R: IntoIterator,
    R::Item: Edge,
{
    same_v_with(assume_outgoing::<R::Item>, route)
}

/// Like [`same_v`], resolving unknown directions with `on_unknown`
/// (`true` for outgoing).
pub fn same_v_with<R, H>(
    mut on_unknown: H,
    route: R,
) -> impl Iterator<Item = <R::Item as Edge>::Vertex>
where
    R: IntoIterator,
    R::Item: Edge,
    H: FnMut(&R::Item) -> bool,
{
    route.into_iter().map(move |edge| {
        if followed_out(&edge, &mut on_unknown) {
            edge.out_vertex()
        } else {
            edge.in_vertex()
        }
    })
}
