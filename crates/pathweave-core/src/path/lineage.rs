//! Walking lineage chains backward.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use super::{Link, PathEdge, PathVertex};
use crate::graph::{Step, Vertex};

/// Lazy iterator from an element back to its lineage root.
///
/// Yields raw steps, current element first. Calling
/// [`Lineage::reverse_path`] again restarts the walk.
pub struct ReversePath<V: Vertex> {
    head: Step<V, V::Edge>,
    head_pending: bool,
    cursor: Option<Arc<Link<V>>>,
}

impl<V: Vertex> ReversePath<V> {
    fn new(head: Step<V, V::Edge>, cursor: Option<Arc<Link<V>>>) -> Self {
        Self {
            head,
            head_pending: true,
            cursor,
        }
    }

    /// Last step of an unstarted walk.
    fn into_root(self) -> Step<V, V::Edge> {
        let mut root = self.head;
        let mut cursor = self.cursor;
        while let Some(link) = cursor {
            root = link.step.clone();
            cursor = link.back.clone();
        }
        root
    }
}

impl<V: Vertex> Iterator for ReversePath<V> {
    type Item = Step<V, V::Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.head_pending {
            self.head_pending = false;
            return Some(self.head.clone());
        }
        let link = self.cursor.take()?;
        self.cursor = link.back.clone();
        Some(link.step.clone())
    }
}

impl<V: Vertex> std::iter::FusedIterator for ReversePath<V> {}

/// Read access to the lineage of a path-tracked element.
pub trait Lineage {
    /// Raw vertex type the lineage is made of.
    type Raw: Vertex;

    /// Walks from this element back to the root, lazily.
    fn reverse_path(&self) -> ReversePath<Self::Raw>;

    /// Lineage root-first, this element last.
    fn path(&self) -> Vec<Step<Self::Raw, <Self::Raw as Vertex>::Edge>> {
        let mut steps: Vec<_> = self.reverse_path().collect();
        steps.reverse();
        steps
    }

    /// Number of back-links between this element and its root.
    fn depth(&self) -> usize {
        self.reverse_path().count() - 1
    }

    /// First step of the lineage.
    fn root(&self) -> Step<Self::Raw, <Self::Raw as Vertex>::Edge> {
        self.reverse_path().into_root()
    }

    /// Returns the first edge found twice while walking backward.
    ///
    /// Only edges are checked; a vertex revisited through distinct edges is
    /// not a repeat. `max_depth` limits how many back-links are followed.
    fn find_repeated_edge(&self, max_depth: Option<usize>) -> Option<<Self::Raw as Vertex>::Edge> {
        let limit = max_depth.map_or(usize::MAX, |depth| depth.saturating_add(1));
        let mut seen = FxHashSet::default();
        for step in self.reverse_path().take(limit) {
            if let Step::Edge(edge) = step {
                if !seen.insert(edge.clone()) {
                    return Some(edge);
                }
            }
        }
        None
    }
}

impl<V: Vertex> Lineage for PathVertex<V> {
    type Raw = V;

    fn reverse_path(&self) -> ReversePath<V> {
        ReversePath::new(Step::Vertex(self.raw.clone()), self.back.clone())
    }
}

impl<V: Vertex> Lineage for PathEdge<V> {
    type Raw = V;

    fn reverse_path(&self) -> ReversePath<V> {
        ReversePath::new(Step::Edge(self.raw.clone()), self.back.clone())
    }
}

/// Keeps path-tracked elements whose lineage repeats an edge.
pub fn with_repeated_edge<R>(max_depth: Option<usize>, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Lineage,
{
    route
        .into_iter()
        .filter(move |element| element.find_repeated_edge(max_depth).is_some())
}

/// Keeps path-tracked elements whose lineage never repeats an edge.
pub fn without_repeated_edge<R>(
    max_depth: Option<usize>,
    route: R,
) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Lineage,
{
    route
        .into_iter()
        .filter(move |element| element.find_repeated_edge(max_depth).is_none())
}
