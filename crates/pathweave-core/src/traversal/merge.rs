//! Branching and merging of routes, and drop/take patterns.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::hash::Hash;
use std::iter::{Fuse, FusedIterator};
use std::rc::Rc;

use rustc_hash::FxHashSet;

use super::Route;

/// A branch applied by [`branch`].
pub type BranchFn<'a, T, U> = Box<dyn Fn(Route<'a, T>) -> Route<'a, U> + 'a>;

/// Source of a [`branch`] and everything read from it so far.
struct Shared<I: Iterator> {
    source: Fuse<I>,
    buffered: Vec<I::Item>,
}

/// One branch's cursor over the shared source.
struct Replay<I: Iterator> {
    shared: Rc<RefCell<Shared<I>>>,
    position: usize,
}

impl<I> Iterator for Replay<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let mut shared = self.shared.borrow_mut();
        if self.position == shared.buffered.len() {
            let item = shared.source.next()?;
            shared.buffered.push(item);
        }
        let item = shared.buffered.get(self.position).cloned();
        self.position += 1;
        item
    }
}

/// Applies every function in `fs` to the same route.
///
/// Returns one result route per function, in order, unflattened. The input
/// is read lazily, only as far as the furthest branch has pulled, and each
/// element read is kept for the branches that have not reached it yet.
pub fn branch<'a, R, T, U>(fs: &[BranchFn<'a, T, U>], route: R) -> Vec<Route<'a, U>>
where
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
    T: Clone + 'a,
{
    let shared = Rc::new(RefCell::new(Shared {
        source: route.into_iter().fuse(),
        buffered: Vec::new(),
    }));
    fs.iter()
        .map(|f| {
            let replay: Route<'a, T> = Box::new(Replay {
                shared: Rc::clone(&shared),
                position: 0,
            });
            f(replay)
        })
        .collect()
}

/// Concatenates routes in order, each one fully before the next.
pub fn merge_exhaustive<R>(routes: R) -> impl Iterator<Item = <R::Item as IntoIterator>::Item>
where
    R: IntoIterator,
    R::Item: IntoIterator,
{
    routes.into_iter().flatten()
}

/// Iterator returned by [`merge_round_robin`].
#[derive(Debug, Clone)]
pub struct RoundRobin<I> {
    rotation: VecDeque<I>,
}

impl<I: Iterator> Iterator for RoundRobin<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        while let Some(mut branch) = self.rotation.pop_front() {
            if let Some(item) = branch.next() {
                self.rotation.push_back(branch);
                return Some(item);
            }
        }
        None
    }
}

impl<I: Iterator> FusedIterator for RoundRobin<I> {}

/// Interleaves routes one element per route per round.
///
/// Exhausted routes leave the rotation; the others keep their order.
pub fn merge_round_robin<R>(routes: R) -> RoundRobin<<R::Item as IntoIterator>::IntoIter>
where
    R: IntoIterator,
    R::Item: IntoIterator,
{
    RoundRobin {
        rotation: routes.into_iter().map(IntoIterator::into_iter).collect(),
    }
}

/// Interleaves chunked routes one chunk per route per round.
///
/// Each route yields chunks; a round takes one whole chunk from each route.
pub fn merge_round_robin_chunked<R, C>(routes: R) -> impl Iterator<Item = C::Item>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = C>,
    C: IntoIterator,
{
    merge_round_robin(routes).flatten()
}

/// Iterator returned by [`drop_take`] and [`take_drop`].
#[derive(Debug, Clone)]
pub struct DropTake<I> {
    inner: Fuse<I>,
    pattern: Vec<usize>,
    phase: usize,
    remaining: usize,
    take_first: bool,
}

impl<I: Iterator> DropTake<I> {
    fn new(pattern: Vec<usize>, take_first: bool, inner: I) -> Self {
        let remaining = pattern.first().copied().unwrap_or(0);
        Self {
            inner: inner.fuse(),
            pattern,
            phase: 0,
            remaining,
            take_first,
        }
    }

    fn taking(&self) -> bool {
        (self.phase % 2 == 0) == self.take_first
    }
}

impl<I: Iterator> Iterator for DropTake<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        loop {
            if self.remaining == 0 {
                if self.phase + 1 < self.pattern.len() {
                    self.phase += 1;
                    self.remaining = self.pattern[self.phase];
                    continue;
                }
                // Last phase spent: its mode covers the rest of the route
                if self.pattern.is_empty() || !self.taking() {
                    return None;
                }
                return self.inner.next();
            }
            self.remaining -= 1;
            let item = self.inner.next()?;
            if self.taking() {
                return Some(item);
            }
        }
    }
}

impl<I: Iterator> FusedIterator for DropTake<I> {}

/// Alternately drops and takes the counts in `pattern`, starting with a
/// drop.
///
/// Once the last count is spent, its mode applies to the rest of the route:
/// a final take passes everything after it, a final drop ends the output.
/// An empty pattern yields nothing.
pub fn drop_take<P, R>(pattern: P, route: R) -> DropTake<R::IntoIter>
where
    P: IntoIterator<Item = usize>,
    R: IntoIterator,
{
    DropTake::new(pattern.into_iter().collect(), false, route.into_iter())
}

/// Alternately takes and drops the counts in `pattern`, starting with a
/// take. The last count's mode extends over the rest of the route, as in
/// [`drop_take`].
pub fn take_drop<P, R>(pattern: P, route: R) -> DropTake<R::IntoIter>
where
    P: IntoIterator<Item = usize>,
    R: IntoIterator,
{
    DropTake::new(pattern.into_iter().collect(), true, route.into_iter())
}

/// Passes each element the first time it appears.
pub fn dedup_by_identity<R>(route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Hash + Eq + Clone,
{
    let mut seen = FxHashSet::default();
    route
        .into_iter()
        .filter(move |element| seen.insert(element.clone()))
}
