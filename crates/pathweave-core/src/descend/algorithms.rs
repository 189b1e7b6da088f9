//! Ready-made descents: reachability, leaves and cycle discovery.
//!
//! Each algorithm takes a step function `f` mapping one element to its
//! next candidates (typically `|v| out(Some(v.clone()))`) and a starting
//! route. The `_paths` forms yield the path to each result instead.

use std::cell::RefCell;
use std::hash::Hash;
use std::rc::Rc;

use super::build_all::{BuildAll, CutKey, SeenSet};
use super::engine::{Descend, Descents, Instruction};
use crate::error::{Error, Result};
use crate::traversal::{lookahead, neg_lookahead};

fn reach_rule<T>(path: &[T], _: &T) -> Instruction {
    if path.is_empty() {
        Instruction::CONTINUE
    } else {
        Instruction::EMIT_AND_CONTINUE
    }
}

/// Reachability search behind [`all`]: starting elements are expanded
/// without being emitted, everything below them is emitted, and each
/// element is expanded at most once.
pub fn reachability<'a, T, F, I>(mut f: F) -> BuildAll<'a, T>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
{
    BuildAll::new(move |_: &[T], element: &T| f(element)).rule(reach_rule)
}

/// Leaf search behind [`deepest`]: only elements without candidates are
/// emitted.
///
/// `f` runs twice per expanded element, once to test for candidates and once
/// to expand them; on path-tracked routes both calls build fresh lineage.
pub fn leaves<'a, T, F, I>(f: F) -> BuildAll<'a, T>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
{
    let f = Rc::new(RefCell::new(f));
    let probe = Rc::clone(&f);
    BuildAll::new(move |_: &[T], element: &T| (&mut *f.borrow_mut())(element))
        .rule(move |_: &[T], element: &T| {
            let has_children = (&mut *probe.borrow_mut())(element)
                .into_iter()
                .next()
                .is_some();
            if has_children {
                Instruction::CONTINUE
            } else {
                Instruction::EMIT
            }
        })
}

/// Cycle search behind [`all_cycles`]. Build it with
/// [`BuildAll::build`] to have `max_len` checked.
pub fn cycle_search<'a, T, F, I>(max_len: usize, mut f: F) -> BuildAll<'a, T>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
{
    BuildAll::new(move |_: &[T], element: &T| f(element))
        .rule(|path: &[T], element: &T| {
            if path.first() == Some(element) {
                Instruction::EMIT_AND_CUT
            } else {
                Instruction::CONTINUE
            }
        })
        .cut(Some(CutKey::PathElement))
        .seen(SeenSet::ordered())
        .requires_order()
        .max_length(max_len)
}

/// Every element reachable from `route` through `f`, each at most once.
/// Starting elements are only emitted when reached again.
pub fn all<'a, T, F, I, R>(f: F, route: R) -> Descend<'a, T>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    reachability(f).assemble().descend(route)
}

/// Like [`all`], yielding paths.
pub fn all_paths<'a, T, F, I, R>(f: F, route: R) -> Descents<'a, T>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    reachability(f).assemble().descents(route)
}

/// Like [`all`] without cycle cutting. On a cyclic graph the result is
/// infinite unless the caller bounds it.
pub fn all_with_cycles<'a, T, F, I, R>(f: F, route: R) -> Descend<'a, T>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    reachability(f).cut(None).assemble().descend(route)
}

/// Like [`all_with_cycles`], yielding paths.
pub fn all_paths_with_cycles<'a, T, F, I, R>(f: F, route: R) -> Descents<'a, T>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    reachability(f).cut(None).assemble().descents(route)
}

/// The leaves under `route`: elements for which `f` yields nothing.
///
/// ```rust
/// use pathweave_core::descend::deepest;
///
/// let tree = |n: &u32| if *n < 4 { vec![n * 2, n * 2 + 1] } else { vec![] };
/// let leaves: Vec<u32> = deepest(tree, Some(2)).collect();
/// assert_eq!(leaves, vec![4, 5, 6, 7]);
/// ```
pub fn deepest<'a, T, F, I, R>(f: F, route: R) -> Descend<'a, T>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    leaves(f).assemble().descend(route)
}

/// Like [`deepest`], yielding paths.
pub fn deepest_paths<'a, T, F, I, R>(f: F, route: R) -> Descents<'a, T>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    leaves(f).assemble().descents(route)
}

/// Cycles of at most `max_len` steps leading back to a starting element.
///
/// Only returns to the origin count: a walk that loops elsewhere is not
/// reported.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `max_len` is zero.
pub fn all_cycles<'a, T, F, I, R>(max_len: usize, f: F, route: R) -> Result<Descend<'a, T>>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    Ok(cycle_search(max_len, f).build()?.descend(route))
}

/// Like [`all_cycles`], yielding the cycle as a path from the origin back
/// to itself.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `max_len` is zero.
pub fn all_cycle_paths<'a, T, F, I, R>(
    max_len: usize,
    f: F,
    route: R,
) -> Result<Descents<'a, T>>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    Ok(cycle_search(max_len, f).build()?.descents(route))
}

fn check_max_len(max_len: usize) -> Result<()> {
    if max_len == 0 {
        return Err(Error::InvalidArgument(
            "cycle length must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Keeps the elements of `route` that reach themselves within `max_len`
/// steps.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `max_len` is zero.
pub fn cycle<'a, T, F, I, R>(
    max_len: usize,
    f: F,
    route: R,
) -> Result<impl Iterator<Item = T> + 'a>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    check_max_len(max_len)?;
    let f = Rc::new(RefCell::new(f));
    Ok(lookahead(
        move |element: &T| {
            let f = Rc::clone(&f);
            cycle_search(max_len, move |x: &T| (&mut *f.borrow_mut())(x))
                .assemble()
                .descend(Some(element.clone()))
        },
        route.into_iter(),
    ))
}

/// Keeps the elements of `route` that do not reach themselves within
/// `max_len` steps.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `max_len` is zero.
pub fn no_cycle<'a, T, F, I, R>(
    max_len: usize,
    f: F,
    route: R,
) -> Result<impl Iterator<Item = T> + 'a>
where
    T: Clone + Hash + Eq + 'a,
    F: FnMut(&T) -> I + 'a,
    I: IntoIterator<Item = T>,
    I::IntoIter: 'a,
    R: IntoIterator<Item = T>,
    R::IntoIter: 'a,
{
    check_max_len(max_len)?;
    let f = Rc::new(RefCell::new(f));
    Ok(neg_lookahead(
        move |element: &T| {
            let f = Rc::clone(&f);
            cycle_search(max_len, move |x: &T| (&mut *f.borrow_mut())(x))
                .assemble()
                .descend(Some(element.clone()))
        },
        route.into_iter(),
    ))
}
