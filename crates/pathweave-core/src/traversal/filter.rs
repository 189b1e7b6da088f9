//! Element filters.
//!
//! Filters on a projection (ID, kind, label) take anything convertible into
//! a [`Matcher`]. A scalar converts into an equality test, a list or set
//! into a membership test, and [`Matcher::predicate`] wraps a function:
//!
//! ```rust
//! use pathweave_core::traversal::Matcher;
//!
//! assert!(Matcher::<u64>::from(7).matches(&7));
//! assert!(Matcher::<u64>::from(vec![1, 2, 3]).matches(&2));
//! assert!(Matcher::<String>::from(["Person", "Company"]).matches("Company"));
//! assert!(Matcher::predicate(|id: &u64| id % 2 == 0).matches(&4));
//! ```

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::graph::{Edge, Element};

/// Test applied to a projected value.
#[derive(Clone)]
pub enum Matcher<T> {
    /// Equal to this value.
    Eq(T),
    /// Member of this set.
    OneOf(FxHashSet<T>),
    /// Accepted by this function.
    Pred(Arc<dyn Fn(&T) -> bool + Send + Sync>),
}

impl<T> Matcher<T> {
    /// Matches values accepted by `f`.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Matcher::Pred(Arc::new(f))
    }
}

impl<T: Hash + Eq> Matcher<T> {
    /// Tests `value`. Borrowed forms are accepted, so a `Matcher<String>`
    /// tests a `&str` without allocating unless it holds a predicate.
    pub fn matches<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = T> + ?Sized,
    {
        match self {
            Matcher::Eq(expected) => <T as Borrow<Q>>::borrow(expected) == value,
            Matcher::OneOf(set) => set.contains(value),
            Matcher::Pred(f) => f(&value.to_owned()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Eq(value) => f.debug_tuple("Eq").field(value).finish(),
            Matcher::OneOf(set) => f.debug_tuple("OneOf").field(set).finish(),
            Matcher::Pred(_) => f.write_str("Pred(..)"),
        }
    }
}

impl From<u64> for Matcher<u64> {
    fn from(value: u64) -> Self {
        Matcher::Eq(value)
    }
}

impl From<&str> for Matcher<String> {
    fn from(value: &str) -> Self {
        Matcher::Eq(value.to_owned())
    }
}

impl From<String> for Matcher<String> {
    fn from(value: String) -> Self {
        Matcher::Eq(value)
    }
}

impl<T: Hash + Eq> From<Vec<T>> for Matcher<T> {
    fn from(values: Vec<T>) -> Self {
        Matcher::OneOf(values.into_iter().collect())
    }
}

impl<T: Hash + Eq, const N: usize> From<[T; N]> for Matcher<T> {
    fn from(values: [T; N]) -> Self {
        Matcher::OneOf(values.into_iter().collect())
    }
}

impl<T: Hash + Eq, S: BuildHasher> From<HashSet<T, S>> for Matcher<T> {
    fn from(values: HashSet<T, S>) -> Self {
        Matcher::OneOf(values.into_iter().collect())
    }
}

impl From<Vec<&str>> for Matcher<String> {
    fn from(values: Vec<&str>) -> Self {
        Matcher::OneOf(values.into_iter().map(str::to_owned).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Matcher<String> {
    fn from(values: [&str; N]) -> Self {
        Matcher::OneOf(values.into_iter().map(str::to_owned).collect())
    }
}

/// Keeps elements equal to `target`.
pub fn is<R>(target: R::Item, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: PartialEq,
{
    route.into_iter().filter(move |element| *element == target)
}

/// Drops elements equal to `target`.
pub fn is_not<R>(target: R::Item, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: PartialEq,
{
    route.into_iter().filter(move |element| *element != target)
}

/// Keeps elements that belong to `targets`.
pub fn is_in<R, S>(targets: S, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Hash + Eq,
    S: IntoIterator<Item = R::Item>,
{
    let targets: FxHashSet<R::Item> = targets.into_iter().collect();
    route
        .into_iter()
        .filter(move |element| targets.contains(element))
}

/// Keeps elements whose projection passes `matcher`.
pub fn filter_by<R, P, K, M>(mut project: P, matcher: M, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    P: FnMut(&R::Item) -> K,
    K: Hash + Eq + Clone,
    M: Into<Matcher<K>>,
{
    let matcher = matcher.into();
    route
        .into_iter()
        .filter(move |element| matcher.matches(&project(element)))
}

/// Keeps elements whose ID passes `matcher`.
pub fn with_id<R, M>(matcher: M, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Element,
    M: Into<Matcher<u64>>,
{
    filter_by(Element::id, matcher, route)
}

/// Keeps elements whose kind passes `matcher`.
pub fn of_kind<R, M>(matcher: M, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Element,
    M: Into<Matcher<String>>,
{
    let matcher = matcher.into();
    route
        .into_iter()
        .filter(move |element| matcher.matches(element.kind()))
}

/// Keeps edges whose label passes `matcher`.
pub fn with_label<R, M>(matcher: M, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    R::Item: Edge,
    M: Into<Matcher<String>>,
{
    let matcher = matcher.into();
    route
        .into_iter()
        .filter(move |element| matcher.matches(element.label()))
}
