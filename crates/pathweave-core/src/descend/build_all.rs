//! Cycle-safe descent construction.
//!
//! [`BuildAll`] layers three things over a plain [`Descent`]: cycle cutting
//! through a per-traversal [`SeenSet`], path and element predicates that
//! turn rejected elements into `IGNORE`, and a maximum path length.

use std::cell::RefCell;
use std::hash::{BuildHasherDefault, Hash};
use std::rc::Rc;

use indexmap::IndexSet;
use rustc_hash::{FxHashSet, FxHasher};

use super::engine::{Control, Descent, Instruction};
use super::failsafe::{DescentConfig, Failsafe};
use crate::error::{Error, Result};
use crate::traversal::Route;

/// Seen-set key: the path leading to an element, and the element. The path
/// is empty when cutting by element alone.
pub type CutEntry<T> = (Vec<T>, T);

/// What makes two candidates the same for cycle cutting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKey {
    /// The element alone: each element is expanded at most once.
    Element,
    /// The element together with the path leading to it.
    PathElement,
}

/// Keys already produced during one traversal.
#[derive(Debug, Clone)]
pub enum SeenSet<K> {
    /// Remembers insertion order.
    Ordered(IndexSet<K, BuildHasherDefault<FxHasher>>),
    /// No order guarantees.
    Unordered(FxHashSet<K>),
}

impl<K: Hash + Eq> SeenSet<K> {
    /// Creates an empty insertion-ordered set.
    #[must_use]
    pub fn ordered() -> Self {
        SeenSet::Ordered(IndexSet::default())
    }

    /// Creates an empty unordered set.
    #[must_use]
    pub fn unordered() -> Self {
        SeenSet::Unordered(FxHashSet::default())
    }

    /// Returns true if this set remembers insertion order.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        matches!(self, SeenSet::Ordered(_))
    }

    /// Adds `key`; returns false if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        match self {
            SeenSet::Ordered(set) => set.insert(key),
            SeenSet::Unordered(set) => set.insert(key),
        }
    }

    /// Returns true if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        match self {
            SeenSet::Ordered(set) => set.contains(key),
            SeenSet::Unordered(set) => set.contains(key),
        }
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            SeenSet::Ordered(set) => set.len(),
            SeenSet::Unordered(set) => set.len(),
        }
    }

    /// Returns true if no key has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A restriction on which elements a descent considers.
pub enum Predicate<'a, T> {
    /// Longest path an element may be expanded into.
    MaxLength(usize),
    /// Accepts or rejects the path leading to an element.
    Path(Box<dyn FnMut(&[T]) -> bool + 'a>),
}

impl<'a, T> Predicate<'a, T> {
    /// Wraps a path predicate.
    pub fn path<F>(f: F) -> Self
    where
        F: FnMut(&[T]) -> bool + 'a,
    {
        Predicate::Path(Box::new(f))
    }
}

impl<T> From<usize> for Predicate<'_, T> {
    fn from(max_length: usize) -> Self {
        Predicate::MaxLength(max_length)
    }
}

type ElementPredicate<'a, T> = Box<dyn FnMut(&T) -> bool + 'a>;
type PathPredicate<'a, T> = Box<dyn FnMut(&[T]) -> bool + 'a>;

/// Builder for a cycle-safe descent.
pub struct BuildAll<'a, T> {
    children: Box<dyn FnMut(&[T], &T) -> Route<'a, T> + 'a>,
    rule: Option<Control<'a, T>>,
    cut: Option<CutKey>,
    seen: SeenSet<CutEntry<T>>,
    requires_order: bool,
    max_length: Option<usize>,
    path_predicates: Vec<PathPredicate<'a, T>>,
    element_predicate: Option<ElementPredicate<'a, T>>,
    path: Vec<T>,
    failsafe: Failsafe<T>,
}

impl<'a, T> BuildAll<'a, T>
where
    T: Clone + Hash + Eq + 'a,
{
    /// Starts a builder over `children`, cutting by element into an
    /// unordered seen set.
    pub fn new<F, I>(mut children: F) -> Self
    where
        F: FnMut(&[T], &T) -> I + 'a,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            children: Box::new(move |path: &[T], element: &T| -> Route<'a, T> {
                Box::new(children(path, element).into_iter())
            }),
            rule: None,
            cut: Some(CutKey::Element),
            seen: SeenSet::unordered(),
            requires_order: false,
            max_length: None,
            path_predicates: Vec::new(),
            element_predicate: None,
            path: Vec::new(),
            failsafe: Failsafe::default(),
        }
    }

    /// Builder: set the decision rule applied to accepted elements.
    #[must_use]
    pub fn rule<C>(mut self, rule: C) -> Self
    where
        C: FnMut(&[T], &T) -> Instruction + 'a,
    {
        self.rule = Some(Box::new(rule));
        self
    }

    /// Builder: set the cut key, or `None` to disable cutting.
    #[must_use]
    pub fn cut(mut self, cut: Option<CutKey>) -> Self {
        self.cut = cut;
        self
    }

    /// Builder: set the seen set.
    #[must_use]
    pub fn seen(mut self, seen: SeenSet<CutEntry<T>>) -> Self {
        self.seen = seen;
        self
    }

    /// Builder: declare that the rule depends on stable enumeration order,
    /// so an unordered seen set is rejected.
    #[must_use]
    pub fn requires_order(mut self) -> Self {
        self.requires_order = true;
        self
    }

    /// Builder: add a predicate. Predicates combine by AND.
    #[must_use]
    pub fn predicate(mut self, predicate: impl Into<Predicate<'a, T>>) -> Self {
        match predicate.into() {
            Predicate::MaxLength(n) => {
                self.max_length = Some(self.max_length.map_or(n, |current| current.min(n)));
            }
            Predicate::Path(f) => self.path_predicates.push(f),
        }
        self
    }

    /// Builder: bound the path length. Shorthand for a
    /// [`Predicate::MaxLength`].
    #[must_use]
    pub fn max_length(self, max_length: usize) -> Self {
        self.predicate(Predicate::MaxLength(max_length))
    }

    /// Builder: only accept elements whose path passes `f`.
    #[must_use]
    pub fn path_predicate<F>(self, f: F) -> Self
    where
        F: FnMut(&[T]) -> bool + 'a,
    {
        self.predicate(Predicate::path(f))
    }

    /// Builder: only accept elements passing `f`.
    #[must_use]
    pub fn element_predicate<F>(mut self, f: F) -> Self
    where
        F: FnMut(&T) -> bool + 'a,
    {
        self.element_predicate = Some(Box::new(f));
        self
    }

    /// Builder: set the path the starting elements are reached through.
    #[must_use]
    pub fn path<P: IntoIterator<Item = T>>(mut self, path: P) -> Self {
        self.path = path.into_iter().collect();
        self
    }

    /// Builder: set the failsafe.
    #[must_use]
    pub fn failsafe(mut self, failsafe: Failsafe<T>) -> Self {
        self.failsafe = failsafe;
        self
    }

    /// Builder: apply a descent configuration. Its depth bound joins the
    /// length predicates and its failsafe replaces the current one.
    #[must_use]
    pub fn config(self, config: DescentConfig<T>) -> Self {
        let (max_depth, failsafe) = config.into_parts();
        let builder = self.failsafe(failsafe);
        match max_depth {
            Some(depth) => builder.max_length(depth),
            None => builder,
        }
    }

    /// Checks the configuration and produces the descent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a maximum length of zero was
    /// given, or if the rule requires order and cutting uses an unordered
    /// seen set.
    pub fn build(self) -> Result<Descent<'a, T>> {
        if self.max_length == Some(0) {
            return Err(Error::InvalidArgument(
                "max path length must be at least 1".to_string(),
            ));
        }
        if self.requires_order && self.cut.is_some() && !self.seen.is_ordered() {
            return Err(Error::InvalidArgument(
                "this rule enumerates paths in order and needs an ordered seen set".to_string(),
            ));
        }
        Ok(self.assemble())
    }

    /// Produces the descent without validation.
    pub(crate) fn assemble(self) -> Descent<'a, T> {
        let Self {
            mut children,
            rule,
            cut,
            seen,
            max_length,
            mut path_predicates,
            mut element_predicate,
            path,
            failsafe,
            ..
        } = self;

        let seen = Rc::new(RefCell::new(seen));
        let children = move |path: &[T], element: &T| -> Route<'a, T> {
            let candidates = children(path, element);
            match cut {
                None => candidates,
                Some(key) => {
                    let prefix: Vec<T> = match key {
                        CutKey::Element => Vec::new(),
                        CutKey::PathElement => {
                            let mut prefix = path.to_vec();
                            prefix.push(element.clone());
                            prefix
                        }
                    };
                    let seen = Rc::clone(&seen);
                    Box::new(candidates.filter(move |candidate| {
                        seen.borrow_mut().insert((prefix.clone(), candidate.clone()))
                    }))
                }
            }
        };

        let mut rule: Control<'a, T> = match rule {
            Some(rule) => rule,
            None => Box::new(|_: &[T], _: &T| Instruction::EMIT_AND_CONTINUE),
        };
        let control = move |path: &[T], element: &T| {
            let accepted = path_predicates.iter_mut().all(|accept| accept(path))
                && element_predicate.as_mut().is_none_or(|accept| accept(element));
            if accepted {
                rule(path, element)
            } else {
                Instruction::IGNORE
            }
        };

        let mut config = DescentConfig::new().with_failsafe(failsafe);
        if let Some(n) = max_length {
            config = config.bounded(n);
        }
        Descent::new(children)
            .path(path)
            .control(control)
            .config(config)
    }
}
