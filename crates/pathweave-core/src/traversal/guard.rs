//! Repeat guards for routes that may revisit elements.
//!
//! Both guards track every element seen so far and react to the first one
//! equal to an earlier element. [`truncate_on_repeat`] ends the route
//! silently; [`fail_on_repeat`] turns the repeat into an error item unless a
//! handler decides otherwise.

use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use rustc_hash::FxHashSet;

use crate::error::{Error, Result};

/// Iterator returned by [`truncate_on_repeat`].
pub struct TruncateOnRepeat<I: Iterator> {
    inner: I,
    seen: FxHashSet<I::Item>,
    repeat_detected: bool,
}

impl<I: Iterator> TruncateOnRepeat<I> {
    /// Returns true once the route has been cut short by a repeat.
    ///
    /// Stays false when the underlying route simply ran out.
    #[must_use]
    pub fn repeat_detected(&self) -> bool {
        self.repeat_detected
    }
}

impl<I> Iterator for TruncateOnRepeat<I>
where
    I: Iterator,
    I::Item: Hash + Eq + Clone,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if self.repeat_detected {
            return None;
        }
        let item = self.inner.next()?;
        if self.seen.insert(item.clone()) {
            Some(item)
        } else {
            self.repeat_detected = true;
            None
        }
    }
}

/// Passes elements until one repeats, then ends the route.
///
/// The repeated element and everything after it are dropped.
pub fn truncate_on_repeat<R>(route: R) -> TruncateOnRepeat<R::IntoIter>
where
    R: IntoIterator,
    R::Item: Hash + Eq + Clone,
{
    TruncateOnRepeat {
        inner: route.into_iter(),
        seen: FxHashSet::default(),
        repeat_detected: false,
    }
}

/// A repeat seen by [`fail_on_repeat_with`].
#[derive(Debug)]
pub struct RepeatCondition<'a, T> {
    /// Zero-based position of the repeated element in the route.
    pub position: usize,
    /// The repeated element.
    pub element: &'a T,
}

/// How a handler resolves a repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// End the route before the repeated element.
    Truncate,
    /// Yield the repeated element and keep going.
    Continue,
    /// Yield a [`Error::RepeatedElement`] item and end the route.
    Fail,
}

/// Iterator returned by [`fail_on_repeat_with`].
pub struct FailOnRepeat<I: Iterator, H> {
    inner: I,
    seen: FxHashSet<I::Item>,
    position: usize,
    handler: H,
    finished: bool,
}

impl<I, H> Iterator for FailOnRepeat<I, H>
where
    I: Iterator,
    I::Item: Hash + Eq + Clone + fmt::Debug,
    H: FnMut(&RepeatCondition<'_, I::Item>) -> Resolution,
{
    type Item = Result<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.inner.next()?;
        let position = self.position;
        self.position += 1;
        if self.seen.insert(item.clone()) {
            return Some(Ok(item));
        }
        let condition = RepeatCondition {
            position,
            element: &item,
        };
        match (self.handler)(&condition) {
            Resolution::Continue => Some(Ok(item)),
            Resolution::Truncate => {
                self.finished = true;
                None
            }
            Resolution::Fail => {
                self.finished = true;
                Some(Err(Error::RepeatedElement {
                    position,
                    element: format!("{item:?}"),
                }))
            }
        }
    }
}

impl<I, H> FusedIterator for FailOnRepeat<I, H>
where
    I: FusedIterator,
    I::Item: Hash + Eq + Clone + fmt::Debug,
    H: FnMut(&RepeatCondition<'_, I::Item>) -> Resolution,
{
}

/// Passes elements as `Ok` until one repeats, then yields a single
/// [`Error::RepeatedElement`] and ends.
pub fn fail_on_repeat<R>(route: R) -> impl Iterator<Item = Result<R::Item>>
where
    R: IntoIterator,
    R::Item: Hash + Eq + Clone + fmt::Debug,
{
    fail_on_repeat_with(|_| Resolution::Fail, route)
}

/// Like [`fail_on_repeat`], letting `handler` resolve each repeat.
pub fn fail_on_repeat_with<R, H>(handler: H, route: R) -> FailOnRepeat<R::IntoIter, H>
where
    R: IntoIterator,
    R::Item: Hash + Eq + Clone + fmt::Debug,
    H: FnMut(&RepeatCondition<'_, R::Item>) -> Resolution,
{
    FailOnRepeat {
        inner: route.into_iter(),
        seen: FxHashSet::default(),
        position: 0,
        handler,
        finished: false,
    }
}
