//! Lookahead assertions: keep elements by what a sub-traversal finds.

use crate::error::{Error, Result};

/// Inclusive bounds on a sub-traversal's result count.
///
/// A missing minimum means zero; a missing maximum means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bounds {
    min: Option<usize>,
    max: Option<usize>,
}

impl Bounds {
    /// At least `min` results.
    #[must_use]
    pub fn at_least(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// At most `max` results.
    #[must_use]
    pub fn at_most(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Exactly `count` results.
    #[must_use]
    pub fn exactly(count: usize) -> Self {
        Self {
            min: Some(count),
            max: Some(count),
        }
    }

    /// Between `min` and `max` results, inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `min > max`.
    pub fn between(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidArgument(format!(
                "lookahead bounds: min {min} exceeds max {max}"
            )));
        }
        Ok(Self {
            min: Some(min),
            max: Some(max),
        })
    }

    /// Lower bound, if any.
    #[must_use]
    pub fn min(&self) -> Option<usize> {
        self.min
    }

    /// Upper bound, if any.
    #[must_use]
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Counts `items` just far enough to decide, then tests the count.
    ///
    /// With an upper bound at most `max + 1` items are pulled; without one,
    /// at most `min`.
    pub fn admits<I: IntoIterator>(&self, items: I) -> bool {
        let min = self.min.unwrap_or(0);
        match self.max {
            Some(max) => {
                let count = items.into_iter().take(max.saturating_add(1)).count();
                count >= min && count <= max
            }
            None => items.into_iter().take(min).count() >= min,
        }
    }
}

/// Keeps elements for which `f` yields at least one item.
pub fn lookahead<R, F, I>(mut f: F, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    F: FnMut(&R::Item) -> I,
    I: IntoIterator,
{
    route
        .into_iter()
        .filter(move |element| f(element).into_iter().next().is_some())
}

/// Keeps elements for which `f` yields a count within `bounds`.
pub fn lookahead_bounded<R, F, I>(bounds: Bounds, mut f: F, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    F: FnMut(&R::Item) -> I,
    I: IntoIterator,
{
    route
        .into_iter()
        .filter(move |element| bounds.admits(f(element)))
}

/// Keeps elements for which `f` yields nothing.
pub fn neg_lookahead<R, F, I>(mut f: F, route: R) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    F: FnMut(&R::Item) -> I,
    I: IntoIterator,
{
    route
        .into_iter()
        .filter(move |element| f(element).into_iter().next().is_none())
}

/// Keeps elements for which `f` yields a count outside `bounds`.
pub fn neg_lookahead_bounded<R, F, I>(
    bounds: Bounds,
    mut f: F,
    route: R,
) -> impl Iterator<Item = R::Item>
where
    R: IntoIterator,
    F: FnMut(&R::Item) -> I,
    I: IntoIterator,
{
    route
        .into_iter()
        .filter(move |element| !bounds.admits(f(element)))
}
