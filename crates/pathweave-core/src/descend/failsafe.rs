//! Per-traversal configuration and the hidden-cycle failsafe.
//!
//! A descent that keeps visiting elements without emitting anything is
//! probably circling through a cycle its rules do not cut. The failsafe
//! counts such fruitless visits and, past a ceiling, periodically asks a
//! policy what to do.

use std::fmt;

use tracing::warn;

use crate::error::{Error, Result};

/// Fruitless visits before the failsafe first fires.
pub const DEFAULT_CEILING: u64 = 10_000_000;

/// Fruitless visits between subsequent firings.
pub const DEFAULT_INTERVAL: u64 = 10_000;

/// State handed to a failsafe policy when it fires.
#[derive(Debug)]
pub struct Checkpoint<'c, T> {
    /// Number of open frames in the walk.
    pub depth: usize,
    /// Path leading to `element`.
    pub path: &'c [T],
    /// Element being visited.
    pub element: &'c T,
    /// Visits since the last emission.
    pub fruitless: u64,
}

/// What the walk does after the failsafe fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailsafeAction<T> {
    /// Carry on as the control function instructed.
    Descend,
    /// Abandon this branch: treat the element as `CUT`.
    Advance,
    /// Yield this value, then end the traversal.
    Substitute(T),
    /// End the traversal.
    Stop,
}

/// Boxed custom policy function.
pub type PolicyFn<T> = Box<dyn FnMut(&Checkpoint<'_, T>) -> FailsafeAction<T>>;

/// Decides what happens when the failsafe fires.
pub enum FailsafePolicy<T> {
    /// Abandon the current branch. The default.
    AbandonBranch,
    /// Keep going.
    Ignore,
    /// Yield the value and end the traversal.
    Substitute(T),
    /// Ask a function.
    Custom(PolicyFn<T>),
}

impl<T> Default for FailsafePolicy<T> {
    fn default() -> Self {
        FailsafePolicy::AbandonBranch
    }
}

impl<T> FailsafePolicy<T> {
    /// Wraps a policy function.
    pub fn custom<F>(f: F) -> Self
    where
        F: FnMut(&Checkpoint<'_, T>) -> FailsafeAction<T> + 'static,
    {
        FailsafePolicy::Custom(Box::new(f))
    }

    fn name(&self) -> &'static str {
        match self {
            FailsafePolicy::AbandonBranch => "abandon_branch",
            FailsafePolicy::Ignore => "ignore",
            FailsafePolicy::Substitute(_) => "substitute",
            FailsafePolicy::Custom(_) => "custom",
        }
    }
}

impl<T: Clone> FailsafePolicy<T> {
    fn resolve(&mut self, checkpoint: &Checkpoint<'_, T>) -> FailsafeAction<T> {
        match self {
            FailsafePolicy::AbandonBranch => FailsafeAction::Advance,
            FailsafePolicy::Ignore => FailsafeAction::Descend,
            FailsafePolicy::Substitute(value) => FailsafeAction::Substitute(value.clone()),
            FailsafePolicy::Custom(f) => f(checkpoint),
        }
    }
}

impl<T> fmt::Debug for FailsafePolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failsafe tuning: when to fire and what to do.
#[derive(Debug)]
pub struct Failsafe<T> {
    ceiling: u64,
    interval: u64,
    policy: FailsafePolicy<T>,
}

impl<T> Default for Failsafe<T> {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            interval: DEFAULT_INTERVAL,
            policy: FailsafePolicy::default(),
        }
    }
}

impl<T> Failsafe<T> {
    /// Creates a failsafe firing after `ceiling` fruitless visits, then every
    /// `interval` visits, with the default policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if either count is zero.
    pub fn new(ceiling: u64, interval: u64) -> Result<Self> {
        if ceiling == 0 {
            return Err(Error::InvalidArgument(
                "failsafe ceiling must be positive".to_string(),
            ));
        }
        if interval == 0 {
            return Err(Error::InvalidArgument(
                "failsafe interval must be positive".to_string(),
            ));
        }
        Ok(Self {
            ceiling,
            interval,
            policy: FailsafePolicy::default(),
        })
    }

    /// Builder: set the policy.
    #[must_use]
    pub fn with_policy(mut self, policy: FailsafePolicy<T>) -> Self {
        self.policy = policy;
        self
    }

    /// Fruitless visits before the first firing.
    #[must_use]
    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Fruitless visits between firings.
    #[must_use]
    pub fn interval(&self) -> u64 {
        self.interval
    }

    /// The configured policy.
    #[must_use]
    pub fn policy(&self) -> &FailsafePolicy<T> {
        &self.policy
    }

    pub(crate) fn fires_at(&self, fruitless: u64) -> bool {
        fruitless >= self.ceiling && (fruitless - self.ceiling) % self.interval == 0
    }
}

impl<T: Clone> Failsafe<T> {
    pub(crate) fn trip(&mut self, checkpoint: &Checkpoint<'_, T>) -> FailsafeAction<T> {
        warn!(
            fruitless = checkpoint.fruitless,
            depth = checkpoint.depth,
            path_len = checkpoint.path.len(),
            policy = self.policy.name(),
            "Descent failsafe fired"
        );
        self.policy.resolve(checkpoint)
    }
}

/// Configuration of one descent.
#[derive(Debug)]
pub struct DescentConfig<T> {
    max_depth: Option<usize>,
    failsafe: Failsafe<T>,
}

impl<T> Default for DescentConfig<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DescentConfig<T> {
    /// Creates a config with no depth bound and the default failsafe.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: None,
            failsafe: Failsafe::default(),
        }
    }

    /// Builder: only expand elements whose child path would be at most
    /// `depth` long.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `depth` is zero.
    pub fn with_max_depth(self, depth: usize) -> Result<Self> {
        if depth == 0 {
            return Err(Error::InvalidArgument(
                "max depth must be at least 1".to_string(),
            ));
        }
        Ok(self.bounded(depth))
    }

    /// Sets the depth bound; the caller has checked it is positive.
    pub(crate) fn bounded(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builder: set the failsafe.
    #[must_use]
    pub fn with_failsafe(mut self, failsafe: Failsafe<T>) -> Self {
        self.failsafe = failsafe;
        self
    }

    /// Depth bound, if any.
    #[must_use]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// The failsafe.
    #[must_use]
    pub fn failsafe(&self) -> &Failsafe<T> {
        &self.failsafe
    }

    pub(crate) fn into_parts(self) -> (Option<usize>, Failsafe<T>) {
        (self.max_depth, self.failsafe)
    }
}
