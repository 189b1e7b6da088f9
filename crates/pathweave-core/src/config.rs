//! Traversal configuration.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. built-in defaults
//! 2. a TOML file (`pathweave.toml` unless another path is given)
//! 3. environment variables prefixed `PATHWEAVE_`, with `__` between
//!    nested keys (`PATHWEAVE_TRAVERSAL__FAILSAFE__CEILING=50000`)
//!
//! ```toml
//! [traversal]
//! max_depth = 32
//!
//! [traversal.failsafe]
//! ceiling = 10000000
//! interval = 10000
//! policy = "abandon_branch"
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::descend::{DescentConfig, Failsafe, FailsafePolicy, DEFAULT_CEILING, DEFAULT_INTERVAL};
use crate::error::{Error, Result};

/// File read by [`PathweaveConfig::load`].
pub const DEFAULT_CONFIG_FILE: &str = "pathweave.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "PATHWEAVE_";

/// Failsafe policies that can be named in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Abandon the branch that keeps failing to emit.
    #[default]
    AbandonBranch,
    /// Keep searching.
    Ignore,
}

/// `[traversal.failsafe]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FailsafeSettings {
    /// Fruitless visits before the failsafe first fires.
    pub ceiling: u64,
    /// Fruitless visits between later firings.
    pub interval: u64,
    /// What to do when it fires.
    pub policy: PolicyKind,
}

impl Default for FailsafeSettings {
    fn default() -> Self {
        Self {
            ceiling: DEFAULT_CEILING,
            interval: DEFAULT_INTERVAL,
            policy: PolicyKind::default(),
        }
    }
}

/// `[traversal]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    /// Longest path a descent expands into. Unbounded when absent.
    pub max_depth: Option<usize>,
    /// Hidden-cycle failsafe tuning.
    pub failsafe: FailsafeSettings,
}

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathweaveConfig {
    /// Descent defaults.
    pub traversal: TraversalSettings,
}

impl PathweaveConfig {
    /// Loads `pathweave.toml` from the working directory, if present, and
    /// applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a layer cannot be parsed or the result
    /// fails [`validate`](Self::validate).
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Like [`load`](Self::load) with an explicit file path. A missing file
    /// contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a layer cannot be parsed or the result
    /// fails validation.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        debug!(
            path = %path.display(),
            max_depth = ?config.traversal.max_depth,
            ceiling = config.traversal.failsafe.ceiling,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parses TOML over the defaults, without environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed input or invalid values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(content))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Checks values that could never produce a working traversal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let traversal = &self.traversal;
        if traversal.max_depth == Some(0) {
            return Err(Error::Config(
                "traversal.max_depth must be at least 1".to_string(),
            ));
        }
        if traversal.failsafe.ceiling == 0 {
            return Err(Error::Config(
                "traversal.failsafe.ceiling must be positive".to_string(),
            ));
        }
        if traversal.failsafe.interval == 0 {
            return Err(Error::Config(
                "traversal.failsafe.interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the per-traversal configuration these settings describe.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for values `validate` would reject.
    pub fn descent_config<T>(&self) -> Result<DescentConfig<T>> {
        let settings = &self.traversal.failsafe;
        let policy = match settings.policy {
            PolicyKind::AbandonBranch => FailsafePolicy::AbandonBranch,
            PolicyKind::Ignore => FailsafePolicy::Ignore,
        };
        let failsafe = Failsafe::new(settings.ceiling, settings.interval)?.with_policy(policy);
        let config = DescentConfig::new().with_failsafe(failsafe);
        match self.traversal.max_depth {
            Some(depth) => config.with_max_depth(depth),
            None => Ok(config),
        }
    }
}
