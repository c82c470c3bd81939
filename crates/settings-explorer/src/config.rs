//! Explorer configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use settings_model::CachePolicy;
use settings_tree::DEFAULT_SEPARATOR;
use std::path::Path;

/// Explorer configuration
///
/// Loaded from TOML; every key is optional and unknown keys are rejected.
///
/// ```toml
/// separator = "_"
/// cache_policy = "fetch_once"
/// skip_generic = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Identifier segment separator
    pub separator: char,
    /// Reuse policy for fetched values
    pub cache_policy: CachePolicy,
    /// Drop entries whose kind has no typed payload
    pub skip_generic: bool,
}

impl ExplorerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With identifier separator
    #[inline]
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// With cache policy
    #[inline]
    #[must_use]
    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    /// With generic entries skipped
    #[inline]
    #[must_use]
    pub fn with_skip_generic(mut self, skip: bool) -> Self {
        self.skip_generic = skip;
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on syntax errors or unknown keys
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            cache_policy: CachePolicy::FetchOnce,
            skip_generic: false,
        }
    }
}
