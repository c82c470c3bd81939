//! Error types for the explorer
//!
//! Provides error handling for:
//! - Navigation (unknown keys, nodes without a setting)
//! - Catalog document loading
//! - Configuration loading

use settings_model::{ModelError, StoreError};
use std::path::PathBuf;

/// Main explorer error type
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// No node has this key
    #[error("no node with key '{0}'")]
    NodeNotFound(String),

    /// Node exists but is a grouping node, not a setting
    #[error("node '{0}' is not a setting")]
    NotASetting(String),

    /// Descriptor mutation or verb lookup failed
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// Identifier source could not be enumerated
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Catalog document could not be loaded
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors while loading a catalog document
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No loader for the file extension
    #[error("unsupported catalog format: '{0}'")]
    UnsupportedFormat(String),

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON syntax or schema error
    #[error("invalid json catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML syntax or schema error
    #[error("invalid toml catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML syntax or schema error
    #[error("invalid yaml catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CatalogError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or unknown key
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias for explorer operations
pub type ExplorerResult<T> = Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explorer_error_display() {
        let err = ExplorerError::NodeNotFound("A_B".into());
        assert_eq!(err.to_string(), "no node with key 'A_B'");
    }

    #[test]
    fn catalog_error_display() {
        let err = CatalogError::UnsupportedFormat("ini".into());
        assert_eq!(err.to_string(), "unsupported catalog format: 'ini'");
    }

    #[test]
    fn error_conversions() {
        let err: ExplorerError = CatalogError::UnsupportedFormat("ini".into()).into();
        assert!(matches!(err, ExplorerError::Catalog(_)));

        let err: ExplorerError = StoreError::not_found("A").into();
        assert!(matches!(err, ExplorerError::Store(_)));
    }
}
