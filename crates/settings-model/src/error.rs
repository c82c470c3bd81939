//! Error types for the descriptor model
//!
//! Provides error handling for:
//! - Kind tag parsing (non-fatal, routes to the generic variant)
//! - Store accessor failures (read, write, invoke)
//! - Mutation requests the model refuses
//!
//! Read-path failures never leave a descriptor as errors: they are converted to
//! [`Failure`](crate::safe::Failure) at the boundary.

use crate::kind::Kind;

/// Boxed cause carried by store errors
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Kind tag errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KindError {
    /// Tag outside the store's type vocabulary
    #[error("unsupported setting kind: '{0}'")]
    UnsupportedKind(String),
}

/// Errors raised by a [`SettingsStore`](crate::store::SettingsStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No entry for the identifier
    #[error("setting '{id}' not found")]
    NotFound { id: String },

    /// Reading some attribute of the setting failed
    #[error("failed to read {what} of '{id}'")]
    ReadFailure {
        id: String,
        what: &'static str,
        #[source]
        source: BoxError,
    },

    /// Writing the value failed
    #[error("failed to write '{id}'")]
    WriteFailure {
        id: String,
        #[source]
        source: BoxError,
    },

    /// Invoking the action failed
    #[error("failed to invoke '{id}'")]
    InvocationFailure {
        id: String,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    /// Create not-found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create read failure with cause
    pub fn read(id: impl Into<String>, what: &'static str, source: impl Into<BoxError>) -> Self {
        Self::ReadFailure {
            id: id.into(),
            what,
            source: source.into(),
        }
    }

    /// Create write failure with cause
    pub fn write(id: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::WriteFailure {
            id: id.into(),
            source: source.into(),
        }
    }

    /// Create invocation failure with cause
    pub fn invocation(id: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::InvocationFailure {
            id: id.into(),
            source: source.into(),
        }
    }

    /// Identifier the error concerns
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::NotFound { id }
            | Self::ReadFailure { id, .. }
            | Self::WriteFailure { id, .. }
            | Self::InvocationFailure { id, .. } => id,
        }
    }
}

/// Errors from descriptor mutation and capability lookup
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Store rejected a write or invocation
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Setting kind carries no value
    #[error("setting '{id}' of kind {kind} has no value")]
    NoValue { id: String, kind: Kind },

    /// Value shape does not match the setting kind
    #[error("setting '{id}' of kind {kind} cannot hold a {actual} value")]
    ValueMismatch {
        id: String,
        kind: Kind,
        actual: &'static str,
    },

    /// Text could not be parsed for the setting kind
    #[error("'{input}' is not a valid {kind} value for '{id}'")]
    InvalidValue { id: String, kind: Kind, input: String },

    /// No verb with that name on the descriptor
    #[error("setting '{id}' has no verb '{verb}'")]
    UnknownVerb { id: String, verb: String },
}

/// Result type alias for model operations
pub type ModelResult<T> = Result<T, ModelError>;
