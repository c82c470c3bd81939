//! Error types for tree construction

/// Errors raised while inserting identifiers into the tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Identifier is structurally invalid (empty, or has an empty segment)
    #[error("malformed identifier '{identifier}': {reason}")]
    MalformedIdentifier {
        identifier: String,
        reason: &'static str,
    },
}

impl TreeError {
    /// Create malformed identifier error
    pub fn malformed(identifier: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedIdentifier {
            identifier: identifier.into(),
            reason,
        }
    }

    /// The offending identifier text
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::MalformedIdentifier { identifier, .. } => identifier,
        }
    }
}

/// Result type alias for tree operations
pub type TreeResult<T> = Result<T, TreeError>;
