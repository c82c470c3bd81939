//! Failure-safe reads
//!
//! Every read of a descriptor property goes through [`safe_read`]. Errors and
//! panics from the store accessor stop here and become a [`Failure`] holding
//! the innermost cause's message, which the shell renders in place of the
//! value.

use std::any::Any;
use std::error::Error;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

/// Rendered message of a contained read failure
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
}

impl Failure {
    /// Create failure with message
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Failure described by the innermost cause of `err`
    #[must_use]
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        Self::new(innermost_message(err))
    }

    /// Failure described by a panic payload
    #[must_use]
    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "store accessor panicked".to_string()
        };
        Self::new(message)
    }

    /// Failure message
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Message of the deepest error in the `source()` chain
#[must_use]
pub fn innermost_message(err: &(dyn Error + 'static)) -> String {
    let mut current = err;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}

/// Run a read accessor, containing both errors and panics
///
/// # Errors
/// Returns the contained [`Failure`]; nothing propagates past this call.
pub fn safe_read<T, E, F>(read: F) -> Result<T, Failure>
where
    E: Error + 'static,
    F: FnOnce() -> Result<T, E>,
{
    match panic::catch_unwind(AssertUnwindSafe(read)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            let failure = Failure::from_error(&err);
            tracing::warn!(error = %err, failure = %failure, "read failed");
            Err(failure)
        }
        Err(payload) => {
            let failure = Failure::from_panic(payload.as_ref());
            tracing::error!(failure = %failure, "read accessor panicked");
            Err(failure)
        }
    }
}

/// Text for a property: the value, or the failure message in its place
#[must_use]
pub fn render<T: Display>(result: &Result<T, Failure>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(failure) => failure.message().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] Middle);

    #[derive(Debug, thiserror::Error)]
    #[error("middle")]
    struct Middle(#[source] std::io::Error);

    #[test]
    fn innermost_message_walks_chain() {
        let err = Outer(Middle(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire")));
        assert_eq!(innermost_message(&err), "disk on fire");
    }

    #[test]
    fn innermost_message_of_leaf_error() {
        let err = StoreError::not_found("A");
        assert_eq!(innermost_message(&err), "setting 'A' not found");
    }

    #[test]
    fn safe_read_passes_values() {
        let result = safe_read(|| Ok::<_, StoreError>(5));
        assert_eq!(result, Ok(5));
    }

    #[test]
    fn safe_read_contains_errors() {
        let result: Result<String, Failure> =
            safe_read(|| Err(StoreError::read("A", "description", "access denied")));
        assert_eq!(result.unwrap_err().message(), "access denied");
    }

    #[test]
    fn safe_read_contains_panics() {
        let result: Result<bool, Failure> =
            safe_read(|| -> Result<bool, StoreError> { panic!("corrupted state") });
        assert_eq!(result.unwrap_err().message(), "corrupted state");

        let result: Result<bool, Failure> = safe_read(|| -> Result<bool, StoreError> {
            panic!("{} entries corrupted", 3)
        });
        assert_eq!(result.unwrap_err().message(), "3 entries corrupted");
    }

    #[test]
    fn render_value_or_failure() {
        assert_eq!(render(&Ok::<_, Failure>(42)), "42");
        assert_eq!(render::<i32>(&Err(Failure::new("boom"))), "boom");
    }
}
