//! Setting identifiers
//!
//! Provides [`Identifier`], a separator-delimited path naming one setting in the
//! external store, and the segment splitting used by the tree builder.

use crate::error::TreeError;
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Separator used by the settings store between identifier segments
pub const DEFAULT_SEPARATOR: char = '_';

/// Unique identifier of one setting
///
/// The string is opaque to everything except the tree builder, which splits
/// it into segments to derive the navigation path.
///
/// # Examples
/// - `SystemSettings_Display_Brightness` → `SystemSettings` / `Display` / `Brightness`
/// - `Standalone` → a single top-level leaf
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    /// Create identifier, rejecting the empty string
    ///
    /// Segments are not checked here: the separator is only known to the
    /// tree builder, which rejects empty segments when it splits the
    /// identifier (see [`Identifier::segments`]).
    ///
    /// # Errors
    /// Returns [`TreeError::MalformedIdentifier`] if `raw` is empty
    pub fn new(raw: impl Into<String>) -> Result<Self, TreeError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(TreeError::malformed(raw, "identifier is empty"));
        }
        Ok(Self(raw))
    }

    /// Get the identifier text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned string
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Split into ordered segments
    ///
    /// # Errors
    /// Returns [`TreeError::MalformedIdentifier`] if any segment is empty
    /// (leading, trailing or doubled separator)
    pub fn segments(&self, separator: char) -> Result<Vec<&str>, TreeError> {
        split_segments(&self.0, separator)
    }

    /// Cumulative prefixes paired with the segment that ends each one
    ///
    /// `A_B_C` yields `("A", "A")`, `("A_B", "B")`, `("A_B_C", "C")`.
    ///
    /// # Errors
    /// Same as [`Identifier::segments`]
    pub fn prefixes(&self, separator: char) -> Result<Vec<(String, &str)>, TreeError> {
        let segments = self.segments(separator)?;
        let mut key = String::with_capacity(self.0.len());
        let mut out = Vec::with_capacity(segments.len());
        for (i, segment) in segments.into_iter().enumerate() {
            if i > 0 {
                key.push(separator);
            }
            key.push_str(segment);
            out.push((key.clone(), segment));
        }
        Ok(out)
    }
}

/// Split raw identifier text on `separator`
///
/// # Errors
/// Returns [`TreeError::MalformedIdentifier`] for empty input or empty segments
pub fn split_segments(raw: &str, separator: char) -> Result<Vec<&str>, TreeError> {
    if raw.is_empty() {
        return Err(TreeError::malformed(raw, "identifier is empty"));
    }
    raw.split(separator)
        .map(|segment| {
            if segment.is_empty() {
                Err(TreeError::malformed(raw, "identifier contains an empty segment"))
            } else {
                Ok(segment)
            }
        })
        .collect()
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = TreeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = TreeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
