//! Setting kinds and per-setting flags
//!
//! [`Kind`] is declared by the identifier source, never inferred from values.

use crate::error::KindError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Store type tags that exist but carry no typed payload
///
/// These parse successfully and map to [`Kind::Generic`].
pub const GENERIC_TAGS: &[&str] = &[
    "custom",
    "displaystring",
    "labeledstring",
    "string",
    "settingcollection",
];

/// How a setting's value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Two-state flag
    Boolean,

    /// Signed integer with store-defined bounds
    Range,

    /// One string out of a dynamically fetched set
    List,

    /// Parameterless side-effecting operation
    Action,

    /// Recognized by the store but without a typed payload
    Generic,
}

impl Kind {
    /// All kinds, specific variants first
    pub const ALL: [Kind; 5] = [
        Kind::Boolean,
        Kind::Range,
        Kind::List,
        Kind::Action,
        Kind::Generic,
    ];

    /// Parse a raw store tag, case-insensitively
    ///
    /// # Errors
    /// Returns [`KindError::UnsupportedKind`] for tags outside the store's
    /// vocabulary
    pub fn from_tag(tag: &str) -> Result<Self, KindError> {
        let normalized = tag.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "boolean" => Ok(Self::Boolean),
            "range" => Ok(Self::Range),
            "list" => Ok(Self::List),
            "action" => Ok(Self::Action),
            "generic" => Ok(Self::Generic),
            other if GENERIC_TAGS.contains(&other) => Ok(Self::Generic),
            _ => Err(KindError::UnsupportedKind(tag.to_string())),
        }
    }

    /// Canonical name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "Boolean",
            Self::Range => "Range",
            Self::List => "List",
            Self::Action => "Action",
            Self::Generic => "Generic",
        }
    }

    /// Whether descriptors of this kind carry a value
    #[inline]
    #[must_use]
    pub fn has_value(self) -> bool {
        matches!(self, Self::Boolean | Self::Range | Self::List)
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = KindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

/// Live boolean attributes every setting exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Setting can currently be changed
    Enabled,

    /// Setting applies to this machine
    Applicable,

    /// Setting is locked by group policy
    SetByGroupPolicy,
}

impl Flag {
    /// Stable flag name passed to the store
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Applicable => "applicable",
            Self::SetByGroupPolicy => "set_by_group_policy",
        }
    }
}

impl Display for Flag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
