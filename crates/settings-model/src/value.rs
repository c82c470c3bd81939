//! Setting values
//!
//! [`Value`] is what crosses the store boundary; [`SettingValue`] maps it onto
//! the concrete Rust type a descriptor variant exposes.

use crate::error::ModelError;
use crate::kind::Kind;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display, Formatter};

/// Value union understood by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Boolean setting value
    Bool(bool),

    /// Range setting value
    Int(i32),

    /// List setting value, or any textual value
    Text(String),
}

impl Value {
    /// Short name of the held shape
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Text(_) => "string",
        }
    }

    /// Parse user-entered text into the value shape `kind` expects
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidValue`] when the text does not parse, and
    /// [`ModelError::NoValue`] for kinds without a value
    pub fn parse_for(kind: Kind, id: &str, text: &str) -> Result<Self, ModelError> {
        let invalid = || ModelError::InvalidValue {
            id: id.to_string(),
            kind,
            input: text.to_string(),
        };
        match kind {
            Kind::Boolean => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "on" => Ok(Self::Bool(true)),
                "false" | "0" | "off" => Ok(Self::Bool(false)),
                _ => Err(invalid()),
            },
            Kind::Range => text.trim().parse().map(Self::Int).map_err(|_| invalid()),
            Kind::List => Ok(Self::Text(text.to_string())),
            Kind::Action | Kind::Generic => Err(ModelError::NoValue {
                id: id.to_string(),
                kind,
            }),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

mod private {
    pub trait Sealed {}
    impl Sealed for bool {}
    impl Sealed for i32 {}
    impl Sealed for String {}
}

/// Rust type carried by a value-bearing descriptor
///
/// Sealed: only `bool`, `i32` and `String` are setting payloads.
pub trait SettingValue:
    Clone + Default + Debug + Display + Send + Sync + Into<Value> + 'static + private::Sealed
{
    /// Kind whose descriptors carry this type
    const KIND: Kind;

    /// Extract from a store value, `None` on shape mismatch
    fn from_value(value: Value) -> Option<Self>;
}

impl SettingValue for bool {
    const KIND: Kind = Kind::Boolean;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl SettingValue for i32 {
    const KIND: Kind = Kind::Range;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl SettingValue for String {
    const KIND: Kind = Kind::List;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_display() {
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::from("Dark").to_string(), "Dark");
    }

    #[test]
    fn setting_value_extracts_matching_shape() {
        assert_eq!(bool::from_value(Value::Bool(true)), Some(true));
        assert_eq!(i32::from_value(Value::Int(3)), Some(3));
        assert_eq!(String::from_value(Value::from("x")), Some("x".to_string()));
    }

    #[test]
    fn setting_value_rejects_other_shapes() {
        assert_eq!(bool::from_value(Value::Int(1)), None);
        assert_eq!(i32::from_value(Value::from("1")), None);
        assert_eq!(String::from_value(Value::Bool(false)), None);
    }

    #[test]
    fn parse_for_kinds() {
        assert_eq!(Value::parse_for(Kind::Boolean, "a", "ON").unwrap(), Value::Bool(true));
        assert_eq!(Value::parse_for(Kind::Boolean, "a", "false").unwrap(), Value::Bool(false));
        assert_eq!(Value::parse_for(Kind::Range, "a", " -12 ").unwrap(), Value::Int(-12));
        assert_eq!(Value::parse_for(Kind::List, "a", "Dark").unwrap(), Value::from("Dark"));
    }

    #[test]
    fn parse_for_rejects_bad_input() {
        assert!(matches!(
            Value::parse_for(Kind::Range, "a", "ten"),
            Err(ModelError::InvalidValue { .. })
        ));
        assert!(matches!(
            Value::parse_for(Kind::Boolean, "a", "maybe"),
            Err(ModelError::InvalidValue { .. })
        ));
        assert!(matches!(
            Value::parse_for(Kind::Action, "a", "x"),
            Err(ModelError::NoValue { .. })
        ));
    }
}
