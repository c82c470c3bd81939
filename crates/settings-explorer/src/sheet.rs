//! Property sheets
//!
//! A [`PropertySheet`] is the read-only snapshot a shell shows for one
//! setting. Every property read is failure-safe; a failed read keeps its
//! [`Failure`] and renders as the failure message.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use settings_model::{render, Descriptor, Failure, Kind};
use std::fmt::{self, Display, Formatter};

/// One named, failure-safe property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name
    pub name: &'static str,
    /// Rendered value, or the contained failure
    pub value: Result<String, Failure>,
}

impl Property {
    fn new<T: Display>(name: &'static str, value: &Result<T, Failure>) -> Self {
        Self {
            name,
            value: value.as_ref().map(ToString::to_string).map_err(Clone::clone),
        }
    }

    /// Text shown for the property
    #[must_use]
    pub fn text(&self) -> String {
        render(&self.value)
    }

    /// Whether the read failed
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.value.is_err()
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Property", 3)?;
        state.serialize_field("name", self.name)?;
        state.serialize_field("value", &self.text())?;
        state.serialize_field("failed", &self.is_failure())?;
        state.end()
    }
}

/// Readable properties and verbs of one setting
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct PropertySheet {
    /// Setting identifier
    pub id: String,
    /// Declared kind
    pub kind: Kind,
    /// Properties in display order
    pub properties: Vec<Property>,
    /// Legal values, list settings only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possible_values: Option<Vec<String>>,
    /// Invokable verb names
    pub verbs: Vec<&'static str>,
}

impl PropertySheet {
    /// Read every property of `descriptor`
    #[must_use]
    pub fn read(descriptor: &Descriptor) -> Self {
        let info = descriptor.info();
        let mut properties = vec![
            Property::new("description", &info.description()),
            Property::new("enabled", &info.is_enabled()),
            Property::new("applicable", &info.is_applicable()),
            Property::new("set_by_group_policy", &info.is_set_by_group_policy()),
        ];
        if let Some(value) = descriptor.value() {
            properties.push(Property::new("value", &value));
        }

        Self {
            id: descriptor.id().to_string(),
            kind: descriptor.kind(),
            properties,
            possible_values: descriptor.possible_values(),
            verbs: descriptor.verbs().names(),
        }
    }

    /// Property by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Properties whose read failed
    pub fn failures(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| p.is_failure())
    }
}

impl Display for PropertySheet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.id, self.kind)?;
        for property in &self.properties {
            writeln!(f, "  {:<20} {}", property.name, property.text())?;
        }
        if let Some(values) = &self.possible_values {
            writeln!(f, "  {:<20} {}", "possible_values", values.join(", "))?;
        }
        if !self.verbs.is_empty() {
            writeln!(f, "  {:<20} {}", "verbs", self.verbs.join(", "))?;
        }
        Ok(())
    }
}
