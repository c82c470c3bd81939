//! In-memory settings store
//!
//! [`MemoryStore`] stands in for the host configuration store. Every accessor
//! takes the lock, acts and releases it; nothing is held between calls. It
//! enforces what a real store would: value shapes per kind, range bounds and
//! list membership.

use crate::source::IdentifierSource;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use settings_model::{Flag, Kind, SettingsStore, StoreError, Value};

fn default_true() -> bool {
    true
}

/// One stored setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoredSetting {
    /// Raw type tag as the store declares it
    #[serde(rename = "type")]
    pub kind_tag: String,

    /// Current value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,

    /// Description text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Setting can currently be changed
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Setting applies to this machine
    #[serde(default = "default_true")]
    pub applicable: bool,

    /// Setting is locked by group policy
    #[serde(default)]
    pub set_by_group_policy: bool,

    /// Lower bound for range settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i32>,

    /// Upper bound for range settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i32>,

    /// Legal values for list settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_values: Option<Vec<Value>>,

    /// When set, every read of this setting fails with this message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<String>,

    /// Number of times the action ran
    #[serde(skip)]
    pub invocations: usize,
}

impl StoredSetting {
    /// Create setting with a type tag and nothing else
    #[must_use]
    pub fn new(kind_tag: impl Into<String>) -> Self {
        Self {
            kind_tag: kind_tag.into(),
            value: None,
            description: None,
            enabled: true,
            applicable: true,
            set_by_group_policy: false,
            min: None,
            max: None,
            possible_values: None,
            fault: None,
            invocations: 0,
        }
    }

    /// With value
    #[must_use]
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// With description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With range bounds
    #[must_use]
    pub fn with_bounds(mut self, min: i32, max: i32) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// With list values
    #[must_use]
    pub fn with_possible_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.possible_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// With a read fault
    #[must_use]
    pub fn with_fault(mut self, message: impl Into<String>) -> Self {
        self.fault = Some(message.into());
        self
    }

    fn kind(&self) -> Option<Kind> {
        Kind::from_tag(&self.kind_tag).ok()
    }

    fn check_fault(&self, id: &str, what: &'static str) -> Result<(), StoreError> {
        match &self.fault {
            Some(message) => Err(StoreError::read(id, what, message.clone())),
            None => Ok(()),
        }
    }

    fn validate_write(&self, value: &Value) -> Result<(), String> {
        match (self.kind(), value) {
            (Some(Kind::Boolean), Value::Bool(_)) => Ok(()),
            (Some(Kind::Range), Value::Int(i)) => {
                let below = self.min.is_some_and(|min| *i < min);
                let above = self.max.is_some_and(|max| *i > max);
                if below || above {
                    Err(format!("{i} is outside the allowed range"))
                } else {
                    Ok(())
                }
            }
            (Some(Kind::List), Value::Text(text)) => match &self.possible_values {
                Some(values) if !values.contains(value) => {
                    Err(format!("'{text}' is not one of the possible values"))
                }
                _ => Ok(()),
            },
            (Some(Kind::Boolean | Kind::Range | Kind::List), other) => {
                Err(format!("{} value does not fit a {} setting", other.type_name(), self.kind_tag))
            }
            _ => Err(format!("a {} setting holds no value", self.kind_tag)),
        }
    }
}

/// Catalog document: identifier to stored setting, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// Settings keyed by identifier
    #[serde(default)]
    pub settings: IndexMap<String, StoredSetting>,
}

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<IndexMap<String, StoredSetting>>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store seeded from a catalog document
    #[must_use]
    pub fn from_document(document: CatalogDocument) -> Self {
        Self {
            entries: RwLock::new(document.settings),
        }
    }

    /// Insert or replace a setting
    pub fn insert(&self, id: impl Into<String>, setting: StoredSetting) {
        self.entries.write().insert(id.into(), setting);
    }

    /// Copy of one stored setting
    #[must_use]
    pub fn get(&self, id: &str) -> Option<StoredSetting> {
        self.entries.read().get(id).cloned()
    }

    /// Number of stored settings
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Current contents as a catalog document
    #[must_use]
    pub fn snapshot(&self) -> CatalogDocument {
        CatalogDocument {
            settings: self.entries.read().clone(),
        }
    }

    fn with_entry<T>(
        &self,
        id: &str,
        f: impl FnOnce(&StoredSetting) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let entries = self.entries.read();
        let entry = entries.get(id).ok_or_else(|| StoreError::not_found(id))?;
        f(entry)
    }

    fn with_entry_mut<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut StoredSetting) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut entries = self.entries.write();
        let entry = entries.get_mut(id).ok_or_else(|| StoreError::not_found(id))?;
        f(entry)
    }
}

impl SettingsStore for MemoryStore {
    fn read_value(&self, id: &str) -> Result<Value, StoreError> {
        self.with_entry(id, |entry| {
            entry.check_fault(id, "value")?;
            entry
                .value
                .clone()
                .ok_or_else(|| StoreError::read(id, "value", "setting has no value"))
        })
    }

    fn write_value(&self, id: &str, value: Value) -> Result<(), StoreError> {
        self.with_entry_mut(id, |entry| {
            if !entry.enabled || entry.set_by_group_policy {
                return Err(StoreError::write(id, "setting is locked"));
            }
            entry
                .validate_write(&value)
                .map_err(|reason| StoreError::write(id, reason))?;
            entry.value = Some(value);
            Ok(())
        })
    }

    fn read_flag(&self, id: &str, flag: Flag) -> Result<bool, StoreError> {
        self.with_entry(id, |entry| {
            entry.check_fault(id, "flag")?;
            Ok(match flag {
                Flag::Enabled => entry.enabled,
                Flag::Applicable => entry.applicable,
                Flag::SetByGroupPolicy => entry.set_by_group_policy,
            })
        })
    }

    fn read_description(&self, id: &str) -> Result<String, StoreError> {
        self.with_entry(id, |entry| {
            entry.check_fault(id, "description")?;
            entry
                .description
                .clone()
                .ok_or_else(|| StoreError::read(id, "description", "no description available"))
        })
    }

    fn read_possible_values(&self, id: &str) -> Result<Vec<Value>, StoreError> {
        self.with_entry(id, |entry| {
            entry.check_fault(id, "possible values")?;
            entry
                .possible_values
                .clone()
                .ok_or_else(|| StoreError::read(id, "possible values", "not a list setting"))
        })
    }

    fn invoke_action(&self, id: &str) -> Result<(), StoreError> {
        self.with_entry_mut(id, |entry| {
            if entry.kind() != Some(Kind::Action) {
                return Err(StoreError::invocation(id, "setting is not an action"));
            }
            if !entry.enabled {
                return Err(StoreError::invocation(id, "action is disabled"));
            }
            entry.invocations += 1;
            Ok(())
        })
    }
}

impl IdentifierSource for MemoryStore {
    fn enumerate(&self) -> Result<Vec<(String, String)>, StoreError> {
        Ok(self
            .entries
            .read()
            .iter()
            .map(|(id, entry)| (id.clone(), entry.kind_tag.clone()))
            .collect())
    }
}
