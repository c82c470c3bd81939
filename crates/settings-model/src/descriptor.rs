//! Setting descriptors
//!
//! A [`Descriptor`] is the typed wrapper materialized for one identifier. The
//! variant is fixed by the declared [`Kind`]; construction never touches the
//! store. Informational reads and value reads are failure-safe and return
//! `Result<_, Failure>`; writes and invocations return the store's error.

use crate::cache::{CachePolicy, ValueCache};
use crate::capability::{verbs_for, CommandSet};
use crate::error::{ModelError, ModelResult, StoreError};
use crate::kind::{Flag, Kind};
use crate::safe::{safe_read, Failure};
use crate::store::{SettingsStore, SharedStore};
use crate::value::{SettingValue, Value};
use settings_tree::Identifier;
use std::fmt::{self, Debug, Formatter};

/// Properties every descriptor shares
pub struct SettingInfo {
    id: Identifier,
    kind: Kind,
    store: SharedStore,
}

impl SettingInfo {
    pub(crate) fn new(id: Identifier, kind: Kind, store: SharedStore) -> Self {
        Self { id, kind, store }
    }

    /// Identifier the descriptor was built from
    #[inline]
    #[must_use]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Declared kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Description text, read live
    ///
    /// # Errors
    /// Returns the contained store failure
    pub fn description(&self) -> Result<String, Failure> {
        safe_read(|| self.store.read_description(self.id.as_str()))
    }

    /// One live flag
    ///
    /// # Errors
    /// Returns the contained store failure
    pub fn flag(&self, flag: Flag) -> Result<bool, Failure> {
        safe_read(|| self.store.read_flag(self.id.as_str(), flag))
    }

    /// Whether the setting can currently be changed
    ///
    /// # Errors
    /// Returns the contained store failure
    #[inline]
    pub fn is_enabled(&self) -> Result<bool, Failure> {
        self.flag(Flag::Enabled)
    }

    /// Whether the setting applies to this machine
    ///
    /// # Errors
    /// Returns the contained store failure
    #[inline]
    pub fn is_applicable(&self) -> Result<bool, Failure> {
        self.flag(Flag::Applicable)
    }

    /// Whether group policy locks the setting
    ///
    /// # Errors
    /// Returns the contained store failure
    #[inline]
    pub fn is_set_by_group_policy(&self) -> Result<bool, Failure> {
        self.flag(Flag::SetByGroupPolicy)
    }

    fn store(&self) -> &dyn SettingsStore {
        self.store.as_ref()
    }
}

impl Debug for SettingInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingInfo")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Descriptor carrying a cached value of type `T`
#[derive(Debug)]
pub struct ValueSetting<T> {
    info: SettingInfo,
    cache: ValueCache<T>,
}

/// Two-state flag setting
pub type BooleanSetting = ValueSetting<bool>;

/// Integer setting; bounds are enforced by the store
pub type RangeSetting = ValueSetting<i32>;

impl<T: SettingValue> ValueSetting<T> {
    pub(crate) fn new(id: Identifier, store: SharedStore, policy: CachePolicy) -> Self {
        Self {
            info: SettingInfo::new(id, T::KIND, store),
            cache: ValueCache::new(policy),
        }
    }

    /// Shared properties
    #[inline]
    #[must_use]
    pub fn info(&self) -> &SettingInfo {
        &self.info
    }

    /// Current value, from the cache when valid
    ///
    /// A store value of the wrong shape reads as `T::default()`.
    ///
    /// # Errors
    /// Returns the contained store failure
    pub fn get(&self) -> Result<T, Failure> {
        self.cache.get_or_fetch(|| {
            let raw = safe_read(|| self.info.store().read_value(self.info.id.as_str()))?;
            tracing::debug!(id = %self.info.id, value = %raw, "fetched setting value");
            Ok(self.interpret(raw))
        })
    }

    /// Write `value` to the store and invalidate the cache
    ///
    /// The cache is invalidated whether or not the write succeeds.
    ///
    /// # Errors
    /// Returns the store's write error unchanged
    pub fn set(&self, value: T) -> Result<(), StoreError> {
        tracing::debug!(id = %self.info.id, value = %value, "writing setting value");
        let result = self.info.store().write_value(self.info.id.as_str(), value.into());
        self.cache.invalidate();
        result
    }

    /// Drop the cached value
    #[inline]
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    /// Whether the next [`get`](Self::get) is served from the cache
    #[inline]
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.cache.is_valid()
    }

    /// Cache policy in effect
    #[inline]
    #[must_use]
    pub fn cache_policy(&self) -> CachePolicy {
        self.cache.policy()
    }

    fn interpret(&self, raw: Value) -> T {
        let actual = raw.type_name();
        let expected = T::KIND;
        T::from_value(raw).unwrap_or_else(|| {
            tracing::warn!(
                id = %self.info.id,
                expected = %expected,
                actual,
                "store value has unexpected shape, using default"
            );
            T::default()
        })
    }
}

/// Enumerated choice with a dynamically fetched option list
#[derive(Debug)]
pub struct ListSetting {
    value: ValueSetting<String>,
}

impl ListSetting {
    pub(crate) fn new(id: Identifier, store: SharedStore, policy: CachePolicy) -> Self {
        Self {
            value: ValueSetting::new(id, store, policy),
        }
    }

    /// Shared properties
    #[inline]
    #[must_use]
    pub fn info(&self) -> &SettingInfo {
        self.value.info()
    }

    /// Current value
    ///
    /// # Errors
    /// Returns the contained store failure
    #[inline]
    pub fn get(&self) -> Result<String, Failure> {
        self.value.get()
    }

    /// Write a new value
    ///
    /// # Errors
    /// Returns the store's write error unchanged
    #[inline]
    pub fn set(&self, value: impl Into<String>) -> Result<(), StoreError> {
        self.value.set(value.into())
    }

    /// Drop the cached value
    #[inline]
    pub fn invalidate(&self) {
        self.value.invalidate();
    }

    /// Whether the next read is served from the cache
    #[inline]
    #[must_use]
    pub fn is_cached(&self) -> bool {
        self.value.is_cached()
    }

    /// Legal values, fetched fresh on every call
    ///
    /// # Errors
    /// Returns the contained store failure
    pub fn try_possible_values(&self) -> Result<Vec<String>, Failure> {
        let info = self.info();
        let values = safe_read(|| info.store().read_possible_values(info.id.as_str()))?;
        Ok(values
            .into_iter()
            .map(|value| match value {
                Value::Text(text) => text,
                other => other.to_string(),
            })
            .collect())
    }

    /// Legal values; on failure a single entry holding the failure message
    #[must_use]
    pub fn possible_values(&self) -> Vec<String> {
        self.try_possible_values()
            .unwrap_or_else(|failure| vec![failure.message().to_string()])
    }
}

/// Parameterless action
#[derive(Debug)]
pub struct ActionSetting {
    info: SettingInfo,
}

impl ActionSetting {
    pub(crate) fn new(id: Identifier, store: SharedStore) -> Self {
        Self {
            info: SettingInfo::new(id, Kind::Action, store),
        }
    }

    /// Shared properties
    #[inline]
    #[must_use]
    pub fn info(&self) -> &SettingInfo {
        &self.info
    }

    /// Run the action
    ///
    /// # Errors
    /// Returns the store's invocation error unchanged
    pub fn invoke(&self) -> Result<(), StoreError> {
        tracing::info!(id = %self.info.id, "invoking action");
        self.info.store().invoke_action(self.info.id.as_str())
    }
}

/// Fallback for kinds without a typed payload
#[derive(Debug)]
pub struct GenericSetting {
    info: SettingInfo,
}

impl GenericSetting {
    pub(crate) fn new(id: Identifier, store: SharedStore) -> Self {
        Self {
            info: SettingInfo::new(id, Kind::Generic, store),
        }
    }

    /// Shared properties
    #[inline]
    #[must_use]
    pub fn info(&self) -> &SettingInfo {
        &self.info
    }
}

/// Materialized descriptor, one variant per kind
#[derive(Debug)]
pub enum Descriptor {
    /// Boolean flag
    Boolean(BooleanSetting),
    /// Bounded integer
    Range(RangeSetting),
    /// Enumerated choice
    List(ListSetting),
    /// Invokable action
    Action(ActionSetting),
    /// Description and flags only
    Generic(GenericSetting),
}

impl Descriptor {
    /// Shared properties
    #[must_use]
    pub fn info(&self) -> &SettingInfo {
        match self {
            Self::Boolean(s) => s.info(),
            Self::Range(s) => s.info(),
            Self::List(s) => s.info(),
            Self::Action(s) => s.info(),
            Self::Generic(s) => s.info(),
        }
    }

    /// Identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &Identifier {
        self.info().id()
    }

    /// Kind of the variant
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.info().kind()
    }

    /// Value as a store [`Value`], `None` for kinds without a value
    #[must_use]
    pub fn value(&self) -> Option<Result<Value, Failure>> {
        match self {
            Self::Boolean(s) => Some(s.get().map(Value::Bool)),
            Self::Range(s) => Some(s.get().map(Value::Int)),
            Self::List(s) => Some(s.get().map(Value::Text)),
            Self::Action(_) | Self::Generic(_) => None,
        }
    }

    /// Legal values, for list descriptors only
    #[must_use]
    pub fn possible_values(&self) -> Option<Vec<String>> {
        match self {
            Self::List(s) => Some(s.possible_values()),
            _ => None,
        }
    }

    /// Write a store [`Value`] of the matching shape
    ///
    /// # Errors
    /// - [`ModelError::NoValue`] for action and generic descriptors
    /// - [`ModelError::ValueMismatch`] when the shape does not fit the kind
    /// - [`ModelError::Store`] when the store rejects the write
    pub fn set_value(&self, value: Value) -> ModelResult<()> {
        match (self, value) {
            (Self::Boolean(s), Value::Bool(b)) => s.set(b)?,
            (Self::Range(s), Value::Int(i)) => s.set(i)?,
            (Self::List(s), Value::Text(text)) => s.set(text)?,
            (Self::Action(_) | Self::Generic(_), _) => {
                return Err(ModelError::NoValue {
                    id: self.id().to_string(),
                    kind: self.kind(),
                })
            }
            (_, other) => {
                return Err(ModelError::ValueMismatch {
                    id: self.id().to_string(),
                    kind: self.kind(),
                    actual: other.type_name(),
                })
            }
        }
        Ok(())
    }

    /// Drop any cached value
    pub fn invalidate(&self) {
        match self {
            Self::Boolean(s) => s.invalidate(),
            Self::Range(s) => s.invalidate(),
            Self::List(s) => s.invalidate(),
            Self::Action(_) | Self::Generic(_) => {}
        }
    }

    /// Whether a value is currently cached
    #[must_use]
    pub fn is_cached(&self) -> bool {
        match self {
            Self::Boolean(s) => s.is_cached(),
            Self::Range(s) => s.is_cached(),
            Self::List(s) => s.is_cached(),
            Self::Action(_) | Self::Generic(_) => false,
        }
    }

    /// Invokable commands, rebuilt on every call
    #[inline]
    #[must_use]
    pub fn verbs(&self) -> CommandSet<'_> {
        verbs_for(self)
    }

    /// Boolean variant, if this is one
    #[must_use]
    pub fn as_boolean(&self) -> Option<&BooleanSetting> {
        match self {
            Self::Boolean(s) => Some(s),
            _ => None,
        }
    }

    /// Range variant, if this is one
    #[must_use]
    pub fn as_range(&self) -> Option<&RangeSetting> {
        match self {
            Self::Range(s) => Some(s),
            _ => None,
        }
    }

    /// List variant, if this is one
    #[must_use]
    pub fn as_list(&self) -> Option<&ListSetting> {
        match self {
            Self::List(s) => Some(s),
            _ => None,
        }
    }

    /// Action variant, if this is one
    #[must_use]
    pub fn as_action(&self) -> Option<&ActionSetting> {
        match self {
            Self::Action(s) => Some(s),
            _ => None,
        }
    }
}
