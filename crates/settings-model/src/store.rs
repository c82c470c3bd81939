//! Store accessor
//!
//! The external configuration store, seen from one descriptor. Each call is a
//! scoped acquisition: implementations open, act and release within the call
//! and hold nothing across calls.

use crate::error::StoreError;
use crate::kind::Flag;
use crate::value::Value;
use std::sync::Arc;

/// Access to setting values and metadata in the external store
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStore: Send + Sync {
    /// Current value of the setting
    fn read_value(&self, id: &str) -> Result<Value, StoreError>;

    /// Replace the setting's value
    fn write_value(&self, id: &str, value: Value) -> Result<(), StoreError>;

    /// Read one of the live boolean attributes
    fn read_flag(&self, id: &str, flag: Flag) -> Result<bool, StoreError>;

    /// Human-readable description
    fn read_description(&self, id: &str) -> Result<String, StoreError>;

    /// Legal values of a list setting, in store order
    fn read_possible_values(&self, id: &str) -> Result<Vec<Value>, StoreError>;

    /// Run an action setting
    fn invoke_action(&self, id: &str) -> Result<(), StoreError>;
}

/// Store handle shared by all descriptors of one navigation context
pub type SharedStore = Arc<dyn SettingsStore>;
