//! Testing utilities for the settings explorer workspace
//!
//! Scripted stores with call counters and injectable failures, plus catalog
//! fixtures.

#![allow(missing_docs)]

use parking_lot::Mutex;
use settings_model::{Flag, SettingsStore, StoreError, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Which accessor a scripted failure applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accessor {
    Value,
    Write,
    Flag,
    Description,
    PossibleValues,
    Invoke,
}

/// How a scripted accessor misbehaves
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Return a store error whose innermost cause has this message
    Error(String),
    /// Panic with this message
    Panic(String),
}

/// Store that honors writes and counts calls
#[derive(Debug, Default)]
pub struct ScriptedStore {
    values: Mutex<HashMap<String, Value>>,
    possible: Mutex<HashMap<String, Vec<Value>>>,
    faults: Mutex<HashMap<Accessor, Fault>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    invocations: AtomicUsize,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, id: &str, value: impl Into<Value>) -> Self {
        self.values.lock().insert(id.to_string(), value.into());
        self
    }

    pub fn with_possible_values(self, id: &str, values: &[&str]) -> Self {
        self.possible
            .lock()
            .insert(id.to_string(), values.iter().map(|v| Value::from(*v)).collect());
        self
    }

    pub fn with_fault(self, accessor: Accessor, fault: Fault) -> Self {
        self.faults.lock().insert(accessor, fault);
        self
    }

    pub fn failing(accessor: Accessor, message: &str) -> Self {
        Self::new().with_fault(accessor, Fault::Error(message.to_string()))
    }

    pub fn panicking(accessor: Accessor, message: &str) -> Self {
        Self::new().with_fault(accessor, Fault::Panic(message.to_string()))
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    fn check(&self, accessor: Accessor, id: &str) -> Result<(), StoreError> {
        match self.faults.lock().get(&accessor).cloned() {
            None => Ok(()),
            Some(Fault::Panic(message)) => panic!("{message}"),
            Some(Fault::Error(message)) => Err(match accessor {
                Accessor::Write => StoreError::write(id, message),
                Accessor::Invoke => StoreError::invocation(id, message),
                Accessor::Value => StoreError::read(id, "value", message),
                Accessor::Flag => StoreError::read(id, "flag", message),
                Accessor::Description => StoreError::read(id, "description", message),
                Accessor::PossibleValues => StoreError::read(id, "possible values", message),
            }),
        }
    }
}

impl SettingsStore for ScriptedStore {
    fn read_value(&self, id: &str) -> Result<Value, StoreError> {
        self.check(Accessor::Value, id)?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.values
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn write_value(&self, id: &str, value: Value) -> Result<(), StoreError> {
        self.check(Accessor::Write, id)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values.lock().insert(id.to_string(), value);
        Ok(())
    }

    fn read_flag(&self, id: &str, flag: Flag) -> Result<bool, StoreError> {
        self.check(Accessor::Flag, id)?;
        Ok(matches!(flag, Flag::Enabled | Flag::Applicable))
    }

    fn read_description(&self, id: &str) -> Result<String, StoreError> {
        self.check(Accessor::Description, id)?;
        Ok(format!("Description of {id}"))
    }

    fn read_possible_values(&self, id: &str) -> Result<Vec<Value>, StoreError> {
        self.check(Accessor::PossibleValues, id)?;
        Ok(self.possible.lock().get(id).cloned().unwrap_or_default())
    }

    fn invoke_action(&self, id: &str) -> Result<(), StoreError> {
        self.check(Accessor::Invoke, id)?;
        self.invocations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Identifier/tag pairs shaped like a real settings catalog
pub fn sample_catalog() -> Vec<(String, String)> {
    [
        ("SystemSettings_Display_Brightness", "Range"),
        ("SystemSettings_Display_NightLight", "Boolean"),
        ("SystemSettings_Display_Orientation", "List"),
        ("SystemSettings_Notifications_Reset", "Action"),
        ("SystemSettings_Notifications_Banner", "Custom"),
        ("SystemSettings_Power_Sleep_Timeout_AC", "Range"),
        ("SystemSettings_Broken", "NotARealType"),
        ("Standalone", "Boolean"),
    ]
    .into_iter()
    .map(|(id, tag)| (id.to_string(), tag.to_string()))
    .collect()
}
