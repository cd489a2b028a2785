//! Key/value settings contract.
//!
//! Statistics and alarms persist through a [`SettingsStore`] handed to them
//! at construction. Values are JSON; the store does not care what they mean.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{CoreError, Result};

pub trait SettingsStore {
    /// Raw value for `key`, `None` if never set.
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: Value) -> Result<()>;
}

/// Typed helpers over any [`SettingsStore`].
pub trait SettingsStoreExt: SettingsStore {
    /// Typed value for `key`, or `default` when the key is missing, the
    /// store fails, or the stored value has the wrong shape. Malformed
    /// settings never reach the caller as an error.
    fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(v) => v,
                Err(e) => {
                    warn!(key, error = %e, "malformed setting, using default");
                    default
                }
            },
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "settings read failed, using default");
                default
            }
        }
    }

    /// Every well-formed element of the JSON array stored under `key`.
    /// Elements that do not parse are logged and dropped individually, so
    /// one bad entry never hides the others.
    fn get_each<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw: Vec<Value> = self.get_or(key, Vec::new());
        raw.into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(key, index, error = %e, "skipping malformed entry");
                    None
                }
            })
            .collect()
    }

    fn put<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        self.set(key, serde_json::to_value(value)?)
    }
}

impl<S: SettingsStore + ?Sized> SettingsStoreExt for S {}

/// Process-local store for tests and front-ends that do not persist.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        let values = self
            .values
            .lock()
            .map_err(|e| CoreError::Custom(format!("settings lock poisoned: {e}")))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| CoreError::Custom(format!("settings lock poisoned: {e}")))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}
