//! Durable key/value preferences
//!
//! The store is injected so hosts can back it with whatever persistence
//! they have. Semantics are deliberately small: string keys and values,
//! last write wins, no transactions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EffectError;

/// Durable preference storage
pub trait PreferenceStore {
    /// Read a stored value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value. Backends may fail (quota, denied storage); the
    /// caller treats failures as best-effort.
    fn set(&mut self, key: &str, value: &str) -> Result<(), EffectError>;

    /// Remove a value, returning it if it was present
    fn remove(&mut self, key: &str) -> Option<String>;
}

/// In-memory preference store with JSON snapshot support
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the store is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Serialize the store contents for a host to persist
    pub fn to_json(&self) -> Result<String, EffectError> {
        Ok(serde_json::to_string(&self.values)?)
    }

    /// Rebuild a store from a persisted snapshot
    pub fn from_json(json: &str) -> Result<Self, EffectError> {
        Ok(Self {
            values: serde_json::from_str(json)?,
        })
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EffectError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}
