use std::any::Any;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result};

/// Companion payload that travels with every sample.
///
/// Producers may attach arbitrary named values (e.g. an acceptance flag, a
/// weight, a timestamp). None of the accumulators in this crate read it; they
/// accept and drop it.
#[derive(Default)]
pub struct AuxiliaryData {
    entries: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl AuxiliaryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, replacing any previous entry.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Any + Send + Sync,
    {
        self.entries.insert(key.into(), Box::new(value));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Any + Send + Sync,
    {
        self.insert(key, value);
        self
    }

    /// Returns the entry under `key` if it exists and has type `T`.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref::<T>()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Debug for AuxiliaryData {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("AuxiliaryData").field("keys", &keys).finish()
    }
}
