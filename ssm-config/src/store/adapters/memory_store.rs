use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::store::{ParameterStore, StoreError};

/// In-process parameter store. Clones share the same parameters and request
/// log.
#[derive(Clone, Default)]
pub struct MemoryStore {
    parameters: Arc<RwLock<HashMap<String, String>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters<I, K, V>(parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        for (name, value) in parameters {
            storage.insert(name, value);
        }
        storage
    }

    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.parameters
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(name.into(), value.into());
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.parameters
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(name)
    }

    /// Every name passed to `get_parameter`, oldest first, hits and misses alike.
    pub fn requested(&self) -> Vec<String> {
        self.requested
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn clear_requested(&self) {
        self.requested
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[async_trait::async_trait]
impl ParameterStore for MemoryStore {
    async fn get_parameter(&self, name: &str) -> Result<String, StoreError> {
        self.requested
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(name.to_string());

        let parameters = self.parameters.read().unwrap_or_else(|e| e.into_inner());
        parameters
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}
