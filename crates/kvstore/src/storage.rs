//! Storage trait and in-memory implementation

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::{Result, StoreError};

pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
    fn delete(&mut self, key: &str) -> Result<()>;

    /// All keys currently present, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-memory storage (for testing and demos)
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the code under test wrote.
#[derive(Clone)]
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.data.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Backend("storage lock poisoned".to_string())
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let data = self.data.read().map_err(poisoned)?;
        Ok(data.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let mut data = self.data.write().map_err(poisoned)?;
        data.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let data = self.data.read().map_err(poisoned)?;
        let mut keys: Vec<String> = data.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
