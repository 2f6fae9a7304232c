//! In-memory key-value storage for tests and ephemeral sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use promptvault_core::error::Result;
use tokio::sync::Mutex;

use super::KeyValueStorage;

/// A `HashMap`-backed storage with no durability.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
