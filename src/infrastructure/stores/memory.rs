#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::models::Store;
use crate::domain::models::StoreName;

/// Process-lifetime store. Clones share the same entries.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, String>>,
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> StoreName {
        return StoreName::Memory;
    }

    #[allow(clippy::implicit_return)]
    async fn load(&self, key: &str) -> Result<Option<String>> {
        return Ok(self.entries.get(key).map(|e| return e.value().to_string()));
    }

    #[allow(clippy::implicit_return)]
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        return Ok(());
    }
}
