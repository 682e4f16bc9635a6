#[cfg(test)]
#[path = "file_test.rs"]
mod tests;

use std::collections::BTreeMap;
use std::path;

use anyhow::Result;
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Store;
use crate::domain::models::StoreName;

/// Keeps every key in a single YAML mapping on disk.
pub struct FileStore {
    pub file_path: path::PathBuf,
}

impl Default for FileStore {
    fn default() -> FileStore {
        return FileStore::new(path::PathBuf::from(Config::get(ConfigKey::StoreFile)));
    }
}

impl FileStore {
    pub fn new(file_path: path::PathBuf) -> FileStore {
        return FileStore { file_path };
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let payload = fs::read_to_string(&self.file_path).await?;
        if payload.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let entries: BTreeMap<String, String> = serde_yaml::from_str(&payload)?;
        return Ok(entries);
    }
}

#[async_trait]
impl Store for FileStore {
    fn name(&self) -> StoreName {
        return StoreName::File;
    }

    #[allow(clippy::implicit_return)]
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.read_all().await?;
        return Ok(entries.remove(key));
    }

    #[allow(clippy::implicit_return)]
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());
        let payload = serde_yaml::to_string(&entries)?;

        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&self.file_path).await?;
        file.write_all(payload.as_bytes()).await?;
        file.flush().await?;
        tracing::debug!(key = key, path = ?self.file_path, "Saved store entry");

        return Ok(());
    }
}
