use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Key the code buffer is persisted under.
pub const SESSION_KEY: &str = "code";

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum StoreName {
    File,
    Memory,
}

impl StoreName {
    pub fn parse(text: &str) -> Option<StoreName> {
        return StoreName::iter().find(|e| return e.to_string() == text);
    }
}

/// Durable key-value storage. No versioning, last write wins.
#[async_trait]
pub trait Store {
    fn name(&self) -> StoreName;

    async fn load(&self, key: &str) -> Result<Option<String>>;

    async fn save(&self, key: &str, value: &str) -> Result<()>;
}

pub type StoreBox = Box<dyn Store + Send + Sync>;
