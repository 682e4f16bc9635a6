pub mod file;
pub mod memory;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::StoreBox;
use crate::domain::models::StoreName;

pub struct StoreManager {}

impl StoreManager {
    pub fn get(name: StoreName) -> Result<StoreBox> {
        if name == StoreName::File {
            return Ok(Box::<file::FileStore>::default());
        }

        if name == StoreName::Memory {
            return Ok(Box::<memory::MemoryStore>::default());
        }

        bail!(format!("No store implemented for {name}"))
    }
}
