use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::HerbRecord;
use crate::store::{StoreError, StoreResult};

/// In-process herb collection
///
/// Records keep their insertion order, like the natural order of a document
/// collection. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    herbs: Arc<RwLock<Vec<HerbRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn find_all(&self) -> StoreResult<Vec<HerbRecord>> {
        Ok(self.herbs.read().await.clone())
    }

    pub async fn find_by_name(&self, name: &str) -> StoreResult<Option<HerbRecord>> {
        let herbs = self.herbs.read().await;
        Ok(herbs.iter().find(|herb| herb.name == name).cloned())
    }

    pub async fn insert(&self, record: HerbRecord) -> StoreResult<()> {
        let mut herbs = self.herbs.write().await;
        if herbs.iter().any(|herb| herb.name == record.name) {
            return Err(StoreError::Conflict(record.name));
        }
        tracing::debug!("Inserted herb: {}", record.name);
        herbs.push(record);
        Ok(())
    }

    pub async fn replace_by_name(&self, name: &str, record: HerbRecord) -> StoreResult<()> {
        let mut herbs = self.herbs.write().await;

        let index = herbs
            .iter()
            .position(|herb| herb.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        if record.name != name && herbs.iter().any(|herb| herb.name == record.name) {
            return Err(StoreError::Conflict(record.name));
        }

        tracing::debug!("Replaced herb: {} -> {}", name, record.name);
        herbs[index] = record;
        Ok(())
    }

    pub async fn delete_all(&self) -> StoreResult<u64> {
        let mut herbs = self.herbs.write().await;
        let removed = herbs.len() as u64;
        herbs.clear();
        Ok(removed)
    }

    pub async fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        let mut herbs = self.herbs.write().await;
        let index = herbs
            .iter()
            .position(|herb| herb.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        herbs.remove(index);
        Ok(())
    }
}
