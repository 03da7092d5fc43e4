use crate::config::{Config, StoreConfig};
use crate::memory::MemoryStore;
use crate::models::{HerbPatch, HerbRecord};
use crate::spanner::SpannerStore;

/// Failures surfaced by a herb store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("herb not found: {0}")]
    NotFound(String),
    #[error("herb already exists: {0}")]
    Conflict(String),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Handle to the herb collection, shared by every request handler
///
/// Cloning is cheap: both backends keep their state behind an `Arc`.
#[derive(Clone)]
pub enum HerbStore {
    Spanner(SpannerStore),
    Memory(MemoryStore),
}

impl HerbStore {
    /// Open the backend selected by the configuration
    pub async fn open(config: &Config) -> anyhow::Result<Self> {
        match &config.store {
            StoreConfig::Spanner(spanner) => {
                Ok(HerbStore::Spanner(SpannerStore::from_config(spanner).await?))
            }
            StoreConfig::Memory => {
                tracing::info!("Using in-memory herb store");
                Ok(HerbStore::Memory(MemoryStore::new()))
            }
        }
    }

    /// Every stored herb, oldest first
    pub async fn find_all(&self) -> StoreResult<Vec<HerbRecord>> {
        match self {
            HerbStore::Spanner(store) => store.find_all().await,
            HerbStore::Memory(store) => store.find_all().await,
        }
    }

    pub async fn find_by_name(&self, name: &str) -> StoreResult<Option<HerbRecord>> {
        match self {
            HerbStore::Spanner(store) => store.find_by_name(name).await,
            HerbStore::Memory(store) => store.find_by_name(name).await,
        }
    }

    /// Store a new herb; fails with `Conflict` if the name is taken
    pub async fn insert(&self, record: HerbRecord) -> StoreResult<()> {
        match self {
            HerbStore::Spanner(store) => store.insert(record).await,
            HerbStore::Memory(store) => store.insert(record).await,
        }
    }

    /// Overwrite the whole document stored under `name`
    ///
    /// When `record.name` differs from `name` the herb is renamed, which
    /// fails with `Conflict` if the new name is already taken.
    pub async fn replace_by_name(&self, name: &str, record: HerbRecord) -> StoreResult<()> {
        match self {
            HerbStore::Spanner(store) => store.replace_by_name(name, record).await,
            HerbStore::Memory(store) => store.replace_by_name(name, record).await,
        }
    }

    /// Merge the given fields into the herb stored under `name` and return
    /// the merged document
    pub async fn update_by_name(&self, name: &str, patch: HerbPatch) -> StoreResult<HerbRecord> {
        let mut record = self
            .find_by_name(name)
            .await?
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
        record.merge(patch);
        self.replace_by_name(name, record.clone()).await?;
        Ok(record)
    }

    /// Remove every herb, returning how many were removed
    pub async fn delete_all(&self) -> StoreResult<u64> {
        match self {
            HerbStore::Spanner(store) => store.delete_all().await,
            HerbStore::Memory(store) => store.delete_all().await,
        }
    }

    pub async fn delete_by_name(&self, name: &str) -> StoreResult<()> {
        match self {
            HerbStore::Spanner(store) => store.delete_by_name(name).await,
            HerbStore::Memory(store) => store.delete_by_name(name).await,
        }
    }

    pub async fn health_check(&self) -> StoreResult<()> {
        match self {
            HerbStore::Spanner(store) => store.health_check().await,
            HerbStore::Memory(_) => Ok(()),
        }
    }

    /// Release the backend connection
    pub async fn close(self) {
        match self {
            HerbStore::Spanner(store) => store.close().await,
            HerbStore::Memory(_) => {}
        }
        tracing::info!("Herb store closed");
    }
}
