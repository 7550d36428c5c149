//! Storage implementations.
//!
//! The whole dataset is one document (events plus campaigns) that is read
//! and written in full. A missing document is not an error: stores yield
//! the seeded default instead.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::clock::Clock;
use crate::config::{StorageConfig, StorageType};
use crate::model::Document;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Interface for document persistence.
///
/// Implementations:
/// - `JsonFileStore`: JSON file on the local filesystem
/// - `MemoryStore`: in-process document (tests and ephemeral runs)
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Load the full document, normalizing legacy shapes.
    async fn load(&self) -> Result<Document>;

    /// Replace the stored document.
    async fn save(&self, doc: &Document) -> Result<()>;
}

/// Initialize storage based on configuration.
pub async fn init_storage(
    config: &StorageConfig,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn DocumentStore>> {
    match config.storage_type {
        StorageType::File => {
            info!(path = %config.path, "storage: file");
            Ok(Arc::new(JsonFileStore::new(&config.path, clock)))
        }
        StorageType::Memory => {
            info!("storage: memory");
            Ok(Arc::new(MemoryStore::seeded(clock.now().date_naive())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;

    #[tokio::test]
    async fn test_init_memory_storage_is_seeded() {
        let config = StorageConfig {
            storage_type: StorageType::Memory,
            ..StorageConfig::default()
        };
        let store = init_storage(&config, Arc::new(SystemClock::default()))
            .await
            .unwrap();

        let doc = store.load().await.unwrap();
        assert!(doc.events.is_empty());
        assert_eq!(doc.campaigns.len(), 2);
    }

    #[tokio::test]
    async fn test_init_file_storage_defers_io() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = StorageConfig {
            storage_type: StorageType::File,
            path: temp.path().join("nested/events.json").display().to_string(),
        };
        let store = init_storage(&config, Arc::new(SystemClock::default()))
            .await
            .unwrap();

        // Nothing written yet: the seeded default is served.
        let doc = store.load().await.unwrap();
        assert_eq!(doc.campaigns.len(), 2);
        assert!(!temp.path().join("nested/events.json").exists());
    }
}
