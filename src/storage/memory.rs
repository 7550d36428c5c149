//! In-memory document store.
//!
//! Backs the `memory` storage type and doubles as the test store, with
//! switches to make loads or saves fail.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::{DocumentStore, Result, StorageError};
use crate::model::Document;

/// Document store that keeps the document in process memory.
#[derive(Default)]
pub struct MemoryStore {
    doc: RwLock<Document>,
    fail_on_load: RwLock<bool>,
    fail_on_save: RwLock<bool>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new(doc: Document) -> Self {
        Self {
            doc: RwLock::new(doc),
            ..Self::default()
        }
    }

    /// Store holding the default campaigns and no events.
    pub fn seeded(today: NaiveDate) -> Self {
        Self::new(Document::seeded(today))
    }

    pub async fn set_fail_on_load(&self, fail: bool) {
        *self.fail_on_load.write().await = fail;
    }

    pub async fn set_fail_on_save(&self, fail: bool) {
        *self.fail_on_save.write().await = fail;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Current document, bypassing failure injection.
    pub async fn snapshot(&self) -> Document {
        self.doc.read().await.clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Document> {
        if *self.fail_on_load.read().await {
            return Err(StorageError::Unavailable("load disabled".to_string()));
        }
        Ok(self.doc.read().await.clone())
    }

    async fn save(&self, doc: &Document) -> Result<()> {
        if *self.fail_on_save.read().await {
            return Err(StorageError::Unavailable("save disabled".to_string()));
        }
        *self.doc.write().await = doc.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
