//! JSON file document store.
//!
//! Stores the document as pretty-printed JSON at a single path. Writes go
//! to a sibling temp file that is then renamed over the target, so readers
//! see either the old document or the new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{DocumentStore, Result};
use crate::clock::Clock;
use crate::model::Document;

/// Filesystem-backed document store.
pub struct JsonFileStore {
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl JsonFileStore {
    /// Create a store for `path`. The file is not touched until first use.
    ///
    /// `clock` dates the seeded campaigns served while the file is absent.
    pub fn new(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Document> {
        let today = self.clock.now().date_naive();
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Document::from_json(&bytes, today)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no document yet, serving defaults");
                Ok(Document::seeded(today))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, doc: &Document) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let bytes = doc.to_json()?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, &bytes).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(
            path = %self.path.display(),
            events = doc.events.len(),
            campaigns = doc.campaigns.len(),
            "document saved"
        );
        Ok(())
    }
}
