//! Dashboard services.
//!
//! `Dashboard` owns the document store and the clock and exposes the reader
//! and writer entry points used by the HTTP layer:
//! - `record_event`: Event Recorder with 24h scan dedup
//! - `draw_winner`: Campaign Draw Engine
//! - `snapshot`, `list_events`, `list_campaigns`: read-only views
//!
//! The computations themselves live in the submodules as pure functions
//! over an in-memory [`Document`].

use std::sync::Arc;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::model::{CampaignView, Document, Event};
use crate::storage::{DocumentStore, StorageError};

pub mod draw;
pub mod recorder;
pub mod snapshot;

pub use draw::{eligible_participants, DrawOutcome};
pub use recorder::{is_duplicate_scan, NewEvent, DEDUP_WINDOW_HOURS};
pub use snapshot::{campaign_views, compose_snapshot, DashboardSnapshot};

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors from dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Campaign not found: {0}")]
    CampaignNotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Entry point for all dashboard reads and writes.
///
/// Writes are read-modify-write cycles over the whole document and run one
/// at a time. Reads load the document once and never take the write lock.
pub struct Dashboard {
    store: Arc<dyn DocumentStore>,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl Dashboard {
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    /// Record one event. `Ok(None)` means the scan was a duplicate and
    /// nothing was written.
    pub async fn record_event(&self, input: NewEvent) -> Result<Option<Event>> {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now().with_timezone(&Utc);

        let mut doc = self.store.load().await?;
        let Some(event) = recorder::record_event(&mut doc.events, input, now) else {
            debug!("duplicate scan suppressed");
            return Ok(None);
        };
        self.store.save(&doc).await?;

        debug!(
            id = %event.id,
            action = %event.action,
            qr_id = %event.qr_id,
            "event recorded"
        );
        Ok(Some(event))
    }

    /// Events newest-first.
    pub async fn list_events(&self) -> Result<Vec<Event>> {
        Ok(self.store.load().await?.events)
    }

    /// Campaigns with status computed for today.
    pub async fn list_campaigns(&self) -> Result<Vec<CampaignView>> {
        let now = self.clock.now();
        let doc = self.store.load().await?;
        Ok(campaign_views(&doc, &now))
    }

    /// Draw a winner using a generator seeded from the thread-local RNG.
    pub async fn draw_winner(&self, campaign_id: &str) -> Result<DrawOutcome> {
        let mut rng = StdRng::from_rng(&mut rand::rng());
        self.draw_winner_with(campaign_id, &mut rng).await
    }

    /// Draw a winner with a caller-supplied generator.
    pub async fn draw_winner_with<R: Rng + Send + ?Sized>(
        &self,
        campaign_id: &str,
        rng: &mut R,
    ) -> Result<DrawOutcome> {
        let _guard = self.write_lock.lock().await;
        let now = self.clock.now().with_timezone(&Utc);

        let mut doc = self.store.load().await?;
        let outcome = draw::draw_winner(&mut doc, campaign_id, now, rng)?;

        match &outcome.winner {
            Some(winner) => {
                self.store.save(&doc).await?;
                info!(
                    campaign = %campaign_id,
                    participant = %winner.participant_id,
                    eligible = outcome.eligible,
                    winners = outcome.campaign.current_winners,
                    "winner drawn"
                );
            }
            None => {
                info!(
                    campaign = %campaign_id,
                    eligible = outcome.eligible,
                    full = outcome.campaign.is_full(),
                    "no winner drawn"
                );
            }
        }
        Ok(outcome)
    }

    /// All dashboard views from one consistent read.
    pub async fn snapshot(&self) -> Result<DashboardSnapshot> {
        let now = self.clock.now();
        let doc: Document = self.store.load().await?;
        Ok(compose_snapshot(&doc, &now))
    }
}
