//! qrpulse: QR engagement dashboard backend.
//!
//! Serves the REST API over a single JSON document store.
//!
//! ## Configuration
//! - First argument: path to a YAML config file (optional)
//! - QRPULSE_CONFIG: path to a YAML config file (optional)
//! - QRPULSE__SERVER__PORT, QRPULSE__STORAGE__PATH, ...: per-key overrides
//! - QRPULSE_LOG: tracing filter (default: info)

use std::sync::Arc;

use tracing::info;

use qrpulse::clock::{Clock, SystemClock};
use qrpulse::config::Config;
use qrpulse::http::{serve, AppState};
use qrpulse::services::Dashboard;
use qrpulse::storage::init_storage;
use qrpulse::utils::bootstrap::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let config_path = std::env::args().nth(1);
    let config = Config::load(config_path.as_deref())?;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock::from_offset_minutes(
        config.dashboard.utc_offset_minutes,
    ));
    let store = init_storage(&config.storage, clock.clone()).await?;
    let dashboard = Arc::new(Dashboard::new(store, clock));

    info!(
        storage = %config.storage.storage_type,
        redirect = %config.server.qr_redirect_url,
        "qrpulse started"
    );

    let state = AppState::new(dashboard, config.server.qr_redirect_url.as_str());
    serve(state, &config.server.bind_address()).await
}
