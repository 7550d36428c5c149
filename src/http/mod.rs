//! REST API for the dashboard.
//!
//! Endpoints:
//! - `GET /` and `GET /api/health`: liveness
//! - `GET /api/qr?id=<qrId>`: record a scan, then redirect the customer
//! - `POST /api/track`: record a scan, coupon click, or review
//! - `GET /api/dashboard`: full dashboard snapshot
//! - `GET /api/events`: raw event log, newest first
//! - `GET /api/campaigns`: campaigns with computed status
//! - `POST /api/campaigns/:id/draw`: draw a winner

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::services::Dashboard;

mod error;
mod handlers;

pub use error::ApiError;

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<Dashboard>,
    pub qr_redirect_url: Arc<str>,
}

impl AppState {
    pub fn new(dashboard: Arc<Dashboard>, qr_redirect_url: impl Into<Arc<str>>) -> Self {
        Self {
            dashboard,
            qr_redirect_url: qr_redirect_url.into(),
        }
    }
}

/// Start the REST server on `addr`.
///
/// Port 0 lets the OS pick one; the bound address is always logged.
pub async fn serve(
    state: AppState,
    addr: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(address = %local, "REST API listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}

/// Build the axum router (separated for testing).
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health))
        .route("/api/qr", get(handlers::scan_qr))
        .route("/api/track", post(handlers::track))
        .route("/api/dashboard", get(handlers::dashboard))
        .route("/api/events", get(handlers::events))
        .route("/api/campaigns", get(handlers::campaigns))
        .route("/api/campaigns/:id/draw", post(handlers::draw))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
