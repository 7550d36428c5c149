use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::model::{Action, CampaignView, Event};
use crate::services::{DashboardSnapshot, DrawOutcome, NewEvent};

pub(super) async fn root() -> &'static str {
    "Backend API is running."
}

pub(super) async fn health() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
pub(super) struct QrQuery {
    id: Option<String>,
}

/// Record a scan and redirect whether or not it was a duplicate.
pub(super) async fn scan_qr(
    State(state): State<AppState>,
    Query(query): Query<QrQuery>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let qr_id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("QR ID is required".to_string()))?;

    let input = NewEvent {
        qr_id: Some(qr_id),
        ip: client_ip(&headers, peer.as_ref()),
        user_agent: user_agent(&headers),
        ..NewEvent::new(Action::Qr)
    };
    state.dashboard.record_event(input).await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, state.qr_redirect_url.to_string())],
    ))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TrackRequest {
    action: Option<String>,
    qr_id: Option<String>,
    user_name: Option<String>,
    phone: Option<String>,
    user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct TrackResponse {
    ok: bool,
    event: Option<Event>,
}

pub(super) async fn track(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    body: Result<Json<TrackRequest>, JsonRejection>,
) -> Result<Json<TrackResponse>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let action: Action = req.action.as_deref().unwrap_or_default().parse()?;

    let input = NewEvent {
        action,
        qr_id: req.qr_id,
        ip: client_ip(&headers, peer.as_ref()),
        user_agent: user_agent(&headers),
        user_name: req.user_name,
        phone: req.phone,
        user_id: req.user_id,
    };
    let event = state.dashboard.record_event(input).await?;

    Ok(Json(TrackResponse { ok: true, event }))
}

pub(super) async fn dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    Ok(Json(state.dashboard.snapshot().await?))
}

pub(super) async fn events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, ApiError> {
    Ok(Json(state.dashboard.list_events().await?))
}

pub(super) async fn campaigns(
    State(state): State<AppState>,
) -> Result<Json<Vec<CampaignView>>, ApiError> {
    Ok(Json(state.dashboard.list_campaigns().await?))
}

pub(super) async fn draw(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DrawOutcome>, ApiError> {
    Ok(Json(state.dashboard.draw_winner(&id).await?))
}

// ============================================================================
// Helpers
// ============================================================================

/// First `x-forwarded-for` hop, else the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<&ConnectInfo<SocketAddr>>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .or_else(|| peer.map(|ConnectInfo(addr)| addr.ip().to_string()))
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
