//! Event recorder.
//!
//! Appends engagement events to the head of the log. QR scans from the same
//! IP for the same code are accepted at most once per trailing 24 hours;
//! coupon and review events are never deduplicated.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::model::{resolve_user_id, Action, Event, UNKNOWN_QR_ID};

/// Trailing window in which a repeat scan is suppressed.
pub const DEDUP_WINDOW_HOURS: i64 = 24;

/// Request to record one event. `action` is already validated.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub action: Action,
    pub qr_id: Option<String>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub user_name: Option<String>,
    pub phone: Option<String>,
    pub user_id: Option<String>,
}

impl NewEvent {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            ..Self::default()
        }
    }

    fn qr_id(&self) -> &str {
        self.qr_id
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_QR_ID)
    }

    fn ip(&self) -> Option<&str> {
        self.ip.as_deref().filter(|v| !v.is_empty())
    }
}

/// A scan for the same code from the same IP inside the dedup window.
pub fn is_duplicate_scan(events: &[Event], input: &NewEvent, now: DateTime<Utc>) -> bool {
    if input.action != Action::Qr {
        return false;
    }
    let window = Duration::hours(DEDUP_WINDOW_HOURS);
    let qr_id = input.qr_id();
    let ip = input.ip();
    events.iter().any(|e| {
        e.action == Action::Qr && e.ip() == ip && e.qr_id == qr_id && now - e.timestamp < window
    })
}

fn compute(input: NewEvent, now: DateTime<Utc>) -> Event {
    let user_id = resolve_user_id(
        input.user_id.as_deref(),
        input.phone.as_deref(),
        input.ip.as_deref(),
    );
    Event {
        id: Uuid::new_v4().to_string(),
        action: input.action,
        qr_id: input.qr_id().to_string(),
        timestamp: now,
        ip: input.ip,
        user_agent: input.user_agent,
        user_name: input.user_name,
        phone: input.phone,
        user_id,
        points: input.action.points(),
        reward: input.action.reward(),
    }
}

/// Prepend a new event to `events`, newest-first.
///
/// Returns `None`, leaving `events` untouched, when the event is a
/// duplicate scan.
pub fn record_event(events: &mut Vec<Event>, input: NewEvent, now: DateTime<Utc>) -> Option<Event> {
    if is_duplicate_scan(events, &input, now) {
        return None;
    }
    let event = compute(input, now);
    events.insert(0, event.clone());
    Some(event)
}
