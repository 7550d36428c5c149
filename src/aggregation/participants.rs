//! Participant rollups.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use super::time::time_ago_from;
use crate::model::{Action, Campaign, Event, IdentityKey};

/// Cards shown in the recent-participants panel.
pub const RECENT_PARTICIPANT_LIMIT: usize = 8;

/// Display name for participants who never gave one.
pub const ANONYMOUS_NAME: &str = "익명";

/// Everything one identity has done, across the whole log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub total_points: i64,
    pub coupon_clicks: i64,
    pub reviews: i64,
    pub last_activity: DateTime<Utc>,
    pub join_date: DateTime<Utc>,
    pub is_winner: bool,
    pub win_count: usize,
}

impl ParticipantRow {
    fn first_seen(key: &IdentityKey, event: &Event) -> Self {
        Self {
            id: key.as_str().to_string(),
            name: String::new(),
            phone: String::new(),
            total_points: 0,
            coupon_clicks: 0,
            reviews: 0,
            last_activity: event.timestamp,
            join_date: event.timestamp,
            is_winner: false,
            win_count: 0,
        }
    }

    fn absorb(&mut self, event: &Event) {
        self.total_points += event.points;
        match event.action {
            Action::Coupon => self.coupon_clicks += 1,
            Action::Review => self.reviews += 1,
            Action::Qr => {}
        }
        self.last_activity = self.last_activity.max(event.timestamp);
        self.join_date = self.join_date.min(event.timestamp);
        // The log is newest-first, so the first hint seen is the latest one.
        if self.name.is_empty() {
            if let Some(name) = event.user_name() {
                self.name = name.to_string();
            }
        }
        if self.phone.is_empty() {
            if let Some(phone) = event.phone() {
                self.phone = phone.to_string();
            }
        }
    }
}

/// Roll the log up per identity and cross-reference campaign winners.
///
/// Sorted by total points, highest first. Ties keep first-seen order.
pub fn build_participants(events: &[Event], campaigns: &[Campaign]) -> Vec<ParticipantRow> {
    let mut index: HashMap<IdentityKey, usize> = HashMap::new();
    let mut rows: Vec<ParticipantRow> = Vec::new();

    for event in events {
        let key = IdentityKey::resolve(event);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            rows.push(ParticipantRow::first_seen(&key, event));
            rows.len() - 1
        });
        rows[slot].absorb(event);
    }

    for row in &mut rows {
        if row.name.is_empty() {
            row.name = ANONYMOUS_NAME.to_string();
        }
        row.win_count = campaigns.iter().map(|c| c.win_count(&row.id)).sum();
        row.is_winner = row.win_count > 0;
    }

    // Stable sort keeps first-seen order among equal totals.
    rows.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    rows
}

/// Lightweight card for the recent-activity panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentParticipant {
    pub id: String,
    pub name: String,
    pub action: Action,
    pub points: i64,
    pub time: String,
    /// Never cross-referenced against campaigns in this view.
    pub is_winner: bool,
}

/// The most recent coupon and review events, in log order.
pub fn build_recent_participants(
    events: &[Event],
    now: &DateTime<FixedOffset>,
) -> Vec<RecentParticipant> {
    events
        .iter()
        .filter(|e| e.action.is_engagement())
        .take(RECENT_PARTICIPANT_LIMIT)
        .map(|e| RecentParticipant {
            id: e.id.clone(),
            name: e.user_name().unwrap_or(ANONYMOUS_NAME).to_string(),
            action: e.action,
            points: e.points,
            time: time_ago_from(now, &e.timestamp),
            is_winner: false,
        })
        .collect()
}
