//! Aggregation engine.
//!
//! Pure projections from the event log and campaign list into dashboard
//! views. Nothing here is cached: every view is recomputed from the log on
//! each read, with "now" passed in by the caller.

mod chart;
mod monthly;
mod participants;
mod stats;
pub mod time;

use std::collections::HashSet;

use serde::Serialize;

use crate::model::{Action, Event, IdentityKey};

pub use chart::{build_chart_data, ChartPoint};
pub use monthly::{
    build_daily_monthly_metrics, build_monthly_summary, DailyMonthlyData, MonthlySummary,
    PeriodMetrics, WeeklyPoint,
};
pub use participants::{
    build_participants, build_recent_participants, ParticipantRow, RecentParticipant,
    RECENT_PARTICIPANT_LIMIT,
};
pub use stats::{build_stats, StatsData};
pub use time::{is_same_day, percent_change, time_ago_from, trend_vs_yesterday};

/// Trend percentages for the four headline metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Trends {
    pub coupon: i64,
    pub reviews: i64,
    pub reward: i64,
    pub participants: i64,
}

/// Counts accumulated over one period.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub coupons: i64,
    pub reviews: i64,
    pub reward: i64,
    participants: HashSet<IdentityKey>,
}

impl Tally {
    /// Tally every event matching `in_period`.
    pub fn over<'a, I, F>(events: I, mut in_period: F) -> Self
    where
        I: IntoIterator<Item = &'a Event>,
        F: FnMut(&Event) -> bool,
    {
        let mut tally = Tally::default();
        for event in events.into_iter().filter(|e| in_period(*e)) {
            tally.add(event);
        }
        tally
    }

    fn add(&mut self, event: &Event) {
        match event.action {
            Action::Coupon => self.coupons += 1,
            Action::Review => self.reviews += 1,
            Action::Qr => {}
        }
        self.reward += event.reward;
        // Anonymous events do not count as a distinct participant.
        if let Some(key) = IdentityKey::known(event) {
            self.participants.insert(key);
        }
    }

    pub fn participants(&self) -> i64 {
        self.participants.len() as i64
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Duration, FixedOffset, Utc};

    use crate::model::{Action, Campaign, Event, RewardType, Winner};

    /// 2024-03-15 12:00 in UTC+9.
    pub fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-15T12:00:00+09:00").unwrap()
    }

    pub fn ago(d: Duration) -> DateTime<Utc> {
        (now() - d).with_timezone(&Utc)
    }

    pub fn at(rfc3339: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Utc)
    }

    pub fn event(id: &str, action: Action, user_id: Option<&str>, timestamp: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            action,
            qr_id: "table-1".to_string(),
            timestamp,
            ip: Some("10.0.0.1".to_string()),
            user_agent: None,
            user_name: None,
            phone: None,
            user_id: user_id.map(String::from),
            points: action.points(),
            reward: action.reward(),
        }
    }

    pub fn campaign(id: &str, reward_value: i64, winners: &[&str]) -> Campaign {
        let mut campaign = Campaign {
            id: id.to_string(),
            name: format!("Campaign {}", id),
            reward: "Coffee".to_string(),
            reward_value,
            reward_type: RewardType::Giftcard,
            max_winners: 10,
            current_winners: 0,
            winners: Vec::new(),
            start_date: "2024-03-01".parse().unwrap(),
            end_date: "2024-03-31".parse().unwrap(),
            points_per_click: 100,
            points_per_review: 200,
        };
        for participant in winners {
            campaign.add_winner(Winner {
                participant_id: participant.to_string(),
                name: participant.to_string(),
                timestamp: at("2024-03-10T10:00:00+09:00"),
            });
        }
        campaign
    }
}
