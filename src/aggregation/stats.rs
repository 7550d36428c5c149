//! Headline KPI cards: today against yesterday.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::time::{local_day, trend_vs_yesterday};
use super::{Tally, Trends};
use crate::model::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub today_coupon_clicks: i64,
    pub today_reviews: i64,
    pub today_reward: i64,
    /// Distinct identified participants active today.
    pub total_participants: i64,
    pub trends: Trends,
}

pub fn build_stats(events: &[Event], now: &DateTime<FixedOffset>) -> StatsData {
    let offset = now.offset();
    let today = now.date_naive();
    let yesterday = today.pred_opt().unwrap_or(today);

    let current = Tally::over(events, |e| local_day(&e.timestamp, offset) == today);
    let previous = Tally::over(events, |e| local_day(&e.timestamp, offset) == yesterday);

    StatsData {
        today_coupon_clicks: current.coupons,
        today_reviews: current.reviews,
        today_reward: current.reward,
        total_participants: current.participants(),
        trends: Trends {
            coupon: trend_vs_yesterday(current.coupons, previous.coupons),
            reviews: trend_vs_yesterday(current.reviews, previous.reviews),
            reward: trend_vs_yesterday(current.reward, previous.reward),
            participants: trend_vs_yesterday(current.participants(), previous.participants()),
        },
    }
}
