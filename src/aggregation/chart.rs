//! Seven-day activity chart.

use chrono::{DateTime, Days, FixedOffset};
use serde::Serialize;

use super::time::local_day;
use crate::model::{Action, Event};

/// Days covered by the activity chart, ending today.
pub const CHART_DAYS: u64 = 7;

/// One day on the activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// `MM/DD`.
    #[serde(rename = "date")]
    pub date_label: String,
    #[serde(rename = "쿠폰클릭")]
    pub coupon_count: i64,
    #[serde(rename = "리뷰")]
    pub review_count: i64,
}

/// Coupon and review counts for each day from six days ago through today.
///
/// Always returns exactly [`CHART_DAYS`] points, oldest first, with zeros
/// for days without events.
pub fn build_chart_data(events: &[Event], now: &DateTime<FixedOffset>) -> Vec<ChartPoint> {
    let offset = now.offset();
    let today = now.date_naive();

    (0..CHART_DAYS)
        .rev()
        .map(|back| {
            let day = today.checked_sub_days(Days::new(back)).unwrap_or(today);
            let mut point = ChartPoint {
                date_label: day.format("%m/%d").to_string(),
                coupon_count: 0,
                review_count: 0,
            };
            for event in events.iter().filter(|e| local_day(&e.timestamp, offset) == day) {
                match event.action {
                    Action::Coupon => point.coupon_count += 1,
                    Action::Review => point.review_count += 1,
                    Action::Qr => {}
                }
            }
            point
        })
        .collect()
}
