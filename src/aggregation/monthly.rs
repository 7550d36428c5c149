//! Monthly reward summary and the daily/monthly metrics view.
//!
//! Campaign prizes have no month attribution, so the cost of every winner
//! ever drawn is counted in the current month's figures.

use chrono::{DateTime, Datelike, FixedOffset};
use serde::Serialize;

use super::time::{local_day, percent_change, YearMonth};
use super::{Tally, Trends};
use crate::model::{Action, Campaign, Event};

/// Weekly buckets in the monthly chart. Days 29-31 fold into the last one.
pub const WEEKS_PER_MONTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub total_reward: i64,
    pub coupon_cost: i64,
    pub review_cost: i64,
    pub event_cost: i64,
    /// Last month's reward total, or this month's total when last month had none.
    pub previous_month: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodMetrics {
    pub coupon_clicks: i64,
    pub reviews: i64,
    pub reward: i64,
    pub participants: i64,
    pub trends: Trends,
}

/// One week of the current month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyPoint {
    pub name: String,
    #[serde(rename = "쿠폰클릭")]
    pub coupon_count: i64,
    #[serde(rename = "리뷰")]
    pub review_count: i64,
    #[serde(rename = "리워드")]
    pub reward: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyMonthlyData {
    pub daily: PeriodMetrics,
    pub monthly: PeriodMetrics,
    pub chart_data: Vec<WeeklyPoint>,
}

fn event_cost(campaigns: &[Campaign]) -> i64 {
    campaigns.iter().map(Campaign::winner_cost).sum()
}

fn reward_for(events: &[Event], action: Action, month: YearMonth, offset: &FixedOffset) -> i64 {
    events
        .iter()
        .filter(|e| e.action == action && month.contains(local_day(&e.timestamp, offset)))
        .map(|e| e.reward)
        .sum()
}

pub fn build_monthly_summary(
    events: &[Event],
    campaigns: &[Campaign],
    now: &DateTime<FixedOffset>,
) -> MonthlySummary {
    let offset = now.offset();
    let this_month = YearMonth::of(now.date_naive());
    let last_month = this_month.previous();

    let coupon_cost = reward_for(events, Action::Coupon, this_month, offset);
    let review_cost = reward_for(events, Action::Review, this_month, offset);
    let event_cost = event_cost(campaigns);
    let total_reward = coupon_cost + review_cost + event_cost;

    let last_month_reward: i64 = events
        .iter()
        .filter(|e| last_month.contains(local_day(&e.timestamp, offset)))
        .map(|e| e.reward)
        .sum();

    MonthlySummary {
        total_reward,
        coupon_cost,
        review_cost,
        event_cost,
        previous_month: if last_month_reward == 0 {
            total_reward
        } else {
            last_month_reward
        },
    }
}

fn period_metrics(current: &Tally, previous: &Tally, current_reward: i64) -> PeriodMetrics {
    PeriodMetrics {
        coupon_clicks: current.coupons,
        reviews: current.reviews,
        reward: current_reward,
        participants: current.participants(),
        trends: Trends {
            coupon: percent_change(current.coupons, previous.coupons),
            reviews: percent_change(current.reviews, previous.reviews),
            reward: percent_change(current_reward, previous.reward),
            participants: percent_change(current.participants(), previous.participants()),
        },
    }
}

fn week_index(day_of_month: u32) -> usize {
    (day_of_month.saturating_sub(1) / 7).min(WEEKS_PER_MONTH as u32 - 1) as usize
}

pub fn build_daily_monthly_metrics(
    events: &[Event],
    campaigns: &[Campaign],
    now: &DateTime<FixedOffset>,
) -> DailyMonthlyData {
    let offset = now.offset();
    let today = now.date_naive();
    let yesterday = today.pred_opt().unwrap_or(today);
    let this_month = YearMonth::of(today);
    let last_month = this_month.previous();

    let today_tally = Tally::over(events, |e| local_day(&e.timestamp, offset) == today);
    let yesterday_tally = Tally::over(events, |e| local_day(&e.timestamp, offset) == yesterday);
    let month_tally = Tally::over(events, |e| this_month.contains(local_day(&e.timestamp, offset)));
    let last_month_tally =
        Tally::over(events, |e| last_month.contains(local_day(&e.timestamp, offset)));

    let mut chart_data: Vec<WeeklyPoint> = (1..=WEEKS_PER_MONTH)
        .map(|week| WeeklyPoint {
            name: format!("{}주", week),
            coupon_count: 0,
            review_count: 0,
            reward: 0,
        })
        .collect();
    for event in events {
        let day = local_day(&event.timestamp, offset);
        if !this_month.contains(day) {
            continue;
        }
        let bucket = &mut chart_data[week_index(day.day())];
        match event.action {
            Action::Coupon => bucket.coupon_count += 1,
            Action::Review => bucket.review_count += 1,
            Action::Qr => {}
        }
        bucket.reward += event.reward;
    }

    DailyMonthlyData {
        daily: period_metrics(&today_tally, &yesterday_tally, today_tally.reward),
        monthly: period_metrics(
            &month_tally,
            &last_month_tally,
            month_tally.reward + event_cost(campaigns),
        ),
        chart_data,
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::aggregation::fixtures::{ago, at, campaign, event, now};

    #[test]
    fn test_week_index_clamps() {
        assert_eq!(week_index(1), 0);
        assert_eq!(week_index(7), 0);
        assert_eq!(week_index(8), 1);
        assert_eq!(week_index(21), 2);
        assert_eq!(week_index(22), 3);
        assert_eq!(week_index(28), 3);
        assert_eq!(week_index(29), 3);
        assert_eq!(week_index(31), 3);
    }

    #[test]
    fn test_summary_splits_costs() {
        let events = vec![
            event("e3", Action::Review, Some("u1"), ago(Duration::hours(1))),
            event("e2", Action::Coupon, Some("u1"), ago(Duration::hours(2))),
            event("e1", Action::Coupon, Some("u2"), at("2024-03-01T00:00:00+09:00")),
            event("e0", Action::Coupon, Some("u2"), at("2024-02-29T23:59:00+09:00")),
        ];
        let campaigns = vec![campaign("c1", 4500, &["u1", "u2"]), campaign("c2", 1000, &[])];
        let summary = build_monthly_summary(&events, &campaigns, &now());

        assert_eq!(summary.coupon_cost, 4000);
        assert_eq!(summary.review_cost, 0);
        assert_eq!(summary.event_cost, 9000);
        assert_eq!(summary.total_reward, 13000);
        assert_eq!(summary.previous_month, 2000);
    }

    #[test]
    fn test_summary_baseline_falls_back_to_total() {
        let events = vec![event("e1", Action::Coupon, Some("u1"), ago(Duration::hours(1)))];
        let summary = build_monthly_summary(&events, &[], &now());
        assert_eq!(summary.total_reward, 2000);
        assert_eq!(summary.previous_month, 2000);
    }

    #[test]
    fn test_january_compares_against_december() {
        let jan = DateTime::parse_from_rfc3339("2025-01-05T12:00:00+09:00").unwrap();
        let events = vec![
            event("e1", Action::Coupon, Some("u1"), at("2025-01-02T10:00:00+09:00")),
            event("e0", Action::Coupon, Some("u1"), at("2024-12-20T10:00:00+09:00")),
            event("e-", Action::Coupon, Some("u1"), at("2024-01-20T10:00:00+09:00")),
        ];
        let summary = build_monthly_summary(&events, &[], &jan);
        assert_eq!(summary.coupon_cost, 2000);
        assert_eq!(summary.previous_month, 2000);

        let metrics = build_daily_monthly_metrics(&events, &[], &jan);
        assert_eq!(metrics.monthly.coupon_clicks, 1);
        assert_eq!(metrics.monthly.trends.coupon, 0);
    }

    #[test]
    fn test_daily_monthly_metrics() {
        let events = vec![
            event("e5", Action::Review, Some("u2"), ago(Duration::minutes(5))),
            event("e4", Action::Coupon, Some("u1"), ago(Duration::minutes(30))),
            event("e3", Action::Coupon, Some("u1"), ago(Duration::hours(24))),
            event("e2", Action::Coupon, Some("u3"), at("2024-03-29T10:00:00+09:00")),
            event("e1", Action::Coupon, Some("u1"), at("2024-03-02T10:00:00+09:00")),
            event("e0", Action::Review, Some("u4"), at("2024-02-10T10:00:00+09:00")),
        ];
        let campaigns = vec![campaign("c1", 4500, &["u1"])];
        let data = build_daily_monthly_metrics(&events, &campaigns, &now());

        assert_eq!(data.daily.coupon_clicks, 1);
        assert_eq!(data.daily.reviews, 1);
        assert_eq!(data.daily.reward, 2000);
        assert_eq!(data.daily.participants, 2);
        assert_eq!(data.daily.trends.coupon, 0);
        assert_eq!(data.daily.trends.reviews, 100);
        assert_eq!(data.daily.trends.participants, 100);

        assert_eq!(data.monthly.coupon_clicks, 4);
        assert_eq!(data.monthly.reviews, 1);
        assert_eq!(data.monthly.reward, 4 * 2000 + 4500);
        assert_eq!(data.monthly.participants, 3);
        assert_eq!(data.monthly.trends.coupon, 100);
        assert_eq!(data.monthly.trends.reviews, 0);
        assert_eq!(data.monthly.trends.participants, 200);

        assert_eq!(data.chart_data.len(), 4);
        let names: Vec<_> = data.chart_data.iter().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["1주", "2주", "3주", "4주"]);
        assert_eq!(data.chart_data[0].coupon_count, 1);
        assert_eq!(data.chart_data[1].coupon_count, 1);
        assert_eq!(data.chart_data[1].review_count, 0);
        assert_eq!(data.chart_data[2].coupon_count, 1);
        assert_eq!(data.chart_data[2].review_count, 1);
        assert_eq!(data.chart_data[3].coupon_count, 1);
        assert_eq!(data.chart_data[3].reward, 2000);
    }

    #[test]
    fn test_daily_trend_uses_canonical_zero_handling() {
        let data = build_daily_monthly_metrics(&[], &[], &now());
        assert_eq!(data.daily.trends.coupon, 0);
        assert_eq!(data.monthly.trends.reward, 0);
    }
}
