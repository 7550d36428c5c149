//! Calendar bucketing, trend math, and relative time labels.
//!
//! Day and month comparisons use calendar boundaries in the dashboard's
//! local offset, never elapsed 24-hour windows.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};

/// Calendar day of `instant` in `offset`.
pub fn local_day(instant: &DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    instant.with_timezone(offset).date_naive()
}

/// Both instants share year, month, and day-of-month in `offset`.
pub fn is_same_day(a: &DateTime<Utc>, b: &DateTime<Utc>, offset: &FixedOffset) -> bool {
    local_day(a, offset) == local_day(b, offset)
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month before, rolling January back to December of the prior year.
    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

/// Rounds halves toward positive infinity, the way the dashboard client does.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Percentage change from `previous` to `current`.
///
/// With no baseline, any activity reads as +100% and no activity as 0%.
pub fn percent_change(current: i64, previous: i64) -> i64 {
    if previous == 0 {
        return if current > 0 { 100 } else { 0 };
    }
    round_half_up((current - previous) as f64 / previous as f64 * 100.0)
}

/// Day-over-day change used by the headline KPI cards.
///
/// Differs from [`percent_change`] when yesterday is zero: this always
/// reports 100, even when today is zero too.
pub fn trend_vs_yesterday(today: i64, yesterday: i64) -> i64 {
    if yesterday != 0 {
        round_half_up((today - yesterday) as f64 / yesterday as f64 * 100.0)
    } else {
        100
    }
}

/// Korean relative label: "방금 전", "N분 전", "N시간 전", "N일 전".
pub fn time_ago_from(now: &DateTime<FixedOffset>, then: &DateTime<Utc>) -> String {
    let minutes = (now.timestamp_millis() - then.timestamp_millis()).div_euclid(60_000);
    if minutes < 1 {
        return "방금 전".to_string();
    }
    if minutes < 60 {
        return format!("{}분 전", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}시간 전", hours);
    }
    format!("{}일 전", hours / 24)
}
