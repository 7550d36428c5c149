//! Time source.
//!
//! Every operation asks for "now" once and threads it through, so that the
//! aggregation functions stay pure and tests can pin the clock.

use chrono::{DateTime, FixedOffset, Local, Utc};

/// Supplies the current instant in the dashboard's local offset.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock. Uses the host's local offset unless one is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    offset: Option<FixedOffset>,
}

impl SystemClock {
    pub fn new(offset: Option<FixedOffset>) -> Self {
        Self { offset }
    }

    /// Build from a configured offset in minutes east of UTC.
    ///
    /// Out-of-range values fall back to the host offset.
    pub fn from_offset_minutes(minutes: Option<i32>) -> Self {
        Self::new(minutes.and_then(|m| FixedOffset::east_opt(m.saturating_mul(60))))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.offset {
            Some(offset) => Utc::now().with_timezone(&offset),
            None => Local::now().fixed_offset(),
        }
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_offset_is_applied() {
        let clock = SystemClock::from_offset_minutes(Some(540));
        assert_eq!(clock.now().offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_invalid_offset_falls_back_to_host() {
        let clock = SystemClock::from_offset_minutes(Some(100_000));
        let host = Local::now().offset().local_minus_utc();
        assert_eq!(clock.now().offset().local_minus_utc(), host);
    }

    #[test]
    fn test_fixed_clock() {
        let instant = DateTime::parse_from_rfc3339("2024-03-15T12:00:00+09:00").unwrap();
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
