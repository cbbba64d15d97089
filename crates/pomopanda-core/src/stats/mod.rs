//! Statistics over the session history.
//!
//! Totals cover the whole log. The daily average is a rolling window: the
//! minutes of every record stamped within the last 7×24 hours, divided by 7
//! and rounded to one decimal place.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::SessionRecord;

/// Days covered by the rolling average.
pub const AVERAGE_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HistoryStats {
    pub total_sessions: u64,
    pub total_minutes: u64,
    /// Average minutes per day over the rolling window.
    pub daily_average_minutes: f64,
}

impl HistoryStats {
    pub fn compute(records: &[SessionRecord], now: DateTime<Utc>) -> Self {
        let total_minutes = records
            .iter()
            .map(|r| u64::from(r.duration_minutes))
            .sum();

        let window_start = now - Duration::days(AVERAGE_WINDOW_DAYS);
        let recent_minutes: u64 = records
            .iter()
            .filter(|r| r.timestamp >= window_start)
            .map(|r| u64::from(r.duration_minutes))
            .sum();

        Self {
            total_sessions: records.len() as u64,
            total_minutes,
            daily_average_minutes: round_one_decimal(
                recent_minutes as f64 / AVERAGE_WINDOW_DAYS as f64,
            ),
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn at(hours_ago: i64, minutes: u32) -> SessionRecord {
        SessionRecord::new(now() - Duration::hours(hours_ago), minutes, "task")
    }

    #[test]
    fn empty_history_is_all_zero() {
        let stats = HistoryStats::compute(&[], now());
        assert_eq!(stats, HistoryStats::default());
        assert_eq!(stats.daily_average_minutes, 0.0);
    }

    #[test]
    fn totals_cover_everything() {
        let records = [at(1, 25), at(24 * 30, 50), at(24 * 365, 10)];
        let stats = HistoryStats::compute(&records, now());
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.total_minutes, 85);
    }

    #[test]
    fn average_uses_rolling_window() {
        // 25 + 25 inside, 50 just outside the 168h window.
        let records = [at(1, 25), at(24 * 6, 25), at(24 * 7 + 1, 50)];
        let stats = HistoryStats::compute(&records, now());
        assert_eq!(stats.daily_average_minutes, 7.1);
    }

    #[test]
    fn window_boundary_is_inclusive() {
        let records = [at(24 * 7, 70)];
        let stats = HistoryStats::compute(&records, now());
        assert_eq!(stats.daily_average_minutes, 10.0);
    }

    #[test]
    fn average_rounds_to_one_decimal() {
        // 100 / 7 = 14.2857...
        let records = [at(2, 100)];
        let stats = HistoryStats::compute(&records, now());
        assert_eq!(stats.daily_average_minutes, 14.3);
    }

    #[test]
    fn only_old_records_average_zero() {
        let records = [at(24 * 8, 25)];
        let stats = HistoryStats::compute(&records, now());
        assert_eq!(stats.total_sessions, 1);
        assert_eq!(stats.daily_average_minutes, 0.0);
    }
}
