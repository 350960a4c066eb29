//! Pay period and week models.
//!
//! This module contains the [`PayPeriod`] and [`Week`] types produced by
//! period resolution and week decomposition.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The pay-period policy a user is paid under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPeriodType {
    /// Sunday through Saturday.
    Weekly,
    /// From the day after the cutover day to the cutover day of the next month.
    #[default]
    Monthly,
}

/// A pay period with inclusive bounds.
///
/// `end` carries the time 23:59:59.999 of the period's last day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDateTime;
///
/// let fmt = "%Y-%m-%d %H:%M:%S%.3f";
/// let period = PayPeriod {
///     start: NaiveDateTime::parse_from_str("2026-01-11 00:00:00.000", fmt).unwrap(),
///     end: NaiveDateTime::parse_from_str("2026-02-10 23:59:59.999", fmt).unwrap(),
/// };
///
/// assert!(period.contains(NaiveDateTime::parse_from_str("2026-02-10 18:00:00.000", fmt).unwrap()));
/// assert!(!period.contains(NaiveDateTime::parse_from_str("2026-02-11 00:00:00.000", fmt).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The first instant of the period (inclusive).
    pub start: NaiveDateTime,
    /// The last instant of the period (inclusive).
    pub end: NaiveDateTime,
}

impl PayPeriod {
    /// Checks if an instant falls within this pay period, inclusive at both ends.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// One calendar week of a pay period.
///
/// `start` and `end` are clipped to the enclosing pay period. The true
/// Sunday-to-Saturday boundaries are kept in `calendar_start` and
/// `calendar_end`; overtime is always computed against those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Week {
    /// The reported start, clipped to the pay period.
    pub start: NaiveDateTime,
    /// The reported end, clipped to the pay period.
    pub end: NaiveDateTime,
    /// One-based position of the week within the pay period.
    pub week_number: u32,
    /// Sunday 00:00:00.000 of the calendar week.
    pub calendar_start: NaiveDateTime,
    /// Saturday 23:59:59.999 of the calendar week.
    pub calendar_end: NaiveDateTime,
}

impl Week {
    /// Checks if an instant falls within the reported (clipped) bounds.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Checks if an instant falls within the full calendar week.
    pub fn calendar_contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.calendar_start && instant <= self.calendar_end
    }

    /// Returns true when the pay period cuts this calendar week short.
    pub fn is_partial(&self) -> bool {
        self.start != self.calendar_start || self.end != self.calendar_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.3f").unwrap()
    }

    fn create_week(start: &str, end: &str) -> Week {
        Week {
            start: make_datetime(start),
            end: make_datetime(end),
            week_number: 1,
            calendar_start: make_datetime("2026-01-11 00:00:00.000"),
            calendar_end: make_datetime("2026-01-17 23:59:59.999"),
        }
    }

    #[test]
    fn test_contains_on_bounds() {
        let period = PayPeriod {
            start: make_datetime("2026-01-11 00:00:00.000"),
            end: make_datetime("2026-02-10 23:59:59.999"),
        };
        assert!(period.contains(period.start));
        assert!(period.contains(period.end));
        assert!(!period.contains(make_datetime("2026-01-10 23:59:59.999")));
    }

    #[test]
    fn test_full_week_is_not_partial() {
        let week = create_week("2026-01-11 00:00:00.000", "2026-01-17 23:59:59.999");
        assert!(!week.is_partial());
    }

    #[test]
    fn test_clipped_week_is_partial() {
        let week = create_week("2026-01-13 00:00:00.000", "2026-01-17 23:59:59.999");
        assert!(week.is_partial());
        assert!(!week.contains(make_datetime("2026-01-12 10:00:00.000")));
        assert!(week.calendar_contains(make_datetime("2026-01-12 10:00:00.000")));
    }

    #[test]
    fn test_pay_period_type_serialization() {
        assert_eq!(
            serde_json::to_string(&PayPeriodType::Weekly).unwrap(),
            "\"weekly\""
        );
        let parsed: PayPeriodType = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(parsed, PayPeriodType::Monthly);
    }

    #[test]
    fn test_serialize_pay_period() {
        let period = PayPeriod {
            start: make_datetime("2026-01-11 00:00:00.000"),
            end: make_datetime("2026-02-10 23:59:59.999"),
        };
        let json = serde_json::to_string(&period).unwrap();
        assert!(json.contains("\"start\":\"2026-01-11T00:00:00\""));
        assert!(json.contains("\"end\":\"2026-02-10T23:59:59.999\""));
    }
}
