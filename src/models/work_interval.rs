//! Work interval model.
//!
//! A [`WorkInterval`] is one clock-in/clock-out record. Intervals without a
//! clock-out are still in progress and never contribute to pay.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

const MILLIS_PER_HOUR: i64 = 3_600_000;
const MINUTES_PER_HOUR: u32 = 60;

/// A single clock-in/clock-out record with unpaid break minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkInterval {
    /// Optional caller-supplied identifier used in error messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The clock-in instant.
    pub start: NaiveDateTime,
    /// The clock-out instant, or `None` while the interval is still open.
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    /// Unpaid break minutes taken during the interval.
    #[serde(default)]
    pub break_minutes: u32,
}

impl WorkInterval {
    /// Creates an interval without an identifier.
    pub fn new(start: NaiveDateTime, end: Option<NaiveDateTime>, break_minutes: u32) -> Self {
        Self {
            id: None,
            start,
            end,
            break_minutes,
        }
    }

    /// Returns true while the interval has no clock-out.
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Calculates worked hours: elapsed time minus break minutes.
    ///
    /// Returns `None` for open intervals.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::WorkInterval;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let start = NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let end = NaiveDateTime::parse_from_str("2026-01-15 17:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let interval = WorkInterval::new(start, Some(end), 30);
    ///
    /// assert_eq!(interval.worked_hours(), Some(Decimal::new(80, 1)));
    /// ```
    pub fn worked_hours(&self) -> Option<Decimal> {
        let end = self.end?;
        let elapsed_ms = (end - self.start).num_milliseconds();
        let elapsed_hours = Decimal::from(elapsed_ms) / Decimal::from(MILLIS_PER_HOUR);
        let break_hours = Decimal::from(self.break_minutes) / Decimal::from(MINUTES_PER_HOUR);
        Some(elapsed_hours - break_hours)
    }

    /// Label used when reporting a problem with this interval.
    pub fn label(&self, position: usize) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("#{}", position + 1))
    }

    /// Checks that a closed interval ends after it starts.
    ///
    /// The calculation functions assume this already holds; the API layer
    /// calls it before handing entries over.
    pub fn validate(&self, position: usize) -> EngineResult<()> {
        if let Some(end) = self.end {
            if end <= self.start {
                return Err(EngineError::InvalidWorkInterval {
                    interval_id: self.label(position),
                    message: format!("end {} is not after start {}", end, self.start),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_8_hour_interval_no_break() {
        let interval = WorkInterval::new(
            make_datetime("2026-01-15 09:00:00"),
            Some(make_datetime("2026-01-15 17:00:00")),
            0,
        );
        assert_eq!(interval.worked_hours(), Some(dec("8")));
    }

    #[test]
    fn test_break_minutes_are_subtracted() {
        let interval = WorkInterval::new(
            make_datetime("2026-01-15 08:00:00"),
            Some(make_datetime("2026-01-15 18:00:00")),
            45,
        );
        assert_eq!(interval.worked_hours(), Some(dec("9.25")));
    }

    #[test]
    fn test_overnight_interval() {
        let interval = WorkInterval::new(
            make_datetime("2026-01-15 22:00:00"),
            Some(make_datetime("2026-01-16 06:00:00")),
            0,
        );
        assert_eq!(interval.worked_hours(), Some(dec("8")));
    }

    #[test]
    fn test_open_interval_has_no_hours() {
        let interval = WorkInterval::new(make_datetime("2026-01-15 09:00:00"), None, 0);
        assert!(interval.is_open());
        assert_eq!(interval.worked_hours(), None);
    }

    #[test]
    fn test_validate_rejects_end_before_start() {
        let interval = WorkInterval {
            id: Some("entry_007".to_string()),
            start: make_datetime("2026-01-15 17:00:00"),
            end: Some(make_datetime("2026-01-15 09:00:00")),
            break_minutes: 0,
        };
        let err = interval.validate(0).unwrap_err();
        assert!(err.to_string().contains("entry_007"));
    }

    #[test]
    fn test_validate_uses_position_without_id() {
        let start = make_datetime("2026-01-15 09:00:00");
        let interval = WorkInterval::new(start, Some(start), 0);
        let err = interval.validate(2).unwrap_err();
        assert!(err.to_string().contains("#3"));
    }

    #[test]
    fn test_validate_accepts_open_interval() {
        let interval = WorkInterval::new(make_datetime("2026-01-15 09:00:00"), None, 0);
        assert!(interval.validate(0).is_ok());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{ "start": "2026-01-15T09:00:00" }"#;
        let interval: WorkInterval = serde_json::from_str(json).unwrap();
        assert_eq!(interval.end, None);
        assert_eq!(interval.break_minutes, 0);
        assert_eq!(interval.id, None);
    }

    #[test]
    fn test_deserialize_with_milliseconds() {
        let json = r#"{
            "id": "entry_001",
            "start": "2026-01-15T09:00:00",
            "end": "2026-01-15T17:00:00.500",
            "break_minutes": 30
        }"#;
        let interval: WorkInterval = serde_json::from_str(json).unwrap();
        assert_eq!(interval.id.as_deref(), Some("entry_001"));
        assert_eq!(interval.break_minutes, 30);
        assert!(interval.end.is_some());
    }
}
