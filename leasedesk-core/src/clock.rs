//! Civil-time stamping for `created_at`.
//!
//! Timestamps are stored as local civil time under a fixed UTC offset
//! rather than UTC, independent of the host timezone.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

use crate::ValidationError;

/// Default offset in hours (KST, UTC+9)
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Storage format for `created_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats instants as civil time under a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilClock {
    offset: FixedOffset,
}

impl CivilClock {
    /// Build a clock for a whole-hour offset. Offsets beyond ±23h are rejected.
    pub fn from_offset_hours(hours: i32) -> Result<Self, ValidationError> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .ok_or(ValidationError::InvalidFormat {
                field: "utc offset",
                reason: "must be between -23 and 23 hours",
            })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Format an instant as `YYYY-MM-DD HH:MM:SS` in civil time.
    pub fn stamp(&self, at: DateTime<Utc>) -> String {
        at.with_timezone(&self.offset)
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    pub fn now(&self) -> String {
        self.stamp(Utc::now())
    }
}

impl Default for CivilClock {
    fn default() -> Self {
        Self::from_offset_hours(DEFAULT_UTC_OFFSET_HOURS).expect("invalid default utc offset")
    }
}

/// Parse a stored timestamp without reinterpreting its timezone.
///
/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the ISO `T` separator with an optional
/// trailing `Z` (treated as civil time, not UTC), and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let cleaned = raw.trim().trim_end_matches('Z').replacen('T', " ", 1);
    let cleaned = cleaned.split('.').next().unwrap_or_default();

    NaiveDateTime::parse_from_str(cleaned, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(cleaned, "%Y-%m-%d %H:%M"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(cleaned, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn stamps_with_nine_hour_offset() {
        let clock = CivilClock::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 20, 30, 15).unwrap();
        assert_eq!(clock.stamp(at), "2024-03-02 05:30:15");
    }

    #[test]
    fn custom_offset() {
        let clock = CivilClock::from_offset_hours(0).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 20, 30, 15).unwrap();
        assert_eq!(clock.stamp(at), "2024-03-01 20:30:15");

        assert!(CivilClock::from_offset_hours(30).is_err());
    }

    #[test]
    fn parses_stored_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(12, 7, 9)
            .unwrap();
        assert_eq!(parse_timestamp("2024-01-05 12:07:09"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-05T12:07:09Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-05T12:07:09.000Z"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-05"),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
