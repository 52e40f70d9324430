//! Fixed-offset calendar operations for Japanese grid data.
//!
//! Japan has no daylight-saving time, so every instant in this pipeline
//! carries the fixed +09:00 offset and calendar arithmetic never crosses a
//! transition.

use time::format_description::{self, BorrowedFormatItem};
use time::{Date, OffsetDateTime};

use crate::domain::{JstTimestamp, JST};
use crate::error::{CalendarError, ValidationError};

const DATE_FORMAT: &str = "[year]-[month]-[day]";

/// Calendar configuration for the fixed Japan zone.
///
/// Constructed once at process start and injected wherever dates are parsed
/// or formatted; a construction failure is unrecoverable and callers must
/// abort startup rather than degrade.
#[derive(Debug, Clone)]
pub struct JpCalendar {
    date_format: Vec<BorrowedFormatItem<'static>>,
}

impl JpCalendar {
    pub fn new() -> Result<Self, CalendarError> {
        Ok(Self {
            date_format: format_description::parse(DATE_FORMAT)?,
        })
    }

    /// Parse a `YYYY-MM-DD` string, anchored at local midnight in the fixed
    /// zone.
    pub fn parse_date(&self, value: &str) -> Result<Date, CalendarError> {
        Date::parse(value, &self.date_format).map_err(|_| CalendarError::InvalidDate {
            value: value.to_owned(),
        })
    }

    /// Format a date back to its `YYYY-MM-DD` form.
    pub fn format_date(&self, date: Date) -> String {
        date.format(&self.date_format)
            .expect("date format description is valid")
    }

    /// Instant at `hour:00:00` of `date`.
    pub fn at_hour(&self, date: Date, hour: u8) -> Result<JstTimestamp, ValidationError> {
        JstTimestamp::from_date_hour(date, hour)
    }

    /// The 24 hourly instants of `date`, 00:00 through 23:00 inclusive.
    pub fn hourly_slots(&self, date: Date) -> Vec<JstTimestamp> {
        (0..24)
            .map(|hour| {
                JstTimestamp::from_date_hour(date, hour).expect("hours 0..=23 are valid")
            })
            .collect()
    }

    /// Current calendar day in the fixed zone.
    pub fn today(&self) -> Date {
        OffsetDateTime::now_utc().to_offset(JST).date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_dates() {
        let calendar = JpCalendar::new().expect("calendar must build");
        let date = calendar.parse_date("2025-10-24").expect("must parse");
        assert_eq!(calendar.format_date(date), "2025-10-24");
    }

    #[test]
    fn rejects_malformed_dates() {
        let calendar = JpCalendar::new().expect("calendar must build");
        for bad in ["2025/10/24", "24-10-2025", "2025-13-01", "not-a-date"] {
            assert!(
                matches!(
                    calendar.parse_date(bad),
                    Err(CalendarError::InvalidDate { .. })
                ),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn hourly_slots_cover_the_whole_day() {
        let calendar = JpCalendar::new().expect("calendar must build");
        let date = calendar.parse_date("2025-10-24").expect("must parse");

        let slots = calendar.hourly_slots(date);
        assert_eq!(slots.len(), 24);
        assert_eq!(slots[0].format_rfc3339(), "2025-10-24T00:00:00+09:00");
        assert_eq!(slots[23].format_rfc3339(), "2025-10-24T23:00:00+09:00");

        for pair in slots.windows(2) {
            let step = pair[1].into_inner() - pair[0].into_inner();
            assert_eq!(step, time::Duration::hours(1));
        }
    }
}
