//! Source adapters normalizing operator CSV feeds into canonical responses.
//!
//! Each adapter consumes a raw CSV stream plus a target date, auto-detects
//! the column layout, filters rows to the target date, converts units, and
//! derives metadata. Adapters hold only immutable source attribution (and a
//! calendar clone), so one instance may serve concurrent parses of
//! different streams without locking.

mod columns;
mod kansai;
mod occto;
mod tepco;

pub use columns::{ColumnMap, FieldSynonyms};
pub use kansai::KansaiAdapter;
pub use occto::OcctoAdapter;
pub use tepco::TepcoAdapter;

use std::io::Read;

use crate::domain::Source;
use crate::error::ParseError;

/// Shared contract across the source adapters: one raw CSV stream plus one
/// target date in, one canonical response out.
pub trait SourceAdapter: Send + Sync {
    type Response;

    /// Attribution attached to every response.
    fn source(&self) -> Source;

    /// Parse `reader` into a canonical response for `date` (`YYYY-MM-DD`).
    /// Rows for other dates are skipped without error; that is how a
    /// multi-day source file is narrowed to one day.
    fn parse_csv(&self, reader: impl Read, date: &str) -> Result<Self::Response, ParseError>;
}

/// Synonym table for the demand feeds. `実績`/`予測` match as substrings
/// because real labels carry unit suffixes (`実績(万kW)`).
pub(crate) const DEMAND_FIELDS: [FieldSynonyms; 4] = [
    FieldSynonyms {
        field: "date",
        substrings: &["date"],
        exact: &["日付"],
    },
    FieldSynonyms {
        field: "time",
        substrings: &["time"],
        exact: &["時刻"],
    },
    FieldSynonyms {
        field: "actual",
        substrings: &["actual", "実績"],
        exact: &[],
    },
    FieldSynonyms {
        field: "forecast",
        substrings: &["forecast", "予測"],
        exact: &[],
    },
];

pub(crate) const DEMAND_REQUIRED: [&str; 3] = ["date", "time", "actual"];

/// Synonym table for the reserve margin feed.
pub(crate) const RESERVE_FIELDS: [FieldSynonyms; 3] = [
    FieldSynonyms {
        field: "date",
        substrings: &["date"],
        exact: &["日付"],
    },
    FieldSynonyms {
        field: "area",
        substrings: &["area"],
        exact: &["エリア", "地域"],
    },
    FieldSynonyms {
        field: "reserve_margin",
        substrings: &["reserve", "margin"],
        exact: &["予備率"],
    },
];

pub(crate) const RESERVE_REQUIRED: [&str; 3] = ["date", "area", "reserve_margin"];

/// 万kW (ten-thousand kilowatts) to megawatts.
pub(crate) const MAN_KW_TO_MW: f64 = 10.0;

/// Extract the hour from an `H:MM`/`HH:MM` clock token.
pub(crate) fn parse_hour(value: &str, line: usize) -> Result<u8, ParseError> {
    let row_error = || ParseError::RowParse {
        field: "time",
        line,
        value: value.to_owned(),
    };

    let mut parts = value.split(':');
    let (Some(hour), Some(_minutes), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(row_error());
    };

    match hour.parse::<i32>() {
        Ok(hour @ 0..=23) => Ok(hour as u8),
        _ => Err(row_error()),
    }
}

/// Parse a demand cell in 万kW and convert to MW. The canonical model
/// requires a finite, non-negative value.
pub(crate) fn parse_demand_mw(value: &str, line: usize) -> Result<f64, ParseError> {
    match value.parse::<f64>() {
        Ok(raw) if raw.is_finite() && raw >= 0.0 => Ok(raw * MAN_KW_TO_MW),
        _ => Err(ParseError::RowParse {
            field: "actual",
            line,
            value: value.to_owned(),
        }),
    }
}

/// Forecast cells degrade instead of failing: anything unusable yields no
/// forecast for the point.
pub(crate) fn parse_forecast_mw(value: &str) -> Option<f64> {
    match value.parse::<f64>() {
        Ok(raw) if raw.is_finite() && raw >= 0.0 => Some(raw * MAN_KW_TO_MW),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hour_accepts_both_clock_shapes() {
        assert_eq!(parse_hour("0:00", 2).expect("must parse"), 0);
        assert_eq!(parse_hour("9:30", 2).expect("must parse"), 9);
        assert_eq!(parse_hour("13:00", 2).expect("must parse"), 13);
        assert_eq!(parse_hour("23:00", 2).expect("must parse"), 23);
    }

    #[test]
    fn parse_hour_rejects_malformed_tokens() {
        for bad in ["invalid", "24:00", "-1:00", "12", "1:2:3", ""] {
            let err = parse_hour(bad, 7).expect_err("must fail");
            assert!(
                matches!(err, ParseError::RowParse { field: "time", line: 7, .. }),
                "{bad} should fail as a time row error"
            );
        }
    }

    #[test]
    fn demand_scaling_is_exact() {
        assert_eq!(parse_demand_mw("2665.4", 2).expect("must parse"), 26654.0);
        assert_eq!(parse_demand_mw("2834.6", 2).expect("must parse"), 28346.0);
    }

    #[test]
    fn demand_rejects_garbage_and_negatives() {
        for bad in ["abc", "", "-12.5", "NaN"] {
            assert!(parse_demand_mw(bad, 3).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn forecast_degrades_silently() {
        assert_eq!(parse_forecast_mw("2701.0"), Some(27010.0));
        assert_eq!(parse_forecast_mw("n/a"), None);
        assert_eq!(parse_forecast_mw("-1"), None);
    }
}
