use std::io::Read;

use csv::ReaderBuilder;

use crate::adapters::{
    parse_demand_mw, parse_forecast_mw, parse_hour, ColumnMap, SourceAdapter, DEMAND_FIELDS,
    DEMAND_REQUIRED,
};
use crate::calendar::JpCalendar;
use crate::domain::{Area, DemandResponse, Meta, SeriesPoint, Source};
use crate::error::ParseError;

/// Normalizes TEPCO (Tokyo Electric Power) demand feeds.
///
/// Expected layout, headers in either language and any column order:
///
/// ```text
/// DATE,TIME,実績(万kW),予測(万kW)
/// 2025-10-24,0:00,2665.4,2701.0
/// ```
///
/// Values arrive in 万kW (10,000 kW) and are scaled to MW on the way out.
/// The forecast column is optional and individual forecast cells may be
/// empty or unusable without failing the parse.
#[derive(Debug, Clone)]
pub struct TepcoAdapter {
    calendar: JpCalendar,
    source_url: String,
}

impl TepcoAdapter {
    pub fn new(calendar: JpCalendar) -> Self {
        Self {
            calendar,
            source_url: String::from("https://www.tepco.co.jp/forecast/"),
        }
    }
}

impl SourceAdapter for TepcoAdapter {
    type Response = DemandResponse;

    fn source(&self) -> Source {
        Source::new("TEPCO", self.source_url.clone())
    }

    fn parse_csv(&self, reader: impl Read, date: &str) -> Result<DemandResponse, ParseError> {
        let base_date = self.calendar.parse_date(date)?;

        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let header = csv_reader
            .headers()
            .map_err(|source| ParseError::Csv { line: 1, source })?
            .clone();
        let columns = ColumnMap::detect(&header, &DEMAND_FIELDS, &DEMAND_REQUIRED)?;

        let mut response = DemandResponse::new(Area::Tokyo, date, self.source());
        let mut seen_hours = [false; 24];
        let mut has_forecast = false;
        let mut line = 1;

        for record in csv_reader.records() {
            line += 1;
            let record = record.map_err(|source| ParseError::Csv { line, source })?;

            let row_date = record.get(columns.index("date")).unwrap_or("").trim();
            if row_date != date {
                continue;
            }

            let row_time = record.get(columns.index("time")).unwrap_or("").trim();
            let hour = parse_hour(row_time, line)?;
            if seen_hours[hour as usize] {
                return Err(ParseError::DuplicateHour { line, hour });
            }
            seen_hours[hour as usize] = true;

            let ts = self
                .calendar
                .at_hour(base_date, hour)
                .map_err(|_| ParseError::RowParse {
                    field: "time",
                    line,
                    value: row_time.to_owned(),
                })?;

            let actual = record.get(columns.index("actual")).unwrap_or("").trim();
            let demand_mw = parse_demand_mw(actual, line)?;

            let forecast_mw = columns
                .get("forecast")
                .and_then(|index| record.get(index))
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .and_then(parse_forecast_mw);
            if forecast_mw.is_some() {
                has_forecast = true;
            }

            response
                .series
                .push(SeriesPoint::new(ts, demand_mw, forecast_mw));
        }

        if response.series.is_empty() {
            return Err(ParseError::NoMatchingData {
                date: date.to_owned(),
            });
        }

        // Input order is not guaranteed; the contract is.
        response.series.sort_by_key(|point| point.ts);

        if !has_forecast {
            response.meta = Some(Meta::warning("Forecast data not available for this date"));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
DATE,TIME,実績(万kW),予測(万kW)
2025-10-24,0:00,2665.4,2701.0
2025-10-24,1:00,2598.2,2640.5
2025-10-24,2:00,2834.6,
";

    fn adapter() -> TepcoAdapter {
        TepcoAdapter::new(JpCalendar::new().expect("calendar must build"))
    }

    #[test]
    fn parses_a_mixed_language_feed() {
        let response = adapter()
            .parse_csv(SAMPLE.as_bytes(), "2025-10-24")
            .expect("must parse");

        assert_eq!(response.area, Area::Tokyo);
        assert_eq!(response.date, "2025-10-24");
        assert_eq!(response.source.name, "TEPCO");
        assert_eq!(response.series.len(), 3);
        assert_eq!(response.series[0].demand_mw, 26654.0);
        assert_eq!(response.series[0].forecast_mw, Some(27010.0));
        assert_eq!(response.series[2].demand_mw, 28346.0);
        assert_eq!(response.series[2].forecast_mw, None);
        assert!(response.meta.is_none());
    }

    #[test]
    fn rejects_a_duplicate_hour() {
        let feed = "\
DATE,TIME,ACTUAL
2025-10-24,0:00,2665.4
2025-10-24,0:00,2666.0
";
        let err = adapter()
            .parse_csv(feed.as_bytes(), "2025-10-24")
            .expect_err("must fail");
        assert!(matches!(err, ParseError::DuplicateHour { line: 3, hour: 0 }));
    }

    #[test]
    fn sorts_unordered_rows_chronologically() {
        let feed = "\
DATE,TIME,ACTUAL
2025-10-24,2:00,2834.6
2025-10-24,0:00,2665.4
2025-10-24,1:00,2598.2
";
        let response = adapter()
            .parse_csv(feed.as_bytes(), "2025-10-24")
            .expect("must parse");

        let hours: Vec<_> = response
            .series
            .iter()
            .map(|point| point.ts.into_inner().hour())
            .collect();
        assert_eq!(hours, vec![0, 1, 2]);
    }

    #[test]
    fn reports_the_line_of_a_bad_actual_value() {
        let feed = "\
DATE,TIME,ACTUAL
2025-10-24,0:00,2665.4
2025-10-24,1:00,not-a-number
";
        let err = adapter()
            .parse_csv(feed.as_bytes(), "2025-10-24")
            .expect_err("must fail");
        match err {
            ParseError::RowParse { field, line, value } => {
                assert_eq!(field, "actual");
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-number");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
