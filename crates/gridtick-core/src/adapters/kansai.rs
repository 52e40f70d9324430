use std::io::Read;

use csv::ReaderBuilder;

use crate::adapters::{
    parse_demand_mw, parse_forecast_mw, parse_hour, ColumnMap, SourceAdapter, DEMAND_FIELDS,
    DEMAND_REQUIRED,
};
use crate::calendar::JpCalendar;
use crate::domain::{Area, DemandResponse, Meta, SeriesPoint, Source};
use crate::error::ParseError;

/// Normalizes Kansai Electric Power demand feeds.
///
/// The feed shape mirrors TEPCO's: date, clock time, actual and optional
/// forecast columns in 万kW, labeled in either language. Forecast cells may
/// be empty for some rows.
#[derive(Debug, Clone)]
pub struct KansaiAdapter {
    calendar: JpCalendar,
    source_url: String,
}

impl KansaiAdapter {
    pub fn new(calendar: JpCalendar) -> Self {
        Self {
            calendar,
            source_url: String::from("https://www.kansai-td.co.jp/denkiyoho/"),
        }
    }
}

impl SourceAdapter for KansaiAdapter {
    type Response = DemandResponse;

    fn source(&self) -> Source {
        Source::new("Kansai", self.source_url.clone())
    }

    fn parse_csv(&self, reader: impl Read, date: &str) -> Result<DemandResponse, ParseError> {
        let base_date = self.calendar.parse_date(date)?;

        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let header = csv_reader
            .headers()
            .map_err(|source| ParseError::Csv { line: 1, source })?
            .clone();
        let columns = ColumnMap::detect(&header, &DEMAND_FIELDS, &DEMAND_REQUIRED)?;

        let mut response = DemandResponse::new(Area::Kansai, date, self.source());
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

        response.series.sort_by_key(|point| point.ts);

        if !has_forecast {
            response.meta = Some(Meta::warning("Forecast data not available for this date"));
        }

        Ok(response)
    }
}
