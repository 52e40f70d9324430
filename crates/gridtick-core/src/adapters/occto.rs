use std::collections::HashSet;
use std::io::Read;

use csv::ReaderBuilder;

use crate::adapters::{ColumnMap, SourceAdapter, RESERVE_FIELDS, RESERVE_REQUIRED};
use crate::domain::{AreaReserve, Meta, ReserveResponse, Source};
use crate::error::ParseError;

/// Known canonical area tokens. A feed covering fewer than these gets an
/// advisory warning, not an error.
const EXPECTED_AREAS: [&str; 2] = ["tokyo", "kansai"];

/// Normalizes OCCTO (Organization for Cross-regional Coordination of
/// Transmission Operators) reserve margin feeds.
///
/// Expected layout, headers in either language and any column order:
///
/// ```text
/// 日付,エリア,予備率
/// 2025-10-24,東京,8.5
/// 2025-10-24,関西,10.2
/// ```
///
/// Margins are percentages; multiple areas appear per date and keep their
/// input order in the response.
#[derive(Debug, Clone)]
pub struct OcctoAdapter {
    source_url: String,
}

impl OcctoAdapter {
    pub fn new() -> Self {
        Self {
            source_url: String::from("https://www.occto.or.jp/"),
        }
    }

    /// Map an area token onto its canonical lowercase form. Recognized
    /// names in either language normalize to the fixed token; anything
    /// else passes through lowercased so new regions flow without code
    /// changes.
    pub fn normalize_area(raw: &str) -> String {
        let token = raw.trim().to_lowercase();

        if token == "東京" || token.contains("tokyo") {
            String::from("tokyo")
        } else if token == "関西" || token.contains("kansai") {
            String::from("kansai")
        } else {
            token
        }
    }
}

impl Default for OcctoAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceAdapter for OcctoAdapter {
    type Response = ReserveResponse;

    fn source(&self) -> Source {
        Source::new("OCCTO", self.source_url.clone())
    }

    fn parse_csv(&self, reader: impl Read, date: &str) -> Result<ReserveResponse, ParseError> {
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);
        let header = csv_reader
            .headers()
            .map_err(|source| ParseError::Csv { line: 1, source })?
            .clone();
        let columns = ColumnMap::detect(&header, &RESERVE_FIELDS, &RESERVE_REQUIRED)?;

        let mut response = ReserveResponse::new(date, self.source());
        let mut areas_seen: HashSet<String> = HashSet::new();
        let mut line = 1;

        for record in csv_reader.records() {
            line += 1;
            let record = record.map_err(|source| ParseError::Csv { line, source })?;

            let row_date = record.get(columns.index("date")).unwrap_or("").trim();
            if row_date != date {
                continue;
            }

            let raw_area = record.get(columns.index("area")).unwrap_or("").trim();
            if raw_area.is_empty() {
                return Err(ParseError::RowParse {
                    field: "area",
                    line,
                    value: raw_area.to_owned(),
                });
            }
            let area = Self::normalize_area(raw_area);

            let margin_cell = record
                .get(columns.index("reserve_margin"))
                .unwrap_or("")
                .trim();
            let row_error = || ParseError::RowParse {
                field: "reserve_margin",
                line,
                value: margin_cell.to_owned(),
            };
            let margin = margin_cell.parse::<f64>().map_err(|_| row_error())?;
            let reserve = AreaReserve::new(area.clone(), margin).map_err(|_| row_error())?;

            areas_seen.insert(area);
            response.areas.push(reserve);
        }

        if response.areas.is_empty() {
            return Err(ParseError::NoMatchingData {
                date: date.to_owned(),
            });
        }

        if EXPECTED_AREAS.iter().any(|area| !areas_seen.contains(*area)) {
            response.meta = Some(Meta::warning(
                "Data for some areas not available for this date",
            ));
        }

        Ok(response)
    }
}
