use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{JstTimestamp, Meta, Source};
use crate::error::ValidationError;

/// Grid region served by a demand adapter.
///
/// The canonical set is fixed today; reserve rows additionally tolerate
/// unrecognized free-form area strings, which pass through unchanged (see
/// [`crate::adapters::OcctoAdapter::normalize_area`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Tokyo,
    Kansai,
}

impl Area {
    pub const ALL: [Self; 2] = [Self::Tokyo, Self::Kansai];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tokyo => "tokyo",
            Self::Kansai => "kansai",
        }
    }
}

impl Display for Area {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Area {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tokyo" => Ok(Self::Tokyo),
            "kansai" => Ok(Self::Kansai),
            other => Err(ValidationError::InvalidArea {
                value: other.to_owned(),
            }),
        }
    }
}

/// Data granularity of a demand series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timescale {
    Hourly,
}

/// One hourly observation.
///
/// `demand_mw` is always populated when a point exists; `forecast_mw` is
/// independently optional per point and its absence is a valid state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub ts: JstTimestamp,
    pub demand_mw: f64,
    pub forecast_mw: Option<f64>,
}

impl SeriesPoint {
    pub const fn new(ts: JstTimestamp, demand_mw: f64, forecast_mw: Option<f64>) -> Self {
        Self {
            ts,
            demand_mw,
            forecast_mw,
        }
    }
}

/// Canonical demand response for one area and one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandResponse {
    pub area: Area,
    /// The date requested by the caller, `YYYY-MM-DD`. Immutable once set,
    /// even when the adapter iterated a multi-day source file.
    pub date: String,
    pub timezone: String,
    pub timescale: Timescale,
    /// Chronological hourly points, at most 24 for one day.
    pub series: Vec<SeriesPoint>,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl DemandResponse {
    pub fn new(area: Area, date: impl Into<String>, source: Source) -> Self {
        Self {
            area,
            date: date.into(),
            timezone: String::from("Asia/Tokyo"),
            timescale: Timescale::Hourly,
            series: Vec::with_capacity(24),
            source,
            meta: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_response_carries_fixed_zone_and_timescale() {
        let response = DemandResponse::new(
            Area::Tokyo,
            "2025-10-24",
            Source::new("TEPCO", "https://www.tepco.co.jp/forecast/"),
        );

        assert_eq!(response.timezone, "Asia/Tokyo");
        assert_eq!(response.timescale, Timescale::Hourly);
        assert!(response.series.is_empty());
        assert!(response.meta.is_none());
    }

    #[test]
    fn area_round_trips_through_strings() {
        for area in Area::ALL {
            assert_eq!(area.as_str().parse::<Area>().expect("must parse"), area);
        }
        assert_eq!("TOKYO".parse::<Area>().expect("must parse"), Area::Tokyo);
        assert!(matches!(
            "tohoku".parse::<Area>(),
            Err(ValidationError::InvalidArea { .. })
        ));
    }

    #[test]
    fn meta_is_omitted_from_json_when_absent() {
        let response = DemandResponse::new(
            Area::Kansai,
            "2025-10-24",
            Source::new("Kansai", "https://www.kansai-td.co.jp/denkiyoho/"),
        );

        let value = serde_json::to_value(&response).expect("must serialize");
        assert!(value.get("meta").is_none());
        assert_eq!(value["area"], "kansai");
        assert_eq!(value["timescale"], "hourly");
    }
}
