use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::{Meta, Source};
use crate::error::ValidationError;

/// Reserve margin status band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReserveStatus {
    Stable,
    Watch,
    Tight,
}

impl ReserveStatus {
    /// Derive the band from a margin percentage. Lower bounds are
    /// inclusive: >= 8% stable, >= 5% watch, otherwise tight.
    pub fn from_pct(pct: f64) -> Self {
        if pct >= 8.0 {
            Self::Stable
        } else if pct >= 5.0 {
            Self::Watch
        } else {
            Self::Tight
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Watch => "watch",
            Self::Tight => "tight",
        }
    }
}

impl Display for ReserveStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reserve margin for one grid area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaReserve {
    /// Canonical lowercase token where recognized, otherwise the source
    /// string passed through.
    pub area: String,
    pub reserve_margin_pct: f64,
    pub status: ReserveStatus,
}

impl AreaReserve {
    /// `status` is always derived from the margin, never set independently.
    pub fn new(area: impl Into<String>, reserve_margin_pct: f64) -> Result<Self, ValidationError> {
        if !reserve_margin_pct.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "reserve_margin_pct",
            });
        }

        Ok(Self {
            area: area.into(),
            reserve_margin_pct,
            status: ReserveStatus::from_pct(reserve_margin_pct),
        })
    }
}

/// Canonical reserve margin response for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveResponse {
    /// The date requested by the caller, `YYYY-MM-DD`.
    pub date: String,
    /// One entry per area row, in first-seen input order.
    pub areas: Vec<AreaReserve>,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl ReserveResponse {
    pub fn new(date: impl Into<String>, source: Source) -> Self {
        Self {
            date: date.into(),
            areas: Vec::with_capacity(2),
            source,
            meta: None,
        }
    }
}
