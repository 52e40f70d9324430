//! Canonical domain models shared by every source adapter.

mod demand;
mod reserve;
mod timestamp;

pub use demand::{Area, DemandResponse, SeriesPoint, Timescale};
pub use reserve::{AreaReserve, ReserveResponse, ReserveStatus};
pub use timestamp::{JstTimestamp, JST};

use serde::{Deserialize, Serialize};

/// Attribution for the upstream data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub url: String,
}

impl Source {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Optional response metadata. A warning is advisory only and must never be
/// treated as a parse failure by consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    pub warning: String,
}

impl Meta {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            warning: message.into(),
        }
    }
}
