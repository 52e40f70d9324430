//! Core contracts for gridtick.
//!
//! gridtick ingests per-utility electricity CSV feeds (TEPCO and Kansai
//! demand series, OCCTO reserve margins) and normalizes them into canonical
//! responses for downstream publication. This crate contains:
//!
//! - Canonical domain models and validation
//! - The fixed-offset Japan calendar utility
//! - Source adapters with declarative header detection and unit conversion
//! - The blocking retrieval fetcher with retry/backoff
//!
//! Everything here is synchronous: each fetch or parse call owns its own
//! state and releases one response to exactly one caller, so sharing an
//! adapter across threads needs no locking.

pub mod adapters;
pub mod calendar;
pub mod domain;
pub mod error;
pub mod fetch;

pub use adapters::{
    ColumnMap, FieldSynonyms, KansaiAdapter, OcctoAdapter, SourceAdapter, TepcoAdapter,
};
pub use calendar::JpCalendar;
pub use domain::{
    Area, AreaReserve, DemandResponse, JstTimestamp, Meta, ReserveResponse, ReserveStatus,
    SeriesPoint, Source, Timescale, JST,
};
pub use error::{CalendarError, ParseError, ValidationError};
pub use fetch::{
    FetchError, FetchFailure, Fetcher, FetcherConfig, HttpTransport, ReqwestTransport,
    TransportError, TransportResponse,
};
