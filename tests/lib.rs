// Test library for gridtick behavior tests
pub use gridtick_core::{
    adapters::{KansaiAdapter, OcctoAdapter, SourceAdapter, TepcoAdapter},
    fetch::{Fetcher, FetcherConfig, HttpTransport, TransportError, TransportResponse},
    Area, JpCalendar, ParseError, ReserveStatus,
};
pub use std::sync::Arc;
