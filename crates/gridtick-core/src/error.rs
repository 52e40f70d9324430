use thiserror::Error;

/// Validation and contract errors exposed by `gridtick-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("timestamp must carry the fixed +09:00 Japan offset: '{value}'")]
    TimestampNotJst { value: String },

    #[error("hour {hour} is outside 0..=23")]
    HourOutOfRange { hour: u8 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },

    #[error("invalid area '{value}', expected one of tokyo, kansai")]
    InvalidArea { value: String },
}

/// Errors from the fixed-zone calendar utility.
///
/// A `Format` error at `JpCalendar::new` means the process cannot produce
/// any timestamp at all and must abort startup.
#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid date format (expected YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },

    #[error("failed to compile calendar format descriptions: {0}")]
    Format(#[from] time::error::InvalidFormatDescription),
}

/// Errors raised while normalizing a CSV feed.
///
/// Required-field failures abort the whole parse; no partial response is
/// ever returned. The forecast column is the one soft-failure path and
/// never surfaces here.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A column required by the adapter contract was not found.
    #[error("required columns not found in header: {header:?}")]
    HeaderDetection { header: Vec<String> },

    /// A required cell did not parse. Lines are 1-based, counting the
    /// header row as line 1.
    #[error("invalid {field} value at line {line}: '{value}'")]
    RowParse {
        field: &'static str,
        line: usize,
        value: String,
    },

    /// A second observation for an hour already seen for the target date.
    #[error("duplicate hour {hour} at line {line}")]
    DuplicateHour { line: usize, hour: u8 },

    /// The header was fine but no row matched the requested date.
    #[error("no data found for date {date}")]
    NoMatchingData { date: String },

    /// The underlying CSV record could not be read at all.
    #[error("failed to read CSV record at line {line}: {source}")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
