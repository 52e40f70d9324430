use thiserror::Error;

use gridtick_core::{CalendarError, FetchError, ParseError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Calendar(_) | Self::Command(_) => 2,
            Self::Parse(_) => 3,
            Self::Fetch(_) => 4,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
