mod demand;
mod reserve;

use std::fs::File;
use std::io::Read;

use gridtick_core::{Fetcher, FetcherConfig, JpCalendar};

use crate::cli::{Cli, Command, CommonArgs};
use crate::error::CliError;

pub fn run(cli: &Cli) -> Result<(), CliError> {
    // A broken calendar configuration is unrecoverable; abort before
    // touching any input.
    let calendar = JpCalendar::new()?;

    match &cli.command {
        Command::FetchDemand(args) => demand::run(args, &calendar),
        Command::FetchReserve(args) => reserve::run(args, &calendar),
    }
}

/// Resolve the target date, defaulting to today in the fixed zone. An
/// explicit date is validated before any fetch happens.
fn resolve_date(calendar: &JpCalendar, date: &Option<String>) -> Result<String, CliError> {
    match date {
        Some(value) => {
            calendar.parse_date(value)?;
            Ok(value.clone())
        }
        None => Ok(calendar.format_date(calendar.today())),
    }
}

/// Open the CSV stream named by `--input` or `--url`.
fn open_feed(common: &CommonArgs) -> Result<Box<dyn Read + Send>, CliError> {
    match (&common.input, &common.url) {
        (Some(path), _) => Ok(Box::new(File::open(path)?)),
        (None, Some(url)) => {
            let fetcher = Fetcher::new(FetcherConfig::default());
            Ok(fetcher.fetch(url)?)
        }
        (None, None) => Err(CliError::Command(String::from(
            "either --input or --url is required",
        ))),
    }
}
