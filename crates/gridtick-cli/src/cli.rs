use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use gridtick_core::Area;

/// Normalize Japanese grid CSV feeds into canonical JSON files.
#[derive(Debug, Parser)]
#[command(name = "gridtick", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and normalize a demand feed for one area and one day.
    FetchDemand(FetchDemandArgs),
    /// Fetch and normalize the reserve margin feed for one day.
    FetchReserve(FetchReserveArgs),
}

#[derive(Debug, Args)]
pub struct FetchDemandArgs {
    /// Grid area to fetch.
    #[arg(long, value_enum)]
    pub area: AreaArg,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct FetchReserveArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Target date (YYYY-MM-DD); defaults to today in Japan.
    #[arg(long)]
    pub date: Option<String>,

    /// Read the CSV from a local file instead of fetching.
    #[arg(long, conflicts_with = "url")]
    pub input: Option<PathBuf>,

    /// Fetch the CSV from this URL.
    #[arg(long)]
    pub url: Option<String>,

    /// Root directory for generated JSON files.
    #[arg(long, default_value = "public/data")]
    pub out_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AreaArg {
    Tokyo,
    Kansai,
}

impl From<AreaArg> for Area {
    fn from(value: AreaArg) -> Self {
        match value {
            AreaArg::Tokyo => Self::Tokyo,
            AreaArg::Kansai => Self::Kansai,
        }
    }
}
