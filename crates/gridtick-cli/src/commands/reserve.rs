use std::fs;

use tracing::info;

use gridtick_core::{JpCalendar, OcctoAdapter, SourceAdapter};

use crate::cli::FetchReserveArgs;
use crate::error::CliError;

pub fn run(args: &FetchReserveArgs, calendar: &JpCalendar) -> Result<(), CliError> {
    let date = super::resolve_date(calendar, &args.common.date)?;

    info!(%date, "fetching reserve margin data");

    let feed = super::open_feed(&args.common)?;
    let response = OcctoAdapter::new().parse_csv(feed, &date)?;

    info!(areas = response.areas.len(), "parsed reserve margins");

    let out_dir = args.common.out_dir.join("jp").join("system");
    fs::create_dir_all(&out_dir)?;

    let path = out_dir.join(format!("reserve-{date}.json"));
    fs::write(&path, serde_json::to_vec_pretty(&response)?)?;

    info!(path = %path.display(), "wrote reserve response");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CommonArgs;
    use std::path::PathBuf;

    const SAMPLE: &str = "\
日付,エリア,予備率
2025-10-24,東京,8.5
2025-10-24,関西,10.2
";

    fn args(input: PathBuf, out_dir: PathBuf) -> FetchReserveArgs {
        FetchReserveArgs {
            common: CommonArgs {
                date: Some(String::from("2025-10-24")),
                input: Some(input),
                url: None,
                out_dir,
            },
        }
    }

    #[test]
    fn writes_the_reserve_json_file() {
        let dir = tempfile::tempdir().expect("tempdir must build");
        let input = dir.path().join("reserve.csv");
        fs::write(&input, SAMPLE).expect("sample must write");

        let calendar = JpCalendar::new().expect("calendar must build");
        run(&args(input, dir.path().to_path_buf()), &calendar).expect("command must succeed");

        let written = dir.path().join("jp/system/reserve-2025-10-24.json");
        let data = fs::read_to_string(&written).expect("output must exist");
        let value: serde_json::Value = serde_json::from_str(&data).expect("must be JSON");

        assert_eq!(value["date"], "2025-10-24");
        assert_eq!(value["areas"][0]["area"], "tokyo");
        assert_eq!(value["areas"][0]["status"], "stable");
        assert_eq!(value["areas"][1]["area"], "kansai");
    }

    #[test]
    fn rejects_a_malformed_date_before_reading_any_input() {
        let dir = tempfile::tempdir().expect("tempdir must build");
        let mut bad = args(dir.path().join("missing.csv"), dir.path().to_path_buf());
        bad.common.date = Some(String::from("24-10-2025"));

        let calendar = JpCalendar::new().expect("calendar must build");
        let error = run(&bad, &calendar).expect_err("command must fail");

        assert!(matches!(error, CliError::Calendar(_)));
        assert_eq!(error.exit_code(), 2);
    }
}
