use std::fs;

use tracing::info;

use gridtick_core::{Area, JpCalendar, KansaiAdapter, SourceAdapter, TepcoAdapter};

use crate::cli::FetchDemandArgs;
use crate::error::CliError;

pub fn run(args: &FetchDemandArgs, calendar: &JpCalendar) -> Result<(), CliError> {
    let area: Area = args.area.into();
    let date = super::resolve_date(calendar, &args.common.date)?;

    info!(area = area.as_str(), %date, "fetching demand data");

    let feed = super::open_feed(&args.common)?;
    let response = match area {
        Area::Tokyo => TepcoAdapter::new(calendar.clone()).parse_csv(feed, &date)?,
        Area::Kansai => KansaiAdapter::new(calendar.clone()).parse_csv(feed, &date)?,
    };

    info!(points = response.series.len(), "parsed demand series");

    let out_dir = args.common.out_dir.join("jp").join(area.as_str());
    fs::create_dir_all(&out_dir)?;

    let path = out_dir.join(format!("demand-{date}.json"));
    fs::write(&path, serde_json::to_vec_pretty(&response)?)?;

    info!(path = %path.display(), "wrote demand response");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{AreaArg, CommonArgs};
    use std::path::PathBuf;

    const SAMPLE: &str = "\
DATE,TIME,実績(万kW),予測(万kW)
2025-10-24,0:00,2665.4,2701.0
2025-10-24,1:00,2598.2,2640.5
";

    fn args(input: PathBuf, out_dir: PathBuf) -> FetchDemandArgs {
        FetchDemandArgs {
            area: AreaArg::Tokyo,
            common: CommonArgs {
                date: Some(String::from("2025-10-24")),
                input: Some(input),
                url: None,
                out_dir,
            },
        }
    }

    #[test]
    fn writes_the_demand_json_file() {
        let dir = tempfile::tempdir().expect("tempdir must build");
        let input = dir.path().join("feed.csv");
        fs::write(&input, SAMPLE).expect("sample must write");

        let calendar = JpCalendar::new().expect("calendar must build");
        run(&args(input, dir.path().to_path_buf()), &calendar).expect("command must succeed");

        let written = dir.path().join("jp/tokyo/demand-2025-10-24.json");
        let data = fs::read_to_string(&written).expect("output must exist");
        let value: serde_json::Value = serde_json::from_str(&data).expect("must be JSON");

        assert_eq!(value["area"], "tokyo");
        assert_eq!(value["date"], "2025-10-24");
        assert_eq!(value["series"][0]["demand_mw"], 26654.0);
        assert_eq!(value["series"][0]["ts"], "2025-10-24T00:00:00+09:00");
    }

    #[test]
    fn fails_with_a_parse_error_on_a_bad_feed() {
        let dir = tempfile::tempdir().expect("tempdir must build");
        let input = dir.path().join("feed.csv");
        fs::write(&input, "NOT,A,HEADER\n1,2,3\n").expect("sample must write");

        let calendar = JpCalendar::new().expect("calendar must build");
        let error = run(&args(input, dir.path().to_path_buf()), &calendar)
            .expect_err("command must fail");

        assert!(matches!(error, CliError::Parse(_)));
        assert_eq!(error.exit_code(), 3);
    }
}
