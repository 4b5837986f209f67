//! Snapshot timestamps derived from capture paths
//!
//! Captures are laid out as `<root>/<YYYY-MM-DD>/orderbook_<HH>-<MM>.json`.
//! A path that does not follow the layout, or whose date/time fields are not
//! a real calendar instant, has no timestamp and is left out of the table.

use std::path::Path;
use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

fn snapshot_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:^|/)(\d{4})-(\d{2})-(\d{2})/orderbook_(\d{2})-(\d{2})\.json$")
            .expect("snapshot path pattern is a valid regex")
    })
}

/// Extract the capture timestamp from a snapshot path.
pub fn timestamp_from_path(path: &Path) -> Option<NaiveDateTime> {
    let normalized = path.to_string_lossy().replace('\\', "/");
    let caps = snapshot_path_pattern().captures(&normalized)?;

    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?;
    let time = NaiveTime::from_hms_opt(field(4)?, field(5)?, 0)?;
    Some(NaiveDateTime::new(date, time))
}
