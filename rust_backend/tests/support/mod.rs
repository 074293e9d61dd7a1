use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use route_kpi::core::domain::{ExecutionRecord, PlannedAssignment, Weekday};
use tempfile::NamedTempFile;

/// Writes `text` to a temp file encoded as ISO-8859-1, as the run logger does.
pub fn latin1_file(text: &str) -> NamedTempFile {
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).expect("fixture must be Latin-1"))
        .collect();
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(&bytes).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> Option<NaiveDateTime> {
    date(y, m, d).and_hms_opt(h, 0, 0)
}

/// One assignment per route on `day` of the week starting `monday`.
pub fn plan_day(monday: NaiveDate, day: Weekday, routes: &[&str]) -> Vec<PlannedAssignment> {
    let date = monday + chrono::Days::new(day.index() as u64);
    routes
        .iter()
        .map(|r| PlannedAssignment::new(day, *r, date))
        .collect()
}

pub fn run(route: &str, start: Option<NaiveDateTime>) -> ExecutionRecord {
    ExecutionRecord::new(route, start)
}
