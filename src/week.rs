//! # Seven-Day Window
//!
//! Consumers of the yearly schedule usually want "this week" rather than the
//! whole year. A [`WeekView`] holds the seven schedule days starting at a given
//! local date, plus a flattened list of their extremes for clients that plot a
//! single continuous curve.

use crate::{DaySchedule, TidalEvent, YearSchedule};
use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Publisher of the tide tables
pub const SOURCE: &str = "DHN/CHM";
/// Long form of [`SOURCE`]
pub const SOURCE_NAME: &str = "Marinha do Brasil - CHM (Tábua de Marés)";

/// Number of days in a window
pub const WEEK_DAYS: u64 = 7;

/// Seven consecutive days of a [`YearSchedule`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub source: String,
    pub source_name: String,
    pub location: String,
    /// Schedule file the days were read from, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    /// First local date of the window
    pub start_date_key: NaiveDate,
    /// Days of the window present in the schedule, in schedule order
    pub days: Vec<DaySchedule>,
    /// All extremes of `days`, concatenated
    pub flat_extremes: Vec<TidalEvent>,
}

/// Local calendar date of `now` at a fixed UTC offset.
///
/// # Example
/// ```
/// use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
/// use tide_table_lib::week::local_date_key;
///
/// let bahia = FixedOffset::west_opt(3 * 3600).unwrap();
/// // 01:30 UTC on Jan 2nd is still Jan 1st in Bahia
/// let now = Utc.with_ymd_and_hms(2026, 1, 2, 1, 30, 0).unwrap();
/// assert_eq!(local_date_key(now, bahia), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// ```
pub fn local_date_key(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

/// Select the seven days starting at `start` from `schedule`.
///
/// Dates missing from the schedule (months without a block, dates past the
/// end of the year) are simply absent from the result. `source_path` names
/// the file `schedule` was loaded from and is carried into the view as is.
pub fn week_window(
    schedule: &YearSchedule,
    start: NaiveDate,
    source_path: Option<&Path>,
) -> WeekView {
    let wanted: HashSet<NaiveDate> = (0..WEEK_DAYS)
        .filter_map(|i| start.checked_add_days(Days::new(i)))
        .collect();

    let days: Vec<DaySchedule> = schedule
        .days
        .iter()
        .filter(|d| wanted.contains(&d.date_key))
        .cloned()
        .collect();

    let flat_extremes = days
        .iter()
        .flat_map(|d| d.extremes.iter().cloned())
        .collect();

    WeekView {
        source: SOURCE.to_string(),
        source_name: SOURCE_NAME.to_string(),
        location: schedule.location.clone(),
        source_path: source_path.map(Path::to_path_buf),
        start_date_key: start,
        days,
        flat_extremes,
    }
}
