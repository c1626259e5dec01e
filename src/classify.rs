//! # Tidal Event Classification
//!
//! Turns a day's raw observations into UTC-stamped [`TidalEvent`]s and
//! labels each one high or low.
//!
//! ## Time Conversion
//! Table times are local wall-clock times at a fixed UTC offset (Bahia is
//! UTC−3 all year, no daylight saving). The offset comes from
//! configuration; there is no timezone database.
//!
//! ## High/Low Heuristic
//! The table does not say which readings are high water. Each event is
//! compared with its immediate neighbours only:
//! - one event: high
//! - two events: the strictly higher one is high; on a tie the first is low
//!   and the second high
//! - three or more: the first event is high if `>=` the next, the last if
//!   `>=` the previous, an interior event only if strictly greater than both
//!
//! A run of three or more equal interior heights is therefore all low.

use crate::{TidalEvent, TideKind};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

/// An event that has a UTC time and height but no high/low label yet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub time: DateTime<Utc>,
    pub height: f64,
}

/// Parse a four-digit `hhmm` token into a time of day.
///
/// Returns `None` for malformed tokens or out-of-range values such as `"2460"`.
pub fn parse_hhmm(hhmm: &str) -> Option<NaiveTime> {
    if hhmm.len() != 4 || !hhmm.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour = hhmm[..2].parse().ok()?;
    let minute = hhmm[2..].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Interpret `hhmm` on `date` as local time at `offset` and convert to UTC.
///
/// # Example
/// ```
/// use chrono::{FixedOffset, NaiveDate};
/// use tide_table_lib::classify::local_hhmm_to_utc;
///
/// let bahia = FixedOffset::west_opt(3 * 3600).unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let utc = local_hhmm_to_utc(date, "0512", bahia).unwrap();
/// assert_eq!(utc.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true), "2026-01-01T08:12:00Z");
/// ```
pub fn local_hhmm_to_utc(
    date: NaiveDate,
    hhmm: &str,
    offset: FixedOffset,
) -> Option<DateTime<Utc>> {
    let local = date.and_time(parse_hhmm(hhmm)?);
    offset
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Label each reading high or low by comparing it with its neighbours.
///
/// Input order does not matter; the result is sorted ascending by time.
pub fn classify_high_low(readings: &[Reading]) -> Vec<TidalEvent> {
    let mut sorted = readings.to_vec();
    sorted.sort_by_key(|r| r.time);

    let event = |r: &Reading, kind| TidalEvent {
        time: r.time,
        height: r.height,
        kind,
    };

    match sorted.as_slice() {
        [] => Vec::new(),
        [only] => vec![event(only, TideKind::High)],
        [a, b] => {
            if a.height == b.height {
                vec![event(a, TideKind::Low), event(b, TideKind::High)]
            } else if a.height > b.height {
                vec![event(a, TideKind::High), event(b, TideKind::Low)]
            } else {
                vec![event(a, TideKind::Low), event(b, TideKind::High)]
            }
        }
        all => all
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let prev = i.checked_sub(1).map(|p| all[p].height);
                let next = all.get(i + 1).map(|n| n.height);
                let is_high = match (prev, next) {
                    (None, Some(next)) => r.height >= next,
                    (Some(prev), None) => r.height >= prev,
                    (Some(prev), Some(next)) => r.height > prev && r.height > next,
                    (None, None) => true,
                };
                event(r, if is_high { TideKind::High } else { TideKind::Low })
            })
            .collect(),
    }
}
