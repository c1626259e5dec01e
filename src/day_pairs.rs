//! # Day-Pair Parsing
//!
//! Within a month block every table row starts with the day of the month,
//! optionally followed by a three-letter weekday abbreviation, then a run of
//! `hhmm height` pairs:
//!
//! ```text
//! 01 QUA 0512 1.3 1148 -0.2 1735 1.4
//! ```
//!
//! The table layout often spreads one day across several text lines, so
//! pairs are accumulated per day number over the whole block, then
//! deduplicated and sorted.
//!
//! Parsing is best effort. A line that does not start with a day number, or
//! whose day is outside 1–31, is skipped silently.

use crate::RawObservation;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use tracing::warn;

/// Observations per day of the month, days without data absent.
pub type DayMap = BTreeMap<u32, Vec<RawObservation>>;

fn line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([0-9]{1,2})\s+([A-ZÇ]{3})?\s*(.*)$").expect("line pattern should be valid")
    })
}

fn pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b([0-9]{4})\s+(-?[0-9]+(?:\.[0-9]+)?)\b").expect("pair pattern should be valid")
    })
}

/// Extract every `hhmm height` pair from the remainder of a day row.
fn parse_pairs(rest: &str) -> impl Iterator<Item = RawObservation> + '_ {
    pair_re().captures_iter(rest).filter_map(|caps| {
        let height = caps[2].parse::<f64>().ok()?;
        if !height.is_finite() {
            warn!("Dropping out-of-range height {} at {}", &caps[2], &caps[1]);
            return None;
        }
        Some(RawObservation {
            hhmm: caps[1].to_string(),
            height,
        })
    })
}

/// Parse a month block into per-day observation lists.
///
/// Each list is deduplicated on `(hhmm, height)` and sorted ascending by
/// `hhmm`; entries sharing an `hhmm` keep their order of appearance.
///
/// # Example
/// ```
/// use tide_table_lib::day_pairs::parse_day_pairs;
///
/// let days = parse_day_pairs("JANEIRO\n01 QUA 0512 1.3 1148 -0.2 1735 1.4\n");
/// let first = &days[&1];
/// assert_eq!(first.len(), 3);
/// assert_eq!(first[1].hhmm, "1148");
/// assert_eq!(first[1].height, -0.2);
/// ```
pub fn parse_day_pairs(block: &str) -> DayMap {
    let mut days = DayMap::new();

    for line in block.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        let Some(caps) = line_re().captures(line) else {
            continue;
        };
        let Ok(day) = caps[1].parse::<u32>() else {
            continue;
        };
        if !(1..=31).contains(&day) {
            continue;
        }

        let rest = caps.get(3).map_or("", |m| m.as_str());
        let pairs: Vec<RawObservation> = parse_pairs(rest).collect();
        if !pairs.is_empty() {
            days.entry(day).or_default().extend(pairs);
        }
    }

    for observations in days.values_mut() {
        dedup_and_sort(observations);
    }

    days
}

fn dedup_and_sort(observations: &mut Vec<RawObservation>) {
    let mut seen = HashSet::new();
    observations.retain(|obs| seen.insert((obs.hhmm.clone(), obs.height.to_bits())));
    // Stable, so equal hhmm keep their original order
    observations.sort_by(|a, b| a.hhmm.cmp(&b.hhmm));
}
