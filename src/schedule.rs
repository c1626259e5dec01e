//! # Schedule Assembly and Output
//!
//! Drives the whole conversion: for every month that has a block in the
//! normalized text, parse its day rows, convert each observation to UTC,
//! classify the day's extremes and collect one [`DaySchedule`] per calendar
//! day. Months with no block contribute nothing, not even empty days.
//!
//! ## Output
//! The [`YearSchedule`] is written as indented UTF-8 JSON. The file is first
//! written to a temporary sibling and then renamed over the destination, so a
//! failed run never leaves a truncated schedule behind.

use crate::classify::{classify_high_low, local_hhmm_to_utc, Reading};
use crate::config::Config;
use crate::day_pairs::parse_day_pairs;
use crate::months::slice_month_block;
use crate::normalize::normalize_spaces;
use crate::pdf_text::extract_text;
use crate::{DaySchedule, RawObservation, TideError, YearSchedule};
use chrono::{FixedOffset, NaiveDate};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Build the yearly schedule from already normalized text.
///
/// # Errors
/// [`TideError::Config`] if the configured UTC offset is out of range.
///
/// # Example
/// ```
/// use tide_table_lib::config::Config;
/// use tide_table_lib::schedule::build_year_schedule;
///
/// let text = "JANEIRO\n01 QUI 0512 1.3 1148 -0.2 1735 1.4\nFEVEREIRO\n";
/// let schedule = build_year_schedule(text, &Config::default()).unwrap();
///
/// // January and February have blocks, the other months do not
/// assert_eq!(schedule.days.len(), 31 + 28);
/// assert_eq!(schedule.days[0].extremes.len(), 3);
/// ```
pub fn build_year_schedule(text: &str, config: &Config) -> Result<YearSchedule, TideError> {
    let offset = config.location.offset()?;
    let year = config.schedule.year;
    let mut days = Vec::new();

    for month in 1..=12 {
        let Some(block) = slice_month_block(text, month) else {
            debug!("No block found for month {}, skipping", month);
            continue;
        };

        let mut day_map = parse_day_pairs(block);
        debug!("Month {}: {} days with observations", month, day_map.len());

        for day in 1..=31 {
            let observations = day_map.remove(&day).unwrap_or_default();
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                if !observations.is_empty() {
                    warn!(
                        "Dropping {} observations for nonexistent date {}-{:02}-{:02}",
                        observations.len(),
                        year,
                        month,
                        day
                    );
                }
                continue;
            };
            days.push(build_day(date, &observations, offset));
        }
    }

    let extremes: usize = days.iter().map(|d| d.extremes.len()).sum();
    info!(
        "Assembled {} days with {} extremes for {} {}",
        days.len(),
        extremes,
        config.location.name,
        year
    );

    Ok(YearSchedule {
        location: config.location.name.clone(),
        year,
        timezone: config.location.timezone.clone(),
        days,
    })
}

fn build_day(date: NaiveDate, observations: &[RawObservation], offset: FixedOffset) -> DaySchedule {
    let readings: Vec<Reading> = observations
        .iter()
        .filter_map(|obs| match local_hhmm_to_utc(date, &obs.hhmm, offset) {
            Some(time) => Some(Reading {
                time,
                height: obs.height,
            }),
            None => {
                warn!("Dropping invalid time {} on {}", obs.hhmm, date);
                None
            }
        })
        .collect();

    DaySchedule {
        date_key: date,
        extremes: classify_high_low(&readings),
    }
}

/// Write `schedule` to `path` as indented JSON, replacing any existing file
/// only once the new contents are completely on disk.
pub fn write_schedule<P: AsRef<Path>>(schedule: &YearSchedule, path: P) -> Result<(), TideError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, schedule)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path)?;

    info!("Wrote {} days to {}", schedule.days.len(), path.display());
    Ok(())
}

/// Load a schedule previously written by [`write_schedule`].
pub fn read_schedule<P: AsRef<Path>>(path: P) -> Result<YearSchedule, TideError> {
    let file = File::open(path)?;
    let schedule = serde_json::from_reader(BufReader::new(file))?;
    Ok(schedule)
}

/// Run the full pipeline: extract, normalize, assemble and write.
///
/// # Errors
/// Any failure reading the PDF or writing the output is returned; parse
/// mismatches inside the table are not errors.
pub fn convert<P: AsRef<Path>>(pdf_path: P, config: &Config) -> Result<YearSchedule, TideError> {
    let raw = extract_text(pdf_path)?;
    let text = normalize_spaces(Some(&raw));
    let schedule = build_year_schedule(&text, config)?;
    write_schedule(&schedule, &config.schedule.output)?;
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TideKind;
    use chrono::Datelike;
    use std::fs;
    use tempfile::tempdir;

    const JANUARY: &str = "JANEIRO\n01 QUI 0512 1.3 1148 -0.2 1735 1.4\n02 SEX 0600 1.2\n";

    #[test]
    fn test_missing_month_contributes_no_days() {
        let schedule = build_year_schedule(JANUARY, &Config::default()).unwrap();
        assert_eq!(schedule.days.len(), 31);
        assert!(schedule.days.iter().all(|d| d.date_key.month() == 1));
    }

    #[test]
    fn test_empty_text_yields_no_days() {
        let schedule = build_year_schedule("", &Config::default()).unwrap();
        assert!(schedule.days.is_empty());
        assert_eq!(schedule.location, "Ilhéus");
        assert_eq!(schedule.timezone, "America/Bahia");
    }

    #[test]
    fn test_days_without_data_are_empty() {
        let schedule = build_year_schedule(JANUARY, &Config::default()).unwrap();
        assert_eq!(schedule.days[0].extremes.len(), 3);
        assert_eq!(schedule.days[1].extremes.len(), 1);
        assert_eq!(schedule.days[1].extremes[0].kind, TideKind::High);
        assert!(schedule.days[2..].iter().all(|d| d.extremes.is_empty()));
    }

    #[test]
    fn test_short_month_dates_are_not_materialized() {
        let text = "FEVEREIRO\n28 SAB 0100 1.0\n30 0100 1.0\nMARÇO\n";
        let schedule = build_year_schedule(text, &Config::default()).unwrap();
        // February 2026 has 28 days, March has 31
        assert_eq!(schedule.days.len(), 28 + 31);
        assert_eq!(
            schedule.days[27].date_key,
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert_eq!(schedule.days[27].extremes.len(), 1);
    }

    #[test]
    fn test_invalid_times_are_dropped() {
        let text = "JANEIRO\n03 SAB 2460 1.0 0100 0.5 0700 2.0\n";
        let schedule = build_year_schedule(text, &Config::default()).unwrap();
        assert_eq!(schedule.days[2].extremes.len(), 2);
    }

    #[test]
    fn test_json_shape() {
        let schedule = build_year_schedule(JANUARY, &Config::default()).unwrap();
        let value = serde_json::to_value(&schedule).unwrap();

        assert_eq!(value["location"], "Ilhéus");
        assert_eq!(value["year"], 2026);
        assert_eq!(value["timezone"], "America/Bahia");
        let first = &value["days"][0];
        assert_eq!(first["dateKey"], "2026-01-01");
        assert_eq!(first["extremes"][0]["time"], "2026-01-01T08:12:00Z");
        assert_eq!(first["extremes"][0]["height"], 1.3);
        assert_eq!(first["extremes"][0]["type"], "high");
        assert_eq!(first["extremes"][1]["type"], "low");
    }

    #[test]
    fn test_write_schedule_is_readable_and_replaces() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("schedule.json");
        fs::write(&out, "stale").unwrap();

        let schedule = build_year_schedule(JANUARY, &Config::default()).unwrap();
        write_schedule(&schedule, &out).unwrap();

        let written = fs::read_to_string(&out).unwrap();
        assert!(written.contains("\n  \"location\": \"Ilhéus\""));
        let parsed = read_schedule(&out).unwrap();
        assert_eq!(parsed, schedule);
    }

    #[test]
    fn test_overflowing_height_does_not_break_reload() {
        let text = format!("JANEIRO\n01 QUA 0512 1{} 1148 -0.2\n", "0".repeat(400));
        let schedule = build_year_schedule(&text, &Config::default()).unwrap();
        assert_eq!(schedule.days[0].extremes.len(), 1);
        assert_eq!(schedule.days[0].extremes[0].height, -0.2);

        let dir = tempdir().unwrap();
        let out = dir.path().join("schedule.json");
        write_schedule(&schedule, &out).unwrap();
        assert!(!fs::read_to_string(&out).unwrap().contains("null"));
        assert_eq!(read_schedule(&out).unwrap(), schedule);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("missing").join("schedule.json");
        let schedule = build_year_schedule("", &Config::default()).unwrap();
        assert!(matches!(write_schedule(&schedule, &out), Err(TideError::Io(_))));
        assert!(!out.exists());
    }

    #[test]
    fn test_convert_missing_pdf_writes_nothing() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.schedule.output = dir.path().join("out.json");

        let result = convert(dir.path().join("missing.pdf"), &config);
        assert!(matches!(result, Err(TideError::Io(_))));
        assert!(!config.schedule.output.exists());
    }
}
