//! # Tide Table Core Library
//!
//! This library turns the text of a DHN (Diretoria de Hidrografia e Navegação)
//! tide-table PDF into a structured yearly schedule of high and low tides for a
//! single coastal station.
//!
//! ## Design Philosophy
//!
//! ### Best-effort parsing
//! Text extracted from a PDF is noisy. Lines that do not look like a day row,
//! months whose name cannot be found and tokens that are not valid times are
//! skipped rather than treated as errors. Only I/O and PDF decoding failures
//! abort a run.
//!
//! ### Determinism
//! Every collection on the path from text to JSON is ordered by construction
//! (`BTreeMap` keyed by day, sorted observation lists), so two runs over the
//! same PDF produce byte-identical output.
//!
//! ### Data Flow
//! 1. **Extract**: PDF pages → one text blob ([`pdf_text`])
//! 2. **Normalize**: canonical whitespace ([`normalize`])
//! 3. **Slice**: one text block per month ([`months`])
//! 4. **Parse**: per-day `(hhmm, height)` observations ([`day_pairs`])
//! 5. **Classify**: UTC timestamps and high/low labels ([`classify`])
//! 6. **Assemble**: the [`YearSchedule`] written as JSON ([`schedule`])
//!
//! ## Core Types
//! - [`RawObservation`]: one time/height pair as printed in the table
//! - [`TidalEvent`]: a classified extreme with a UTC timestamp
//! - [`DaySchedule`]: all extremes of one local calendar day
//! - [`YearSchedule`]: the root output artifact

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// Module declarations
pub mod classify;
pub mod config;
pub mod day_pairs;
pub mod error;
pub mod months;
pub mod normalize;
pub mod pdf_text;
pub mod schedule;
pub mod week;

pub use error::TideError;

/// A single time/height pair exactly as printed in the tide table.
///
/// `hhmm` is the zero-padded local time token (e.g. `"0512"`), so string
/// ordering equals chronological ordering within a day.
///
/// # Example
/// ```
/// use tide_table_lib::RawObservation;
///
/// let obs = RawObservation { hhmm: "1148".to_string(), height: -0.2 };
/// assert_eq!(obs.hhmm, "1148");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RawObservation {
    /// Local time of day, four digits without separator
    pub hhmm: String,
    /// Height in meters, may be negative
    pub height: f64,
}

/// Whether an extreme is a local maximum or minimum of the day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TideKind {
    High,
    Low,
}

/// A classified tidal extreme.
///
/// Serializes as `{ "time": "2026-01-01T08:12:00Z", "height": 1.3, "type": "high" }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TidalEvent {
    /// Instant of the extreme in UTC
    pub time: DateTime<Utc>,
    /// Height in meters
    pub height: f64,
    #[serde(rename = "type")]
    pub kind: TideKind,
}

/// All extremes of one local calendar day, sorted ascending by time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Local calendar date, serialized as `YYYY-MM-DD`
    pub date_key: NaiveDate,
    pub extremes: Vec<TidalEvent>,
}

/// Complete yearly schedule for one station.
///
/// # Example
/// ```
/// use tide_table_lib::YearSchedule;
///
/// let schedule = YearSchedule {
///     location: "Ilhéus".to_string(),
///     year: 2026,
///     timezone: "America/Bahia".to_string(),
///     days: vec![],
/// };
///
/// let json = serde_json::to_string(&schedule).unwrap();
/// assert!(json.contains("\"location\":\"Ilhéus\""));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YearSchedule {
    pub location: String,
    pub year: i32,
    /// Timezone label, informational only
    pub timezone: String,
    /// January 1st through December 31st, months without a block omitted
    pub days: Vec<DaySchedule>,
}
