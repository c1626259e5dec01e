//! # Tide Table Application Entry Point
//!
//! This binary crate provides the command-line surface of the converter:
//! `convert` turns a DHN tide-table PDF into the yearly JSON schedule, `week`
//! prints a seven-day window of an existing schedule, and `text` dumps the
//! normalized PDF text for inspecting layout changes.
//!
//! Logs go to stderr (`RUST_LOG` controls the level, default `info`), so the
//! JSON and text printed by `week` and `text` can be piped safely.


use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tide_table_lib::{config::Config, normalize, pdf_text, schedule, week};

#[derive(Parser)]
#[command(name = "tide-table", about = "Convert DHN tide-table PDFs into JSON schedules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the yearly schedule from a tide-table PDF
    Convert {
        /// Tide-table PDF to read
        input: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print seven days of an existing schedule as JSON
    Week {
        /// Schedule JSON written by `convert`
        schedule: PathBuf,
        /// First day of the window, YYYY-MM-DD (default: today, local time)
        #[arg(short, long)]
        start: Option<chrono::NaiveDate>,
        /// Configuration file (default: tide-table.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Offset of table times from UTC in hours, used to find today
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<i32>,
    },
    /// Print the normalized text of a PDF
    Text {
        /// PDF to read
        input: PathBuf,
    },
}

/// Command-line overrides for fields of [`Config`]
#[derive(Args)]
struct Overrides {
    /// Configuration file (default: tide-table.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output JSON path
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Calendar year of the table
    #[arg(short, long)]
    year: Option<i32>,
    /// Station name written to the output
    #[arg(long)]
    location: Option<String>,
    /// Timezone label written to the output
    #[arg(long)]
    timezone: Option<String>,
    /// Offset of table times from UTC in hours
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,
}

/// Load the given configuration file, or tide-table.toml when none is given
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Config::load().context("loading config"),
    }
}

impl Overrides {
    /// Load the configuration file and apply any flags on top of it
    fn resolve(self) -> anyhow::Result<Config> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(output) = self.output {
            config.schedule.output = output;
        }
        if let Some(year) = self.year {
            config.schedule.year = year;
        }
        if let Some(location) = self.location {
            config.location.name = location;
        }
        if let Some(timezone) = self.timezone {
            config.location.timezone = timezone;
        }
        if let Some(offset) = self.utc_offset {
            config.location.utc_offset_hours = offset;
        }
        Ok(config)
    }
}

/// Main application entry point.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, overrides } => {
            let config = overrides.resolve()?;
            let schedule = schedule::convert(&input, &config)
                .with_context(|| format!("converting {}", input.display()))?;
            println!(
                "Wrote {} days for {} {} to {}",
                schedule.days.len(),
                schedule.location,
                schedule.year,
                config.schedule.output.display()
            );
        }
        Commands::Week {
            schedule: path,
            start,
            config,
            utc_offset,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(offset) = utc_offset {
                config.location.utc_offset_hours = offset;
            }
            let data = schedule::read_schedule(&path)
                .with_context(|| format!("reading schedule {}", path.display()))?;
            let start = match start {
                Some(date) => date,
                None => week::local_date_key(chrono::Utc::now(), config.location.offset()?),
            };
            let view = week::week_window(&data, start, Some(path.as_path()));
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Text { input } => {
            let raw = pdf_text::extract_text(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            print!("{}", normalize::normalize_spaces(Some(&raw)));
        }
    }

    Ok(())
}
