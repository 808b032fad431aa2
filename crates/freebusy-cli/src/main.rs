//! `freebusy` CLI — normalize participant availability from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Normalize a query document (stdin → stdout)
//! cat query.json | freebusy normalize
//!
//! # From file to file
//! freebusy normalize -i query.json -o timeline.json
//!
//! # Status at a single instant
//! freebusy status -i query.json --at 2026-03-16T09:30:00Z
//!
//! # Free slots, or the first one of at least 45 minutes
//! freebusy free -i query.json
//! freebusy free -i query.json --min-minutes 45
//! ```
//!
//! Invalid interval records are skipped with a warning on stderr. Set
//! `RUST_LOG=debug` for more detail.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use freebusy_engine::{BusyStatus, ParticipantTimeline, RawInterval};
use serde::Deserialize;
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "freebusy",
    version,
    about = "Free/busy availability normalizer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a query document into a canonical timeline
    Normalize {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print the busy status at a single instant
    Status {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Instant to look up (RFC 3339, or naive datetime interpreted as UTC)
        #[arg(long)]
        at: String,
    },
    /// List free slots inside the query window
    Free {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only print the first slot at least this long
        #[arg(long)]
        min_minutes: Option<i64>,
    },
}

/// A single participant's availability query as providers deliver it.
#[derive(Deserialize)]
struct QueryDocument {
    participant: String,
    from: DateTime<Utc>,
    until: DateTime<Utc>,
    #[serde(default)]
    intervals: Vec<RawInterval>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Normalize { input, output } => {
            let timeline = load_timeline(input.as_deref())?;
            let json = serde_json::to_string_pretty(&timeline)
                .context("Failed to serialize timeline")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Status { input, at } => {
            let instant = parse_instant(&at)?;
            let timeline = load_timeline(input.as_deref())?;
            if !timeline.window().contains(instant) {
                tracing::warn!(at = %instant, "instant lies outside the query window");
            }
            let status = timeline.status_at(instant).unwrap_or(BusyStatus::Free);
            println!("{}", status);
        }
        Commands::Free { input, min_minutes } => {
            let timeline = load_timeline(input.as_deref())?;
            let json = match min_minutes {
                Some(min) => {
                    let slot = freebusy_engine::first_free_slot(
                        timeline.window(),
                        timeline.intervals(),
                        min,
                    );
                    serde_json::to_string_pretty(&slot)?
                }
                None => serde_json::to_string_pretty(&timeline.free_slots())?,
            };
            println!("{}", json);
        }
    }

    Ok(())
}

/// Read a query document, ingest its records and normalize.
fn load_timeline(path: Option<&str>) -> Result<ParticipantTimeline> {
    let raw = read_input(path)?;
    let doc: QueryDocument =
        serde_json::from_str(&raw).context("Failed to parse query document")?;

    let mut timeline = ParticipantTimeline::new(doc.participant, doc.from, doc.until)
        .context("Invalid query window")?;
    let report = timeline.ingest(doc.intervals);
    if !report.rejected.is_empty() {
        tracing::warn!(
            skipped = report.rejected.len(),
            "skipped {} invalid interval record(s)",
            report.rejected.len()
        );
    }
    timeline.normalize();
    Ok(timeline)
}

/// Parse an instant given on the command line.
///
/// Accepts RFC 3339 (e.g., "2026-03-16T09:30:00Z") and naive local time
/// (e.g., "2026-03-16T09:30:00"), which is interpreted as UTC.
fn parse_instant(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|ndt| ndt.and_utc())
        .with_context(|| format!("Invalid instant: '{}'", s))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
