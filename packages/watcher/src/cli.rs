//! Command-line interface for the watcher.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Months, NaiveDate};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{madrid_today, parse_iso_date, WatcherConfig, DEFAULT_CSV_FILE, DEFAULT_DB_FILE};
use crate::error::Result;
use crate::export::export_csv;
use crate::store::EventStore;
use crate::watcher::{date_range, Watcher};

/// SOCIMI BORME Watcher - Detect SOCIMI regime adoptions in the companies gazette.
#[derive(Parser)]
#[command(name = "socimi-watcher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process the trailing 12-month window ending today.
    Run {
        /// SQLite database file (default: socimi_borme.db)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Process every date from a start date through today.
    Backfill {
        /// Start date in YYYY-MM-DD format
        #[arg(long = "from")]
        from: String,

        /// SQLite database file (default: socimi_borme.db)
        #[arg(long)]
        db: Option<PathBuf>,
    },

    /// Export the event store to CSV.
    Export {
        /// SQLite database file (default: socimi_borme.db)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Output file (default: socimi_borme.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { db } => {
            let today = madrid_today();
            let start = today.checked_sub_months(Months::new(12)).unwrap_or(today);
            window_command(db.as_deref(), start, today)
        }
        Commands::Backfill { from, db } => {
            let start = parse_iso_date(&from)?;
            window_command(db.as_deref(), start, madrid_today())
        }
        Commands::Export { db, output } => export_command(db.as_deref(), output.as_deref()),
    }
}

/// Process an inclusive date window against the store.
fn window_command(db: Option<&Path>, start: NaiveDate, end: NaiveDate) -> Result<()> {
    let db_path = db.unwrap_or(Path::new(DEFAULT_DB_FILE));
    let store = EventStore::open(db_path)?;
    let watcher = Watcher::new(store, WatcherConfig::default())?;

    let total_days = date_range(start, end).count();
    println!(
        "{} {} dates: {} → {}",
        style("Processing").bold(),
        total_days,
        style(start).cyan(),
        style(end).cyan()
    );

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Scanning gazette dates...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let report = watcher.process_range(start, end);

    pb.finish_and_clear();

    println!();
    println!(
        "{} {}",
        style("New events:").green().bold(),
        report.new_events
    );
    if !report.failures.is_empty() {
        println!(
            "{} {}",
            style("Failed dates:").yellow().bold(),
            report.failures.len()
        );
        for (date, error) in &report.failures {
            println!("  {date}: {error}");
        }
    }

    Ok(())
}

/// Write the store out as CSV.
fn export_command(db: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let db_path = db.unwrap_or(Path::new(DEFAULT_DB_FILE));
    let out_path = output.unwrap_or(Path::new(DEFAULT_CSV_FILE));

    let store = EventStore::open(db_path)?;
    let rows = export_csv(&store, out_path)?;

    println!(
        "{} {} rows to {}",
        style("Exported").green().bold(),
        rows,
        out_path.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["socimi-watcher", "run"]);
        let Commands::Run { db } = cli.command else {
            panic!("expected run command");
        };
        assert!(db.is_none());
    }

    #[test]
    fn test_cli_parse_backfill_with_from() {
        let cli = Cli::parse_from(["socimi-watcher", "backfill", "--from", "2024-01-01"]);
        let Commands::Backfill { from, db } = cli.command else {
            panic!("expected backfill command");
        };
        assert_eq!(from, "2024-01-01");
        assert!(db.is_none());
    }

    #[test]
    fn test_cli_parse_export_with_paths() {
        let cli = Cli::parse_from([
            "socimi-watcher",
            "export",
            "--db",
            "events.db",
            "--output",
            "events.csv",
        ]);
        let Commands::Export { db, output } = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(db.unwrap(), PathBuf::from("events.db"));
        assert_eq!(output.unwrap(), PathBuf::from("events.csv"));
    }

    #[test]
    fn test_backfill_requires_from() {
        assert!(Cli::try_parse_from(["socimi-watcher", "backfill"]).is_err());
    }
}
