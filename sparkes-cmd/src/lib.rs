//! Command implementations for the Sparkes CLI.
//!
//! Every command reads an export of already-fetched backend rows (JSON array
//! or CSV) and prints derived chart or table data. Nothing here talks to the
//! backend.

use clap::{Args, Subcommand};
use sparkes_logs::log_record::LogRecord;
use sparkes_logs::query::{LogQuery, DEFAULT_LOG_LIMIT};
use sparkes_logs::source::{load_records, LogKind};
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use log::info;

pub mod average;
pub mod table;
pub mod trend;
pub mod weeks;

/// Where the log rows come from and which of them to use.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to a JSON or CSV export of log rows
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Table the export came from: nutrition or weight
    #[arg(short = 'k', long, default_value = "nutrition")]
    pub kind: LogKind,

    /// Earliest log date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest log date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Maximum number of (newest) rows to use
    #[arg(long, default_value_t = DEFAULT_LOG_LIMIT)]
    pub limit: usize,
}

impl InputArgs {
    pub fn query(&self) -> LogQuery {
        LogQuery {
            from: self.from,
            to: self.to,
            limit: Some(self.limit),
        }
    }

    /// Load the export and apply the query; records come back newest first.
    pub fn load(&self) -> anyhow::Result<Vec<LogRecord>> {
        let records = load_records(&self.input, self.kind)
            .with_context(|| format!("failed to load {}", self.input.display()))?;
        let selected = self.query().apply(&records);
        info!(
            "Using {} of {} records from {}",
            selected.len(),
            records.len(),
            self.input.display()
        );
        Ok(selected)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute trend chart geometry for one metric and print it as JSON
    Trend(trend::TrendArgs),

    /// Print logs grouped by ISO week with weekly averages
    Weeks(weeks::WeeksArgs),

    /// Print the rolling average of the newest days
    Average(average::AverageArgs),
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Trend(args) => trend::run_trend(&args),
        Command::Weeks(args) => weeks::run_weeks(&args),
        Command::Average(args) => average::run_average(&args),
    }
}
