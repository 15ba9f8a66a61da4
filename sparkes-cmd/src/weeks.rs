//! `weeks` command: logs grouped by ISO week.

use crate::table::{columns_for, render_weeks};
use crate::InputArgs;
use clap::Args;
use log::info;
use sparkes_data::config::AbsentPolicy;
use sparkes_data::weekly::{group_by_iso_week, WeekBucket, WeekOrder, WeeklyOptions};
use sparkes_logs::log_record::LogRecord;

#[derive(Args, Debug, Clone)]
pub struct WeeksArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// List the oldest week first
    #[arg(long)]
    pub oldest_first: bool,

    /// Average only the days that recorded a metric
    #[arg(long)]
    pub ignore_absent: bool,

    /// Print the buckets as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl WeeksArgs {
    pub fn options(&self) -> WeeklyOptions {
        WeeklyOptions {
            order: if self.oldest_first {
                WeekOrder::OldestFirst
            } else {
                WeekOrder::NewestFirst
            },
            absent: if self.ignore_absent {
                AbsentPolicy::Ignore
            } else {
                AbsentPolicy::AsZero
            },
        }
    }

    pub fn buckets(&self, records: &[LogRecord]) -> Vec<WeekBucket> {
        group_by_iso_week(records, &self.options())
    }
}

pub fn run_weeks(args: &WeeksArgs) -> anyhow::Result<()> {
    let records = args.input.load()?;
    let buckets = args.buckets(&records);
    info!("Grouped {} records into {} weeks", records.len(), buckets.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
    } else {
        print!("{}", render_weeks(&buckets, &columns_for(args.input.kind)));
    }
    Ok(())
}
