//! `average` command: rolling average of the newest days.

use crate::InputArgs;
use clap::Args;
use log::{info, warn};
use serde::Serialize;
use sparkes_data::average::{rolling_average, NutritionSummary, ROLLING_WINDOW_DAYS};
use sparkes_data::config::AbsentPolicy;
use sparkes_logs::log_record::LogRecord;
use sparkes_logs::metric::Metric;
use sparkes_logs::source::LogKind;

#[derive(Args, Debug, Clone)]
pub struct AverageArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of newest records to average
    #[arg(short = 'd', long, default_value_t = ROLLING_WINDOW_DAYS)]
    pub days: usize,

    /// Average only the days that recorded a metric
    #[arg(long)]
    pub ignore_absent: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AverageReport {
    Nutrition(NutritionSummary),
    Weight { weight: String, count: usize },
}

impl std::fmt::Display for AverageReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AverageReport::Nutrition(s) => write!(
                f,
                "{} kcal | carbs {} g | fat {} g | protein {} g ({} days)",
                s.calories, s.carbs, s.fat, s.protein, s.count
            ),
            AverageReport::Weight { weight, count } => {
                write!(f, "{} kg ({} days)", weight, count)
            }
        }
    }
}

impl AverageArgs {
    fn absent(&self) -> AbsentPolicy {
        if self.ignore_absent {
            AbsentPolicy::Ignore
        } else {
            AbsentPolicy::AsZero
        }
    }

    /// `None` when there is nothing to average.
    pub fn report(&self, records: &[LogRecord]) -> Option<AverageReport> {
        let averages = rolling_average(records, self.days, self.absent())?;
        let count = records.len().min(self.days);
        match self.input.kind {
            LogKind::Nutrition => Some(AverageReport::Nutrition(NutritionSummary::from_averages(
                &averages, count,
            ))),
            LogKind::Weight => {
                let kg = averages.get(&Metric::Weight).copied().flatten()?;
                Some(AverageReport::Weight {
                    weight: format!("{:.1}", kg),
                    count,
                })
            }
        }
    }
}

pub fn run_average(args: &AverageArgs) -> anyhow::Result<()> {
    let records = args.input.load()?;
    let Some(report) = args.report(&records) else {
        warn!("No records to average in {}", args.input.input.display());
        println!("No logs yet.");
        return Ok(());
    };
    info!("Averaged the newest {} of {} records", args.days, records.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
