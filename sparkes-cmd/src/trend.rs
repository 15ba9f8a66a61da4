//! `trend` command: chart geometry for one metric.

use crate::InputArgs;
use anyhow::Context;
use clap::{Args, ValueEnum};
use log::info;
use sparkes_data::config::{AbsentPolicy, Curve, Scale, TrendConfig, TrendConfigBuilder, XScale};
use sparkes_data::trend::{transform, ChartSeries};
use sparkes_data::window::{metric_config, trend_points, window_points, ChartWindow};
use sparkes_logs::log_record::LogRecord;
use sparkes_logs::metric::Metric;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScaleArg {
    Percentile,
    Minmax,
}

impl From<ScaleArg> for Scale {
    fn from(value: ScaleArg) -> Self {
        match value {
            ScaleArg::Percentile => Scale::Percentile,
            ScaleArg::Minmax => Scale::MinMax,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CurveArg {
    Linear,
    Monotone,
}

impl From<CurveArg> for Curve {
    fn from(value: CurveArg) -> Self {
        match value {
            CurveArg::Linear => Curve::Linear,
            CurveArg::Monotone => Curve::MonotoneX,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TrendArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Metric to chart (calories, protein, carbohydrate, fat, weight)
    #[arg(short = 'm', long, default_value = "calories")]
    pub metric: Metric,

    /// Chart the newest 7, 30 or 90 days with that window's preset
    #[arg(short = 'w', long)]
    pub window: Option<usize>,

    /// JSON file with a base chart configuration
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub scale: Option<ScaleArg>,

    #[arg(long)]
    pub lower_pct: Option<f64>,

    #[arg(long)]
    pub upper_pct: Option<f64>,

    /// Moving-average radius (0 disables smoothing)
    #[arg(long)]
    pub smooth: Option<usize>,

    /// Number of gridline intervals
    #[arg(long)]
    pub ticks: Option<usize>,

    /// Unit the domain snaps to (e.g. 100 for kcal, 1 for kg)
    #[arg(long)]
    pub round: Option<f64>,

    /// Unit tick values snap to; defaults to --round
    #[arg(long)]
    pub tick_round: Option<f64>,

    #[arg(long, value_enum)]
    pub curve: Option<CurveArg>,

    /// Space points by date instead of evenly
    #[arg(long)]
    pub time_scale: bool,

    /// Drop unrecorded days instead of plotting them as zero
    #[arg(long)]
    pub ignore_absent: bool,

    /// Write the JSON here instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl TrendArgs {
    pub fn chart_window(&self) -> anyhow::Result<Option<ChartWindow>> {
        match self.window {
            None => Ok(None),
            Some(days) => ChartWindow::from_days(days)
                .map(Some)
                .with_context(|| format!("unsupported window of {} days (use 7, 30 or 90)", days)),
        }
    }

    /// Layer the configuration: metric defaults (or the config file), then
    /// the window preset, then explicit flags. The result is validated.
    pub fn build_config(&self, base: Option<TrendConfig>) -> anyhow::Result<TrendConfig> {
        let mut config = base.unwrap_or_else(|| metric_config(self.metric));
        if let Some(window) = self.chart_window()? {
            config = window.apply(config);
        }
        let mut builder = TrendConfigBuilder::from_config(config);
        if let Some(scale) = self.scale {
            builder = builder.scale(scale.into());
        }
        if self.lower_pct.is_some() || self.upper_pct.is_some() {
            builder = builder.percentiles(
                self.lower_pct.unwrap_or(config.lower_pct),
                self.upper_pct.unwrap_or(config.upper_pct),
            );
        }
        if let Some(radius) = self.smooth {
            builder = builder.smooth_radius(radius);
        }
        if let Some(count) = self.ticks {
            builder = builder.tick_count(count);
        }
        if let Some(unit) = self.round {
            builder = builder.rounding_unit(unit);
        }
        if let Some(unit) = self.tick_round {
            builder = builder.tick_rounding_unit(unit);
        }
        if let Some(curve) = self.curve {
            builder = builder.curve(curve.into());
        }
        if self.time_scale {
            builder = builder.x_scale(XScale::Time);
        }
        if self.ignore_absent {
            builder = builder.absent(AbsentPolicy::Ignore);
        }
        builder.build().context("invalid chart configuration")
    }

    /// Chart `records` (any order) with `config`.
    pub fn chart(
        &self,
        records: &[LogRecord],
        config: &TrendConfig,
    ) -> anyhow::Result<ChartSeries> {
        let points = match self.chart_window()? {
            Some(window) => window_points(records, self.metric, window),
            None => trend_points(records, self.metric),
        };
        Ok(transform(&points, config))
    }
}

fn read_config(path: &Path) -> anyhow::Result<TrendConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&body).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn run_trend(args: &TrendArgs) -> anyhow::Result<()> {
    let base = args.config.as_deref().map(read_config).transpose()?;
    let config = args.build_config(base)?;
    let records = args.input.load()?;
    let series = args.chart(&records, &config)?;
    info!(
        "Charted {} points of {} with domain {:?}",
        series.len(),
        args.metric,
        series.domain
    );

    let json = serde_json::to_string_pretty(&series)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Chart written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::Parser;
    use sparkes_logs::date_range::DateRange;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: TrendArgs,
    }

    fn parse(argv: &[&str]) -> TrendArgs {
        let mut full = vec!["trend", "--input", "logs.json"];
        full.extend_from_slice(argv);
        TestCli::try_parse_from(full).unwrap().args
    }

    #[test]
    fn test_metric_defaults() {
        let args = parse(&["--metric", "weight"]);
        let config = args.build_config(None).unwrap();
        assert_eq!(config.rounding_unit, 1.0);
        assert_eq!(config.scale, Scale::Percentile);
    }

    #[test]
    fn test_window_then_flags() {
        let args = parse(&["--window", "90", "--smooth", "0", "--curve", "monotone"]);
        let config = args.build_config(None).unwrap();
        assert_eq!(config.scale, Scale::MinMax);
        assert_eq!(config.tick_count, 5);
        assert_eq!(config.smooth_radius, 0);
        assert_eq!(config.curve, Curve::MonotoneX);
        assert_eq!(config.rounding_unit, 100.0);
    }

    #[test]
    fn test_config_file_base() {
        let args = parse(&["--ticks", "2"]);
        let base: TrendConfig =
            serde_json::from_str(r#"{"scale": "minmax", "rounding_unit": 5}"#).unwrap();
        let config = args.build_config(Some(base)).unwrap();
        assert_eq!(config.scale, Scale::MinMax);
        assert_eq!(config.rounding_unit, 5.0);
        assert_eq!(config.tick_count, 2);
    }

    #[test]
    fn test_read_config_from_file() {
        let path = std::env::temp_dir().join("sparkes-trend-config-test.json");
        std::fs::write(&path, r#"{"tick_count": 3, "curve": "monotone_x"}"#).unwrap();
        let config = read_config(path.as_path()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.tick_count, 3);
        assert_eq!(config.curve, Curve::MonotoneX);
        assert!(read_config(Path::new("/nonexistent/sparkes.json")).is_err());
    }

    #[test]
    fn test_invalid_flags_fail_fast() {
        let args = parse(&["--lower-pct", "90", "--upper-pct", "10"]);
        assert!(args.build_config(None).is_err());
        let args = parse(&["--round=-100"]);
        assert!(args.build_config(None).is_err());
        let args = parse(&["--window", "14"]);
        assert!(args.build_config(None).is_err());
    }

    #[test]
    fn test_chart_week_window() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let records: Vec<LogRecord> = DateRange(start, end)
            .map(|d| LogRecord::new(d.to_string(), d).with_value(Metric::Calories, Some(2000.0)))
            .collect();
        let args = parse(&["--window", "7"]);
        let config = args.build_config(None).unwrap();
        let series = args.chart(&records, &config).unwrap();
        assert_eq!(series.len(), 7);
        assert_eq!(series.domain, (1900.0, 2100.0));
        assert_eq!(
            series.points[0].date,
            NaiveDate::from_ymd_opt(2024, 5, 25)
        );
    }
}
