//! Trend chart pipeline.
//!
//! Turns dated samples into chart geometry in five steps:
//! smoothing, domain selection, padding/rounding, tick generation and
//! coordinate mapping. Everything here is a pure function of its inputs.

use crate::config::{AbsentPolicy, Scale, TrendConfig, Viewport, XScale};
use crate::error::ConfigError;
use crate::path::build_path;
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

/// Fraction of the raw span added above and below the domain.
pub const DOMAIN_PADDING: f64 = 0.05;

/// A dated sample. `None` means nothing was recorded that day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl TrendPoint {
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        TrendPoint { date, value }
    }
}

/// A plotted sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    /// Source date; `None` for the placeholder sample of an empty series
    pub date: Option<NaiveDate>,
    /// Smoothed value in data space
    pub value: f64,
    pub x: f64,
    pub y: f64,
}

/// Everything a renderer needs to draw one trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub points: Vec<ChartPoint>,
    /// Domain before padding and rounding
    pub raw_domain: (f64, f64),
    pub domain: (f64, f64),
    pub ticks: Vec<f64>,
    /// Vertical position of each tick, for gridlines
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
    /// SVG path data through `points`
    pub path: String,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Validate `config`, then run [`transform`].
pub fn transform_checked(
    points: &[TrendPoint],
    config: &TrendConfig,
) -> Result<ChartSeries, ConfigError> {
    config.validate()?;
    Ok(transform(points, config))
}

/// Build the chart series for `points`.
///
/// Input order does not matter; samples are plotted by ascending date and
/// samples sharing a date keep their input order. An empty series (or one
/// emptied by [`AbsentPolicy::Ignore`]) plots a single zero sample at the
/// horizontal centre over the domain `[0, rounding_unit]`.
///
/// `config` is assumed valid; see [`transform_checked`].
pub fn transform(points: &[TrendPoint], config: &TrendConfig) -> ChartSeries {
    let samples = prepare_samples(points, config.absent);
    let unit = config.rounding_unit;

    let (dates, values): (Vec<Option<NaiveDate>>, Vec<f64>) = if samples.is_empty() {
        (vec![None], vec![0.0])
    } else {
        samples.iter().map(|(d, v)| (Some(*d), *v)).unzip()
    };

    let smoothed = smooth_values(&values, config.smooth_radius);
    let (raw_domain, domain) = if samples.is_empty() {
        ((0.0, 0.0), (0.0, unit))
    } else {
        let raw = raw_domain(&smoothed, config);
        (raw, pad_and_round(raw.0, raw.1, unit))
    };

    let ticks = make_ticks(domain.0, domain.1, config.tick_count, config.tick_unit());
    let viewport = config.viewport;
    let y_at = |v: f64| map_y(v, domain, &viewport);
    let xs = map_x(&dates, config);

    let chart_points: Vec<ChartPoint> = dates
        .iter()
        .zip(smoothed.iter())
        .zip(xs.iter())
        .map(|((date, value), x)| ChartPoint {
            date: *date,
            value: *value,
            x: *x,
            y: y_at(*value),
        })
        .collect();

    let coords: Vec<(f64, f64)> = chart_points.iter().map(|p| (p.x, p.y)).collect();
    let path = build_path(&coords, config.curve);
    let tick_positions = ticks.iter().map(|t| y_at(*t)).collect();
    let tick_labels = ticks
        .iter()
        .map(|t| format_tick(*t, config.tick_unit()))
        .collect();

    debug!(
        "trend: {} samples, raw domain {:?}, domain {:?}, {} ticks",
        chart_points.len(),
        raw_domain,
        domain,
        ticks.len()
    );

    ChartSeries {
        points: chart_points,
        raw_domain,
        domain,
        ticks,
        tick_positions,
        tick_labels,
        path,
    }
}

/// Date-sorted `(date, value)` pairs with the absent policy applied.
fn prepare_samples(points: &[TrendPoint], absent: AbsentPolicy) -> Vec<(NaiveDate, f64)> {
    let mut samples: Vec<(NaiveDate, f64)> = points
        .iter()
        .filter_map(|p| match (p.value.filter(|v| v.is_finite()), absent) {
            (Some(v), _) => Some((p.date, v)),
            (None, AbsentPolicy::AsZero) => Some((p.date, 0.0)),
            (None, AbsentPolicy::Ignore) => None,
        })
        .collect();
    samples.sort_by(|a, b| a.0.cmp(&b.0));
    samples
}

/// Centred moving average. Each value becomes the mean of itself and up to
/// `radius` neighbours per side; windows shrink at the ends of the series.
/// A radius of 0 returns the values unchanged.
pub fn smooth_values(values: &[f64], radius: usize) -> Vec<f64> {
    if radius == 0 || values.is_empty() {
        return values.to_vec();
    }
    let n = values.len();
    (0..n)
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = i.saturating_add(radius).min(n - 1);
            window_mean(&values[lo..=hi])
        })
        .collect()
}

/// Mean that stays finite for finite input, even near `f64::MAX`.
fn window_mean(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let sum: f64 = window.iter().sum();
    if sum.is_finite() {
        sum / n
    } else {
        window.iter().map(|v| v / n).sum()
    }
}

/// Linear-interpolated percentile of an ascending slice. `pct` is in
/// `0..=100` (clamped); an empty slice yields 0.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let w = rank - lo as f64;
        sorted[lo] * (1.0 - w) + sorted[hi] * w
    }
}

/// `[P(lower), P(upper)]` of `values` in any order.
pub fn percentile_domain(values: &[f64], lower_pct: f64, upper_pct: f64) -> (f64, f64) {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    (percentile(&sorted, lower_pct), percentile(&sorted, upper_pct))
}

/// Unpadded domain of `values` under the configured scale.
pub fn raw_domain(values: &[f64], config: &TrendConfig) -> (f64, f64) {
    match config.scale {
        Scale::MinMax => {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            if min.is_finite() && max.is_finite() {
                (min, max)
            } else {
                (0.0, 0.0)
            }
        }
        Scale::Percentile => percentile_domain(values, config.lower_pct, config.upper_pct),
    }
}

/// Pad the raw domain by [`DOMAIN_PADDING`] of its span (one `unit` when the
/// span is zero), then widen both ends to multiples of `unit`. The result is
/// never zero-width.
pub fn pad_and_round(raw_min: f64, raw_max: f64, unit: f64) -> (f64, f64) {
    if !raw_min.is_finite() || !raw_max.is_finite() {
        return (0.0, unit);
    }
    let span = raw_max - raw_min;
    let pad = if span == 0.0 {
        unit
    } else if span.is_finite() {
        span * DOMAIN_PADDING
    } else {
        (raw_max / 2.0 - raw_min / 2.0) * (2.0 * DOMAIN_PADDING)
    };
    let padded_min = (raw_min - pad).max(f64::MIN);
    let padded_max = (raw_max + pad).min(f64::MAX);
    let lower = ((padded_min / unit).floor() * unit).clamp(f64::MIN, padded_min) + 0.0;
    let mut upper = ((padded_max / unit).ceil() * unit).clamp(padded_max, f64::MAX) + 0.0;
    if upper <= lower {
        upper = lower + unit;
    }
    if upper <= lower {
        // unit is below the precision of values this large
        upper = lower + lower.abs() * f64::EPSILON;
    }
    (lower, upper)
}

/// Snap `v` to the nearest multiple of `unit`.
pub fn round_to(v: f64, unit: f64) -> f64 {
    (v / unit).round() * unit + 0.0
}

/// `tick_count + 1` evenly spaced values across the domain, snapped to
/// `unit`, deduplicated and ascending. Snapping may merge neighbours, so
/// fewer values than requested can come back.
pub fn make_ticks(lower: f64, upper: f64, tick_count: usize, unit: f64) -> Vec<f64> {
    let n = tick_count.max(1) as f64;
    let span = upper - lower;
    let at = |i: usize| {
        if span.is_finite() {
            lower + span / n * i as f64
        } else {
            let f = i as f64 / n;
            lower * (1.0 - f) + upper * f
        }
    };
    let mut ticks: Vec<f64> = (0..=tick_count)
        .map(|i| round_to(at(i), unit))
        .filter(|t| t.is_finite())
        .collect();
    ticks.sort_by(f64::total_cmp);
    ticks.dedup();
    ticks
}

/// Tick label text: whole numbers for units of 1 and above, otherwise up to
/// two decimals.
pub fn format_tick(value: f64, unit: f64) -> String {
    if unit >= 1.0 {
        format!("{}", value.round() + 0.0)
    } else {
        format!("{}", (value * 100.0).round() / 100.0 + 0.0)
    }
}

fn map_x(dates: &[Option<NaiveDate>], config: &TrendConfig) -> Vec<f64> {
    let viewport = &config.viewport;
    let chart_w = viewport.chart_width();
    let centre = viewport.padding_h + chart_w / 2.0;
    let n = dates.len();

    match config.x_scale {
        XScale::Categorical => (0..n)
            .map(|i| {
                if n <= 1 {
                    centre
                } else {
                    viewport.padding_h + chart_w * i as f64 / (n - 1) as f64
                }
            })
            .collect(),
        XScale::Time => {
            let first = dates.iter().flatten().min().copied();
            let last = dates.iter().flatten().max().copied();
            let span = match (first, last) {
                (Some(first), Some(last)) => (last - first).num_days(),
                _ => 0,
            };
            dates
                .iter()
                .map(|date| match (date, first) {
                    (Some(date), Some(first)) if span > 0 => {
                        let offset = (*date - first).num_days() as f64;
                        viewport.padding_h + chart_w * offset / span as f64
                    }
                    _ => centre,
                })
                .collect()
        }
    }
}

/// Value → vertical coordinate, higher values nearer the top. Values outside
/// the domain are clamped to it.
fn map_y(value: f64, domain: (f64, f64), viewport: &Viewport) -> f64 {
    let chart_h = viewport.chart_height();
    let (lower, upper) = domain;
    if upper <= lower {
        return viewport.padding_v + chart_h / 2.0;
    }
    let clamped = value.clamp(lower, upper);
    // halves keep the span finite for domains wider than f64::MAX
    let t = (clamped / 2.0 - lower / 2.0) / (upper / 2.0 - lower / 2.0);
    viewport.padding_v + (1.0 - t) * chart_h
}
