//! Chart and aggregation configuration.
//!
//! Every knob of the trend pipeline lives in [`TrendConfig`], with the
//! defaults tuned for daily calorie charts. Configurations coming from
//! outside the process should go through [`TrendConfig::validate`] or
//! [`TrendConfigBuilder::build`] before use.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default lower percentile for percentile-scaled charts.
pub const DEFAULT_LOWER_PCT: f64 = 15.0;
/// Default upper percentile for percentile-scaled charts.
pub const DEFAULT_UPPER_PCT: f64 = 85.0;
/// Default moving-average radius.
pub const DEFAULT_SMOOTH_RADIUS: usize = 2;
/// Default number of gridline intervals.
pub const DEFAULT_TICK_COUNT: usize = 4;
/// Default rounding unit, suited to kcal.
pub const DEFAULT_ROUNDING_UNIT: f64 = 100.0;

/// How the Y domain is chosen from the smoothed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scale {
    /// Clip to `[P(lower_pct), P(upper_pct)]` so outliers don't flatten the line
    #[serde(rename = "percentile")]
    Percentile,
    #[serde(rename = "minmax")]
    MinMax,
}

/// What to do with a value that was never recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsentPolicy {
    /// Count it as zero
    #[default]
    AsZero,
    /// Leave it out of the series or average
    Ignore,
}

/// How samples are spread along the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XScale {
    /// Evenly spaced by position
    #[default]
    Categorical,
    /// Spaced by calendar distance between dates
    Time,
}

/// Segment shape between plotted points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    #[default]
    Linear,
    /// Monotone cubic in x; never overshoots the data
    MonotoneX,
}

/// Plot space the series is mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding_h: f64,
    pub padding_v: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: 320.0,
            height: 120.0,
            padding_h: 8.0,
            padding_v: 8.0,
        }
    }
}

impl Viewport {
    /// The unit square with no padding.
    pub fn unit() -> Self {
        Viewport {
            width: 1.0,
            height: 1.0,
            padding_h: 0.0,
            padding_v: 0.0,
        }
    }

    pub fn chart_width(&self) -> f64 {
        self.width - self.padding_h * 2.0
    }

    pub fn chart_height(&self) -> f64 {
        self.height - self.padding_v * 2.0
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = [self.width, self.height, self.padding_h, self.padding_v];
        if dims.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return Err(ConfigError::InvalidViewport(format!(
                "dimensions must be finite and non-negative: {:?}",
                self
            )));
        }
        if self.chart_width() <= 0.0 || self.chart_height() <= 0.0 {
            return Err(ConfigError::InvalidViewport(format!(
                "padding leaves no plot area: {}x{} with padding {}/{}",
                self.width, self.height, self.padding_h, self.padding_v
            )));
        }
        Ok(())
    }
}

/// Full configuration of a trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub scale: Scale,
    pub lower_pct: f64,
    pub upper_pct: f64,
    pub smooth_radius: usize,
    pub tick_count: usize,
    /// Domain bounds snap to multiples of this
    pub rounding_unit: f64,
    /// Tick values snap to multiples of this; falls back to `rounding_unit`
    pub tick_rounding_unit: Option<f64>,
    pub absent: AbsentPolicy,
    pub x_scale: XScale,
    pub curve: Curve,
    pub viewport: Viewport,
}

impl Default for TrendConfig {
    fn default() -> Self {
        TrendConfig {
            scale: Scale::Percentile,
            lower_pct: DEFAULT_LOWER_PCT,
            upper_pct: DEFAULT_UPPER_PCT,
            smooth_radius: DEFAULT_SMOOTH_RADIUS,
            tick_count: DEFAULT_TICK_COUNT,
            rounding_unit: DEFAULT_ROUNDING_UNIT,
            tick_rounding_unit: None,
            absent: AbsentPolicy::AsZero,
            x_scale: XScale::Categorical,
            curve: Curve::Linear,
            viewport: Viewport::default(),
        }
    }
}

impl TrendConfig {
    pub fn builder() -> TrendConfigBuilder {
        TrendConfigBuilder::default()
    }

    pub fn tick_unit(&self) -> f64 {
        self.tick_rounding_unit.unwrap_or(self.rounding_unit)
    }

    /// Check the caller contract: ordered percentiles in `0..=100` (only when
    /// percentile scaling is selected), positive finite rounding units and a
    /// usable viewport.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale == Scale::Percentile {
            let (lower, upper) = (self.lower_pct, self.upper_pct);
            let in_range = |p: f64| (0.0..=100.0).contains(&p);
            if !in_range(lower) || !in_range(upper) || lower >= upper {
                return Err(ConfigError::InvalidPercentiles { lower, upper });
            }
        }
        for unit in [Some(self.rounding_unit), self.tick_rounding_unit]
            .into_iter()
            .flatten()
        {
            if !unit.is_finite() || unit <= 0.0 {
                return Err(ConfigError::InvalidRoundingUnit(unit));
            }
        }
        self.viewport.validate()
    }
}

/// Builds a [`TrendConfig`] starting from the defaults.
#[derive(Debug, Clone, Default)]
pub struct TrendConfigBuilder {
    config: TrendConfig,
}

impl TrendConfigBuilder {
    pub fn from_config(config: TrendConfig) -> Self {
        TrendConfigBuilder { config }
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.config.scale = scale;
        self
    }

    pub fn percentiles(mut self, lower: f64, upper: f64) -> Self {
        self.config.lower_pct = lower;
        self.config.upper_pct = upper;
        self
    }

    pub fn smooth_radius(mut self, radius: usize) -> Self {
        self.config.smooth_radius = radius;
        self
    }

    pub fn tick_count(mut self, count: usize) -> Self {
        self.config.tick_count = count;
        self
    }

    pub fn rounding_unit(mut self, unit: f64) -> Self {
        self.config.rounding_unit = unit;
        self
    }

    pub fn tick_rounding_unit(mut self, unit: f64) -> Self {
        self.config.tick_rounding_unit = Some(unit);
        self
    }

    pub fn absent(mut self, policy: AbsentPolicy) -> Self {
        self.config.absent = policy;
        self
    }

    pub fn x_scale(mut self, x_scale: XScale) -> Self {
        self.config.x_scale = x_scale;
        self
    }

    pub fn curve(mut self, curve: Curve) -> Self {
        self.config.curve = curve;
        self
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.config.viewport = viewport;
        self
    }

    pub fn build(self) -> Result<TrendConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
