use crate::error::LogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric field recorded on a daily log.
///
/// Nutrition logs carry calories and the three macros; weight logs carry a
/// single body-weight reading in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Calories,
    Protein,
    Carbohydrate,
    Fat,
    Weight,
}

impl Metric {
    /// Metrics found on a nutrition log, in table column order.
    pub const NUTRITION: [Metric; 4] = [
        Metric::Calories,
        Metric::Carbohydrate,
        Metric::Fat,
        Metric::Protein,
    ];

    /// Backend column name for this metric.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Calories => "calories",
            Metric::Protein => "protein",
            Metric::Carbohydrate => "carbohydrate",
            Metric::Fat => "fat",
            Metric::Weight => "weight",
        }
    }

    /// Display unit.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Calories => "kcal",
            Metric::Protein | Metric::Carbohydrate | Metric::Fat => "g",
            Metric::Weight => "kg",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calories" | "kcal" => Ok(Metric::Calories),
            "protein" => Ok(Metric::Protein),
            "carbohydrate" | "carbs" => Ok(Metric::Carbohydrate),
            "fat" => Ok(Metric::Fat),
            "weight" => Ok(Metric::Weight),
            other => Err(LogError::UnknownMetric(other.to_string())),
        }
    }
}
