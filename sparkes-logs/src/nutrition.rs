use crate::error::LogError;
use crate::log_record::LogRecord;
use crate::metric::Metric;
use serde::{Deserialize, Serialize};
use sparkes_utils::dates::parse_date;

/// A row of the backend `nutrition_log` table.
///
/// Every numeric column is nullable; a null means the client did not log it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionLog {
    pub id: i64,
    pub client_id: String,
    #[serde(default)]
    pub coach_id: Option<String>,
    /// "YYYY-MM-DD"
    pub log_date: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbohydrate: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
}

impl TryFrom<NutritionLog> for LogRecord {
    type Error = LogError;

    fn try_from(value: NutritionLog) -> Result<Self, Self::Error> {
        let date = parse_date(&value.log_date)
            .map_err(|e| LogError::DateParse(format!("{}: {}", value.log_date, e)))?;
        Ok(LogRecord::new(value.id.to_string(), date)
            .with_value(Metric::Calories, value.calories)
            .with_value(Metric::Protein, value.protein)
            .with_value(Metric::Carbohydrate, value.carbohydrate)
            .with_value(Metric::Fat, value.fat))
    }
}
