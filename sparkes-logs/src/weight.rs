use crate::error::LogError;
use crate::log_record::LogRecord;
use crate::metric::Metric;
use serde::{Deserialize, Serialize};
use sparkes_utils::dates::parse_date;

/// A row of the backend `weight_log` table. Weight is in kilograms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightLog {
    #[serde(default)]
    pub id: Option<i64>,
    pub client_id: String,
    /// "YYYY-MM-DD"
    pub log_date: String,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl TryFrom<WeightLog> for LogRecord {
    type Error = LogError;

    fn try_from(value: WeightLog) -> Result<Self, Self::Error> {
        let date = parse_date(&value.log_date)
            .map_err(|e| LogError::DateParse(format!("{}: {}", value.log_date, e)))?;
        // rows without an id are keyed by their date
        let id = match value.id {
            Some(id) => id.to_string(),
            None => value.log_date.trim().to_string(),
        };
        Ok(LogRecord::new(id, date).with_value(Metric::Weight, value.weight))
    }
}
