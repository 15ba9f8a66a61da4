//! Loading of backend log exports.
//!
//! Exports are either a JSON array of table rows (what the backend's REST
//! endpoint returns) or a CSV file with a header row naming the same columns.
//! Rows whose `log_date` cannot be parsed are skipped with a warning.

use crate::error::{LogError, Result};
use crate::log_record::LogRecord;
use crate::nutrition::NutritionLog;
use crate::weight::WeightLog;
use csv::ReaderBuilder;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::str::FromStr;

/// Which backend table an export came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Nutrition,
    Weight,
}

impl FromStr for LogKind {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nutrition" | "nutrition_log" => Ok(LogKind::Nutrition),
            "weight" | "weight_log" => Ok(LogKind::Weight),
            other => Err(LogError::UnknownLogKind(other.to_string())),
        }
    }
}

/// Serialization of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(ExportFormat::Json),
            Some("csv") => Ok(ExportFormat::Csv),
            _ => Err(LogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read an export from disk and convert it into log records.
pub fn load_records(path: &Path, kind: LogKind) -> Result<Vec<LogRecord>> {
    let format = ExportFormat::from_path(path)?;
    let body = std::fs::read_to_string(path)?;
    let records = parse_records(&body, kind, format)?;
    debug!("loaded {} {:?} records from {}", records.len(), kind, path.display());
    Ok(records)
}

/// Parse an export body into log records.
pub fn parse_records(body: &str, kind: LogKind, format: ExportFormat) -> Result<Vec<LogRecord>> {
    match kind {
        LogKind::Nutrition => rows_to_records(parse_rows::<NutritionLog>(body, format)?),
        LogKind::Weight => rows_to_records(parse_rows::<WeightLog>(body, format)?),
    }
}

fn parse_rows<T: DeserializeOwned>(body: &str, format: ExportFormat) -> Result<Vec<T>> {
    match format {
        ExportFormat::Json => {
            if body.trim().is_empty() {
                return Ok(Vec::new());
            }
            Ok(serde_json::from_str(body)?)
        }
        ExportFormat::Csv => {
            let mut rdr = ReaderBuilder::new()
                .has_headers(true)
                .trim(csv::Trim::All)
                .from_reader(body.as_bytes());
            let rows = rdr.deserialize().collect::<std::result::Result<Vec<T>, _>>()?;
            Ok(rows)
        }
    }
}

fn rows_to_records<T>(rows: Vec<T>) -> Result<Vec<LogRecord>>
where
    T: TryInto<LogRecord, Error = LogError>,
{
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row.try_into() {
            Ok(record) => records.push(record),
            Err(LogError::DateParse(msg)) => {
                warn!("skipping log row with bad date: {}", msg);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(records)
}
