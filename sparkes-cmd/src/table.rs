//! Plain-text rendering of weekly tables.

use sparkes_data::weekly::WeekBucket;
use sparkes_logs::metric::Metric;
use sparkes_logs::source::LogKind;
use sparkes_utils::dates::weekday_short;

const DAY_WIDTH: usize = 8;
const VALUE_WIDTH: usize = 14;

/// Columns shown for an export kind.
pub fn columns_for(kind: LogKind) -> Vec<Metric> {
    match kind {
        LogKind::Nutrition => Metric::NUTRITION.to_vec(),
        LogKind::Weight => vec![Metric::Weight],
    }
}

pub fn column_header(metric: Metric) -> String {
    match metric {
        Metric::Calories => "Calories".to_string(),
        Metric::Carbohydrate => format!("Carbs ({})", metric.unit()),
        Metric::Fat => format!("Fat ({})", metric.unit()),
        Metric::Protein => format!("Protein ({})", metric.unit()),
        Metric::Weight => format!("Weight ({})", metric.unit()),
    }
}

/// Calories as whole numbers, everything else to one decimal, "-" if absent.
pub fn format_value(metric: Metric, value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if metric == Metric::Calories => format!("{}", v.round() as i64),
        Some(v) => format!("{:.1}", v),
    }
}

fn row(label: &str, cells: impl Iterator<Item = String>) -> String {
    let mut line = format!("{:<width$}", label, width = DAY_WIDTH);
    for cell in cells {
        line.push_str(&format!("{:>width$}", cell, width = VALUE_WIDTH));
    }
    line.trim_end().to_string()
}

/// One section per week: title, a row per day, then the average row.
pub fn render_weeks(buckets: &[WeekBucket], columns: &[Metric]) -> String {
    if buckets.is_empty() {
        return "No logs yet.\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&row("Day", columns.iter().map(|m| column_header(*m))));
    out.push('\n');
    for bucket in buckets {
        out.push('\n');
        out.push_str(&bucket.title());
        out.push('\n');
        for record in &bucket.records {
            let cells = columns.iter().map(|m| format_value(*m, record.value(*m)));
            out.push_str(&row(&weekday_short(&record.date), cells));
            out.push('\n');
        }
        let cells = columns.iter().map(|m| format_value(*m, bucket.average(*m)));
        out.push_str(&row(&format!("Avg ({})", bucket.count()), cells));
        out.push('\n');
    }
    out
}
