pub mod date_range;
pub mod error;
pub mod log_record;
pub mod metric;
pub mod nutrition;
pub mod query;
pub mod source;
pub mod weight;
