//! Small formatting and parsing helpers shared by handlers and storage.
use chrono::{Local, NaiveDateTime};

/// Timestamp format used for stored records
pub const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format `datetime`, or the current local time when absent
pub fn format_timestamp(datetime: Option<NaiveDateTime>, format: &str) -> String {
    let datetime = datetime.unwrap_or_else(|| Local::now().naive_local());
    datetime.format(format).to_string()
}

/// `true` iff every item parses as an integer
pub fn all_integers<S: AsRef<str>>(items: &[S]) -> bool {
    items.iter().all(|item| item.as_ref().trim().parse::<i64>().is_ok())
}
