//! Input normalization shared by the services and the seeding routine.

use chrono::NaiveDate;

/// Calendar date format accepted on every boundary (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trim and lowercase an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Parse a strict `YYYY-MM-DD` date.
///
/// Single-digit months or days (`2025-1-5`) are rejected.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Store ids start at 1; zero (or anything lower) means "not provided".
pub fn is_missing_id(id: i64) -> bool {
    id <= 0
}
