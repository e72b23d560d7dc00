use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Rendering used when a goal date cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parses a goal date string into a naive (UTC-normalized) date-time.
///
/// Accepted forms, tried in order: RFC 3339 with offset, ISO date-time without
/// offset, and plain calendar dates (`2023-01-10`, `01/10/2023`). Surrounding
/// whitespace is ignored. Returns `None` for anything else, including the
/// empty string.
pub fn parse_goal_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Formats a goal date as `Tue Jan 10 2023`, or [`INVALID_DATE`].
pub fn goal_date_string(value: &str) -> String {
    match parse_goal_date(value) {
        Some(dt) => dt.format("%a %b %d %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}
