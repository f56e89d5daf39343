use chrono::{NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The first day covered by every usage report.
pub const USAGE_START_DATE: &str = "2025-11-08";

/// The range sent to the usage endpoint. Both ends are `%Y-%m-%d` strings.
/// The end is not required to fall after the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageDateRange {
    pub start_date: String,
    pub end_date: String,
}

impl UsageDateRange {
    pub fn new(end_date: String) -> Self {
        Self { start_date: USAGE_START_DATE.to_owned(), end_date }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateInputError {
    #[error("Please enter a date in YYYY-MM-DD format.")]
    Empty,
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidFormat,
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Checks one line of user input. Blank input falls back to `default`;
/// anything else must be a real calendar date and is returned as typed
/// (minus surrounding whitespace).
pub fn validate_date(input: &str, default: Option<&str>) -> Result<String, DateInputError> {
    match input.trim() {
        "" => default.map(str::to_owned).ok_or(DateInputError::Empty),
        date_string => match NaiveDate::parse_from_str(date_string, DATE_FORMAT) {
            Ok(_) => Ok(date_string.to_owned()),
            Err(_) => Err(DateInputError::InvalidFormat),
        },
    }
}
