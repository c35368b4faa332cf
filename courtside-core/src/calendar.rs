use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::New_York;

use crate::CourtsideError;

/// League calendar date (US Eastern) of an instant.
///
/// Tip-off times are published in UTC; a 7:30 pm ET game on January 15 is
/// already January 16 in UTC, so grouping by UTC date would split slates.
#[must_use]
pub fn eastern_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&New_York).date_naive()
}

/// Parse a `YYYY-MM-DD` request date.
///
/// # Errors
/// Returns `InvalidArg` when the input is not a valid calendar date in that format.
pub fn parse_date(input: &str) -> Result<NaiveDate, CourtsideError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|e| {
        CourtsideError::InvalidArg(format!("date '{input}' is not YYYY-MM-DD: {e}"))
    })
}
