//! Date helpers for the `YYYY-MM-DD` ledger format.

use chrono::NaiveDate;

use crate::error::RecordError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string into a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, RecordError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|source| RecordError::InvalidDate {
        raw: s.to_string(),
        source,
    })
}
