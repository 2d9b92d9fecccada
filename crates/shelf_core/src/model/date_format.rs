//! Calendar-date codec for persisted table fields.
//!
//! # Invariants
//! - Dates are always written as `YYYY-MM-DD`, never with a time component.
//! - An unset optional date is written as an empty field.
//! - Reads accept a trailing time component and keep only the calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical on-disk date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Error returned when a field cannot be read as a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseError {
    value: String,
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid date `{}`; expected YYYY-MM-DD", self.value)
    }
}

impl Error for DateParseError {}

/// Parses a calendar date, tolerating a trailing time component.
///
/// # Errors
/// Returns [`DateParseError`] when `value` is neither a date nor a timestamp.
pub fn parse_date(value: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.date_naive());
    }
    Err(DateParseError {
        value: trimmed.to_string(),
    })
}

/// Formats a date the way it is persisted.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(DATE_FORMAT))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(D::Error::custom)
}

/// Same codec for `Option<NaiveDate>`; `None` is an empty field.
pub(crate) mod option {
    use super::{parse_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => {
                parse_date(&raw).map(Some).map_err(D::Error::custom)
            }
            _ => Ok(None),
        }
    }
}
