// Text parsing for shells
//
// Every function here is pure: raw user text in, typed value out. Blank input
// maps to `None` so a shell can treat it as "keep current" or "use default".

use crate::task::{Priority, Status, UnknownVariant};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Date(String),

    #[error("Invalid id '{0}'")]
    Id(String),

    #[error(transparent)]
    Variant(#[from] UnknownVariant),
}

/// Trimmed text, or `None` when the input is blank.
pub fn non_blank(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

/// Parse an ISO `YYYY-MM-DD` date. Blank input yields `Ok(None)`.
pub fn parse_date(input: &str) -> Result<Option<NaiveDate>, ParseError> {
    let Some(text) = non_blank(input) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ParseError::Date(text))
}

pub fn parse_priority(input: &str) -> Result<Option<Priority>, ParseError> {
    match non_blank(input) {
        None => Ok(None),
        Some(text) => Ok(Some(text.parse::<Priority>()?)),
    }
}

pub fn parse_status(input: &str) -> Result<Option<Status>, ParseError> {
    match non_blank(input) {
        None => Ok(None),
        Some(text) => Ok(Some(text.parse::<Status>()?)),
    }
}

pub fn parse_id(input: &str) -> Result<u64, ParseError> {
    let trimmed = input.trim();
    trimmed.parse().map_err(|_| ParseError::Id(trimmed.to_string()))
}

/// Required date, for use as a clap value parser.
pub fn required_date(input: &str) -> Result<NaiveDate, ParseError> {
    parse_date(input)?.ok_or_else(|| ParseError::Date(input.to_string()))
}
