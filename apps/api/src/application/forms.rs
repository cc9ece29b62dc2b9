//! Helpers shared by the form DTOs.
//!
//! Browsers submit untouched inputs as empty strings, so blank and
//! whitespace-only values count as missing everywhere.

use chrono::NaiveDate;

use crate::domain::shared::errors::DomainError;

pub fn filled(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn required(value: &Option<String>, message: &str) -> Result<String, DomainError> {
    filled(value).ok_or_else(|| DomainError::validation(message))
}

/// Parses an ISO `YYYY-MM-DD` date; `label` names the field in the error.
pub fn parse_date(value: &str, label: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| DomainError::validation(format!("{} must be a date (YYYY-MM-DD).", label)))
}

pub fn required_date(
    value: &Option<String>,
    message: &str,
    label: &str,
) -> Result<NaiveDate, DomainError> {
    let raw = required(value, message)?;
    parse_date(&raw, label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_count_as_missing() {
        assert_eq!(filled(&None), None);
        assert_eq!(filled(&Some("   ".into())), None);
        assert_eq!(filled(&Some(" x ".into())), Some("x".into()));
    }

    #[test]
    fn required_reports_the_given_message() {
        let err = required(&Some(String::new()), "Name is required.").unwrap_err();
        assert_eq!(err, DomainError::ValidationError("Name is required.".into()));
    }

    #[test]
    fn dates_must_be_iso() {
        assert!(parse_date("2024-02-29", "Date").is_ok());
        assert!(parse_date("29/02/2024", "Date").is_err());
        assert!(parse_date("2023-02-29", "Date").is_err());
    }
}
