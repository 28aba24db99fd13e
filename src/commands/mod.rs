pub mod days;
pub mod months;
pub mod range;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

use crate::types::ISO_DATE_FORMAT;

/// Parse an optional date string, defaulting to today
///
/// Accepts dates in YYYY-MM-DD format. Returns an error if the date string is malformed.
pub fn parse_date(date: Option<String>) -> Result<NaiveDate> {
    match date {
        Some(date_str) => NaiveDate::parse_from_str(&date_str, ISO_DATE_FORMAT)
            .with_context(|| format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)),
        None => Ok(Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_explicit() {
        let parsed = parse_date(Some("2025-01-31".to_string())).unwrap();
        assert_eq!(parsed, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn test_parse_date_defaults_to_today() {
        assert_eq!(parse_date(None).unwrap(), Local::now().date_naive());
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date(Some("31/01/2025".to_string())).unwrap_err();
        assert!(format!("{:#}", err).contains("Use YYYY-MM-DD"));
    }
}
