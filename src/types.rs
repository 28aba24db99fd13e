/// Shared types used across the library and the binary
///
/// This module contains the date bounds model and the range-limits record
/// exchanged with the authoritative source and the persisted cache.
use std::fmt;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{RangeError, RangeResult};

/// Date format used by the cache record and the CLI
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date-time formats accepted in addition to RFC 3339
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Range limits as returned by the range endpoint and stored in the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeLimits {
    pub min_date: String,
    pub max_date: String,
}

impl RangeLimits {
    /// Build a normalized record (`YYYY-MM-DD` on both sides)
    pub fn from_dates(min: NaiveDate, max: NaiveDate) -> Self {
        Self {
            min_date: min.format(ISO_DATE_FORMAT).to_string(),
            max_date: max.format(ISO_DATE_FORMAT).to_string(),
        }
    }

    /// Parse both sides to day precision
    ///
    /// Fails when either side is not an ISO-8601 date or when min is after max.
    pub fn to_bounds(&self) -> RangeResult<Bounds> {
        let min = parse_iso_date(&self.min_date)?;
        let max = parse_iso_date(&self.max_date)?;
        Bounds::new(Some(min), Some(max))
    }
}

/// Parse an ISO-8601 date or date-time, truncating to the calendar date as written
pub fn parse_iso_date(value: &str) -> RangeResult<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, ISO_DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|datetime| datetime.date())
        .ok_or_else(|| RangeError::Malformed(format!("'{}' is not an ISO-8601 date", value)))
}

/// Inclusive, day-precision date bounds
///
/// Either side may be absent, meaning unbounded in that direction.
/// When both are present, `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
}

impl Bounds {
    /// Bounds with neither side present
    pub const fn unbounded() -> Self {
        Self { min: None, max: None }
    }

    /// Create bounds, rejecting `min > max`
    pub fn new(min: Option<NaiveDate>, max: Option<NaiveDate>) -> RangeResult<Self> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(RangeError::InvalidRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    /// Fully bounded range covering both dates, in whichever order they come
    pub fn spanning(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            min: Some(a.min(b)),
            max: Some(a.max(b)),
        }
    }

    /// Parse optional ISO strings into bounds
    pub fn parse(min: Option<&str>, max: Option<&str>) -> RangeResult<Self> {
        let min = min.map(parse_iso_date).transpose()?;
        let max = max.map(parse_iso_date).transpose()?;
        Self::new(min, max)
    }

    pub const fn min(&self) -> Option<NaiveDate> {
        self.min
    }

    pub const fn max(&self) -> Option<NaiveDate> {
        self.max
    }

    /// True when both sides are present
    pub const fn is_fully_bounded(&self) -> bool {
        self.min.is_some() && self.max.is_some()
    }

    /// Check whether a day lies inside the bounds (inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min.map_or(true, |min| date >= min) && self.max.map_or(true, |max| date <= max)
    }

    /// Clamp a day to the nearest bound when it falls outside
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        match (self.min, self.max) {
            (Some(min), _) if date < min => min,
            (_, Some(max)) if date > max => max,
            _ => date,
        }
    }

    /// First-of-month anchor of the month containing `min`
    pub fn min_month(&self) -> Option<NaiveDate> {
        self.min.map(first_of_month)
    }

    /// First-of-month anchor of the month containing `max`
    pub fn max_month(&self) -> Option<NaiveDate> {
        self.max.map(first_of_month)
    }

    /// Check whether a first-of-month anchor lies between the bounds' month anchors
    pub fn contains_month(&self, anchor: NaiveDate) -> bool {
        self.min_month().map_or(true, |min| anchor >= min)
            && self.max_month().map_or(true, |max| anchor <= max)
    }

    /// Normalized record for persisting, only when fully bounded
    pub fn to_limits(&self) -> Option<RangeLimits> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(RangeLimits::from_dates(min, max)),
            _ => None,
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |date: Option<NaiveDate>| {
            date.map_or_else(|| "unbounded".to_string(), |d| d.format(ISO_DATE_FORMAT).to_string())
        };
        write!(f, "{} .. {}", side(self.min), side(self.max))
    }
}

/// Truncate a date to the first day of its month
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Number of days in the given month (1-based)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Shift a date by a signed number of months, clamping the day to the target month's length
pub fn shift_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let magnitude = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}
