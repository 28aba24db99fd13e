/// Mock fixture data for testing and development
///
/// This module provides consistent, deterministic fixture data that can be used for:
/// 1. Unit tests - ensuring tests have predictable dates and bounds
/// 2. Development mock mode - running the slider without a range endpoint
/// 3. Benchmarks - providing consistent bounds for window recomputation
///
/// The fixtures model a hockey season running from early October to mid June.
use chrono::NaiveDate;

use crate::types::{Bounds, RangeLimits};

/// Opening day of the fixture season
pub const SEASON_START: (i32, u32, u32) = (2024, 10, 4);

/// Last possible day of the fixture season (final game of the playoffs)
pub const SEASON_END: (i32, u32, u32) = (2025, 6, 17);

fn ymd((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Range limits as the range endpoint would return them
pub fn create_mock_range_limits() -> RangeLimits {
    RangeLimits {
        min_date: "2024-10-04T00:00:00Z".to_string(),
        max_date: "2025-06-17T00:00:00Z".to_string(),
    }
}

/// Bounds matching `create_mock_range_limits`
pub fn create_season_bounds() -> Bounds {
    Bounds::spanning(ymd(SEASON_START), ymd(SEASON_END))
}

/// A mid-season selection, safely away from both bounds
pub fn create_mid_season_date() -> NaiveDate {
    ymd((2025, 1, 15))
}
