//! Window of selectable months
//!
//! With both bounds known the window is every month of the bounded range.
//! Otherwise it is a moving window of `2 * radius + 1` months around the
//! selection's month, filtered by whichever bound is present.

use std::iter;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::format::CalendarFormatter;
use crate::types::{days_in_month, first_of_month, shift_months, Bounds};

/// Months on either side of the selection's month when the range is open
pub const DEFAULT_MONTH_RADIUS: u32 = 6;

/// A month, anchored on its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// Month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self(first_of_month(date))
    }

    /// First day of the month
    pub const fn anchor(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month number, 1-based
    pub fn number(&self) -> u32 {
        self.0.month()
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year(), self.number())
    }

    /// Month `months` away from this one
    pub fn offset(&self, months: i32) -> Option<Month> {
        shift_months(self.0, months).map(Month)
    }

    pub fn label(&self, formatter: &dyn CalendarFormatter) -> String {
        formatter.month_long(self.0)
    }

    pub fn is_current_month(&self, today: NaiveDate) -> bool {
        *self == Month::containing(today)
    }

    pub fn is_selected_month(&self, selection: NaiveDate) -> bool {
        *self == Month::containing(selection)
    }
}

/// Materialized window of months
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthWindow {
    radius: u32,
    months: Vec<Month>,
}

impl MonthWindow {
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            months: Vec::new(),
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn months(&self) -> &[Month] {
        &self.months
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn first(&self) -> Option<Month> {
        self.months.first().copied()
    }

    pub fn last(&self) -> Option<Month> {
        self.months.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<Month> {
        self.months.get(index).copied()
    }

    /// Index of the month containing the selection, if present
    pub fn position(&self, selection: NaiveDate) -> Option<usize> {
        self.months.iter().position(|month| month.is_selected_month(selection))
    }

    /// Whether the current window cannot serve this selection and bounds
    pub fn needs_rebuild(&self, selection: NaiveDate, bounds: &Bounds) -> bool {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return true;
        };

        match (bounds.min_month(), bounds.max_month()) {
            // Fully bounded: only the endpoints matter
            (Some(min), Some(max)) => first.anchor() != min || last.anchor() != max,
            (min, max) => {
                let drifted = min.is_some_and(|min| first.anchor() < min)
                    || max.is_some_and(|max| last.anchor() > max);
                let target = Month::containing(selection);
                drifted || target < first || target > last
            }
        }
    }

    /// Rebuild for `selection` when needed
    ///
    /// Returns `true` if the window was rebuilt, `false` if it was kept as is.
    pub fn recompute(&mut self, selection: NaiveDate, bounds: &Bounds) -> bool {
        if !self.needs_rebuild(selection, bounds) {
            return false;
        }

        self.months = match (bounds.min_month(), bounds.max_month()) {
            (Some(min), Some(max)) => months_between(Month(min), Month(max)),
            _ => months_around(Month::containing(selection), self.radius, bounds),
        };
        debug!(
            "Month window rebuilt for {}: {} months ({:?} .. {:?})",
            selection,
            self.months.len(),
            self.first().map(|m| m.anchor()),
            self.last().map(|m| m.anchor()),
        );
        true
    }
}

impl Default for MonthWindow {
    fn default() -> Self {
        Self::new(DEFAULT_MONTH_RADIUS)
    }
}

/// Every month from `first` through `last`, inclusive
fn months_between(first: Month, last: Month) -> Vec<Month> {
    iter::successors(Some(first), |month| month.offset(1))
        .take_while(|month| *month <= last)
        .collect()
}

fn months_around(center: Month, radius: u32, bounds: &Bounds) -> Vec<Month> {
    let radius = i32::try_from(radius).unwrap_or(i32::MAX);
    (-radius..=radius)
        .filter_map(|step| center.offset(step))
        .filter(|month| bounds.contains_month(month.anchor()))
        .collect()
}

/// Move the selection into `target`, keeping its day of month where possible
///
/// The day is clamped to the target month's length (Jan 31 becomes Feb 28/29),
/// then the result is clamped into the bounds.
pub fn reanchor_to_month(selection: NaiveDate, target: Month, bounds: &Bounds) -> NaiveDate {
    let day = selection.day().min(target.days());
    let moved = NaiveDate::from_ymd_opt(target.year(), target.number(), day).unwrap_or(target.anchor());
    bounds.clamp(moved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32) -> Month {
        Month::containing(date(y, m, 1))
    }

    #[test]
    fn test_fully_bounded_window_covers_range() {
        let bounds = Bounds::spanning(date(2024, 10, 4), date(2025, 6, 17));
        let mut window = MonthWindow::default();

        assert!(window.recompute(date(2025, 1, 15), &bounds));

        assert_eq!(window.len(), 9);
        assert_eq!(window.first(), Some(month(2024, 10)));
        assert_eq!(window.last(), Some(month(2025, 6)));
    }

    #[test]
    fn test_fully_bounded_window_ignores_radius() {
        let bounds = Bounds::spanning(date(2023, 1, 1), date(2025, 12, 31));
        let mut window = MonthWindow::new(2);

        window.recompute(date(2024, 6, 1), &bounds);
        assert_eq!(window.len(), 36);
    }

    #[test]
    fn test_fully_bounded_window_not_rebuilt_on_selection_move() {
        let bounds = Bounds::spanning(date(2024, 10, 4), date(2025, 6, 17));
        let mut window = MonthWindow::default();
        window.recompute(date(2025, 1, 15), &bounds);

        assert!(!window.recompute(date(2024, 10, 4), &bounds));
        assert!(!window.recompute(date(2025, 6, 17), &bounds));
    }

    #[test]
    fn test_fully_bounded_window_rebuilt_when_bounds_move() {
        let mut window = MonthWindow::default();
        window.recompute(
            date(2025, 1, 15),
            &Bounds::spanning(date(2024, 10, 4), date(2025, 6, 17)),
        );

        let extended = Bounds::spanning(date(2024, 10, 4), date(2025, 7, 1));
        assert!(window.recompute(date(2025, 1, 15), &extended));
        assert_eq!(window.last(), Some(month(2025, 7)));
    }

    #[test]
    fn test_open_window_is_centered() {
        let mut window = MonthWindow::default();
        window.recompute(date(2025, 1, 31), &Bounds::unbounded());

        assert_eq!(window.len(), 13);
        assert_eq!(window.first(), Some(month(2024, 7)));
        assert_eq!(window.last(), Some(month(2025, 7)));
        assert_eq!(window.position(date(2025, 1, 31)), Some(6));
    }

    #[test]
    fn test_open_window_filtered_by_single_bound() {
        let bounds = Bounds::new(Some(date(2024, 11, 20)), None).unwrap();
        let mut window = MonthWindow::default();

        window.recompute(date(2025, 1, 10), &bounds);

        assert_eq!(window.first(), Some(month(2024, 11)));
        assert_eq!(window.last(), Some(month(2025, 7)));
        assert_eq!(window.len(), 9);
    }

    #[test]
    fn test_open_window_kept_while_selection_inside() {
        let mut window = MonthWindow::default();
        window.recompute(date(2025, 1, 15), &Bounds::unbounded());
        let snapshot = window.clone();

        assert!(!window.recompute(date(2025, 7, 31), &Bounds::unbounded()));
        assert_eq!(window, snapshot);
        assert!(window.recompute(date(2025, 8, 1), &Bounds::unbounded()));
        assert_eq!(window.position(date(2025, 8, 1)), Some(6));
    }

    #[test]
    fn test_open_window_rebuilt_when_endpoint_drifts_outside_bound() {
        let mut window = MonthWindow::default();
        let selection = date(2025, 1, 15);
        window.recompute(selection, &Bounds::unbounded());

        let bounds = Bounds::new(None, Some(date(2025, 3, 1))).unwrap();
        assert!(window.needs_rebuild(selection, &bounds));
        window.recompute(selection, &bounds);
        assert_eq!(window.last(), Some(month(2025, 3)));
    }

    #[test]
    fn test_reanchor_clamps_to_month_length() {
        let bounds = Bounds::unbounded();
        assert_eq!(reanchor_to_month(date(2023, 1, 31), month(2023, 2), &bounds), date(2023, 2, 28));
        assert_eq!(reanchor_to_month(date(2024, 1, 31), month(2024, 2), &bounds), date(2024, 2, 29));
        assert_eq!(reanchor_to_month(date(2024, 3, 31), month(2024, 4), &bounds), date(2024, 4, 30));
        assert_eq!(reanchor_to_month(date(2024, 3, 15), month(2025, 7), &bounds), date(2025, 7, 15));
    }

    #[test]
    fn test_reanchor_clamps_into_bounds() {
        let bounds = Bounds::spanning(date(2024, 10, 4), date(2025, 6, 17));

        // Oct 1 would precede the first allowed day
        assert_eq!(reanchor_to_month(date(2025, 1, 1), month(2024, 10), &bounds), date(2024, 10, 4));
        // Jun 30 would follow the last allowed day
        assert_eq!(reanchor_to_month(date(2025, 1, 30), month(2025, 6), &bounds), date(2025, 6, 17));
    }

    #[test]
    fn test_month_attributes() {
        let january = month(2025, 1);
        assert!(january.is_current_month(date(2025, 1, 20)));
        assert!(january.is_selected_month(date(2025, 1, 2)));
        assert!(!january.is_selected_month(date(2024, 1, 2)));
        assert_eq!(january.days(), 31);
        assert_eq!(
            january.label(&crate::picker::format::EnglishFormatter),
            "January 2025"
        );
    }
}
