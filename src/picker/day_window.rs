//! Sliding window of selectable days
//!
//! The window is a gap-free, ascending run of days centered on the
//! selection and clipped to the bounds. It is rebuilt only when the selection
//! leaves it or one of its endpoints falls outside the bounds.

use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use super::format::CalendarFormatter;
use crate::types::Bounds;

/// Days on either side of the selection
pub const DEFAULT_DAY_RADIUS: u32 = 30;

/// A calendar day in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub const fn date(&self) -> NaiveDate {
        self.0
    }

    /// Day of month, 1-based
    pub fn number(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday_label(&self, formatter: &dyn CalendarFormatter) -> String {
        formatter.weekday_short(self.0)
    }

    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.0 == today
    }

    /// Calendar equality with the selection, never timestamp equality
    pub fn is_selected(&self, selection: NaiveDate) -> bool {
        self.0 == selection
    }
}

/// Materialized window of days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayWindow {
    radius: u32,
    days: Vec<Day>,
}

impl DayWindow {
    /// Empty window that builds `2 * radius + 1` days on first recompute
    pub fn new(radius: u32) -> Self {
        Self {
            radius,
            days: Vec::new(),
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first(&self) -> Option<Day> {
        self.days.first().copied()
    }

    pub fn last(&self) -> Option<Day> {
        self.days.last().copied()
    }

    pub fn get(&self, index: usize) -> Option<Day> {
        self.days.get(index).copied()
    }

    /// Index of the selected day, if present
    pub fn position(&self, selection: NaiveDate) -> Option<usize> {
        self.days.iter().position(|day| day.is_selected(selection))
    }

    /// Whether the current window cannot serve this selection and bounds
    pub fn needs_rebuild(&self, selection: NaiveDate, bounds: &Bounds) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => {
                let endpoints_valid = bounds.contains(first.date()) && bounds.contains(last.date());
                let covers_selection = first.date() <= selection && selection <= last.date();
                !(endpoints_valid && covers_selection)
            }
            _ => true,
        }
    }

    /// Rebuild around `selection` when needed
    ///
    /// Returns `true` if the window was rebuilt, `false` if it was kept as is.
    pub fn recompute(&mut self, selection: NaiveDate, bounds: &Bounds) -> bool {
        if !self.needs_rebuild(selection, bounds) {
            return false;
        }

        self.days = build_days(selection, bounds, self.radius);
        debug!(
            "Day window rebuilt around {}: {} days ({:?} .. {:?})",
            selection,
            self.days.len(),
            self.first().map(|d| d.date()),
            self.last().map(|d| d.date()),
        );
        true
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_RADIUS)
    }
}

/// Walk `selection - radius ..= selection + radius`, dropping days outside the bounds
fn build_days(selection: NaiveDate, bounds: &Bounds, radius: u32) -> Vec<Day> {
    let span = Days::new(u64::from(radius));
    let start = selection.checked_sub_days(span).unwrap_or(NaiveDate::MIN);
    let end = selection.checked_add_days(span).unwrap_or(NaiveDate::MAX);

    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| bounds.contains(*date))
        .map(Day)
        .collect()
}
