/// Screen layout for the interactive picker
///
/// The layout structure is:
/// - Header: 1 line (selection and resolved range)
/// - Month strip: 1 line
/// - Day strip: 2 lines (weekday label, day number)
/// - Footer: 1 line (key hints), pinned to the bottom
use ratatui::layout::{Constraint, Layout, Position, Rect};

use crate::layout_constants::{DAY_STRIP_HEIGHT, MONTH_STRIP_HEIGHT};
use crate::picker::Strip;

/// Calculated areas for each part of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripLayout {
    pub header: Rect,
    pub months: Rect,
    pub days: Rect,
    pub footer: Rect,
}

impl StripLayout {
    pub fn calculate(area: Rect) -> Self {
        let [header, _, months, _, days, _, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(MONTH_STRIP_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(DAY_STRIP_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            header,
            months,
            days,
            footer,
        }
    }

    pub fn strip_area(&self, strip: Strip) -> Rect {
        match strip {
            Strip::Days => self.days,
            Strip::Months => self.months,
        }
    }

    /// Strip under a terminal cell, with the column relative to the strip
    pub fn strip_at(&self, column: u16, row: u16) -> Option<(Strip, f64)> {
        let position = Position::new(column, row);
        [Strip::Months, Strip::Days]
            .into_iter()
            .find(|strip| self.strip_area(*strip).contains(position))
            .map(|strip| (strip, f64::from(column - self.strip_area(strip).x)))
    }

    /// Viewport width shared by both strips
    pub fn strip_width(&self) -> f64 {
        f64::from(self.days.width)
    }
}
