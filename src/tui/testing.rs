//! General test utilities for TUI tests.
//!
//! Builders for app states used across the TUI test modules, plus buffer helpers.

use chrono::NaiveDate;
use crossterm::event::{KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::config::ThemeConfig;
use crate::fixtures;
use crate::layout_constants::{TUI_DAY_GEOMETRY, TUI_MONTH_GEOMETRY};
use crate::picker::PickerSettings;
use crate::range::{BoundsSource, ResolvedBounds};

use super::action::Action;
use super::app::App;
use super::layout::StripLayout;

/// Constant for general rendering width
pub const RENDER_WIDTH: u16 = 80;

/// Constant for general rendering height
pub const RENDER_HEIGHT: u16 = 24;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Picker settings with terminal cell geometry
pub fn tui_settings() -> PickerSettings {
    PickerSettings {
        day_geometry: TUI_DAY_GEOMETRY,
        month_geometry: TUI_MONTH_GEOMETRY,
        ..PickerSettings::default()
    }
}

/// App on the mid-season date with the fixture season resolved, not laid out
pub fn season_app() -> App {
    let mut app = App::new(fixtures::create_mid_season_date(), tui_settings(), ThemeConfig::default());
    app.dispatch(Action::BoundsResolved(ResolvedBounds {
        bounds: fixtures::create_season_bounds(),
        source: BoundsSource::Cache,
    }));
    app
}

/// `season_app` laid out on an 80x24 terminal
pub fn laid_out_app() -> App {
    let mut app = season_app();
    app.dispatch(Action::Layout(StripLayout::calculate(Rect::new(
        0,
        0,
        RENDER_WIDTH,
        RENDER_HEIGHT,
    ))));
    app
}

pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}
