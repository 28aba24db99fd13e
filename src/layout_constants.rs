//! Shared layout constants used across CLI and TUI rendering.
//!
//! In the terminal one strip unit is one column, so the picker geometry is
//! expressed in cells here rather than in the pixel units of `picker::sync`.

use crate::picker::ItemGeometry;

/// Width of one day cell ("MON" / "15")
pub const DAY_CELL_WIDTH: u16 = 5;

/// Blank columns on each side of a day cell
pub const DAY_CELL_SPACING: u16 = 1;

/// Width of one month cell ("September 2025" plus padding)
pub const MONTH_CELL_WIDTH: u16 = 16;

/// Month cells sit edge to edge
pub const MONTH_CELL_SPACING: u16 = 0;

/// Rows taken by the day strip: weekday label and day number
pub const DAY_STRIP_HEIGHT: u16 = 2;

/// Rows taken by the month strip
pub const MONTH_STRIP_HEIGHT: u16 = 1;

/// Day geometry in terminal cells
pub const TUI_DAY_GEOMETRY: ItemGeometry =
    ItemGeometry::new(DAY_CELL_WIDTH as f64, DAY_CELL_SPACING as f64);

/// Month geometry in terminal cells
pub const TUI_MONTH_GEOMETRY: ItemGeometry =
    ItemGeometry::new(MONTH_CELL_WIDTH as f64, MONTH_CELL_SPACING as f64);

/// Width of the label column in CLI window listings
pub const CLI_INDEX_WIDTH: usize = 4;
