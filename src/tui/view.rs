//! Rendering of the interactive picker
//!
//! Strips are drawn cell by cell so that entries scrolled partly past either
//! edge are clipped instead of being dropped.
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
};

use crate::picker::{CalendarFormatter, EnglishFormatter, ItemGeometry, Strip};

use super::app::App;
use super::layout::StripLayout;

const HINTS: &str = "←/→ day  ↑/↓ month  t today  r refresh  q quit";

/// One strip entry: a line of text per strip row, and its style
type StripEntry = (Vec<String>, Style);

pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let layout = StripLayout::calculate(area);
    let formatter = EnglishFormatter;

    render_header(app, layout.header, buf, &formatter);
    render_months(app, layout.months, buf, &formatter);
    render_days(app, layout.days, buf, &formatter);
    render_footer(app, layout.footer, buf);
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer, formatter: &dyn CalendarFormatter) {
    // Squeezed out on very short terminals
    if area.is_empty() {
        return;
    }
    let picker = app.picker();
    let Some(source) = app.source() else {
        buf.set_string(area.x, area.y, "Resolving date range...", Style::default().fg(Color::DarkGray));
        return;
    };

    let selection = picker.selection();
    let selected = format!("{} {}", formatter.weekday_short(selection), selection);
    buf.set_string(
        area.x,
        area.y,
        &selected,
        Style::default().fg(app.theme().selection_fg).add_modifier(Modifier::BOLD),
    );

    let mut range = format!("   Range: {} ({})", picker.bounds(), source);
    if app.is_loading() {
        range.push_str("  refreshing...");
    }
    let x = area.x + selected.chars().count() as u16;
    buf.set_string(x, area.y, &range, Style::default());
}

/// Style for an entry given its selected/today attributes
fn entry_style(app: &App, is_selected: bool, is_today: bool) -> Style {
    if app.is_loading() {
        return Style::default().fg(Color::DarkGray);
    }
    if is_selected {
        Style::default().fg(app.theme().selection_fg).add_modifier(Modifier::BOLD)
    } else if is_today {
        Style::default().fg(app.theme().today_fg())
    } else {
        Style::default()
    }
}

fn render_months(app: &App, area: Rect, buf: &mut Buffer, formatter: &dyn CalendarFormatter) {
    let picker = app.picker();
    let cells = picker.month_window().months().iter().map(|month| {
        let style = entry_style(
            app,
            month.is_selected_month(picker.selection()),
            month.is_current_month(app.today()),
        );
        (vec![month.label(formatter)], style)
    });

    let offset = picker.scroll_offset(Strip::Months).unwrap_or(0.0);
    render_strip(buf, area, picker.geometry(Strip::Months), offset, cells);
}

fn render_days(app: &App, area: Rect, buf: &mut Buffer, formatter: &dyn CalendarFormatter) {
    let picker = app.picker();
    let cells = picker.day_window().days().iter().map(|day| {
        let style = entry_style(app, day.is_selected(picker.selection()), day.is_today(app.today()));
        (vec![day.weekday_label(formatter), day.number().to_string()], style)
    });

    let offset = picker.scroll_offset(Strip::Days).unwrap_or(0.0);
    render_strip(buf, area, picker.geometry(Strip::Days), offset, cells);
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    buf.set_string(area.x, area.y, HINTS, Style::default().fg(Color::DarkGray));

    if app.picker().is_scrolling_horizontally() {
        let label = "dragging";
        let x = area.right().saturating_sub(label.len() as u16);
        buf.set_string(x, area.y, label, Style::default().fg(app.theme().selection_fg));
    }
}

fn render_strip(
    buf: &mut Buffer,
    area: Rect,
    geometry: ItemGeometry,
    offset: f64,
    cells: impl Iterator<Item = StripEntry>,
) {
    let width = geometry.width as usize;
    for (index, (lines, style)) in cells.enumerate() {
        let left = index as f64 * geometry.stride() + geometry.spacing - offset;
        let start = left.round() as i32;
        if start + width as i32 <= 0 || start >= i32::from(area.width) {
            continue;
        }

        for (row, text) in lines.iter().enumerate().take(usize::from(area.height)) {
            let text: String = format!("{:^width$}", text, width = width).chars().take(width).collect();
            put_clipped(buf, area, row as u16, start, &text, style);
        }
    }
}

/// Write `text` starting at column `start` of `area`, dropping cells outside it
fn put_clipped(buf: &mut Buffer, area: Rect, row: u16, start: i32, text: &str, style: Style) {
    for (k, ch) in text.chars().enumerate() {
        let col = start + k as i32;
        if col < 0 || col >= i32::from(area.width) {
            continue;
        }
        if let Some(cell) = buf.cell_mut((area.x + col as u16, area.y + row)) {
            cell.set_char(ch).set_style(style);
        }
    }
}
