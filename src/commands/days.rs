use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::commands::parse_date;
use crate::layout_constants::CLI_INDEX_WIDTH;
use crate::picker::{CalendarFormatter, DatePicker, DayWindow, EnglishFormatter, PickerSettings, ScrollCoordinator};
use crate::range::BoundsResolver;

fn markers(is_selected: bool, is_today: bool) -> &'static str {
    match (is_selected, is_today) {
        (true, true) => "selected, today",
        (true, false) => "selected",
        (false, true) => "today",
        (false, false) => "",
    }
}

pub fn format_days(
    window: &DayWindow,
    selection: NaiveDate,
    today: NaiveDate,
    formatter: &dyn CalendarFormatter,
) -> String {
    let mut output = String::new();
    let (Some(first), Some(last)) = (window.first(), window.last()) else {
        output.push_str("No selectable days.\n");
        return output;
    };

    output.push_str(&format!(
        "\nDays around {} ({} days, {} .. {})\n",
        selection,
        window.len(),
        first.date(),
        last.date()
    ));
    output.push_str(&format!("{}\n", "═".repeat(40)));

    for (index, day) in window.days().iter().enumerate() {
        let line = format!(
            "{:>width$}  {:<4} {}  {}",
            index,
            day.weekday_label(formatter),
            day.date(),
            markers(day.is_selected(selection), day.is_today(today)),
            width = CLI_INDEX_WIDTH,
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

/// Print the day window the picker would show for `date`
pub async fn run(resolver: &BoundsResolver, date: Option<String>, settings: PickerSettings) -> Result<()> {
    let requested = parse_date(date)?;
    let bounds = resolver.resolve().await;
    let (picker, effect) = DatePicker::mount(requested, bounds, settings, ScrollCoordinator::new());

    if let Some(clamped) = effect.selection_change() {
        println!("{} is outside {}, using {}", requested, bounds, clamped);
    }

    let today = Local::now().date_naive();
    print!("{}", format_days(picker.day_window(), picker.selection(), today, &EnglishFormatter));
    Ok(())
}
