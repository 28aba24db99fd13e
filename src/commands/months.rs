use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::commands::parse_date;
use crate::layout_constants::CLI_INDEX_WIDTH;
use crate::picker::{
    CalendarFormatter, DatePicker, EnglishFormatter, MonthWindow, PickerSettings, ScrollCoordinator,
};
use crate::range::BoundsResolver;

pub fn format_months(
    window: &MonthWindow,
    selection: NaiveDate,
    today: NaiveDate,
    formatter: &dyn CalendarFormatter,
) -> String {
    let mut output = String::new();
    if window.is_empty() {
        output.push_str("No selectable months.\n");
        return output;
    }

    output.push_str(&format!("\nMonths for {} ({} months)\n", selection, window.len()));
    output.push_str(&format!("{}\n", "═".repeat(40)));

    for (index, month) in window.months().iter().enumerate() {
        let mut line = format!(
            "{:>width$}  {:<16}",
            index,
            month.label(formatter),
            width = CLI_INDEX_WIDTH,
        );
        if month.is_selected_month(selection) {
            line.push_str(" selected");
        }
        if month.is_current_month(today) {
            line.push_str(" current");
        }
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

/// Print the month window the picker would show for `date`
pub async fn run(resolver: &BoundsResolver, date: Option<String>, settings: PickerSettings) -> Result<()> {
    let requested = parse_date(date)?;
    let bounds = resolver.resolve().await;
    let (picker, effect) = DatePicker::mount(requested, bounds, settings, ScrollCoordinator::new());

    if let Some(clamped) = effect.selection_change() {
        println!("{} is outside {}, using {}", requested, bounds, clamped);
    }

    let today = Local::now().date_naive();
    print!("{}", format_months(picker.month_window(), picker.selection(), today, &EnglishFormatter));
    Ok(())
}
