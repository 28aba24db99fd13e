use chrono::NaiveDate;

/// Calendar label formatting, delegated so hosts can plug in their locale
pub trait CalendarFormatter: Send + Sync {
    /// Short weekday label for a day entry (e.g. "MON")
    fn weekday_short(&self, date: NaiveDate) -> String;

    /// Long month and year label for a month entry (e.g. "January 2025")
    fn month_long(&self, anchor: NaiveDate) -> String;
}

/// English labels via chrono's formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishFormatter;

impl CalendarFormatter for EnglishFormatter {
    fn weekday_short(&self, date: NaiveDate) -> String {
        date.format("%a").to_string().to_uppercase()
    }

    fn month_long(&self, anchor: NaiveDate) -> String {
        anchor.format("%B %Y").to_string()
    }
}
