use anyhow::Result;
use chrono::{Local, NaiveDate};

use crate::range::{BoundsResolver, ResolvedBounds};

fn format_side(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "open".to_string(), |d| d.to_string())
}

pub fn format_range(resolved: &ResolvedBounds) -> String {
    let mut output = String::new();
    output.push_str("\nDate range\n");
    output.push_str(&format!("{}\n", "═".repeat(30)));
    output.push_str(&format!("{:<8}{}\n", "Min:", format_side(resolved.bounds.min())));
    output.push_str(&format!("{:<8}{}\n", "Max:", format_side(resolved.bounds.max())));
    output.push_str(&format!("{:<8}{}\n", "Source:", resolved.source));
    output
}

/// Resolve and print the effective bounds
///
/// With `refresh` the in-session memo is bypassed.
pub async fn run(resolver: &BoundsResolver, refresh: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let resolved = if refresh {
        resolver.refresh_on(today).await
    } else {
        resolver.resolve_on(today).await
    };

    print!("{}", format_range(&resolved));
    Ok(())
}
