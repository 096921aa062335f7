//! Colored terminal rendering for dayplan types.

use chrono::NaiveDate;
use dayplan_core::event::Event;
use dayplan_core::schedule::DayMap;
use dayplan_core::sync::SyncDiff;
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let mut line = format!(
            "{}  {}  {}",
            self.time_span().dimmed(),
            self.theme.cyan(),
            self.description
        );
        if let Some(color) = &self.color {
            line.push_str(&format!("  {}", color.dimmed()));
        }
        line
    }
}

/// One day's listing: a date heading plus its indexed events.
pub fn print_day(date: NaiveDate, events: &[Event]) {
    println!("{}", date.format("%Y-%m-%d").to_string().bold());
    if events.is_empty() {
        println!("   {}", "No events".dimmed());
        return;
    }
    for (i, event) in events.iter().enumerate() {
        println!("   {} {}", format!("[{i}]").dimmed(), event.render());
    }
}

pub fn print_day_map(days: &DayMap) {
    let mut first = true;
    for (date, events) in days {
        if !first {
            println!();
        }
        print_day(*date, events);
        first = false;
    }
}

/// Pending remote changes: one line per record, +/~/- colored.
pub fn render_sync_diff(diff: &SyncDiff) -> String {
    if diff.is_empty() {
        return format!("   {}", "Remote is up to date".dimmed());
    }

    let mut lines = Vec::new();
    for record in &diff.to_create {
        lines.push(format!(
            "   {} {} {} {}",
            "+".green(),
            record.start_date,
            record.title.green(),
            format!("{}-{}", record.start_time.format("%H:%M"), record.end_time.format("%H:%M"))
                .dimmed()
        ));
    }
    for record in &diff.to_update {
        lines.push(format!(
            "   {} {} {} {}",
            "~".yellow(),
            record.start_date,
            record.title.yellow(),
            format!("{}-{}", record.start_time.format("%H:%M"), record.end_time.format("%H:%M"))
                .dimmed()
        ));
    }
    for record in &diff.to_delete {
        lines.push(format!(
            "   {} {} {} {}",
            "-".red(),
            record.start_date,
            record.title.red(),
            format!("{}-{}", record.start_time.format("%H:%M"), record.end_time.format("%H:%M"))
                .dimmed()
        ));
    }
    lines.join("\n")
}
