use std::fs;
use std::path::Path;

use anyhow::Result;
use dayplan_core::config::AppConfig;
use dayplan_core::event::parse_date;
use dayplan_core::export::{render_csv, render_markdown};
use dayplan_core::schedule::DayMap;
use dayplan_core::storage;
use owo_colors::OwoColorize;

use crate::ExportFormat;

pub fn run(
    config: &AppConfig,
    output: &Path,
    format: ExportFormat,
    from: Option<String>,
    to: Option<String>,
    theme: Option<&str>,
) -> Result<()> {
    let schedule = storage::load(&config.data_path())?;

    let filtered = from.is_some() || to.is_some() || theme.is_some();
    let days: DayMap = if filtered {
        // Unset bounds fall back to the schedule's own extent.
        let first = schedule.days().keys().next().copied();
        let last = schedule.days().keys().next_back().copied();
        let from = match from {
            Some(raw) => parse_date(&raw)?,
            None => first.unwrap_or_default(),
        };
        let to = match to {
            Some(raw) => parse_date(&raw)?,
            None => last.unwrap_or(from),
        };
        schedule.range(from, to, theme)
    } else {
        schedule.days().clone()
    };

    let content = match format {
        ExportFormat::Csv => render_csv(&days),
        ExportFormat::Markdown => render_markdown(&days),
    };

    fs::write(output, content)?;

    let count: usize = days.values().map(Vec::len).sum();
    println!(
        "{}",
        format!("Exported {count} event(s) to {}", output.display()).green()
    );
    Ok(())
}
