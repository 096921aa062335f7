use anyhow::Result;
use chrono::Duration;
use dayplan_core::config::AppConfig;
use dayplan_core::event::parse_date;
use dayplan_core::storage;
use owo_colors::OwoColorize;

use crate::render::print_day_map;

pub fn run(
    config: &AppConfig,
    from: Option<String>,
    to: Option<String>,
    theme: Option<&str>,
) -> Result<()> {
    let schedule = storage::load(&config.data_path())?;

    let from = super::resolve_date(from.as_deref())?;
    let to = match to {
        Some(raw) => parse_date(&raw)?,
        None => from + Duration::days(7),
    };
    if to < from {
        anyhow::bail!("--to {to} is before --from {from}");
    }

    let view = schedule.range(from, to, theme);
    if view.is_empty() {
        println!("{}", format!("No events between {from} and {to}").dimmed());
        return Ok(());
    }

    print_day_map(&view);

    let count: usize = view.values().map(Vec::len).sum();
    println!("\n{}", format!("{count} event(s), {from} to {to}").dimmed());
    Ok(())
}
