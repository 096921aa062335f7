use anyhow::Result;
use dayplan_core::config::AppConfig;
use dayplan_core::event::{Event, parse_time};
use dayplan_core::storage;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::prompt::{prompt_parse, prompt_text};

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &AppConfig,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    theme: Option<String>,
    description: Option<String>,
    color: Option<String>,
    yes: bool,
) -> Result<()> {
    let path = config.data_path();
    let mut schedule = storage::load(&path)?;

    let date = super::resolve_date(date.as_deref())?;

    let start_time = match start {
        Some(raw) => parse_time(&raw)?,
        None => prompt_parse("Start time (HH:MM)", Some("09:00"), parse_time)?,
    };

    let end_time = match end {
        Some(raw) => parse_time(&raw)?,
        None => prompt_parse("End time (HH:MM)", Some("10:00"), parse_time)?,
    };

    let theme = match theme {
        Some(theme) => theme,
        None => {
            let known = schedule.themes();
            if !known.is_empty() {
                let list: Vec<&str> = known.iter().map(String::as_str).collect();
                println!("  {}", format!("Known themes: {}", list.join(", ")).dimmed());
            }
            prompt_text("Theme", None)?
        }
    };

    let description = match description {
        Some(description) => description,
        None => prompt_text("Description", None)?,
    };

    let event = Event::new(start_time, end_time, &theme, &description, color)?;

    // Overlap is advisory: the user decides, clash by clash.
    if !yes {
        for clash in schedule.conflicts(date, event.start_time, event.end_time, None) {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "  Overlaps with '{}' ({}). Add anyway?",
                    clash.description,
                    clash.time_span()
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("{}", "Aborted, nothing added".yellow());
                return Ok(());
            }
        }
    }

    schedule.add(date, event);
    storage::save(&path, &schedule)?;

    println!("{}", format!("Added: {theme} on {date}").green());
    Ok(())
}
