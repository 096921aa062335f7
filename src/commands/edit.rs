use anyhow::Result;
use dayplan_core::config::AppConfig;
use dayplan_core::event::{Event, parse_time};
use dayplan_core::storage;
use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;

use super::delete::pick_event;
use crate::prompt::{prompt_parse, prompt_text};

pub fn run(config: &AppConfig, date: Option<String>, index: Option<usize>, yes: bool) -> Result<()> {
    let path = config.data_path();
    let mut schedule = storage::load(&path)?;
    let date = super::resolve_date(date.as_deref())?;

    let Some(target) = pick_event(schedule.events_on(date), date, index)? else {
        return Ok(());
    };

    let start_default = target.start_time.format("%H:%M").to_string();
    let end_default = target.end_time.format("%H:%M").to_string();

    let start_time = prompt_parse("Start time (HH:MM)", Some(&start_default), parse_time)?;
    let end_time = prompt_parse("End time (HH:MM)", Some(&end_default), parse_time)?;
    let theme = prompt_text("Theme", Some(&target.theme))?;
    let description = prompt_text("Description", Some(&target.description))?;

    let color_raw: String = Input::new()
        .with_prompt("  Color (empty for none)")
        .default(target.color.clone().unwrap_or_default())
        .allow_empty(true)
        .show_default(false)
        .interact_text()?;
    let color = if color_raw.trim().is_empty() {
        None
    } else {
        Some(color_raw.trim().to_string())
    };

    let changes = Event::new(start_time, end_time, &theme, &description, color)?;

    // The edited event must not clash with itself.
    if !yes {
        for clash in schedule.conflicts(date, changes.start_time, changes.end_time, Some(&target.id)) {
            let confirmed = Confirm::new()
                .with_prompt(format!(
                    "  Overlaps with '{}' ({}). Save anyway?",
                    clash.description,
                    clash.time_span()
                ))
                .default(false)
                .interact()?;
            if !confirmed {
                println!("{}", "Aborted, nothing changed".yellow());
                return Ok(());
            }
        }
    }

    if !schedule.update_by_id(date, &target.id, changes) {
        anyhow::bail!("Event not found on {date}");
    }
    storage::save(&path, &schedule)?;

    println!("{}", format!("Updated: {theme} on {date}").green());
    Ok(())
}
