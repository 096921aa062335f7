use anyhow::Result;
use chrono::NaiveDate;
use dayplan_core::config::AppConfig;
use dayplan_core::event::{Event, EventKey};
use dayplan_core::storage;
use dialoguer::Select;
use owo_colors::OwoColorize;

pub fn run(config: &AppConfig, date: Option<String>, index: Option<usize>) -> Result<()> {
    let path = config.data_path();
    let mut schedule = storage::load(&path)?;
    let date = super::resolve_date(date.as_deref())?;

    let Some(target) = pick_event(schedule.events_on(date), date, index)? else {
        return Ok(());
    };

    let key = EventKey::from(&target);
    match schedule.remove(date, &key) {
        Some(removed) => {
            storage::save(&path, &schedule)?;
            println!(
                "{}",
                format!("Deleted: {} ({})", removed.description, removed.time_span()).green()
            );
        }
        None => println!("{}", "Event not found".yellow()),
    }

    Ok(())
}

/// Resolve `--index`, or offer a selection prompt. Returns `None` when
/// there is nothing to pick from.
pub(super) fn pick_event(
    events: &[Event],
    date: NaiveDate,
    index: Option<usize>,
) -> Result<Option<Event>> {
    if events.is_empty() {
        println!("{}", format!("No events on {date}").dimmed());
        return Ok(None);
    }

    let index = match index {
        Some(i) => {
            if i >= events.len() {
                anyhow::bail!(
                    "No event [{i}] on {date} ({} event(s), indices start at 0)",
                    events.len()
                );
            }
            i
        }
        None => {
            let items: Vec<String> = events
                .iter()
                .map(|e| format!("{}  {}  {}", e.time_span(), e.theme, e.description))
                .collect();
            Select::new()
                .with_prompt(format!("  Event on {date}"))
                .items(&items)
                .default(0)
                .interact()?
        }
    };

    Ok(Some(events[index].clone()))
}
