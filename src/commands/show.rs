use anyhow::Result;
use dayplan_core::config::AppConfig;
use dayplan_core::storage;
use owo_colors::OwoColorize;

use crate::render::{print_day, print_day_map};

pub fn run(config: &AppConfig, date: Option<String>, all: bool) -> Result<()> {
    let schedule = storage::load(&config.data_path())?;

    if all {
        if schedule.is_empty() {
            println!("{}", "Schedule is empty".dimmed());
            return Ok(());
        }
        print_day_map(schedule.days());
        return Ok(());
    }

    let date = super::resolve_date(date.as_deref())?;
    print_day(date, schedule.events_on(date));
    Ok(())
}
