pub mod add;
pub mod agenda;
pub mod delete;
pub mod edit;
pub mod export;
pub mod search;
pub mod show;
pub mod sync;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use dayplan_core::event::parse_date;

/// Resolve a date argument, defaulting to today.
pub(crate) fn resolve_date(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(raw) => Ok(parse_date(raw)?),
        None => Ok(Local::now().date_naive()),
    }
}
