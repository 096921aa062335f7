use anyhow::Result;
use dayplan_core::config::AppConfig;
use dayplan_core::error::PlanError;
use dayplan_core::search::{CaseFold, SuffixStemmer};
use dayplan_core::storage;
use owo_colors::OwoColorize;

use crate::render::print_day_map;

pub fn run(config: &AppConfig, term: &str, fuzzy: bool) -> Result<()> {
    if term.trim().is_empty() {
        return Err(PlanError::EmptySearch.into());
    }

    let schedule = storage::load(&config.data_path())?;

    let results = if fuzzy {
        schedule.search(term, &SuffixStemmer)
    } else {
        schedule.search(term, &CaseFold)
    };

    if results.is_empty() {
        println!("{}", format!("No events matching '{term}'").dimmed());
        return Ok(());
    }

    print_day_map(&results);

    let count: usize = results.values().map(Vec::len).sum();
    println!("\n{}", format!("{count} match(es)").dimmed());
    Ok(())
}
