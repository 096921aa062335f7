use anyhow::Result;
use dayplan_core::config::AppConfig;
use dayplan_core::error::PlanError;
use dayplan_core::remote::RemoteStore;
use dayplan_core::storage;
use dayplan_core::sync::{self, SyncDiff};
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::remote::HttpRemote;
use crate::render::render_sync_diff;

pub async fn status(config: &AppConfig) -> Result<()> {
    let remote = require_remote(config)?;
    let schedule = storage::load(&config.data_path())?;

    let records = with_spinner("Fetching remote events", remote.list_events()).await?;
    let diff = SyncDiff::between(&schedule, &records, user_id(config));

    println!("{}", render_sync_diff(&diff));
    if !diff.is_empty() {
        let (created, updated, deleted) = diff.counts();
        println!("\nTo push: {created} created, {updated} updated, {deleted} deleted");
    }
    Ok(())
}

pub async fn push(config: &AppConfig) -> Result<()> {
    let remote = require_remote(config)?;
    let schedule = storage::load(&config.data_path())?;

    let records = with_spinner("Fetching remote events", remote.list_events()).await?;
    let diff = SyncDiff::between(&schedule, &records, user_id(config));

    if diff.is_empty() {
        println!("{}", "Remote is up to date".dimmed());
        return Ok(());
    }

    println!("{}", render_sync_diff(&diff));
    with_spinner("Pushing changes", diff.apply(&remote)).await?;

    let (created, updated, deleted) = diff.counts();
    println!(
        "{}",
        format!("Pushed: {created} created, {updated} updated, {deleted} deleted").green()
    );
    Ok(())
}

pub async fn pull(config: &AppConfig, yes: bool) -> Result<()> {
    let remote = require_remote(config)?;

    let records = with_spinner("Fetching remote events", remote.list_events()).await?;
    let incoming = sync::fold(records)?;
    let count = incoming.event_count();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "  Replace the local schedule with {count} remote event(s)?"
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Aborted, local schedule unchanged".yellow());
            return Ok(());
        }
    }

    storage::save(&config.data_path(), &incoming)?;
    println!("{}", format!("Pulled {count} event(s)").green());
    Ok(())
}

fn require_remote(config: &AppConfig) -> Result<HttpRemote> {
    let url = config.remote_url.as_deref().ok_or_else(|| {
        let path = AppConfig::config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "the config file".to_string());
        PlanError::NoRemoteConfigured(path)
    })?;
    Ok(HttpRemote::new(url))
}

fn user_id(config: &AppConfig) -> &str {
    config.user_id.as_deref().unwrap_or_default()
}

async fn with_spinner<T>(message: &str, fut: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .expect("static spinner template"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}
