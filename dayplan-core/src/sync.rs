//! Reconciliation between the local schedule and a remote store.
//!
//! Instead of wiping the remote and re-uploading everything, the diff is
//! computed per event id and only the changed records are touched: a
//! failure partway through leaves every untouched record intact.

use std::collections::HashMap;

use crate::error::PlanResult;
use crate::remote::{RemoteEvent, RemoteStore, require_id};
use crate::schedule::Schedule;

/// The remote-side work needed to make the remote match the local schedule.
#[derive(Debug, Default)]
pub struct SyncDiff {
    pub to_create: Vec<RemoteEvent>,
    pub to_update: Vec<RemoteEvent>,
    pub to_delete: Vec<RemoteEvent>,
}

impl SyncDiff {
    /// Partition by id: local-only ids are created, remote-only ids are
    /// deleted, shared ids with differing content are updated. Records the
    /// local side would push keep the `user_id` of their remote
    /// counterpart so ownership bookkeeping never flips.
    pub fn between(schedule: &Schedule, remote: &[RemoteEvent], user_id: &str) -> Self {
        let local = flatten(schedule, user_id);

        let local_by_id: HashMap<&str, &RemoteEvent> =
            local.iter().map(|e| (e.id.as_str(), e)).collect();
        let remote_by_id: HashMap<&str, &RemoteEvent> =
            remote.iter().map(|e| (e.id.as_str(), e)).collect();

        let mut diff = SyncDiff::default();

        for record in &local {
            match remote_by_id.get(record.id.as_str()) {
                None => diff.to_create.push(record.clone()),
                Some(existing) if !record.same_content(existing) => {
                    let mut update = record.clone();
                    update.user_id = existing.user_id.clone();
                    diff.to_update.push(update);
                }
                Some(_) => {}
            }
        }

        for record in remote {
            if !local_by_id.contains_key(record.id.as_str()) {
                diff.to_delete.push(record.clone());
            }
        }

        diff
    }

    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }

    /// (created, updated, deleted)
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.to_create.len(),
            self.to_update.len(),
            self.to_delete.len(),
        )
    }

    /// Apply the diff against the remote store, creates first, deletes
    /// last. Stops at the first failure; already-applied records stand.
    pub async fn apply<R: RemoteStore>(&self, remote: &R) -> PlanResult<()> {
        for record in &self.to_create {
            remote.create_event(record).await?;
        }
        for record in &self.to_update {
            remote.update_event(record).await?;
        }
        for record in &self.to_delete {
            remote.delete_event(require_id(record)?).await?;
        }
        Ok(())
    }
}

/// Flatten the schedule into remote-shaped records.
pub fn flatten(schedule: &Schedule, user_id: &str) -> Vec<RemoteEvent> {
    schedule
        .days()
        .iter()
        .flat_map(|(date, events)| {
            events
                .iter()
                .map(|event| RemoteEvent::from_local(*date, event, user_id))
        })
        .collect()
}

/// Fold a flat remote list into the canonical schedule shape, grouping by
/// start date and collecting the distinct colors into the palette.
pub fn fold(records: Vec<RemoteEvent>) -> PlanResult<Schedule> {
    let mut schedule = Schedule::new();
    let mut palette: Vec<String> = Vec::new();

    for record in records {
        let color = record.color.clone();
        if !palette.contains(&color) {
            palette.push(color);
        }

        let (date, event) = record.into_local()?;
        schedule.add(date, event);
    }

    if !palette.is_empty() {
        schedule.set_palette(palette);
    }

    Ok(schedule)
}
