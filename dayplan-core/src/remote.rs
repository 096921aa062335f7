//! Remote event-store records and operations.
//!
//! The remote store keeps a flat list of per-event records in camelCase
//! (its own document shape); this module converts between those records and
//! the local `(date, Event)` pairs. The store itself is reached through the
//! [`RemoteStore`] trait so a concrete client is injected explicitly rather
//! than living in ambient global state.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, PlanResult};
use crate::event::{Event, hhmm};

/// Color assigned to pushed events that have no local color tag.
pub const DEFAULT_COLOR: &str = "#007AFF";

/// Stand-ins for remote text fields left empty, so folded events still
/// satisfy the local non-empty invariants.
pub const UNTITLED: &str = "(untitled)";
pub const NO_DESCRIPTION: &str = "(no description)";

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() { fallback } else { value }
}

/// A flat remote event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEvent {
    #[serde(default)]
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub user_id: String,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

impl RemoteEvent {
    /// Flatten a local event into the remote record shape. The remote
    /// carries the theme twice (title and tag) and always has a color.
    pub fn from_local(date: NaiveDate, event: &Event, user_id: &str) -> Self {
        RemoteEvent {
            id: event.id.clone(),
            start_date: date,
            end_date: date,
            start_time: event.start_time,
            end_time: event.end_time,
            title: event.theme.clone(),
            description: event.description.clone(),
            tag: event.theme.clone(),
            color: event.color.clone().unwrap_or_else(default_color),
            all_day: false,
            user_id: user_id.to_string(),
        }
    }

    /// Fold a remote record back into a local `(date, Event)` pair,
    /// validating its fields on the way in. The remote legally omits its
    /// text fields, so empty ones are defaulted deterministically rather
    /// than refusing the record. The remote id is kept so the record
    /// reconciles with itself on the next sync.
    pub fn into_local(self) -> PlanResult<(NaiveDate, Event)> {
        let title = non_empty_or(&self.title, UNTITLED);
        let description = non_empty_or(&self.description, NO_DESCRIPTION);

        let mut event = Event::new(
            self.start_time,
            self.end_time,
            title,
            description,
            Some(self.color),
        )?;
        if !self.id.is_empty() {
            event.id = self.id;
        }
        Ok((self.start_date, event))
    }

    /// Field-wise equality for reconciliation, ignoring bookkeeping the
    /// local side does not own (`user_id`, `all_day`).
    pub fn same_content(&self, other: &RemoteEvent) -> bool {
        self.start_date == other.start_date
            && self.end_date == other.end_date
            && self.start_time == other.start_time
            && self.end_time == other.end_time
            && self.title == other.title
            && self.description == other.description
            && self.tag == other.tag
            && self.color == other.color
    }
}

/// Operations a remote event store must offer.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    async fn list_events(&self) -> PlanResult<Vec<RemoteEvent>>;
    async fn create_event(&self, event: &RemoteEvent) -> PlanResult<()>;
    async fn update_event(&self, event: &RemoteEvent) -> PlanResult<()>;
    async fn delete_event(&self, id: &str) -> PlanResult<()>;
}

/// Guard against remote records missing the id the reconciliation keys on.
pub fn require_id(event: &RemoteEvent) -> PlanResult<&str> {
    if event.id.is_empty() {
        return Err(PlanError::Remote(format!(
            "remote record '{}' has no id",
            event.title
        )));
    }
    Ok(&event.id)
}
