//! Event model, field validation, and the interval overlap rule.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PlanError, PlanResult};

/// Serde adapter for the `HH:MM` wire format.
///
/// The fixed width and zero padding make lexicographic order on the
/// serialized form agree with chronological order.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .map_err(|_| D::Error::custom(format!("invalid time '{raw}', expected HH:MM")))
    }
}

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// A scheduled event on a single day.
///
/// The `id` is a locally generated stable identifier (schedule files written
/// by older tools may lack it, in which case a fresh one is assigned on
/// load). Times are plain wall-clock values with no timezone attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default = "generate_id")]
    pub id: String,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub theme: String,
    pub description: String,
    /// Display color tag, carried through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Event {
    /// Build a validated event. Theme and description are trimmed and must
    /// be non-empty; `start_time` must be strictly before `end_time`.
    pub fn new(
        start_time: NaiveTime,
        end_time: NaiveTime,
        theme: &str,
        description: &str,
        color: Option<String>,
    ) -> PlanResult<Self> {
        let theme = theme.trim();
        if theme.is_empty() {
            return Err(PlanError::EmptyField("Theme"));
        }

        let description = description.trim();
        if description.is_empty() {
            return Err(PlanError::EmptyField("Description"));
        }

        if start_time >= end_time {
            return Err(PlanError::TimeOrder {
                start: start_time.format("%H:%M").to_string(),
                end: end_time.format("%H:%M").to_string(),
            });
        }

        Ok(Event {
            id: generate_id(),
            start_time,
            end_time,
            theme: theme.to_string(),
            description: description.to_string(),
            color,
        })
    }

    /// Whether this event's open interval intersects `other`'s.
    pub fn overlaps(&self, other: &Event) -> bool {
        overlaps(self.start_time, self.end_time, other.start_time, other.end_time)
    }

    pub fn matches_key(&self, key: &EventKey) -> bool {
        let color_matches = match &key.color {
            Some(color) => self.color.as_deref() == Some(color.as_str()),
            None => true,
        };

        self.start_time == key.start_time
            && self.end_time == key.end_time
            && self.theme == key.theme
            && self.description == key.description
            && color_matches
    }

    pub fn time_span(&self) -> String {
        format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// The tuple that identifies an event for tuple-addressed delete and edit.
///
/// Events carry no caller-visible surrogate key in this addressing mode, so
/// two identical events are indistinguishable; operations act on the first
/// match in list order. A `None` color matches any stored color.
#[derive(Debug, Clone, PartialEq)]
pub struct EventKey {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub theme: String,
    pub description: String,
    pub color: Option<String>,
}

impl From<&Event> for EventKey {
    fn from(event: &Event) -> Self {
        EventKey {
            start_time: event.start_time,
            end_time: event.end_time,
            theme: event.theme.clone(),
            description: event.description.clone(),
            color: event.color.clone(),
        }
    }
}

/// Open-interval intersection test. Touching intervals do not overlap.
pub fn overlaps(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// Parse a `YYYY-MM-DD` date, rejecting calendar-invalid values.
pub fn parse_date(raw: &str) -> PlanResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| PlanError::InvalidDate(raw.trim().to_string()))
}

/// Parse an `HH:MM` time.
pub fn parse_time(raw: &str) -> PlanResult<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| PlanError::InvalidTime(raw.trim().to_string()))
}
