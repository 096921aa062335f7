//! Local JSON persistence for the schedule.
//!
//! On-disk shape: an object mapping `YYYY-MM-DD` to arrays of event
//! objects, plus an optional reserved top-level `"color"` key holding the
//! palette list, which is tolerated on load and passed through on save.
//! Written as UTF-8 with non-ASCII text verbatim.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;

use crate::error::{PlanError, PlanResult};
use crate::event::{Event, parse_date};
use crate::schedule::Schedule;

/// Reserved key: not a date, carries the color palette.
const PALETTE_KEY: &str = "color";

/// Load a schedule from `path`. A missing or empty file yields an empty
/// schedule; per-day lists are re-sorted regardless of file order.
pub fn load(path: &Path) -> PlanResult<Schedule> {
    let raw = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Schedule::new()),
        Err(err) => return Err(err.into()),
    };

    if raw.trim().is_empty() {
        return Ok(Schedule::new());
    }

    let map: serde_json::Map<String, Value> =
        serde_json::from_str(&raw).map_err(|e| PlanError::Serialization(e.to_string()))?;

    let mut schedule = Schedule::new();
    for (key, value) in map {
        if key == PALETTE_KEY {
            let palette: Vec<String> = serde_json::from_value(value)
                .map_err(|e| PlanError::Serialization(e.to_string()))?;
            schedule.set_palette(palette);
            continue;
        }

        let date = parse_date(&key)?;
        let events: Vec<Event> = serde_json::from_value(value)
            .map_err(|e| PlanError::Serialization(e.to_string()))?;
        schedule.insert_day(date, events);
    }

    Ok(schedule)
}

/// Save a schedule to `path` (atomic write: temp file then rename).
/// Days left empty by deletions are dropped; a lookup treats an absent
/// day and an empty one identically.
pub fn save(path: &Path, schedule: &Schedule) -> PlanResult<()> {
    let mut map = serde_json::Map::new();
    for (date, events) in schedule.days() {
        if events.is_empty() {
            continue;
        }
        let value = serde_json::to_value(events)
            .map_err(|e| PlanError::Serialization(e.to_string()))?;
        map.insert(date.format("%Y-%m-%d").to_string(), value);
    }

    if let Some(palette) = schedule.palette() {
        let value = serde_json::to_value(palette)
            .map_err(|e| PlanError::Serialization(e.to_string()))?;
        map.insert(PALETTE_KEY.to_string(), value);
    }

    let content = serde_json::to_string_pretty(&Value::Object(map))
        .map_err(|e| PlanError::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp = path.with_extension("tmp");
    fs::write(&temp, content)?;
    fs::rename(&temp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::parse_time;

    fn event(start: &str, end: &str, theme: &str, description: &str) -> Event {
        Event::new(
            parse_time(start).unwrap(),
            parse_time(end).unwrap(),
            theme,
            description,
            None,
        )
        .unwrap()
    }

    #[test]
    fn missing_file_loads_as_empty_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let schedule = load(&dir.path().join("absent.json")).unwrap();
        assert!(schedule.is_empty());
    }

    #[test]
    fn round_trip_preserves_events_order_and_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");

        let mut schedule = Schedule::new();
        let day = parse_date("2025-03-01").unwrap();
        // Two overlapping events on the same day, one with non-ASCII text.
        schedule.add(day, event("09:00", "10:00", "Math", "Algebra"));
        schedule.add(day, event("09:30", "10:30", "Physics", "Механика"));
        schedule.add(
            parse_date("2025-04-15").unwrap(),
            event("12:00", "13:00", "Lunch", "Café"),
        );

        save(&path, &schedule).unwrap();
        let reloaded = load(&path).unwrap();

        assert_eq!(reloaded, schedule);
        // The file itself keeps non-ASCII characters verbatim.
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Механика"));
        assert!(raw.contains("Café"));
    }

    #[test]
    fn wire_shape_uses_date_keys_and_hh_mm_times() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");

        let mut schedule = Schedule::new();
        schedule.add(
            parse_date("2025-03-01").unwrap(),
            event("09:00", "10:00", "Math", "Algebra"),
        );
        save(&path, &schedule).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let entry = &raw["2025-03-01"][0];
        assert_eq!(entry["start_time"], "09:00");
        assert_eq!(entry["end_time"], "10:00");
        assert_eq!(entry["theme"], "Math");
        assert_eq!(entry["description"], "Algebra");
    }

    #[test]
    fn palette_key_is_tolerated_and_passed_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");

        let raw = r##"{
            "2025-03-01": [
                {"start_time": "09:00", "end_time": "10:00", "theme": "Math", "description": "Algebra"}
            ],
            "color": ["#4CAF50", "#2196F3"]
        }"##;
        fs::write(&path, raw).unwrap();

        let schedule = load(&path).unwrap();
        assert_eq!(
            schedule.palette(),
            Some(["#4CAF50".to_string(), "#2196F3".to_string()].as_slice())
        );

        save(&path, &schedule).unwrap();
        let reloaded: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reloaded["color"][0], "#4CAF50");
    }

    #[test]
    fn unsorted_file_order_is_fixed_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");

        let raw = r#"{
            "2025-03-01": [
                {"start_time": "14:00", "end_time": "15:00", "theme": "Physics", "description": "Late"},
                {"start_time": "09:00", "end_time": "10:00", "theme": "Math", "description": "Early"}
            ]
        }"#;
        fs::write(&path, raw).unwrap();

        let schedule = load(&path).unwrap();
        let day = schedule.events_on(parse_date("2025-03-01").unwrap());
        assert_eq!(day[0].theme, "Math");
        assert_eq!(day[1].theme, "Physics");
    }

    #[test]
    fn malformed_date_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        fs::write(&path, r#"{"03/01/2025": []}"#).unwrap();
        assert!(matches!(load(&path), Err(PlanError::InvalidDate(_))));
    }
}
