//! The schedule store: events grouped by day, with search and filtering.
//!
//! This is the single source of truth every surface queries and mutates.
//! Per-day lists are kept sorted ascending by start time after every
//! mutation; the sort is stable, so equal start times keep insertion order.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveTime};

use crate::event::{Event, EventKey, overlaps};
use crate::search::Normalizer;

/// A filtered, read-only view of the schedule (search and range results).
pub type DayMap = BTreeMap<NaiveDate, Vec<Event>>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    days: BTreeMap<NaiveDate, Vec<Event>>,
    /// Auxiliary list of known display colors, carried through persistence
    /// unchanged when present (richer UIs keep their palette here).
    palette: Option<Vec<String>>,
}

impl Schedule {
    pub fn new() -> Self {
        Schedule::default()
    }

    /// Append an event to its day, then restore the sort invariant.
    /// Structurally identical events may coexist.
    pub fn add(&mut self, date: NaiveDate, event: Event) {
        let events = self.days.entry(date).or_default();
        events.push(event);
        events.sort_by_key(|e| e.start_time);
    }

    /// Replace a whole day at once (used when loading), sorting it once.
    pub fn insert_day(&mut self, date: NaiveDate, mut events: Vec<Event>) {
        events.sort_by_key(|e| e.start_time);
        self.days.insert(date, events);
    }

    /// Remove the first event on `date` matching `key`, in list order.
    /// Returns the removed event, or `None` when nothing matched.
    pub fn remove(&mut self, date: NaiveDate, key: &EventKey) -> Option<Event> {
        let events = self.days.get_mut(&date)?;
        let index = events.iter().position(|e| e.matches_key(key))?;
        let removed = events.remove(index);
        if events.is_empty() {
            self.days.remove(&date);
        }
        Some(removed)
    }

    /// Replace the fields of the first event matching `key` with those of
    /// `changes`, keeping the stored event's id, then re-sort the day.
    ///
    /// Returns `false` without inserting anything when no event matches;
    /// an edit miss is reported to the caller instead of silently creating
    /// a duplicate.
    pub fn update(&mut self, date: NaiveDate, key: &EventKey, changes: Event) -> bool {
        let Some(events) = self.days.get_mut(&date) else {
            return false;
        };
        let Some(target) = events.iter_mut().find(|e| e.matches_key(key)) else {
            return false;
        };

        apply_changes(target, changes);
        events.sort_by_key(|e| e.start_time);
        true
    }

    /// Id-addressed variant of [`Schedule::update`].
    pub fn update_by_id(&mut self, date: NaiveDate, id: &str, changes: Event) -> bool {
        let Some(events) = self.days.get_mut(&date) else {
            return false;
        };
        let Some(target) = events.iter_mut().find(|e| e.id == id) else {
            return false;
        };

        apply_changes(target, changes);
        events.sort_by_key(|e| e.start_time);
        true
    }

    /// Events on `date`, sorted by start time. Absent dates yield an empty
    /// slice, never an error.
    pub fn events_on(&self, date: NaiveDate) -> &[Event] {
        self.days.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Read-only view of the full day map. Callers must not rely on
    /// mutating clones of this to affect the store.
    pub fn days(&self) -> &BTreeMap<NaiveDate, Vec<Event>> {
        &self.days
    }

    pub fn palette(&self) -> Option<&[String]> {
        self.palette.as_deref()
    }

    pub fn set_palette(&mut self, palette: Vec<String>) {
        self.palette = Some(palette);
    }

    pub fn event_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }

    /// Distinct themes across the whole schedule, sorted.
    pub fn themes(&self) -> BTreeSet<String> {
        self.days
            .values()
            .flatten()
            .map(|e| e.theme.clone())
            .collect()
    }

    /// Events on `date` whose open interval intersects `[start, end)`,
    /// optionally ignoring one event by id (so an edit does not clash with
    /// itself). Advisory only: the store never rejects overlapping events.
    pub fn conflicts(
        &self,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude_id: Option<&str>,
    ) -> Vec<&Event> {
        self.events_on(date)
            .iter()
            .filter(|e| exclude_id != Some(e.id.as_str()))
            .filter(|e| overlaps(start, end, e.start_time, e.end_time))
            .collect()
    }

    /// Case-insensitive substring search over theme and description, both
    /// sides passed through `normalizer` first. Days with no matches are
    /// omitted; matches keep their sorted order.
    pub fn search<N: Normalizer>(&self, term: &str, normalizer: &N) -> DayMap {
        let needle = normalizer.normalize(term);

        let mut results = BTreeMap::new();
        for (date, events) in &self.days {
            let matches: Vec<Event> = events
                .iter()
                .filter(|e| {
                    normalizer.normalize(&e.theme).contains(&needle)
                        || normalizer.normalize(&e.description).contains(&needle)
                })
                .cloned()
                .collect();

            if !matches.is_empty() {
                results.insert(*date, matches);
            }
        }
        results
    }

    /// Restrict to days in `[start_date, end_date]` (inclusive), and when a
    /// theme is given, to events whose theme equals it exactly. Unlike
    /// search, the theme filter is exact and case-sensitive.
    pub fn range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        theme: Option<&str>,
    ) -> DayMap {
        let mut results = BTreeMap::new();
        if start_date > end_date {
            return results;
        }
        for (date, events) in self.days.range(start_date..=end_date) {
            let mut matches: Vec<Event> = events
                .iter()
                .filter(|e| theme.is_none_or(|t| e.theme == t))
                .cloned()
                .collect();

            if !matches.is_empty() {
                // Re-sort rather than trusting the source was sorted, in
                // case the map was built outside the store.
                matches.sort_by_key(|e| e.start_time);
                results.insert(*date, matches);
            }
        }
        results
    }
}

fn apply_changes(target: &mut Event, changes: Event) {
    target.start_time = changes.start_time;
    target.end_time = changes.end_time;
    target.theme = changes.theme;
    target.description = changes.description;
    target.color = changes.color;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{parse_date, parse_time};
    use crate::search::{CaseFold, SuffixStemmer};

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw).unwrap()
    }

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

    fn sample() -> Schedule {
        let mut schedule = Schedule::new();
        let day = date("2025-03-01");
        schedule.add(day, event("14:00", "15:00", "Physics", "Mechanics lecture"));
        schedule.add(day, event("09:00", "10:00", "Math", "Algebra"));
        schedule.add(date("2025-03-02"), event("11:00", "12:00", "Math", "Geometry"));
        schedule
    }

    #[test]
    fn days_stay_sorted_by_start_time_after_adds() {
        let schedule = sample();
        let starts: Vec<_> = schedule
            .events_on(date("2025-03-01"))
            .iter()
            .map(|e| e.start_time)
            .collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(schedule.events_on(date("2025-03-01"))[0].theme, "Math");
    }

    #[test]
    fn missing_date_yields_empty_slice() {
        let schedule = sample();
        assert!(schedule.events_on(date("1999-01-01")).is_empty());
    }

    #[test]
    fn identical_events_may_coexist() {
        let mut schedule = Schedule::new();
        let day = date("2025-03-01");
        schedule.add(day, event("09:00", "10:00", "Math", "Algebra"));
        schedule.add(day, event("09:00", "10:00", "Math", "Algebra"));
        assert_eq!(schedule.events_on(day).len(), 2);
    }

    #[test]
    fn remove_takes_the_first_match_only() {
        let mut schedule = Schedule::new();
        let day = date("2025-03-01");
        schedule.add(day, event("09:00", "10:00", "Math", "Algebra"));
        schedule.add(day, event("09:00", "10:00", "Math", "Algebra"));

        let key = EventKey::from(&schedule.events_on(day)[0]);
        let first_id = schedule.events_on(day)[0].id.clone();
        let removed = schedule.remove(day, &key).unwrap();

        assert_eq!(removed.id, first_id);
        assert_eq!(schedule.events_on(day).len(), 1);
    }

    #[test]
    fn remove_of_absent_tuple_is_a_noop_twice() {
        let mut schedule = sample();
        let key = EventKey::from(&event("08:00", "08:30", "Chemistry", "Lab"));

        let before = schedule.clone();
        assert!(schedule.remove(date("2025-03-01"), &key).is_none());
        assert_eq!(schedule, before);
        assert!(schedule.remove(date("2025-03-01"), &key).is_none());
        assert_eq!(schedule, before);
    }

    #[test]
    fn update_replaces_in_place_and_keeps_the_id() {
        let mut schedule = sample();
        let day = date("2025-03-01");
        let original = schedule.events_on(day)[0].clone();
        let key = EventKey::from(&original);

        let updated = schedule.update(day, &key, event("16:00", "17:00", "Math", "Calculus"));
        assert!(updated);

        assert_eq!(schedule.events_on(day).len(), 2);
        let moved = schedule
            .events_on(day)
            .iter()
            .find(|e| e.description == "Calculus")
            .unwrap();
        assert_eq!(moved.id, original.id);
        // Resorted: the edited event now ends the day.
        assert_eq!(schedule.events_on(day).last().unwrap().id, original.id);
    }

    #[test]
    fn update_miss_inserts_nothing() {
        let mut schedule = sample();
        let key = EventKey::from(&event("08:00", "08:30", "Chemistry", "Lab"));

        let before = schedule.clone();
        let updated = schedule.update(
            date("2025-03-01"),
            &key,
            event("16:00", "17:00", "Chemistry", "Lab"),
        );

        assert!(!updated);
        assert_eq!(schedule, before);
    }

    #[test]
    fn matched_update_equals_remove_then_add() {
        let day = date("2025-03-01");
        let old_key = EventKey::from(&event("09:00", "10:00", "Math", "Algebra"));
        let replacement = event("16:00", "17:00", "Math", "Calculus");

        let mut edited = sample();
        assert!(edited.update(day, &old_key, replacement.clone()));

        let mut manual = sample();
        manual.remove(day, &old_key).unwrap();
        manual.add(day, replacement);

        let strip = |s: &Schedule| -> Vec<(NaiveDate, Vec<(NaiveTime, String, String)>)> {
            s.days()
                .iter()
                .map(|(d, events)| {
                    let rows = events
                        .iter()
                        .map(|e| (e.start_time, e.theme.clone(), e.description.clone()))
                        .collect();
                    (*d, rows)
                })
                .collect()
        };
        // Ids differ between the two paths; the visible rows must not.
        assert_eq!(strip(&edited), strip(&manual));
    }

    #[test]
    fn update_by_id_misses_on_unknown_id() {
        let mut schedule = sample();
        let before = schedule.clone();
        assert!(!schedule.update_by_id(
            date("2025-03-01"),
            "no-such-id",
            event("16:00", "17:00", "Math", "Calculus"),
        ));
        assert_eq!(schedule, before);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let schedule = sample();

        let results = schedule.search("mech", &CaseFold);
        assert_eq!(results.len(), 1);
        assert_eq!(results[&date("2025-03-01")][0].theme, "Physics");

        let by_theme = schedule.search("MATH", &CaseFold);
        assert_eq!(by_theme.len(), 2);
    }

    #[test]
    fn search_with_no_matches_returns_empty_map() {
        let schedule = sample();
        assert!(schedule.search("zzz_no_such_token", &CaseFold).is_empty());
    }

    #[test]
    fn search_preserves_day_order_among_matches() {
        let mut schedule = Schedule::new();
        let day = date("2025-03-01");
        schedule.add(day, event("14:00", "15:00", "Math", "Calculus"));
        schedule.add(day, event("09:00", "10:00", "Math", "Algebra"));

        let results = schedule.search("math", &CaseFold);
        let starts: Vec<_> = results[&day].iter().map(|e| e.start_time).collect();
        assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn fuzzy_search_matches_inflected_forms() {
        let mut schedule = Schedule::new();
        let day = date("2025-03-01");
        schedule.add(day, event("09:00", "10:00", "Work", "Weekly meetings with the tutor"));

        assert!(schedule.search("meeting", &CaseFold).len() == 1);
        assert!(schedule.search("meetings", &SuffixStemmer).len() == 1);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut schedule = Schedule::new();
        schedule.add(date("2025-01-01"), event("09:00", "10:00", "Math", "A"));
        schedule.add(date("2025-01-08"), event("09:00", "10:00", "Math", "B"));
        schedule.add(date("2025-01-09"), event("09:00", "10:00", "Math", "C"));

        let results = schedule.range(date("2025-01-01"), date("2025-01-08"), None);
        let days: Vec<_> = results.keys().copied().collect();
        assert_eq!(days, vec![date("2025-01-01"), date("2025-01-08")]);
    }

    #[test]
    fn range_handles_month_rollover() {
        let mut schedule = Schedule::new();
        schedule.add(date("2025-01-31"), event("09:00", "10:00", "Math", "A"));
        schedule.add(date("2025-02-01"), event("09:00", "10:00", "Math", "B"));

        let results = schedule.range(date("2025-01-31"), date("2025-02-01"), None);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn range_theme_filter_is_exact_and_case_sensitive() {
        let schedule = sample();
        let from = date("2025-03-01");
        let to = date("2025-03-31");

        let math = schedule.range(from, to, Some("Math"));
        assert_eq!(math.len(), 2);
        assert!(math.values().flatten().all(|e| e.theme == "Math"));

        assert!(schedule.range(from, to, Some("math")).is_empty());
        assert!(schedule.range(from, to, Some("Mat")).is_empty());
    }

    #[test]
    fn conflicts_reports_overlaps_and_respects_exclusion() {
        let mut schedule = Schedule::new();
        let day = date("2025-03-01");
        schedule.add(day, event("09:00", "10:00", "Math", "Algebra"));

        let start = parse_time("09:30").unwrap();
        let end = parse_time("10:30").unwrap();
        let clashes = schedule.conflicts(day, start, end, None);
        assert_eq!(clashes.len(), 1);
        assert_eq!(clashes[0].theme, "Math");

        let existing_id = schedule.events_on(day)[0].id.clone();
        assert!(schedule.conflicts(day, start, end, Some(&existing_id)).is_empty());
    }

    #[test]
    fn overlapping_add_scenario_keeps_both_events_ordered() {
        let mut schedule = Schedule::new();
        let day = date("2025-03-01");
        schedule.add(day, event("09:00", "10:00", "Math", "Algebra"));

        let second = event("09:30", "10:30", "Physics", "Mechanics");
        // The caller asks first; the store reports the clash but accepts
        // the insert once the user confirms.
        assert_eq!(
            schedule.conflicts(day, second.start_time, second.end_time, None).len(),
            1
        );
        schedule.add(day, second);

        let themes: Vec<_> = schedule.events_on(day).iter().map(|e| e.theme.as_str()).collect();
        assert_eq!(themes, vec!["Math", "Physics"]);
    }

    #[test]
    fn themes_are_distinct_and_sorted() {
        let schedule = sample();
        let themes: Vec<_> = schedule.themes().into_iter().collect();
        assert_eq!(themes, vec!["Math".to_string(), "Physics".to_string()]);
    }
}
