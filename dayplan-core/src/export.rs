//! Tabular export of the schedule.
//!
//! Consumes the day map (full or filtered) and produces a text document
//! with columns Date, Start Time, End Time, Theme, Description, rows
//! ordered by date then start time.

use crate::event::Event;
use crate::schedule::DayMap;

const HEADERS: [&str; 5] = ["Date", "Start Time", "End Time", "Theme", "Description"];

/// Rows in export order: ascending date, then ascending start time. The
/// day map iterates dates in order already; each day is re-sorted rather
/// than trusted, since filtered maps may come from outside the store.
fn rows(days: &DayMap) -> Vec<[String; 5]> {
    let mut out = Vec::new();
    for (date, events) in days {
        let mut events: Vec<&Event> = events.iter().collect();
        events.sort_by_key(|e| e.start_time);
        for event in events {
            out.push([
                date.format("%Y-%m-%d").to_string(),
                event.start_time.format("%H:%M").to_string(),
                event.end_time.format("%H:%M").to_string(),
                event.theme.clone(),
                event.description.clone(),
            ]);
        }
    }
    out
}

/// RFC 4180 style CSV: fields containing commas, quotes, or newlines are
/// quoted, embedded quotes doubled.
pub fn render_csv(days: &DayMap) -> String {
    let mut lines = vec![HEADERS.map(csv_field).join(",")];
    for row in rows(days) {
        lines.push(row.iter().map(|f| csv_field(f)).collect::<Vec<_>>().join(","));
    }
    lines.join("\n") + "\n"
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// GitHub-flavored pipe table.
pub fn render_markdown(days: &DayMap) -> String {
    let mut lines = vec![
        format!("| {} |", HEADERS.join(" | ")),
        format!("|{}|", HEADERS.map(|_| " --- ").join("|")),
    ];
    for row in rows(days) {
        let cells: Vec<String> = row.iter().map(|f| f.replace('|', "\\|")).collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }
    lines.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{parse_date, parse_time};
    use crate::schedule::Schedule;

    fn sample() -> DayMap {
        let mut schedule = Schedule::new();
        let day = parse_date("2025-03-01").unwrap();
        schedule.add(
            day,
            Event::new(
                parse_time("14:00").unwrap(),
                parse_time("15:00").unwrap(),
                "Physics",
                "Mechanics, part 1",
                None,
            )
            .unwrap(),
        );
        schedule.add(
            day,
            Event::new(
                parse_time("09:00").unwrap(),
                parse_time("10:00").unwrap(),
                "Math",
                "Algebra",
                None,
            )
            .unwrap(),
        );
        schedule.days().clone()
    }

    #[test]
    fn csv_orders_rows_and_quotes_commas() {
        let csv = render_csv(&sample());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Start Time,End Time,Theme,Description");
        assert_eq!(lines[1], "2025-03-01,09:00,10:00,Math,Algebra");
        assert_eq!(lines[2], "2025-03-01,14:00,15:00,Physics,\"Mechanics, part 1\"");
    }

    #[test]
    fn csv_doubles_embedded_quotes() {
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }

    #[test]
    fn markdown_table_has_header_separator_and_rows() {
        let markdown = render_markdown(&sample());
        let lines: Vec<&str> = markdown.lines().collect();
        assert_eq!(lines[0], "| Date | Start Time | End Time | Theme | Description |");
        assert!(lines[1].starts_with("| ---"));
        assert!(lines[2].contains("| Math |"));
        assert_eq!(lines.len(), 4);
    }
}
