//! Timetable change-log reduction.
//!
//! The change log holds every observation of a lesson slot over time. Only the
//! most recent observation per slot counts; deleted slots and Sunday
//! placeholders are then discarded.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use acadmod_ingest::TimetableDelta;

use super::lesson::normalize_lesson_type;
use super::text::{clean, titleize};
use super::time::normalize_time;

/// Day code the change log uses for placeholder rows.
const PLACEHOLDER_DAY_CODE: &str = "7";

/// Leading numeric run of a modification stamp, used for ordering.
fn stamp_value(stamp: Option<&str>) -> u128 {
    stamp
        .unwrap_or_default()
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect::<String>()
        .parse()
        .unwrap_or(0)
}

fn newest_first(a: &TimetableDelta, b: &TimetableDelta) -> Ordering {
    stamp_value(b.last_modified.as_deref())
        .cmp(&stamp_value(a.last_modified.as_deref()))
        .then_with(|| b.last_modified.cmp(&a.last_modified))
}

/// Slot identity: (day, start, end, lesson type, class number).
fn slot_key(delta: &TimetableDelta) -> (String, String, String, String, String) {
    (
        titleize(&clean(delta.day_text.as_deref().unwrap_or_default())),
        normalize_time(delta.start_time.as_deref().unwrap_or_default()),
        normalize_time(delta.end_time.as_deref().unwrap_or_default()),
        normalize_lesson_type(delta.lesson_type.as_deref()),
        clean(delta.class_no.as_deref().unwrap_or_default()),
    )
}

/// Keeps the latest live observation of each lesson slot.
///
/// The result is ordered newest first; ties keep their input order.
pub fn latest_observations(deltas: &[TimetableDelta]) -> Vec<&TimetableDelta> {
    let mut ordered: Vec<&TimetableDelta> = deltas.iter().collect();
    ordered.sort_by(|a, b| newest_first(a, b));

    let mut seen = BTreeSet::new();
    ordered
        .into_iter()
        .filter(|delta| seen.insert(slot_key(delta)))
        .filter(|delta| !delta.is_delete)
        .filter(|delta| {
            delta.day_code.as_deref().map(str::trim) != Some(PLACEHOLDER_DAY_CODE)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(modified: &str, class_no: &str, venue: &str) -> TimetableDelta {
        TimetableDelta {
            module_code: Some("CS1010".to_string()),
            last_modified: Some(modified.to_string()),
            day_code: Some("1".to_string()),
            day_text: Some("MONDAY".to_string()),
            start_time: Some("800".to_string()),
            end_time: Some("1000".to_string()),
            lesson_type: Some("LECTURE".to_string()),
            class_no: Some(class_no.to_string()),
            week_text: Some("EVERY WEEK".to_string()),
            venue: Some(venue.to_string()),
            is_delete: false,
        }
    }

    #[test]
    fn latest_observation_wins() {
        let deltas = vec![
            delta("/Date(1470000000000)/", "1", "LT1"),
            delta("/Date(1480000000000)/", "1", "LT2"),
            delta("/Date(1460000000000)/", "1", "LT3"),
        ];
        let latest = latest_observations(&deltas);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].venue.as_deref(), Some("LT2"));
    }

    #[test]
    fn deleted_latest_observation_removes_slot() {
        let mut removed = delta("1480000000000", "1", "LT2");
        removed.is_delete = true;
        let deltas = vec![delta("1470000000000", "1", "LT1"), removed];
        assert!(latest_observations(&deltas).is_empty());
    }

    #[test]
    fn sunday_placeholders_are_dropped() {
        let mut placeholder = delta("1480000000000", "2", "");
        placeholder.day_code = Some("7".to_string());
        placeholder.day_text = Some("SUNDAY".to_string());
        let deltas = vec![placeholder, delta("1470000000000", "1", "LT1")];
        let latest = latest_observations(&deltas);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].class_no.as_deref(), Some("1"));
    }
}
