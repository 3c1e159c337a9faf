//! Per-venue weekly schedule and half-hour availability.

use std::collections::BTreeMap;

use serde::Serialize;

use acadmod_model::{Day, Lesson, SemesterModule};

/// First and last half-hour slot of the availability grid.
const FIRST_SLOT_MINUTES: u32 = 6 * 60;
const LAST_SLOT_MINUTES: u32 = 23 * 60 + 30;
const SLOT_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    Vacant,
    Occupied,
}

/// A lesson as seen from the venue: the venue is implied, the module is not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueLesson<'a> {
    pub module_code: &'a str,
    pub lesson_type: &'a str,
    pub class_no: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub week_pattern: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDay<'a> {
    pub day: Day,
    pub classes: Vec<VenueLesson<'a>>,
    pub availability: BTreeMap<String, Occupancy>,
}

fn slot_label(minutes: u32) -> String {
    format!("{:02}{:02}", minutes / 60, minutes % 60)
}

fn availability(classes: &[VenueLesson<'_>]) -> BTreeMap<String, Occupancy> {
    (FIRST_SLOT_MINUTES..=LAST_SLOT_MINUTES)
        .step_by(SLOT_MINUTES as usize)
        .map(|minutes| {
            let slot = slot_label(minutes);
            let occupied = classes
                .iter()
                .any(|class| class.start_time <= slot.as_str() && slot.as_str() < class.end_time);
            let occupancy = if occupied {
                Occupancy::Occupied
            } else {
                Occupancy::Vacant
            };
            (slot, occupancy)
        })
        .collect()
}

fn venue_lesson<'a>(module_code: &'a str, lesson: &'a Lesson) -> VenueLesson<'a> {
    VenueLesson {
        module_code,
        lesson_type: &lesson.lesson_type,
        class_no: &lesson.class_no,
        start_time: &lesson.start_time,
        end_time: &lesson.end_time,
        week_pattern: &lesson.week_pattern,
    }
}

/// Venue → the six school days with the classes held there and slot
/// availability. Lessons without a venue or on Sunday are not listed.
pub fn venue_information(modules: &[SemesterModule]) -> BTreeMap<&str, Vec<VenueDay<'_>>> {
    let mut by_venue: BTreeMap<&str, BTreeMap<Day, Vec<VenueLesson<'_>>>> = BTreeMap::new();
    for module in modules {
        for lesson in &module.timetable {
            if lesson.venue.is_empty() || !Day::SCHOOL_DAYS.contains(&lesson.day) {
                continue;
            }
            by_venue
                .entry(lesson.venue.as_str())
                .or_default()
                .entry(lesson.day)
                .or_default()
                .push(venue_lesson(&module.module_code, lesson));
        }
    }

    by_venue
        .into_iter()
        .map(|(venue, mut days)| {
            let week = Day::SCHOOL_DAYS
                .iter()
                .map(|day| {
                    let mut classes = days.remove(day).unwrap_or_default();
                    classes.sort_by(|a, b| {
                        (a.start_time, a.end_time, a.module_code, a.class_no)
                            .cmp(&(b.start_time, b.end_time, b.module_code, b.class_no))
                    });
                    let availability = availability(&classes);
                    VenueDay {
                        day: *day,
                        classes,
                        availability,
                    }
                })
                .collect();
            (venue, week)
        })
        .collect()
}
