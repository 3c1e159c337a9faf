use std::collections::BTreeSet;

use acadmod_model::SemesterModule;

/// Distinct lesson venues of a semester, sorted, without empty names.
pub fn extract_venues(modules: &[SemesterModule]) -> Vec<String> {
    modules
        .iter()
        .flat_map(|module| &module.timetable)
        .map(|lesson| lesson.venue.as_str())
        .filter(|venue| !venue.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use acadmod_model::{Day, Lesson};

    fn module(code: &str, venues: &[&str]) -> SemesterModule {
        SemesterModule {
            timetable: venues
                .iter()
                .map(|venue| Lesson {
                    lesson_type: "Lecture".to_string(),
                    class_no: "1".to_string(),
                    day: Day::Monday,
                    start_time: "0800".to_string(),
                    end_time: "1000".to_string(),
                    week_pattern: "Every Week".to_string(),
                    venue: venue.to_string(),
                })
                .collect(),
            ..SemesterModule::new(code)
        }
    }

    #[test]
    fn venues_are_sorted_unique_and_non_empty() {
        let modules = vec![
            module("CS1010", &["LT19", "", "COM1-0208"]),
            module("CS1231", &["LT19", "I3-AUD"]),
        ];
        assert_eq!(extract_venues(&modules), vec!["COM1-0208", "I3-AUD", "LT19"]);
    }

    #[test]
    fn no_lessons_no_venues() {
        assert!(extract_venues(&[SemesterModule::new("CS1010")]).is_empty());
    }
}
