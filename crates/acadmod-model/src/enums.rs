//! Closed vocabularies shared by every pipeline stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Canonical lesson day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Days on which lessons are normally scheduled.
    pub const SCHOOL_DAYS: [Day; 6] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = ModelError;

    /// Case-insensitive; accepts full names and three-letter abbreviations.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| {
                let name = day.as_str().to_ascii_lowercase();
                normalized == name || (normalized.len() == 3 && name.starts_with(&normalized))
            })
            .ok_or_else(|| ModelError::InvalidDay(s.to_string()))
    }
}

/// Part of the day a lesson starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
}

impl DayPeriod {
    /// Classifies a four-digit start time: before `1200` is morning, before
    /// `1800` afternoon, anything later evening.
    pub fn from_start_time(start_time: &str) -> Self {
        if start_time < "1200" {
            DayPeriod::Morning
        } else if start_time < "1800" {
            DayPeriod::Afternoon
        } else {
            DayPeriod::Evening
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
        }
    }
}

impl fmt::Display for DayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a lesson type in the lesson-type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonKind {
    Lecture,
    Tutorial,
}

impl FromStr for LessonKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lecture" => Ok(LessonKind::Lecture),
            "Tutorial" => Ok(LessonKind::Tutorial),
            other => Err(ModelError::InvalidLessonKind(other.to_string())),
        }
    }
}

/// Scraped source categories, one JSON file each per (year, semester).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataCategory {
    BulletinModules,
    Cors,
    CorsBiddingStats,
    ExamTimetable,
    ModuleTimetableDelta,
    Ivle,
}

impl DataCategory {
    pub const ALL: [DataCategory; 6] = [
        DataCategory::BulletinModules,
        DataCategory::Cors,
        DataCategory::CorsBiddingStats,
        DataCategory::ExamTimetable,
        DataCategory::ModuleTimetableDelta,
        DataCategory::Ivle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::BulletinModules => "bulletinModules",
            DataCategory::Cors => "cors",
            DataCategory::CorsBiddingStats => "corsBiddingStats",
            DataCategory::ExamTimetable => "examTimetable",
            DataCategory::ModuleTimetableDelta => "moduleTimetableDelta",
            DataCategory::Ivle => "ivle",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DataCategory::BulletinModules => "Course bulletin modules",
            DataCategory::Cors => "Bidding-system module records",
            DataCategory::CorsBiddingStats => "Bidding statistics",
            DataCategory::ExamTimetable => "Exam schedule",
            DataCategory::ModuleTimetableDelta => "Timetable change log",
            DataCategory::Ivle => "Enrollment and lecturer records",
        }
    }

    pub fn default_file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    /// Primary categories define which module codes exist in a semester.
    pub fn is_primary(&self) -> bool {
        matches!(self, DataCategory::BulletinModules | DataCategory::Cors)
    }

    /// List categories hold many records per module code.
    pub fn is_grouped(&self) -> bool {
        matches!(
            self,
            DataCategory::CorsBiddingStats | DataCategory::ModuleTimetableDelta
        )
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that describe a module independently of the semester it runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvariantField {
    Title,
    Department,
    Description,
    Credit,
    Workload,
    Prerequisite,
    Preclusion,
    Corequisite,
}

impl InvariantField {
    pub const ALL: [InvariantField; 8] = [
        InvariantField::Title,
        InvariantField::Department,
        InvariantField::Description,
        InvariantField::Credit,
        InvariantField::Workload,
        InvariantField::Prerequisite,
        InvariantField::Preclusion,
        InvariantField::Corequisite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvariantField::Title => "title",
            InvariantField::Department => "department",
            InvariantField::Description => "description",
            InvariantField::Credit => "credit",
            InvariantField::Workload => "workload",
            InvariantField::Prerequisite => "prerequisite",
            InvariantField::Preclusion => "preclusion",
            InvariantField::Corequisite => "corequisite",
        }
    }
}

impl fmt::Display for InvariantField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parses_case_insensitively() {
        assert_eq!("MONDAY".parse::<Day>(), Ok(Day::Monday));
        assert_eq!("fri".parse::<Day>(), Ok(Day::Friday));
        assert!("Funday".parse::<Day>().is_err());
    }

    #[test]
    fn periods_follow_start_time() {
        assert_eq!(DayPeriod::from_start_time("0800"), DayPeriod::Morning);
        assert_eq!(DayPeriod::from_start_time("1200"), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_start_time("1759"), DayPeriod::Afternoon);
        assert_eq!(DayPeriod::from_start_time("1800"), DayPeriod::Evening);
    }

    #[test]
    fn grouped_categories() {
        let grouped: Vec<_> = DataCategory::ALL
            .into_iter()
            .filter(DataCategory::is_grouped)
            .collect();
        assert_eq!(
            grouped,
            vec![
                DataCategory::CorsBiddingStats,
                DataCategory::ModuleTimetableDelta
            ]
        );
        assert_eq!(DataCategory::Ivle.default_file_name(), "ivle.json");
    }
}
