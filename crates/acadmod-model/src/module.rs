//! Consolidated module records.
//!
//! A [`SemesterModule`] is the merged view of one module in one semester; a
//! [`YearModule`] folds up to four of them into the semester-invariant fields
//! plus a per-semester [`SemesterHistory`]. Empty values are never serialized.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Day, InvariantField, Semester};

/// One scheduled class meeting pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub lesson_type: String,
    pub class_no: String,
    pub day: Day,
    /// Four-digit 24h time, e.g. `0800`.
    pub start_time: String,
    pub end_time: String,
    pub week_pattern: String,
    pub venue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamInfo {
    /// ISO-8601 timestamp with the fixed `+08:00` offset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// ISO-8601 duration such as `PT2H`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_book: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
}

impl ExamInfo {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.duration.is_none()
            && self.open_book.is_none()
            && self.venue.is_none()
    }
}

/// Bidding round statistics; the numeric columns vary between rounds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiddingStat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_acct_type: Option<String>,
    #[serde(flatten)]
    pub stats: BTreeMap<String, serde_json::Value>,
}

/// A module as offered in a single semester.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterModule {
    pub module_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cross_module: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corequisite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preclusion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_info: Option<ExamInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timetable: Vec<Lesson>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lecturers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lecture_periods: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tutorial_periods: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bidding_stats: Vec<BiddingStat>,
}

impl SemesterModule {
    pub fn new(module_code: impl Into<String>) -> Self {
        Self {
            module_code: module_code.into(),
            ..Self::default()
        }
    }

    pub fn invariant(&self, field: InvariantField) -> Option<&str> {
        let value = match field {
            InvariantField::Title => &self.title,
            InvariantField::Department => &self.department,
            InvariantField::Description => &self.description,
            InvariantField::Credit => &self.credit,
            InvariantField::Workload => &self.workload,
            InvariantField::Prerequisite => &self.prerequisite,
            InvariantField::Preclusion => &self.preclusion,
            InvariantField::Corequisite => &self.corequisite,
        };
        value.as_deref()
    }
}

/// The semester-specific part of a [`SemesterModule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterHistory {
    pub semester: Semester,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_info: Option<ExamInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timetable: Vec<Lesson>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lecturers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lecture_periods: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tutorial_periods: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bidding_stats: Vec<BiddingStat>,
}

impl SemesterHistory {
    pub fn from_module(semester: Semester, module: &SemesterModule) -> Self {
        Self {
            semester,
            types: module.types.clone(),
            exam_info: module.exam_info.clone(),
            timetable: module.timetable.clone(),
            lecturers: module.lecturers.clone(),
            lecture_periods: module.lecture_periods.clone(),
            tutorial_periods: module.tutorial_periods.clone(),
            bidding_stats: module.bidding_stats.clone(),
        }
    }
}

/// A module across one academic year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearModule {
    pub module_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preclusion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corequisite: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cross_module: Vec<String>,
    pub history: Vec<SemesterHistory>,
}

impl YearModule {
    pub fn invariant(&self, field: InvariantField) -> Option<&str> {
        let value = match field {
            InvariantField::Title => &self.title,
            InvariantField::Department => &self.department,
            InvariantField::Description => &self.description,
            InvariantField::Credit => &self.credit,
            InvariantField::Workload => &self.workload,
            InvariantField::Prerequisite => &self.prerequisite,
            InvariantField::Preclusion => &self.preclusion,
            InvariantField::Corequisite => &self.corequisite,
        };
        value.as_deref()
    }

    pub fn set_invariant(&mut self, field: InvariantField, value: Option<String>) {
        let slot = match field {
            InvariantField::Title => &mut self.title,
            InvariantField::Department => &mut self.department,
            InvariantField::Description => &mut self.description,
            InvariantField::Credit => &mut self.credit,
            InvariantField::Workload => &mut self.workload,
            InvariantField::Prerequisite => &mut self.prerequisite,
            InvariantField::Preclusion => &mut self.preclusion,
            InvariantField::Corequisite => &mut self.corequisite,
        };
        *slot = value;
    }

    /// Semesters the module was offered in, ascending.
    pub fn semesters(&self) -> Vec<Semester> {
        let mut semesters: Vec<Semester> = self.history.iter().map(|entry| entry.semester).collect();
        semesters.sort();
        semesters.dedup();
        semesters
    }
}
