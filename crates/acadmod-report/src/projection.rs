//! Read-only projections of the year records.
//!
//! Every projection is a pure view of [`YearModule`]s; nothing is recomputed
//! beyond selecting fields, so all upstream invariants carry over.

use serde::Serialize;

use acadmod_model::{Lesson, Semester, SemesterModule, YearModule};

fn is_empty(values: &&[String]) -> bool {
    values.is_empty()
}

/// One row of `moduleList.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleListEntry<'a> {
    pub module_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    pub semesters: Vec<Semester>,
}

/// History entry of the lightweight information index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InformationHistory<'a> {
    pub semester: Semester,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_duration: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty")]
    pub types: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    pub lecture_periods: &'a [String],
    #[serde(skip_serializing_if = "is_empty")]
    pub tutorial_periods: &'a [String],
}

/// One row of `moduleInformation.json`: invariant fields plus a history
/// without timetables, lecturers or bidding statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInformation<'a> {
    pub module_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preclusion: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corequisite: Option<&'a str>,
    #[serde(skip_serializing_if = "is_empty")]
    pub cross_module: &'a [String],
    pub history: Vec<InformationHistory<'a>>,
}

/// One entry of `modules/<code>/timetable.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterTimetable<'a> {
    pub semester: Semester,
    pub timetable: &'a [Lesson],
}

pub fn module_list(modules: &[YearModule]) -> Vec<ModuleListEntry<'_>> {
    modules
        .iter()
        .map(|module| ModuleListEntry {
            module_code: &module.module_code,
            title: module.title.as_deref(),
            semesters: module.semesters(),
        })
        .collect()
}

pub fn module_information(modules: &[YearModule]) -> Vec<ModuleInformation<'_>> {
    modules
        .iter()
        .map(|module| ModuleInformation {
            module_code: &module.module_code,
            title: module.title.as_deref(),
            department: module.department.as_deref(),
            description: module.description.as_deref(),
            credit: module.credit.as_deref(),
            workload: module.workload.as_deref(),
            prerequisite: module.prerequisite.as_deref(),
            preclusion: module.preclusion.as_deref(),
            corequisite: module.corequisite.as_deref(),
            cross_module: &module.cross_module,
            history: module
                .history
                .iter()
                .map(|entry| {
                    let exam = entry.exam_info.as_ref();
                    InformationHistory {
                        semester: entry.semester,
                        exam_date: exam.and_then(|exam| exam.date.as_deref()),
                        exam_duration: exam.and_then(|exam| exam.duration.as_deref()),
                        types: &entry.types,
                        lecture_periods: &entry.lecture_periods,
                        tutorial_periods: &entry.tutorial_periods,
                    }
                })
                .collect(),
        })
        .collect()
}

pub fn module_timetables(module: &YearModule) -> Vec<SemesterTimetable<'_>> {
    module
        .history
        .iter()
        .map(|entry| SemesterTimetable {
            semester: entry.semester,
            timetable: &entry.timetable,
        })
        .collect()
}

pub fn year_module_codes(modules: &[YearModule]) -> Vec<&str> {
    modules.iter().map(|module| module.module_code.as_str()).collect()
}

pub fn semester_module_codes(modules: &[SemesterModule]) -> Vec<&str> {
    modules.iter().map(|module| module.module_code.as_str()).collect()
}
