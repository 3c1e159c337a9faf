//! End-to-end tests for the semester and year pipelines.

use std::path::Path;

use acadmod_core::{PipelineContext, PipelineError, run_semester, run_year};
use acadmod_ingest::LessonTypeTable;
use acadmod_model::{AcadYear, IssueKind, LessonKind, Semester};
use serde_json::{Value, json};
use tempfile::TempDir;

fn semester(value: u8) -> Semester {
    Semester::new(value).unwrap()
}

fn write_source(root: &Path, sem: u8, file: &str, value: &Value) {
    let dir = root.join("2016-2017").join(sem.to_string());
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(file), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn pipeline(root: &Path) -> PipelineContext {
    let lesson_types: LessonTypeTable = [
        ("LECTURE".to_string(), LessonKind::Lecture),
        ("TUTORIAL".to_string(), LessonKind::Tutorial),
    ]
    .into_iter()
    .collect();
    PipelineContext::new(root).with_lesson_types(lesson_types)
}

fn bulletin(code: &str, credit: &str) -> Value {
    json!({
        "ModuleCode": code,
        "ModuleTitle": "PROGRAMMING METHODOLOGY",
        "Department": "Computer Science",
        "ModuleCredit": credit,
        "Timetable": [
            {"ClassNo": "1", "LessonType": "LECTURE", "WeekText": "EVERY WEEK",
             "DayText": "MONDAY", "StartTime": "1000", "EndTime": "1200", "Venue": "LT19"},
            {"ClassNo": "2", "LessonType": "TUTORIAL", "WeekText": "EVERY WEEK",
             "DayText": "THURSDAY", "StartTime": "0900", "EndTime": "1000", "Venue": "COM1-0208"}
        ]
    })
}

// ============================================================================
// Semester runs
// ============================================================================

#[test]
fn semester_run_merges_sources() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), 1, "bulletinModules.json", &json!([bulletin("CS1010", "4")]));
    write_source(
        dir.path(),
        1,
        "cors.json",
        &json!([{"ModuleCode": "CS1010", "Type": "Module", "ExamDate": "25-11-2016 PM",
                 "ModuleDescription": "From the bidding system"}]),
    );
    write_source(
        dir.path(),
        1,
        "ivle.json",
        &json!([{"ModuleCode": "CS1010", "Lecturers": [
            {"Role": "Lecturer", "User": {"Name": "Ada Lovelace"}},
            {"Role": "Guest", "User": {"Name": "Grace Hopper"}}
        ]}]),
    );

    let output = run_semester(&pipeline(dir.path()), AcadYear::new(2016), semester(1)).unwrap();
    assert_eq!(output.modules.len(), 1);
    let module = &output.modules[0];
    assert_eq!(module.title.as_deref(), Some("Programming Methodology"));
    assert_eq!(module.description.as_deref(), Some("From the bidding system"));
    assert_eq!(module.types, vec!["Module"]);
    assert_eq!(module.lecturers, vec!["Ada Lovelace"]);
    assert_eq!(module.lecture_periods, vec!["Monday Morning"]);
    assert_eq!(module.tutorial_periods, vec!["Thursday Morning"]);
    assert_eq!(
        module.exam_info.as_ref().and_then(|exam| exam.date.as_deref()),
        Some("2016-11-25T14:30+08:00")
    );
    assert_eq!(output.venues, vec!["COM1-0208", "LT19"]);

    let report = &output.report;
    assert_eq!(report.module_count, 1);
    assert_eq!(report.venue_count, 2);
    assert_eq!(
        report.missing_sources(),
        vec![
            "semester 1: corsBiddingStats",
            "semester 1: examTimetable",
            "semester 1: moduleTimetableDelta",
        ]
    );
    assert_eq!(report.issues_of(IssueKind::UnknownRole).count(), 1);
    assert!(output.records["CS1010"].bulletin_modules.is_some());
}

#[test]
fn exam_only_module_is_reported_as_orphan() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), 2, "bulletinModules.json", &json!([bulletin("CS1010", "4")]));
    write_source(
        dir.path(),
        2,
        "examTimetable.json",
        &json!([{"ModuleCode": "MA1101R", "Date": "28/04/2017", "Time": "1:00 PM"}]),
    );

    let output = run_semester(&pipeline(dir.path()), AcadYear::new(2016), semester(2)).unwrap();
    assert!(output.modules.iter().all(|module| module.module_code != "MA1101R"));
    assert_eq!(output.report.orphans(), vec!["MA1101R"]);
    assert_eq!(output.report.issues_of(IssueKind::Orphan).count(), 1);
}

#[test]
fn malformed_exam_date_fails_the_run() {
    let dir = TempDir::new().unwrap();
    write_source(
        dir.path(),
        1,
        "cors.json",
        &json!([{"ModuleCode": "CS1010", "ExamDate": "next week PM"}]),
    );
    let err = run_semester(&pipeline(dir.path()), AcadYear::new(2016), semester(1)).unwrap_err();
    assert!(matches!(err, PipelineError::Semester { .. }));
}

#[test]
fn unreadable_source_is_treated_as_empty() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), 1, "bulletinModules.json", &json!([bulletin("CS1010", "4")]));
    let semester_dir = dir.path().join("2016-2017").join("1");
    std::fs::write(semester_dir.join("cors.json"), "{ truncated").unwrap();

    let output = run_semester(&pipeline(dir.path()), AcadYear::new(2016), semester(1)).unwrap();
    assert_eq!(output.modules.len(), 1);
    assert_eq!(output.report.warning_count(), 1);
}

#[test]
fn malformed_record_skips_only_that_record() {
    let dir = TempDir::new().unwrap();
    write_source(
        dir.path(),
        1,
        "cors.json",
        &json!([
            {"ModuleCode": "CS1010", "Type": "Module", "Timetable": []},
            {"ModuleCode": "CS1231", "Type": "Module", "Timetable": null},
            {"ModuleCode": "CS2040", "Type": "Module", "Timetable": "TBA"},
            {"Type": "Module", "ModuleTitle": "NO CODE"}
        ]),
    );

    let output = run_semester(&pipeline(dir.path()), AcadYear::new(2016), semester(1)).unwrap();
    let codes: Vec<_> = output
        .modules
        .iter()
        .map(|module| module.module_code.as_str())
        .collect();
    assert_eq!(codes, vec!["CS1010", "CS1231"]);

    let invalid: Vec<_> = output.report.issues_of(IssueKind::InvalidRecord).collect();
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].field.as_deref(), Some("cors"));
    assert!(invalid[0].message.contains("record 2"));

    let uncoded: Vec<_> = output.report.issues_of(IssueKind::MissingCode).collect();
    assert_eq!(uncoded.len(), 1);
    assert_eq!(uncoded[0].values, vec!["1"]);
    assert!(
        output
            .report
            .issues_of(IssueKind::MissingSource)
            .all(|issue| !issue.values.contains(&"cors".to_string()))
    );
}

// ============================================================================
// Year runs
// ============================================================================

#[test]
fn latest_semester_credit_wins() {
    let dir = TempDir::new().unwrap();
    write_source(dir.path(), 1, "bulletinModules.json", &json!([bulletin("CS1010", "4")]));
    write_source(
        dir.path(),
        2,
        "bulletinModules.json",
        &json!([bulletin("CS1010", "5"), bulletin("CS1231", "4")]),
    );

    let output = run_year(&pipeline(dir.path()), AcadYear::new(2016), &Semester::ALL).unwrap();
    assert_eq!(output.semesters.len(), 2);
    assert_eq!(output.modules.len(), 2);

    let cs1010 = &output.modules[0];
    assert_eq!(cs1010.module_code, "CS1010");
    assert_eq!(cs1010.credit.as_deref(), Some("5"));
    assert_eq!(cs1010.history.len(), 2);
    assert_eq!(output.modules[1].history.len(), 1);

    let inconsistent: Vec<_> = output
        .report
        .issues_of(IssueKind::InconsistentField)
        .collect();
    assert_eq!(inconsistent.len(), 1);
    assert_eq!(inconsistent[0].module_code.as_deref(), Some("CS1010"));
    assert_eq!(inconsistent[0].field.as_deref(), Some("credit"));

    // Semesters 3 and 4 have no directory.
    let skipped: Vec<_> = output
        .report
        .issues_of(IssueKind::MissingSource)
        .filter(|issue| issue.values.len() == 6)
        .filter_map(|issue| issue.semester)
        .collect();
    assert_eq!(skipped, vec![semester(3), semester(4)]);
}

#[test]
fn year_run_is_deterministic() {
    let dir = TempDir::new().unwrap();
    for sem in 1..=4 {
        write_source(
            dir.path(),
            sem,
            "bulletinModules.json",
            &json!([bulletin("CS1010", &sem.to_string())]),
        );
    }
    let pipeline = pipeline(dir.path());
    let first = run_year(&pipeline, AcadYear::new(2016), &Semester::ALL).unwrap();
    let second = run_year(&pipeline, AcadYear::new(2016), &Semester::ALL).unwrap();
    assert_eq!(
        serde_json::to_string(&first.modules).unwrap(),
        serde_json::to_string(&second.modules).unwrap()
    );
    assert_eq!(
        serde_json::to_string(&first.report.issues).unwrap(),
        serde_json::to_string(&second.report.issues).unwrap()
    );
    assert_eq!(first.modules[0].credit.as_deref(), Some("4"));
}
