//! Tests for acadmod-model types.

use acadmod_model::{
    AcadYear, Day, ExamInfo, InvariantField, Issue, IssueKind, IssueSeverity, Lesson, RunReport,
    Semester, SemesterHistory, SemesterModule, YearModule,
};

fn lesson(day: Day, start: &str, end: &str) -> Lesson {
    Lesson {
        lesson_type: "Lecture".to_string(),
        class_no: "1".to_string(),
        day,
        start_time: start.to_string(),
        end_time: end.to_string(),
        week_pattern: "Every Week".to_string(),
        venue: "LT19".to_string(),
    }
}

#[test]
fn semester_module_omits_empty_fields() {
    let mut module = SemesterModule::new("CS1010");
    module.title = Some("Programming Methodology".to_string());
    module.exam_info = Some(ExamInfo {
        date: Some("2016-11-23T09:00+08:00".to_string()),
        ..ExamInfo::default()
    });
    let json = serde_json::to_value(&module).expect("serialize module");
    let object = json.as_object().expect("object");
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["examInfo", "moduleCode", "title"]);
    assert_eq!(json["examInfo"], serde_json::json!({"date": "2016-11-23T09:00+08:00"}));
}

#[test]
fn lesson_uses_canonical_day_names() {
    let json = serde_json::to_value(lesson(Day::Friday, "1400", "1600")).expect("serialize");
    assert_eq!(json["day"], "Friday");
    assert_eq!(json["startTime"], "1400");
    assert_eq!(json["weekPattern"], "Every Week");
}

#[test]
fn invariant_accessors_round_trip() {
    let mut year = YearModule {
        module_code: "CS1010".to_string(),
        ..YearModule::default()
    };
    for field in InvariantField::ALL {
        year.set_invariant(field, Some(format!("{field} value")));
    }
    for field in InvariantField::ALL {
        assert_eq!(year.invariant(field), Some(format!("{field} value").as_str()));
    }
}

#[test]
fn year_module_lists_offered_semesters() {
    let module = SemesterModule::new("CS1010");
    let year = YearModule {
        module_code: "CS1010".to_string(),
        history: vec![
            SemesterHistory::from_module(Semester::new(2).expect("semester"), &module),
            SemesterHistory::from_module(Semester::new(1).expect("semester"), &module),
        ],
        ..YearModule::default()
    };
    let semesters: Vec<u8> = year.semesters().iter().map(Semester::get).collect();
    assert_eq!(semesters, vec![1, 2]);
}

#[test]
fn issue_severity_follows_kind() {
    assert_eq!(
        Issue::new(IssueKind::Orphan, "orphan").severity,
        IssueSeverity::Warning
    );
    assert_eq!(
        Issue::new(IssueKind::UnknownTimeMarker, "marker").severity,
        IssueSeverity::Error
    );
    assert_eq!(
        Issue::new(IssueKind::MissingSource, "missing").severity,
        IssueSeverity::Info
    );
    assert_eq!(
        Issue::new(IssueKind::InvalidRecord, "skipped").severity,
        IssueSeverity::Warning
    );
    assert_eq!(IssueKind::MissingCode.as_str(), "missing-code");
}

#[test]
fn report_lists_missing_sources_per_semester() {
    let mut report = RunReport::new(AcadYear::new(2016), None);
    report.issues.push(
        Issue::new(IssueKind::MissingSource, "source files not found")
            .with_semester(Semester::new(2).expect("semester"))
            .with_values(["cors", "ivle"]),
    );
    assert_eq!(
        report.missing_sources(),
        vec!["semester 2: cors".to_string(), "semester 2: ivle".to_string()]
    );
    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["issues"][0]["kind"], "missing-source");
    assert_eq!(json["issues"][0]["severity"], "info");
}
