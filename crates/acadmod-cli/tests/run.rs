//! Semester and year invocations against a temporary data tree.

use std::fs;
use std::path::Path;

use acadmod_cli::{Config, RunOptions, run_semester_command, run_year_command};
use acadmod_model::{AcadYear, Semester};
use serde_json::{Value, json};
use tempfile::TempDir;

fn write_json(path: &Path, value: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn seed(input: &Path, lesson_types_file: &str) {
    write_json(
        &input.join(lesson_types_file),
        &json!({"LECTURE": "Lecture", "TUTORIAL": "Tutorial"}),
    );
    for sem in [1, 2] {
        write_json(
            &input.join("2016-2017").join(sem.to_string()).join("bulletinModules.json"),
            &json!([{
                "ModuleCode": "CS2040",
                "ModuleTitle": "Data Structures and Algorithms",
                "ModuleCredit": "4",
                "Timetable": [
                    {"ClassNo": "1", "LessonType": "LECTURE", "WeekText": "EVERY WEEK",
                     "DayText": "WEDNESDAY", "StartTime": "1600", "EndTime": "1800",
                     "Venue": "LT27"}
                ]
            }]),
        );
    }
}

// ============================================================================
// Semester command
// ============================================================================

#[test]
fn semester_command_publishes_semester_tree() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    seed(input.path(), "lessonTypes.json");

    let options = RunOptions::new(input.path(), output.path());
    let summary =
        run_semester_command(&options, AcadYear::new(2016), Semester::new(1).unwrap()).unwrap();

    let target = output.path().join("2016-2017").join("1");
    assert_eq!(summary.target, target);
    assert!(!summary.dry_run());
    assert_eq!(summary.report.module_count, 1);

    let codes: Vec<String> =
        serde_json::from_str(&fs::read_to_string(target.join("moduleCodes.json")).unwrap())
            .unwrap();
    assert_eq!(codes, vec!["CS2040"]);
    let report: Value =
        serde_json::from_str(&fs::read_to_string(target.join("report.json")).unwrap()).unwrap();
    assert_eq!(report["acadYear"], "2016/2017");
}

#[test]
fn dry_run_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    seed(input.path(), "lessonTypes.json");

    let options = RunOptions::new(input.path(), output.path()).with_dry_run(true);
    let summary = run_year_command(&options, AcadYear::new(2016)).unwrap();

    assert!(summary.dry_run());
    assert!(summary.file_count > 0);
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn missing_lesson_type_table_is_fatal() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    seed(input.path(), "elsewhere.json");

    let options = RunOptions::new(input.path(), output.path());
    let error = run_year_command(&options, AcadYear::new(2016)).unwrap_err();
    assert!(format!("{error:#}").contains("lessonTypes.json"));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

// ============================================================================
// Year command
// ============================================================================

#[test]
fn year_command_honours_configuration() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    seed(input.path(), "reference.json");

    let config =
        Config::from_toml("json_indent = 0\n[sources]\nlesson_types = \"reference.json\"\n")
            .unwrap();
    let options = RunOptions::new(input.path(), output.path()).with_config(config);
    let summary = run_year_command(&options, AcadYear::new(2016)).unwrap();

    assert_eq!(
        summary.semesters,
        vec![Semester::new(1).unwrap(), Semester::new(2).unwrap()]
    );
    let year_dir = output.path().join("2016-2017");
    let list = fs::read_to_string(year_dir.join("moduleList.json")).unwrap();
    assert_eq!(
        list,
        "[{\"moduleCode\":\"CS2040\",\"title\":\"Data Structures and Algorithms\",\"semesters\":[1,2]}]\n"
    );
    assert!(year_dir.join("2").join("venueInformation.json").exists());
}
