//! Tests for reading a whole semester of sources.

use std::fs;
use std::path::Path;

use acadmod_ingest::{SourceLayout, read_semester_sources};
use acadmod_model::{AcadYear, DataCategory, Semester};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, contents).expect("write file");
}

#[test]
fn reads_present_categories_and_reports_missing() {
    let root = TempDir::new().expect("temp dir");
    let layout = SourceLayout::default();
    let year = AcadYear::new(2016);
    let semester = Semester::new(1).expect("semester");
    let path = |category| layout.category_path(root.path(), year, semester, category);

    write(
        &path(DataCategory::Cors),
        r#"[{"Type": "Module", "ModuleCode": "CS1010 / CS1010E", "ModuleTitle": "PROGRAMMING"}]"#,
    );
    write(
        &path(DataCategory::ModuleTimetableDelta),
        r#"[{"ModuleCode": "CS1010", "ClassNo": "1", "LastModified": 10},
            {"ModuleCode": "CS1010", "ClassNo": "1", "LastModified": 20},
            {"ModuleCode": "MA1101R", "ClassNo": "2", "LastModified": 5}]"#,
    );
    write(&path(DataCategory::Ivle), "{ broken");

    let sources = read_semester_sources(root.path(), &layout, year, semester);

    assert!(sources.cors.records.contains_key("CS1010 / CS1010E"));
    assert_eq!(sources.timetable_delta["CS1010"].len(), 2);
    assert_eq!(sources.timetable_delta["MA1101R"].len(), 1);
    assert_eq!(
        sources.missing,
        vec![
            DataCategory::BulletinModules,
            DataCategory::CorsBiddingStats,
            DataCategory::ExamTimetable,
        ]
    );
    assert_eq!(sources.unreadable.len(), 1);
    assert_eq!(sources.unreadable[0].0, DataCategory::Ivle);
    assert!(sources.enrollment.records.is_empty());
}

#[test]
fn empty_directory_reads_as_all_missing() {
    let root = TempDir::new().expect("temp dir");
    let sources = read_semester_sources(
        root.path(),
        &SourceLayout::default(),
        AcadYear::new(2020),
        Semester::new(3).expect("semester"),
    );
    assert_eq!(sources.missing, DataCategory::ALL.to_vec());
    assert!(sources.duplicates().is_empty());
}
