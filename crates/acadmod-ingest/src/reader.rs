//! Tolerant loading of category files and indexing by module code.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use acadmod_model::{AcadYear, DataCategory, Semester};

use crate::error::{IngestError, Result};
use crate::layout::SourceLayout;
use crate::raw::{
    BulletinModule, CorsModule, EnrollmentRecord, ExamRecord, RawBiddingStat, RawRecord,
    TimetableDelta,
};

/// Records of one category file that fit their type, and a description
/// (position or key, then the reason) of each record that did not.
#[derive(Debug)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub rejected: Vec<String>,
}

impl<T> Default for Parsed<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T: DeserializeOwned + RawRecord> Parsed<T> {
    fn push(&mut self, label: String, key: Option<String>, value: Value) {
        match serde_json::from_value::<T>(value) {
            Ok(mut record) => {
                if let Some(key) = key
                    && record.module_code().is_none()
                {
                    record.set_module_code(key);
                }
                self.records.push(record);
            }
            Err(error) => self.rejected.push(format!("{label}: {error}")),
        }
    }
}

/// Outcome of loading one category file.
#[derive(Debug)]
pub enum SourceLoad<T> {
    Loaded(Parsed<T>),
    Missing,
    Unreadable(String),
}

/// Records of a category where each module code has one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed<T> {
    pub records: BTreeMap<String, T>,
    /// Codes seen more than once in the file; the later record was kept.
    pub duplicates: Vec<String>,
}

impl<T> Default for Indexed<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            duplicates: Vec::new(),
        }
    }
}

impl<T: RawRecord> Indexed<T> {
    /// Records without a module code are skipped; the semester reader
    /// counts them before indexing.
    pub fn from_records(records: Vec<T>) -> Self {
        let mut indexed = Self::default();
        for record in records {
            let Some(code) = record.module_code().map(str::to_string) else {
                continue;
            };
            if indexed.records.insert(code.clone(), record).is_some() {
                indexed.duplicates.push(code);
            }
        }
        indexed
    }
}

/// Records of a list category, grouped by module code in file order.
pub type Grouped<T> = BTreeMap<String, Vec<T>>;

fn group_records<T: RawRecord>(records: Vec<T>) -> Grouped<T> {
    let mut grouped: Grouped<T> = BTreeMap::new();
    for record in records {
        let Some(code) = record.module_code().map(str::to_string) else {
            continue;
        };
        grouped.entry(code).or_default().push(record);
    }
    grouped
}

/// Loads a category file, distinguishing absent files from unreadable ones.
pub fn load_category<T>(path: &Path) -> SourceLoad<T>
where
    T: DeserializeOwned + RawRecord,
{
    if !path.is_file() {
        return SourceLoad::Missing;
    }
    match read_document(path) {
        Ok(records) => SourceLoad::Loaded(records),
        Err(error) => SourceLoad::Unreadable(error.to_string()),
    }
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A category file is either a list of records or an object keyed by module
/// code. Each record is deserialized on its own so that one malformed record
/// only costs that record.
fn read_document<T>(path: &Path) -> Result<Parsed<T>>
where
    T: DeserializeOwned + RawRecord,
{
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Value =
        serde_json::from_str(&text).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    let mut parsed = Parsed::default();
    match document {
        Value::Array(items) => {
            for (index, item) in items.into_iter().enumerate() {
                parsed.push(format!("record {index}"), None, item);
            }
        }
        Value::Object(entries) => {
            for (key, item) in entries {
                parsed.push(format!("record {key:?}"), Some(key), item);
            }
        }
        other => {
            return Err(IngestError::DocumentShape {
                path: path.to_path_buf(),
                found: shape_of(&other),
            });
        }
    }
    Ok(parsed)
}

/// All raw sources of one semester, indexed by (uncut) module code.
#[derive(Debug, Default)]
pub struct SemesterSources {
    pub bulletin: Indexed<BulletinModule>,
    pub cors: Indexed<CorsModule>,
    pub bidding_stats: Grouped<RawBiddingStat>,
    pub exams: Indexed<ExamRecord>,
    pub timetable_delta: Grouped<TimetableDelta>,
    pub enrollment: Indexed<EnrollmentRecord>,
    /// Categories with no file; they were read as empty.
    pub missing: Vec<DataCategory>,
    /// Categories whose file exists but could not be parsed; read as empty.
    pub unreadable: Vec<(DataCategory, String)>,
    /// Single records skipped because they did not fit their category.
    pub rejected: Vec<(DataCategory, String)>,
    /// Number of records skipped per category for lack of a module code.
    pub uncoded: Vec<(DataCategory, usize)>,
}

impl SemesterSources {
    fn take<T: RawRecord>(&mut self, category: DataCategory, load: SourceLoad<T>) -> Vec<T> {
        match load {
            SourceLoad::Loaded(parsed) => {
                debug!(
                    category = %category,
                    records = parsed.records.len(),
                    rejected = parsed.rejected.len(),
                    "source loaded"
                );
                self.rejected
                    .extend(parsed.rejected.into_iter().map(|reason| (category, reason)));
                let total = parsed.records.len();
                let records: Vec<T> = parsed
                    .records
                    .into_iter()
                    .filter(|record| {
                        record
                            .module_code()
                            .is_some_and(|code| !code.trim().is_empty())
                    })
                    .collect();
                if records.len() < total {
                    self.uncoded.push((category, total - records.len()));
                }
                records
            }
            SourceLoad::Missing => {
                self.missing.push(category);
                Vec::new()
            }
            SourceLoad::Unreadable(reason) => {
                warn!(category = %category, %reason, "source unreadable, treating as empty");
                self.unreadable.push((category, reason));
                Vec::new()
            }
        }
    }

    /// Duplicate codes per uniquely-keyed category.
    pub fn duplicates(&self) -> Vec<(DataCategory, &str)> {
        let mut duplicates = Vec::new();
        let categories = [
            (DataCategory::BulletinModules, &self.bulletin.duplicates),
            (DataCategory::Cors, &self.cors.duplicates),
            (DataCategory::ExamTimetable, &self.exams.duplicates),
            (DataCategory::Ivle, &self.enrollment.duplicates),
        ];
        for (category, codes) in categories {
            duplicates.extend(codes.iter().map(|code| (category, code.as_str())));
        }
        duplicates
    }
}

fn join<T>(handle: std::thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

/// Reads the six category files of a semester in parallel.
///
/// Absent or unparseable files never fail the read; they are listed in
/// [`SemesterSources::missing`] and [`SemesterSources::unreadable`]. Records
/// that do not fit their category, or carry no module code, are skipped and
/// listed in [`SemesterSources::rejected`] and [`SemesterSources::uncoded`].
pub fn read_semester_sources(
    root: &Path,
    layout: &SourceLayout,
    acad_year: AcadYear,
    semester: Semester,
) -> SemesterSources {
    let path = |category| layout.category_path(root, acad_year, semester, category);
    let bulletin_path = path(DataCategory::BulletinModules);
    let cors_path = path(DataCategory::Cors);
    let stats_path = path(DataCategory::CorsBiddingStats);
    let exam_path = path(DataCategory::ExamTimetable);
    let delta_path = path(DataCategory::ModuleTimetableDelta);
    let ivle_path = path(DataCategory::Ivle);

    let (bulletin, cors, stats, exams, delta, ivle) = std::thread::scope(|scope| {
        let bulletin = scope.spawn(|| load_category::<BulletinModule>(&bulletin_path));
        let cors = scope.spawn(|| load_category::<CorsModule>(&cors_path));
        let stats = scope.spawn(|| load_category::<RawBiddingStat>(&stats_path));
        let exams = scope.spawn(|| load_category::<ExamRecord>(&exam_path));
        let delta = scope.spawn(|| load_category::<TimetableDelta>(&delta_path));
        let ivle = scope.spawn(|| load_category::<EnrollmentRecord>(&ivle_path));
        (
            join(bulletin),
            join(cors),
            join(stats),
            join(exams),
            join(delta),
            join(ivle),
        )
    });

    let mut sources = SemesterSources::default();
    let bulletin = sources.take(DataCategory::BulletinModules, bulletin);
    sources.bulletin = Indexed::from_records(bulletin);
    let cors = sources.take(DataCategory::Cors, cors);
    sources.cors = Indexed::from_records(cors);
    let stats = sources.take(DataCategory::CorsBiddingStats, stats);
    sources.bidding_stats = group_records(stats);
    let exams = sources.take(DataCategory::ExamTimetable, exams);
    sources.exams = Indexed::from_records(exams);
    let delta = sources.take(DataCategory::ModuleTimetableDelta, delta);
    sources.timetable_delta = group_records(delta);
    let ivle = sources.take(DataCategory::Ivle, ivle);
    sources.enrollment = Indexed::from_records(ivle);

    info!(
        acad_year = %acad_year,
        semester = %semester,
        bulletin = sources.bulletin.records.len(),
        cors = sources.cors.records.len(),
        missing = sources.missing.len(),
        rejected = sources.rejected.len(),
        "semester sources read"
    );
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn indexed_keeps_later_duplicate() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "cors.json",
            r#"[{"ModuleCode": "CS1010", "ModuleTitle": "First"},
                {"ModuleCode": "CS1010", "ModuleTitle": "Second"}]"#,
        );
        let SourceLoad::Loaded(parsed) = load_category::<CorsModule>(&path) else {
            panic!("expected loaded");
        };
        let indexed = Indexed::from_records(parsed.records);
        assert_eq!(indexed.records.len(), 1);
        assert_eq!(
            indexed.records["CS1010"].module_title.as_deref(),
            Some("Second")
        );
        assert_eq!(indexed.duplicates, vec!["CS1010".to_string()]);
    }

    #[test]
    fn keyed_documents_fill_missing_codes() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "bulletinModules.json",
            r#"{"CS1010": {"ModuleTitle": "Programming Methodology"}}"#,
        );
        let SourceLoad::Loaded(parsed) = load_category::<BulletinModule>(&path) else {
            panic!("expected loaded");
        };
        assert_eq!(parsed.records[0].module_code(), Some("CS1010"));
    }

    #[test]
    fn malformed_record_costs_only_itself() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "cors.json",
            r#"[{"ModuleCode": "CS1010", "Timetable": []},
                {"ModuleCode": "CS1231", "Timetable": null},
                {"ModuleCode": "MA1101R", "Timetable": "TBA"}]"#,
        );
        let SourceLoad::Loaded(parsed) = load_category::<CorsModule>(&path) else {
            panic!("expected loaded");
        };
        let codes: Vec<_> = parsed
            .records
            .iter()
            .filter_map(|record| record.module_code())
            .collect();
        assert_eq!(codes, vec!["CS1010", "CS1231"]);
        assert_eq!(parsed.rejected.len(), 1);
        assert!(parsed.rejected[0].starts_with("record 2: "));
    }

    #[test]
    fn keyed_rejects_name_the_key() {
        let dir = TempDir::new().unwrap();
        let path = write(
            dir.path(),
            "ivle.json",
            r#"{"CS1010": {"Lecturers": []}, "CS2040": 7}"#,
        );
        let SourceLoad::Loaded(parsed) = load_category::<EnrollmentRecord>(&path) else {
            panic!("expected loaded");
        };
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.rejected[0].starts_with("record \"CS2040\": "));
    }

    #[test]
    fn scalar_document_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = write(dir.path(), "examTimetable.json", "42");
        let SourceLoad::Unreadable(reason) = load_category::<ExamRecord>(&path) else {
            panic!("expected unreadable");
        };
        assert!(reason.contains("a number"));
    }

    #[test]
    fn uncoded_records_are_counted() {
        let mut sources = SemesterSources::default();
        let parsed = Parsed {
            records: vec![
                ExamRecord {
                    module_code: Some("CS1010".to_string()),
                    ..ExamRecord::default()
                },
                ExamRecord::default(),
                ExamRecord {
                    module_code: Some("  ".to_string()),
                    ..ExamRecord::default()
                },
            ],
            rejected: Vec::new(),
        };
        let records = sources.take(DataCategory::ExamTimetable, SourceLoad::Loaded(parsed));
        assert_eq!(records.len(), 1);
        assert_eq!(sources.uncoded, vec![(DataCategory::ExamTimetable, 2)]);
    }

    #[test]
    fn grouped_preserves_file_order() {
        let records = vec![
            TimetableDelta {
                module_code: Some("CS1010".to_string()),
                class_no: Some("1".to_string()),
                ..TimetableDelta::default()
            },
            TimetableDelta {
                module_code: Some("CS1010".to_string()),
                class_no: Some("2".to_string()),
                ..TimetableDelta::default()
            },
        ];
        let grouped = group_records(records);
        let classes: Vec<_> = grouped["CS1010"]
            .iter()
            .filter_map(|delta| delta.class_no.as_deref())
            .collect();
        assert_eq!(classes, vec!["1", "2"]);
    }

    #[test]
    fn missing_and_unreadable_are_distinguished() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_category::<ExamRecord>(&dir.path().join("absent.json")),
            SourceLoad::Missing
        ));
        let path = write(dir.path(), "examTimetable.json", "{ not json");
        assert!(matches!(
            load_category::<ExamRecord>(&path),
            SourceLoad::Unreadable(_)
        ));
    }
}
