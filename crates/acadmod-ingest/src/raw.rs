//! Typed raw records, one type per scraped category.
//!
//! Field names follow the scraper JSON keys. Scalars that scrapers emit either
//! as numbers or as strings (credits, times, class numbers, modification
//! stamps) are read through [`lenient_string`]; collections and flags that
//! scrapers sometimes emit as `null` are read through [`null_default`].

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Access to the module code a raw record is filed under.
pub trait RawRecord {
    fn module_code(&self) -> Option<&str>;
    fn set_module_code(&mut self, code: String);
}

macro_rules! impl_raw_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl RawRecord for $ty {
                fn module_code(&self) -> Option<&str> {
                    self.module_code.as_deref()
                }

                fn set_module_code(&mut self, code: String) {
                    self.module_code = Some(code);
                }
            }
        )*
    };
}

impl_raw_record!(
    BulletinModule,
    CorsModule,
    RawBiddingStat,
    ExamRecord,
    TimetableDelta,
    EnrollmentRecord,
);

/// Accepts a string, number or boolean scalar; `null` becomes `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}

/// Reads an explicit `null` as the type's default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A lesson row as scraped from the bulletin or the bidding system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RawLesson {
    #[serde(deserialize_with = "lenient_string")]
    pub class_no: Option<String>,
    pub lesson_type: Option<String>,
    pub week_text: Option<String>,
    pub day_text: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub end_time: Option<String>,
    pub venue: Option<String>,
}

/// Course bulletin entry; the authoritative description source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BulletinModule {
    pub module_code: Option<String>,
    pub module_title: Option<String>,
    pub department: Option<String>,
    pub module_description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub module_credit: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub workload: Option<String>,
    pub prerequisite: Option<String>,
    pub preclusion: Option<String>,
    pub corequisite: Option<String>,
    pub cross_module: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub types: Vec<String>,
    #[serde(deserialize_with = "null_default")]
    pub timetable: Vec<RawLesson>,
}

/// Bidding-system (CORS) module page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CorsModule {
    #[serde(rename = "Type")]
    pub module_type: Option<String>,
    pub module_code: Option<String>,
    pub department: Option<String>,
    pub correct_as_at: Option<String>,
    pub module_title: Option<String>,
    pub module_description: Option<String>,
    /// `"No Exam Date."` or `"<date> <AM|PM|EVENING>"`.
    pub exam_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub module_credit: Option<String>,
    pub prerequisite: Option<String>,
    pub preclusion: Option<String>,
    pub corequisite: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub workload: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub timetable: Vec<RawLesson>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RawBiddingStat {
    pub module_code: Option<String>,
    pub group: Option<String>,
    pub faculty: Option<String>,
    pub student_acct_type: Option<String>,
    /// Round, quota, bidder and bid-point columns.
    #[serde(flatten)]
    pub stats: BTreeMap<String, Value>,
}

/// Exam schedule row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ExamRecord {
    pub module_code: Option<String>,
    /// `D/M/YYYY`, possibly followed by other text.
    pub date: Option<String>,
    /// `9:00 AM`, `0900AM`, `900PM`.
    pub time: Option<String>,
    pub duration: Option<String>,
    pub venue: Option<String>,
    pub faculty: Option<String>,
    pub title: Option<String>,
    /// Remaining columns, including the unnamed open-book marker column.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ExamRecord {
    /// The value in the column with an empty header (`"*"` marks open book).
    pub fn open_book_marker(&self) -> Option<&str> {
        self.extra.get("").and_then(Value::as_str)
    }
}

/// One observation from the timetable change log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TimetableDelta {
    pub module_code: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub last_modified: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub day_code: Option<String>,
    pub day_text: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub start_time: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub end_time: Option<String>,
    pub lesson_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub class_no: Option<String>,
    pub week_text: Option<String>,
    pub venue: Option<String>,
    #[serde(rename = "isDelete", deserialize_with = "null_default")]
    pub is_delete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RawUser {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RawLecturer {
    pub role: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub user: RawUser,
}

/// Enrollment-system course entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct EnrollmentRecord {
    #[serde(alias = "CourseCode")]
    pub module_code: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub lecturers: Vec<RawLecturer>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_scalars_become_strings() {
        let lesson: RawLesson = serde_json::from_str(
            r#"{"ClassNo": 1, "StartTime": 800, "EndTime": "1000", "Venue": null}"#,
        )
        .expect("parse lesson");
        assert_eq!(lesson.class_no.as_deref(), Some("1"));
        assert_eq!(lesson.start_time.as_deref(), Some("800"));
        assert_eq!(lesson.end_time.as_deref(), Some("1000"));
        assert_eq!(lesson.venue, None);
    }

    #[test]
    fn exam_open_book_marker_is_unnamed_column() {
        let exam: ExamRecord = serde_json::from_str(
            r#"{"ModuleCode": "CS1010", "Date": "23/11/2016", "Time": "9:00 AM", "": "*"}"#,
        )
        .expect("parse exam");
        assert_eq!(exam.open_book_marker(), Some("*"));
        assert_eq!(exam.module_code(), Some("CS1010"));
    }

    #[test]
    fn bidding_stat_keeps_extra_columns() {
        let stat: RawBiddingStat = serde_json::from_str(
            r#"{"ModuleCode": "CS1010", "Group": "L1", "Bidders": 12, "LowestBid": 1}"#,
        )
        .expect("parse stat");
        assert_eq!(stat.stats.get("Bidders"), Some(&Value::from(12)));
        assert!(!stat.stats.contains_key("ModuleCode"));
    }

    #[test]
    fn enrollment_accepts_course_code_alias() {
        let record: EnrollmentRecord = serde_json::from_str(
            r#"{"CourseCode": "CS1010", "Lecturers": [{"Role": "Lecturer", "User": {"Name": "Ada"}}]}"#,
        )
        .expect("parse enrollment");
        assert_eq!(record.module_code(), Some("CS1010"));
        assert_eq!(record.lecturers[0].user.name.as_deref(), Some("Ada"));
    }

    #[test]
    fn null_collections_read_as_empty() {
        let module: CorsModule = serde_json::from_str(
            r#"{"ModuleCode": "CS1231", "Timetable": null}"#,
        )
        .expect("parse cors module");
        assert!(module.timetable.is_empty());

        let bulletin: BulletinModule =
            serde_json::from_str(r#"{"Types": null, "Timetable": null}"#).expect("parse bulletin");
        assert!(bulletin.types.is_empty());

        let record: EnrollmentRecord = serde_json::from_str(
            r#"{"ModuleCode": "CS1010", "Lecturers": [{"Role": "Lecturer", "User": null}]}"#,
        )
        .expect("parse enrollment");
        assert_eq!(record.lecturers[0].user, RawUser::default());

        let delta: TimetableDelta =
            serde_json::from_str(r#"{"isDelete": null}"#).expect("parse delta");
        assert!(!delta.is_delete);
    }

    #[test]
    fn structured_values_are_rejected_for_scalars() {
        let result = serde_json::from_str::<RawLesson>(r#"{"StartTime": [800]}"#);
        assert!(result.is_err());
    }
}
