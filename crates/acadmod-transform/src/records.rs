//! Strict per-category records produced by normalization.

use serde::Serialize;

use acadmod_model::{BiddingStat, ExamInfo, Lesson};

/// Module-level fields shared by the bulletin and bidding-system categories.
///
/// Every field is optional so that sources can be coalesced field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preclusion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corequisite: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cross_module: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    #[serde(skip_serializing_if = "ExamInfo::is_empty")]
    pub exam: ExamInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub timetable: Vec<Lesson>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecturer {
    pub name: String,
    pub role: String,
}

/// Normalized per-category records of one module, kept for auditing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecords {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulletin_modules: Option<ModuleFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<ModuleFields>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cors_bidding_stats: Vec<BiddingStat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_timetable: Option<ExamInfo>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub module_timetable_delta: Vec<Lesson>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ivle: Vec<Lecturer>,
}
