//! Location of source files for a (year, semester).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use acadmod_model::{AcadYear, DataCategory, Semester};

/// File names of each source category and of the lesson-type table.
///
/// Category files live at `<root>/<YYYY-YYYY>/<semester>/<file>`; the lesson
/// type table lives directly under `<root>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SourceLayout {
    pub bulletin_modules: String,
    pub cors: String,
    pub cors_bidding_stats: String,
    pub exam_timetable: String,
    pub module_timetable_delta: String,
    pub ivle: String,
    pub lesson_types: String,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            bulletin_modules: DataCategory::BulletinModules.default_file_name(),
            cors: DataCategory::Cors.default_file_name(),
            cors_bidding_stats: DataCategory::CorsBiddingStats.default_file_name(),
            exam_timetable: DataCategory::ExamTimetable.default_file_name(),
            module_timetable_delta: DataCategory::ModuleTimetableDelta.default_file_name(),
            ivle: DataCategory::Ivle.default_file_name(),
            lesson_types: "lessonTypes.json".to_string(),
        }
    }
}

impl SourceLayout {
    pub fn file_name(&self, category: DataCategory) -> &str {
        match category {
            DataCategory::BulletinModules => &self.bulletin_modules,
            DataCategory::Cors => &self.cors,
            DataCategory::CorsBiddingStats => &self.cors_bidding_stats,
            DataCategory::ExamTimetable => &self.exam_timetable,
            DataCategory::ModuleTimetableDelta => &self.module_timetable_delta,
            DataCategory::Ivle => &self.ivle,
        }
    }

    pub fn semester_dir(root: &Path, acad_year: AcadYear, semester: Semester) -> PathBuf {
        root.join(acad_year.dir_name()).join(semester.to_string())
    }

    pub fn category_path(
        &self,
        root: &Path,
        acad_year: AcadYear,
        semester: Semester,
        category: DataCategory,
    ) -> PathBuf {
        Self::semester_dir(root, acad_year, semester).join(self.file_name(category))
    }

    pub fn lesson_types_path(&self, root: &Path) -> PathBuf {
        root.join(&self.lesson_types)
    }
}
