//! Lesson type classification table.
//!
//! The bidding-system scraper records, for every lesson type string it sees,
//! whether it appeared in the lecture or the tutorial timetable. Period
//! derivation depends on this table, so any defect in it is fatal.

use std::collections::BTreeMap;
use std::path::Path;

use acadmod_model::LessonKind;
use tracing::debug;

use crate::error::{IngestError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonTypeTable {
    entries: BTreeMap<String, LessonKind>,
}

impl LessonTypeTable {
    /// Keys are matched case-insensitively.
    pub fn kind_of(&self, lesson_type: &str) -> Option<LessonKind> {
        self.entries.get(&lesson_type.trim().to_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, LessonKind)> for LessonTypeTable {
    fn from_iter<I: IntoIterator<Item = (String, LessonKind)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, kind)| (key.trim().to_uppercase(), kind))
                .collect(),
        }
    }
}

/// Loads and validates the lesson-type table.
///
/// # Errors
///
/// Fails when the file cannot be read, is not a JSON object of strings, maps a
/// type to anything but `Lecture`/`Tutorial`, or maps the same type (ignoring
/// case) to both.
pub fn load_lesson_types(path: &Path) -> Result<LessonTypeTable> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: BTreeMap<String, String> =
        serde_json::from_str(&text).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut entries = BTreeMap::new();
    for (key, value) in raw {
        let kind: LessonKind = value.parse().map_err(|_| IngestError::LessonTypes {
            path: path.to_path_buf(),
            reason: format!("{key} maps to '{value}', expected Lecture or Tutorial"),
        })?;
        let normalized = key.trim().to_uppercase();
        if let Some(existing) = entries.insert(normalized.clone(), kind)
            && existing != kind
        {
            return Err(IngestError::LessonTypes {
                path: path.to_path_buf(),
                reason: format!("{normalized} is classified as both {existing:?} and {kind:?}"),
            });
        }
    }
    debug!(path = %path.display(), entries = entries.len(), "lesson types loaded");
    Ok(LessonTypeTable { entries })
}
