//! Error types for source ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading source files.
///
/// Missing category files are not errors; they are reported through
/// [`crate::SemesterSources::missing`].
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for its category.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Top level of a category file is neither a list nor a keyed object.
    #[error("{path} holds {found}, expected a list or an object of records")]
    DocumentShape { path: PathBuf, found: &'static str },

    /// Lesson-type table contains a classification other than Lecture or Tutorial.
    #[error("invalid lesson type table {path}: {reason}")]
    LessonTypes { path: PathBuf, reason: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
