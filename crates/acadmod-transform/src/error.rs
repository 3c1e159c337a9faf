use thiserror::Error;

use acadmod_model::DataCategory;

/// Normalization failures that abort the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// An exam date or time that cannot be turned into a timestamp.
    #[error("malformed exam date '{value}' for {module_code} in {category}: {reason}")]
    MalformedExamDate {
        module_code: String,
        category: DataCategory,
        value: String,
        reason: String,
    },
}
