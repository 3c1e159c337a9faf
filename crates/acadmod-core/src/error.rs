use thiserror::Error;

use acadmod_ingest::IngestError;
use acadmod_model::{AcadYear, Semester};
use acadmod_transform::NormalizeError;

/// Fatal pipeline failures. Any of these suppresses all output for the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("cannot load the lesson type table")]
    LessonTypes(#[source] IngestError),

    #[error("semester {semester} of {acad_year} aborted")]
    Semester {
        acad_year: AcadYear,
        semester: Semester,
        #[source]
        source: NormalizeError,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
