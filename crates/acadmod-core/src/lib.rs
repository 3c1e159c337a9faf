//! Consolidation pipeline core.
//!
//! - **merge**: per-semester merge of identity-resolved records
//! - **venues**: distinct venue extraction
//! - **year**: cross-semester aggregation with consistency checks
//! - **pipeline**: the semester and year runs tying the stages together

pub mod error;
pub mod merge;
pub mod pipeline;
pub mod pipeline_context;
pub mod venues;
pub mod year;

pub use acadmod_transform::RunContext;
pub use error::{PipelineError, Result};
pub use merge::{LECTURER_ROLES, merge_module, merge_semester};
pub use pipeline::{SemesterOutput, YearOutput, run_semester, run_year};
pub use pipeline_context::PipelineContext;
pub use venues::extract_venues;
pub use year::aggregate_year;
