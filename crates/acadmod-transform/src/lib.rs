//! Academic data transformation.
//!
//! - **normalization**: field-level primitives (text, times, lessons, exam dates, durations)
//! - **normalize**: per-category record normalizers built on those primitives
//! - **identity**: cross-listing expansion, classification and orphan detection
//! - **context**: the run context that collects recoverable issues

pub mod context;
pub mod error;
pub mod identity;
pub mod normalization;
pub mod normalize;
pub mod records;

pub use context::RunContext;
pub use error::NormalizeError;
pub use identity::{ResolvedSemester, classify_code, resolve_semester, split_module_codes};
pub use normalize::{
    normalize_bidding_stat, normalize_bulletin, normalize_cors, normalize_delta,
    normalize_enrollment, normalize_exam,
};
pub use records::{CategoryRecords, Lecturer, ModuleFields};
