//! Field-level normalization primitives.
//!
//! - **text**: whitespace cleaning and title casing
//! - **time**: four-digit lesson times
//! - **lesson**: lesson row cleanup for bulletin and bidding-system timetables
//! - **datetime**: exam timestamps from both exam sources
//! - **duration**: ISO 8601 exam durations
//! - **delta**: latest-observation selection over the timetable change log

pub mod datetime;
pub mod delta;
pub mod duration;
pub mod lesson;
pub mod text;
pub mod time;

pub use datetime::{ExamDateError, cors_exam_date, exam_timetable_date};
pub use delta::latest_observations;
pub use duration::format_iso8601_duration;
pub use lesson::{LessonDefect, LessonSource, normalize_lesson};
pub use text::{clean, clean_opt, titleize, titleize_if_upper};
pub use time::normalize_time;
