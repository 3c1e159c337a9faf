//! Source reading for the consolidation pipeline.
//!
//! - **raw**: typed records for each scraped category
//! - **layout**: where category files live for a (year, semester)
//! - **reader**: tolerant loading and indexing by module code
//! - **lesson_types**: the lesson type → Lecture/Tutorial table

pub mod error;
pub mod layout;
pub mod lesson_types;
pub mod raw;
pub mod reader;

pub use error::{IngestError, Result};
pub use layout::SourceLayout;
pub use lesson_types::{LessonTypeTable, load_lesson_types};
pub use raw::{
    BulletinModule, CorsModule, EnrollmentRecord, ExamRecord, RawBiddingStat, RawLecturer,
    RawLesson, RawRecord, RawUser, TimetableDelta,
};
pub use reader::{
    Grouped, Indexed, Parsed, SemesterSources, SourceLoad, load_category, read_semester_sources,
};
