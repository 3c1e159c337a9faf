pub mod enums;
pub mod error;
pub mod ids;
pub mod issue;
pub mod module;

pub use enums::{DataCategory, Day, DayPeriod, InvariantField, LessonKind};
pub use error::{ModelError, Result};
pub use ids::{AcadYear, Semester};
pub use issue::{Issue, IssueKind, IssueSeverity, RunReport};
pub use module::{BiddingStat, ExamInfo, Lesson, SemesterHistory, SemesterModule, YearModule};
