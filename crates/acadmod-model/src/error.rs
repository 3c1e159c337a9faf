use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid academic year: {0}")]
    InvalidAcadYear(String),
    #[error("semester must be between 1 and 4, got {0}")]
    InvalidSemester(u8),
    #[error("invalid day: {0}")]
    InvalidDay(String),
    #[error("invalid lesson kind: {0}")]
    InvalidLessonKind(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
