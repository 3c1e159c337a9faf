//! Lesson row cleanup.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use acadmod_ingest::RawLesson;
use acadmod_model::{Day, Lesson};

use super::text::{clean, titleize};
use super::time::normalize_time;

/// Trailing `,` (optionally after a literal `null`) left by the bidding-system
/// page scraper.
static CORS_VENUE_ARTIFACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^null)?,$").expect("valid venue regex"));

/// Which scraper produced a lesson row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonSource {
    Bulletin,
    Cors,
    TimetableDelta,
}

/// Why a lesson row was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LessonDefect {
    UnknownDay(String),
    EmptyInterval { start: String, end: String },
}

impl fmt::Display for LessonDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LessonDefect::UnknownDay(day) => write!(f, "unrecognised lesson day '{day}'"),
            LessonDefect::EmptyInterval { start, end } => {
                write!(f, "lesson starts at {start} but ends at {end}")
            }
        }
    }
}

impl LessonDefect {
    pub fn value(&self) -> String {
        match self {
            LessonDefect::UnknownDay(day) => day.clone(),
            LessonDefect::EmptyInterval { start, end } => format!("{start}-{end}"),
        }
    }
}

pub fn normalize_venue(venue: Option<&str>, source: LessonSource) -> String {
    let venue = clean(venue.unwrap_or_default());
    match source {
        LessonSource::Cors => clean(&CORS_VENUE_ARTIFACT.replace(&venue, "")),
        LessonSource::Bulletin | LessonSource::TimetableDelta => venue,
    }
}

pub fn normalize_week_text(week_text: Option<&str>, source: LessonSource) -> String {
    let week_text = week_text.unwrap_or_default();
    let week_text = match source {
        LessonSource::Cors => week_text.replace("&nbsp;", " "),
        LessonSource::Bulletin | LessonSource::TimetableDelta => week_text.to_string(),
    };
    titleize(&clean(&week_text))
}

pub fn normalize_lesson_type(lesson_type: Option<&str>) -> String {
    titleize(&clean(lesson_type.unwrap_or_default()))
}

/// Cleans one raw lesson row.
///
/// Rows whose day is not recognised or whose end time is not after the start
/// time are rejected so that every [`Lesson`] keeps `start_time < end_time`.
pub fn normalize_lesson(raw: &RawLesson, source: LessonSource) -> Result<Lesson, LessonDefect> {
    let day_text = titleize(&clean(raw.day_text.as_deref().unwrap_or_default()));
    let day: Day = day_text
        .parse()
        .map_err(|_| LessonDefect::UnknownDay(day_text.clone()))?;
    let start_time = normalize_time(raw.start_time.as_deref().unwrap_or_default());
    let end_time = normalize_time(raw.end_time.as_deref().unwrap_or_default());
    if start_time >= end_time {
        return Err(LessonDefect::EmptyInterval {
            start: start_time,
            end: end_time,
        });
    }
    Ok(Lesson {
        lesson_type: normalize_lesson_type(raw.lesson_type.as_deref()),
        class_no: clean(raw.class_no.as_deref().unwrap_or_default()),
        day,
        start_time,
        end_time,
        week_pattern: normalize_week_text(raw.week_text.as_deref(), source),
        venue: normalize_venue(raw.venue.as_deref(), source),
    })
}
