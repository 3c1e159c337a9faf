//! Exam timestamps.
//!
//! Both exam sources are normalized to `YYYY-MM-DDTHH:MM+08:00`. Bidding-system
//! dates carry a coarse session marker (`AM`, `PM`, `EVENING`) instead of a
//! clock time; exam-timetable rows carry a separate `Time` column.

use chrono::{Datelike, NaiveDate, Weekday};

/// Bidding-system placeholder for modules without an exam.
pub const NO_EXAM_DATE: &str = "No Exam Date.";

const OFFSET: &str = "+08:00";

const CORS_DATE_FORMATS: &[&str] = &["%d-%m-%Y", "%d %b %Y", "%d %B %Y", "%d/%m/%Y"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExamDateError {
    /// The value cannot be read as a date (and time). Fatal to the run.
    Malformed(String),
    /// The date is valid but the session marker is not one of the known ones.
    UnknownMarker(String),
}

fn timestamp(date: NaiveDate, hour: u32, minute: u32) -> String {
    format!("{}T{hour:02}:{minute:02}{OFFSET}", date.format("%Y-%m-%d"))
}

fn parse_cors_day(value: &str) -> Option<NaiveDate> {
    CORS_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Parses a bidding-system exam date such as `"25-11-2016 PM"`.
///
/// `AM` is 09:00, `EVENING` 17:00 and `PM` 13:00, except on Fridays where
/// afternoon papers start at 14:30. Returns `Ok(None)` for the no-exam
/// placeholder and for empty values.
pub fn cors_exam_date(value: &str) -> Result<Option<String>, ExamDateError> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(NO_EXAM_DATE) {
        return Ok(None);
    }
    let (day, marker) = value.rsplit_once(' ').ok_or_else(|| {
        ExamDateError::Malformed("expected '<date> <AM|PM|EVENING>'".to_string())
    })?;
    let date = parse_cors_day(day.trim())
        .ok_or_else(|| ExamDateError::Malformed(format!("unrecognised date '{}'", day.trim())))?;
    let (hour, minute) = match marker.to_ascii_uppercase().as_str() {
        "AM" => (9, 0),
        "PM" if date.weekday() == Weekday::Fri => (14, 30),
        "PM" => (13, 0),
        "EVENING" => (17, 0),
        _ => return Err(ExamDateError::UnknownMarker(marker.to_string())),
    };
    Ok(Some(timestamp(date, hour, minute)))
}

/// Parses a clock time like `9:00 AM`, `0900AM`, `900PM` or `14:30`.
fn parse_clock(value: &str) -> Option<(u32, u32)> {
    let compact: String = value
        .to_ascii_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let (digits, meridiem) = if let Some(rest) = compact.strip_suffix("AM") {
        (rest, Some(false))
    } else if let Some(rest) = compact.strip_suffix("PM") {
        (rest, Some(true))
    } else {
        (compact.as_str(), None)
    };
    let digits: String = digits.chars().filter(|c| *c != ':' && *c != '.').collect();
    if digits.is_empty() || digits.len() > 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hour, minute) = if digits.len() <= 2 {
        (digits.parse::<u32>().ok()?, 0)
    } else {
        let split = digits.len() - 2;
        (
            digits[..split].parse::<u32>().ok()?,
            digits[split..].parse::<u32>().ok()?,
        )
    };
    if minute >= 60 {
        return None;
    }
    match meridiem {
        Some(pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            let hour = match (pm, hour) {
                (false, 12) => 0,
                (true, 12) => 12,
                (true, hour) => hour + 12,
                (false, hour) => hour,
            };
            Some((hour, minute))
        }
        None if hour < 24 => Some((hour, minute)),
        None => None,
    }
}

/// Combines an exam-timetable `Date` (`D/M/YYYY`) and `Time` into a timestamp.
///
/// Only the first whitespace-delimited token of the date is significant.
/// Returns `Ok(None)` when the row has no date at all.
pub fn exam_timetable_date(
    date: Option<&str>,
    time: Option<&str>,
) -> Result<Option<String>, ExamDateError> {
    let Some(day) = date.and_then(|date| date.split_whitespace().next()) else {
        return Ok(None);
    };
    let day = NaiveDate::parse_from_str(day, "%d/%m/%Y")
        .map_err(|_| ExamDateError::Malformed(format!("unrecognised date '{day}'")))?;
    let time = time.map(str::trim).unwrap_or_default();
    let (hour, minute) = parse_clock(time)
        .ok_or_else(|| ExamDateError::Malformed(format!("unrecognised time '{time}'")))?;
    Ok(Some(timestamp(day, hour, minute)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friday_afternoon_papers_start_later() {
        // 25 Nov 2016 is a Friday, 22 Nov 2016 a Tuesday.
        assert_eq!(
            cors_exam_date("25 Nov 2016 PM"),
            Ok(Some("2016-11-25T14:30+08:00".to_string()))
        );
        assert_eq!(
            cors_exam_date("22 Nov 2016 PM"),
            Ok(Some("2016-11-22T13:00+08:00".to_string()))
        );
        assert_eq!(
            cors_exam_date("23-11-2016 AM"),
            Ok(Some("2016-11-23T09:00+08:00".to_string()))
        );
        assert_eq!(
            cors_exam_date("23-11-2016 EVENING"),
            Ok(Some("2016-11-23T17:00+08:00".to_string()))
        );
    }

    #[test]
    fn no_exam_placeholder() {
        assert_eq!(cors_exam_date("No Exam Date."), Ok(None));
        assert_eq!(cors_exam_date("  "), Ok(None));
    }

    #[test]
    fn unknown_marker_is_recoverable() {
        assert_eq!(
            cors_exam_date("23-11-2016 NOON"),
            Err(ExamDateError::UnknownMarker("NOON".to_string()))
        );
    }

    #[test]
    fn malformed_dates_are_fatal() {
        assert!(matches!(
            cors_exam_date("sometime"),
            Err(ExamDateError::Malformed(_))
        ));
        assert!(matches!(
            cors_exam_date("31-02-2016 AM"),
            Err(ExamDateError::Malformed(_))
        ));
    }

    #[test]
    fn exam_timetable_times() {
        let date = Some("23/11/2016 (Wed)");
        assert_eq!(
            exam_timetable_date(date, Some("9:00 AM")),
            Ok(Some("2016-11-23T09:00+08:00".to_string()))
        );
        assert_eq!(
            exam_timetable_date(date, Some("900PM")),
            Ok(Some("2016-11-23T21:00+08:00".to_string()))
        );
        assert_eq!(
            exam_timetable_date(date, Some("12:00 PM")),
            Ok(Some("2016-11-23T12:00+08:00".to_string()))
        );
        assert_eq!(
            exam_timetable_date(date, Some("1430")),
            Ok(Some("2016-11-23T14:30+08:00".to_string()))
        );
        assert_eq!(exam_timetable_date(None, Some("9:00 AM")), Ok(None));
    }

    #[test]
    fn exam_timetable_rejects_bad_times() {
        assert!(matches!(
            exam_timetable_date(Some("23/11/2016"), Some("13:00 PM")),
            Err(ExamDateError::Malformed(_))
        ));
        assert!(matches!(
            exam_timetable_date(Some("23/11/2016"), None),
            Err(ExamDateError::Malformed(_))
        ));
    }
}
