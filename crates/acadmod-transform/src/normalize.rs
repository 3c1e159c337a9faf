//! Per-category record normalizers.
//!
//! Each function turns one raw record into its strict counterpart. Recoverable
//! anomalies are recorded on the [`RunContext`]; only malformed exam dates
//! fail.

use tracing::trace;

use acadmod_ingest::{
    BulletinModule, CorsModule, EnrollmentRecord, ExamRecord, RawBiddingStat, RawLesson,
    TimetableDelta,
};
use acadmod_model::{BiddingStat, DataCategory, ExamInfo, Issue, IssueKind, Lesson};

use crate::context::RunContext;
use crate::error::NormalizeError;
use crate::normalization::{
    ExamDateError, LessonSource, clean, clean_opt, cors_exam_date, exam_timetable_date,
    format_iso8601_duration, latest_observations, normalize_lesson, titleize, titleize_if_upper,
};
use crate::records::{Lecturer, ModuleFields};

/// Open-book marker in the unnamed exam timetable column.
const OPEN_BOOK_MARKER: &str = "*";

fn cased_text(value: Option<&str>) -> Option<String> {
    clean_opt(value).map(|text| titleize_if_upper(&text))
}

/// Splits a free-text cross-listing such as `"CS1010E, CS1010S / CS1010X"`.
fn cross_module_codes(value: Option<&str>) -> Vec<String> {
    let mut codes: Vec<String> = value
        .unwrap_or_default()
        .split(['/', ','])
        .filter_map(|code| clean_opt(Some(code)))
        .collect();
    codes.sort();
    codes.dedup();
    codes
}

fn normalize_lessons(
    module_code: &str,
    lessons: &[RawLesson],
    source: LessonSource,
    ctx: &mut RunContext,
) -> Vec<Lesson> {
    lessons
        .iter()
        .filter_map(|raw| match normalize_lesson(raw, source) {
            Ok(lesson) => Some(lesson),
            Err(defect) => {
                ctx.record(
                    Issue::new(IssueKind::InvalidLesson, format!("lesson dropped: {defect}"))
                        .with_module(module_code)
                        .with_field("timetable")
                        .with_values([defect.value()]),
                );
                None
            }
        })
        .collect()
}

fn exam_date(
    result: Result<Option<String>, ExamDateError>,
    module_code: &str,
    category: DataCategory,
    value: &str,
    ctx: &mut RunContext,
) -> Result<Option<String>, NormalizeError> {
    match result {
        Ok(date) => Ok(date),
        Err(ExamDateError::UnknownMarker(marker)) => {
            ctx.record(
                Issue::new(
                    IssueKind::UnknownTimeMarker,
                    format!("unexpected exam time marker '{marker}', exam date dropped"),
                )
                .with_module(module_code)
                .with_field("examDate")
                .with_values([value.to_string()]),
            );
            Ok(None)
        }
        Err(ExamDateError::Malformed(reason)) => Err(NormalizeError::MalformedExamDate {
            module_code: module_code.to_string(),
            category,
            value: value.to_string(),
            reason,
        }),
    }
}

/// Normalizes a bulletin entry. `types` and `cross_module` are taken as listed.
pub fn normalize_bulletin(
    module_code: &str,
    raw: &BulletinModule,
    ctx: &mut RunContext,
) -> ModuleFields {
    let mut types: Vec<String> = raw
        .types
        .iter()
        .filter_map(|module_type| clean_opt(Some(module_type.as_str())))
        .collect();
    types.sort();
    types.dedup();

    ModuleFields {
        title: cased_text(raw.module_title.as_deref()),
        department: cased_text(raw.department.as_deref()),
        description: clean_opt(raw.module_description.as_deref()),
        credit: clean_opt(raw.module_credit.as_deref()),
        workload: clean_opt(raw.workload.as_deref()),
        prerequisite: clean_opt(raw.prerequisite.as_deref()),
        preclusion: clean_opt(raw.preclusion.as_deref()),
        corequisite: clean_opt(raw.corequisite.as_deref()),
        cross_module: cross_module_codes(raw.cross_module.as_deref()),
        types,
        exam: ExamInfo::default(),
        timetable: normalize_lessons(module_code, &raw.timetable, LessonSource::Bulletin, ctx),
    }
}

/// Normalizes a bidding-system entry.
///
/// `types` holds the source module type, if any; the identity resolver
/// replaces it with the per-code classification.
///
/// # Errors
///
/// Fails when `ExamDate` is neither the no-exam placeholder nor a readable
/// `<date> <marker>` pair.
pub fn normalize_cors(
    module_code: &str,
    raw: &CorsModule,
    ctx: &mut RunContext,
) -> Result<ModuleFields, NormalizeError> {
    let exam_value = raw.exam_date.as_deref().unwrap_or_default();
    let date = exam_date(
        cors_exam_date(exam_value),
        module_code,
        DataCategory::Cors,
        exam_value,
        ctx,
    )?;

    Ok(ModuleFields {
        title: cased_text(raw.module_title.as_deref()),
        department: cased_text(raw.department.as_deref()),
        description: clean_opt(raw.module_description.as_deref()),
        credit: clean_opt(raw.module_credit.as_deref()),
        workload: clean_opt(raw.workload.as_deref()),
        prerequisite: clean_opt(raw.prerequisite.as_deref()),
        preclusion: clean_opt(raw.preclusion.as_deref()),
        corequisite: clean_opt(raw.corequisite.as_deref()),
        cross_module: Vec::new(),
        types: clean_opt(raw.module_type.as_deref()).into_iter().collect(),
        exam: ExamInfo {
            date,
            ..ExamInfo::default()
        },
        timetable: normalize_lessons(module_code, &raw.timetable, LessonSource::Cors, ctx),
    })
}

/// Normalizes an exam schedule row.
///
/// # Errors
///
/// Fails when `Date`/`Time` cannot be combined into a timestamp.
pub fn normalize_exam(
    module_code: &str,
    raw: &ExamRecord,
    ctx: &mut RunContext,
) -> Result<ExamInfo, NormalizeError> {
    let raw_date = format!(
        "{} {}",
        raw.date.as_deref().unwrap_or_default(),
        raw.time.as_deref().unwrap_or_default()
    );
    let date = exam_date(
        exam_timetable_date(raw.date.as_deref(), raw.time.as_deref()),
        module_code,
        DataCategory::ExamTimetable,
        raw_date.trim(),
        ctx,
    )?;

    let duration = clean_opt(raw.duration.as_deref()).and_then(|text| {
        let duration = format_iso8601_duration(&text);
        if duration.is_none() {
            ctx.record(
                Issue::new(IssueKind::InvalidDuration, "exam duration not understood, dropped")
                    .with_module(module_code)
                    .with_field("duration")
                    .with_values([text]),
            );
        }
        duration
    });

    let open_book = clean_opt(raw.open_book_marker()).map(|marker| marker == OPEN_BOOK_MARKER);

    Ok(ExamInfo {
        date,
        duration,
        open_book,
        venue: clean_opt(raw.venue.as_deref()),
    })
}

pub fn normalize_bidding_stat(raw: &RawBiddingStat) -> BiddingStat {
    BiddingStat {
        group: clean_opt(raw.group.as_deref()).map(|group| titleize(&group)),
        faculty: clean_opt(raw.faculty.as_deref()).map(|faculty| titleize(&faculty)),
        student_acct_type: raw
            .student_acct_type
            .as_deref()
            .and_then(|acct| clean_opt(Some(acct.replace("<br>", "").as_str()))),
        stats: raw.stats.clone(),
    }
}

/// Lecturer names with their roles; role filtering happens during the merge.
pub fn normalize_enrollment(raw: &EnrollmentRecord) -> Vec<Lecturer> {
    raw.lecturers
        .iter()
        .filter_map(|lecturer| {
            let name = clean_opt(lecturer.user.name.as_deref())?;
            let role = clean(lecturer.role.as_deref().unwrap_or_default());
            Some(Lecturer { name, role })
        })
        .collect()
}

/// Reduces a module's change log to its current lessons.
pub fn normalize_delta(
    module_code: &str,
    deltas: &[TimetableDelta],
    ctx: &mut RunContext,
) -> Vec<Lesson> {
    let latest = latest_observations(deltas);
    trace!(
        module = module_code,
        observations = deltas.len(),
        kept = latest.len(),
        "timetable delta reduced"
    );
    let rows: Vec<RawLesson> = latest
        .into_iter()
        .map(|delta| RawLesson {
            class_no: delta.class_no.clone(),
            lesson_type: delta.lesson_type.clone(),
            week_text: delta.week_text.clone(),
            day_text: delta.day_text.clone(),
            start_time: delta.start_time.clone(),
            end_time: delta.end_time.clone(),
            venue: delta.venue.clone(),
        })
        .collect();
    normalize_lessons(module_code, &rows, LessonSource::TimetableDelta, ctx)
}
