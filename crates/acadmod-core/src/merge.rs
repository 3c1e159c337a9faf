//! Semester merger.
//!
//! Combines the identity-resolved records of one semester into a single
//! [`SemesterModule`] per primary module code. Sources are coalesced field by
//! field in a fixed order: bidding system, then bulletin, then exam schedule.
//! A later source wins whenever it defines a field.

use std::collections::BTreeSet;

use tracing::debug;

use acadmod_ingest::LessonTypeTable;
use acadmod_model::{
    Day, DayPeriod, ExamInfo, Issue, IssueKind, Lesson, LessonKind, SemesterModule,
};
use acadmod_transform::{Lecturer, ModuleFields, ResolvedSemester, RunContext};

/// Enrollment roles whose holders are listed as lecturers.
pub const LECTURER_ROLES: [&str; 3] = ["Lecturer", "Co-Lecturer", "Visiting Professor"];

/// Field-by-field coalescing that records overridden values.
struct Coalesce<'a> {
    module_code: &'a str,
    ctx: &'a mut RunContext,
}

impl Coalesce<'_> {
    fn value<T>(&mut self, field: &str, current: &mut Option<T>, later: Option<&T>)
    where
        T: Clone + PartialEq + std::fmt::Debug,
    {
        let Some(later) = later else {
            return;
        };
        if let Some(earlier) = current.as_ref()
            && earlier != later
        {
            self.conflict(field, format!("{earlier:?}"), format!("{later:?}"));
        }
        *current = Some(later.clone());
    }

    fn text(&mut self, field: &str, current: &mut Option<String>, later: Option<&String>) {
        let Some(later) = later else {
            return;
        };
        if let Some(earlier) = current.as_ref()
            && earlier != later
        {
            self.conflict(field, earlier.clone(), later.clone());
        }
        *current = Some(later.clone());
    }

    fn list<T: Clone + PartialEq>(&mut self, field: &str, current: &mut Vec<T>, later: &[T]) {
        if later.is_empty() {
            return;
        }
        if !current.is_empty() && current.as_slice() != later {
            self.conflict(
                field,
                format!("{} entries", current.len()),
                format!("{} entries", later.len()),
            );
        }
        *current = later.to_vec();
    }

    fn conflict(&mut self, field: &str, earlier: String, later: String) {
        self.ctx.record(
            Issue::new(IssueKind::FieldConflict, format!("{field} overridden by a later source"))
                .with_module(self.module_code)
                .with_field(field)
                .with_values([earlier, later]),
        );
    }

    fn fields(&mut self, merged: &mut ModuleFields, later: &ModuleFields) {
        self.text("title", &mut merged.title, later.title.as_ref());
        self.text("department", &mut merged.department, later.department.as_ref());
        self.text("description", &mut merged.description, later.description.as_ref());
        self.text("credit", &mut merged.credit, later.credit.as_ref());
        self.text("workload", &mut merged.workload, later.workload.as_ref());
        self.text("prerequisite", &mut merged.prerequisite, later.prerequisite.as_ref());
        self.text("preclusion", &mut merged.preclusion, later.preclusion.as_ref());
        self.text("corequisite", &mut merged.corequisite, later.corequisite.as_ref());
        self.list("types", &mut merged.types, &later.types);
        self.list("timetable", &mut merged.timetable, &later.timetable);
        self.exam(&mut merged.exam, &later.exam);

        let cross_module: BTreeSet<String> = merged
            .cross_module
            .iter()
            .chain(&later.cross_module)
            .cloned()
            .collect();
        merged.cross_module = cross_module.into_iter().collect();
    }

    fn exam(&mut self, merged: &mut ExamInfo, later: &ExamInfo) {
        self.text("examDate", &mut merged.date, later.date.as_ref());
        self.text("examDuration", &mut merged.duration, later.duration.as_ref());
        self.value("examOpenBook", &mut merged.open_book, later.open_book.as_ref());
        self.text("examVenue", &mut merged.venue, later.venue.as_ref());
    }
}

fn lecturer_names(module_code: &str, lecturers: &[Lecturer], ctx: &mut RunContext) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for lecturer in lecturers {
        if LECTURER_ROLES.contains(&lecturer.role.as_str()) {
            if !names.contains(&lecturer.name) {
                names.push(lecturer.name.clone());
            }
        } else {
            ctx.record(
                Issue::new(IssueKind::UnknownRole, "enrollment role not listed, entry dropped")
                    .with_module(module_code)
                    .with_field("lecturers")
                    .with_values([lecturer.role.clone(), lecturer.name.clone()]),
            );
        }
    }
    names
}

/// Lecture and tutorial `"Day Period"` sets, in day then period order.
fn lesson_periods(
    module_code: &str,
    timetable: &[Lesson],
    lesson_types: &LessonTypeTable,
    ctx: &mut RunContext,
) -> (Vec<String>, Vec<String>) {
    let mut lecture: BTreeSet<(Day, DayPeriod)> = BTreeSet::new();
    let mut tutorial: BTreeSet<(Day, DayPeriod)> = BTreeSet::new();
    let mut unknown: BTreeSet<&str> = BTreeSet::new();

    for lesson in timetable {
        let slot = (lesson.day, DayPeriod::from_start_time(&lesson.start_time));
        match lesson_types.kind_of(&lesson.lesson_type) {
            Some(LessonKind::Lecture) => {
                lecture.insert(slot);
            }
            Some(LessonKind::Tutorial) => {
                tutorial.insert(slot);
            }
            None => {
                unknown.insert(&lesson.lesson_type);
            }
        }
    }
    for lesson_type in unknown {
        ctx.record(
            Issue::new(
                IssueKind::UnknownLessonType,
                "lesson type missing from the lesson type table, excluded from periods",
            )
            .with_module(module_code)
            .with_field("lessonType")
            .with_values([lesson_type]),
        );
    }

    let render = |slots: BTreeSet<(Day, DayPeriod)>| {
        slots
            .into_iter()
            .map(|(day, period)| format!("{day} {period}"))
            .collect::<Vec<_>>()
    };
    (render(lecture), render(tutorial))
}

/// Merges every source of one primary module code.
///
/// The exam schedule is coalesced last, so its date, duration and venue
/// replace the bidding system's exam fields rather than the reverse. Keep
/// that order; `later_sources_win_defined_fields` pins it.
pub fn merge_module(
    module_code: &str,
    resolved: &ResolvedSemester,
    lesson_types: &LessonTypeTable,
    ctx: &mut RunContext,
) -> SemesterModule {
    let mut merged = resolved.cors.get(module_code).cloned().unwrap_or_default();
    {
        let mut coalesce = Coalesce {
            module_code,
            ctx: &mut *ctx,
        };
        if let Some(bulletin) = resolved.bulletin.get(module_code) {
            coalesce.fields(&mut merged, bulletin);
        }
        if let Some(exam) = resolved.exams.get(module_code) {
            coalesce.exam(&mut merged.exam, exam);
        }
    }

    let lecturers = resolved
        .enrollment
        .get(module_code)
        .map(|lecturers| lecturer_names(module_code, lecturers, ctx))
        .unwrap_or_default();

    let timetable = if merged.timetable.is_empty() {
        resolved
            .timetable_delta
            .get(module_code)
            .cloned()
            .unwrap_or_default()
    } else {
        merged.timetable
    };
    let (lecture_periods, tutorial_periods) =
        lesson_periods(module_code, &timetable, lesson_types, ctx);

    SemesterModule {
        module_code: module_code.to_string(),
        title: merged.title,
        department: merged.department,
        description: merged.description,
        credit: merged.credit,
        workload: merged.workload,
        types: merged.types,
        cross_module: merged.cross_module,
        corequisite: merged.corequisite,
        prerequisite: merged.prerequisite,
        preclusion: merged.preclusion,
        exam_info: (!merged.exam.is_empty()).then_some(merged.exam),
        timetable,
        lecturers,
        lecture_periods,
        tutorial_periods,
        bidding_stats: resolved
            .bidding_stats
            .get(module_code)
            .cloned()
            .unwrap_or_default(),
    }
}

/// Produces one [`SemesterModule`] per primary code, sorted by module code.
pub fn merge_semester(
    resolved: &ResolvedSemester,
    lesson_types: &LessonTypeTable,
    ctx: &mut RunContext,
) -> Vec<SemesterModule> {
    let modules: Vec<SemesterModule> = resolved
        .primary
        .iter()
        .map(|code| merge_module(code, resolved, lesson_types, ctx))
        .collect();
    debug!(modules = modules.len(), "semester merged");
    modules
}
