//! Semester and year pipelines.
//!
//! A semester run reads the six category files, normalizes and resolves them,
//! then merges and extracts venues as straight-line steps. A year run executes
//! its semester runs on scoped threads and joins their results in semester
//! order before aggregating on the calling thread.

use std::collections::BTreeMap;
use std::thread;
use std::time::Instant;

use tracing::{info, info_span, warn};

use acadmod_ingest::{SemesterSources, SourceLayout, read_semester_sources};
use acadmod_model::{
    AcadYear, DataCategory, Issue, IssueKind, IssueSeverity, RunReport, Semester, SemesterModule,
    YearModule,
};
use acadmod_transform::{CategoryRecords, RunContext, resolve_semester};

use crate::error::{PipelineError, Result};
use crate::merge::merge_semester;
use crate::pipeline_context::PipelineContext;
use crate::venues::extract_venues;
use crate::year::aggregate_year;

/// Everything a semester run produces, held in memory until written.
#[derive(Debug, Clone)]
pub struct SemesterOutput {
    pub acad_year: AcadYear,
    pub semester: Semester,
    /// Merged modules sorted by module code.
    pub modules: Vec<SemesterModule>,
    /// Normalized per-category records of each module.
    pub records: BTreeMap<String, CategoryRecords>,
    pub venues: Vec<String>,
    pub report: RunReport,
}

#[derive(Debug, Clone)]
pub struct YearOutput {
    pub acad_year: AcadYear,
    /// Semester runs in semester order; absent semesters are skipped.
    pub semesters: Vec<SemesterOutput>,
    /// Year records sorted by module code.
    pub modules: Vec<YearModule>,
    pub report: RunReport,
}

fn record_source_issues(sources: &SemesterSources, ctx: &mut RunContext) {
    if !sources.missing.is_empty() {
        ctx.record(
            Issue::new(IssueKind::MissingSource, "source files absent, read as empty")
                .with_values(sources.missing.iter().map(DataCategory::to_string)),
        );
    }
    for (category, reason) in &sources.unreadable {
        ctx.record(Issue {
            severity: IssueSeverity::Warning,
            ..Issue::new(
                IssueKind::MissingSource,
                format!("source file unreadable, read as empty: {reason}"),
            )
            .with_values([category.to_string()])
        });
    }
    for (category, reason) in &sources.rejected {
        ctx.record(
            Issue::new(IssueKind::InvalidRecord, format!("record skipped: {reason}"))
                .with_field(category.as_str()),
        );
    }
    for (category, count) in &sources.uncoded {
        ctx.record(
            Issue::new(IssueKind::MissingCode, "records without a module code skipped")
                .with_field(category.as_str())
                .with_values([count.to_string()]),
        );
    }
    for (category, code) in sources.duplicates() {
        ctx.record(
            Issue::new(
                IssueKind::DuplicateRecord,
                "module code repeated in source file, later record kept",
            )
            .with_module(code)
            .with_field(category.as_str()),
        );
    }
}

/// Runs the read → normalize → resolve → merge → venues steps for a semester.
///
/// # Errors
///
/// Fails only on a malformed exam date; every other anomaly ends up in the
/// returned report.
pub fn run_semester(
    pipeline: &PipelineContext,
    acad_year: AcadYear,
    semester: Semester,
) -> Result<SemesterOutput> {
    let span = info_span!("semester_run", acad_year = %acad_year, semester = %semester);
    let _guard = span.enter();
    let started = Instant::now();

    let mut ctx = RunContext::for_semester(acad_year, semester);
    let sources = read_semester_sources(&pipeline.input_dir, &pipeline.layout, acad_year, semester);
    record_source_issues(&sources, &mut ctx);

    let resolved =
        resolve_semester(&sources, &mut ctx).map_err(|source| PipelineError::Semester {
            acad_year,
            semester,
            source,
        })?;
    let modules = merge_semester(&resolved, &pipeline.lesson_types, &mut ctx);
    let venues = extract_venues(&modules);

    let mut report = RunReport::new(acad_year, Some(semester));
    report.module_count = modules.len();
    report.venue_count = venues.len();
    report.issues = ctx.into_issues();

    info!(
        modules = report.module_count,
        venues = report.venue_count,
        orphans = resolved.orphans.len(),
        warnings = report.warning_count(),
        errors = report.error_count(),
        duration_ms = started.elapsed().as_millis(),
        "semester run complete"
    );

    Ok(SemesterOutput {
        acad_year,
        semester,
        modules,
        records: resolved.category_records(),
        venues,
        report,
    })
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

/// Runs the semester pipelines of a year concurrently, then aggregates them.
///
/// Semesters whose directory does not exist are skipped with an
/// informational issue.
///
/// # Errors
///
/// The first failing semester, in semester order, fails the whole year.
pub fn run_year(
    pipeline: &PipelineContext,
    acad_year: AcadYear,
    semesters: &[Semester],
) -> Result<YearOutput> {
    let span = info_span!("year_run", acad_year = %acad_year);
    let _guard = span.enter();
    let started = Instant::now();

    let mut ctx = RunContext::for_year(acad_year);
    let mut present = Vec::new();
    for &semester in semesters {
        if SourceLayout::semester_dir(&pipeline.input_dir, acad_year, semester).is_dir() {
            present.push(semester);
        } else {
            warn!(semester = %semester, "semester directory absent, skipped");
            ctx.record(
                Issue::new(IssueKind::MissingSource, "semester directory absent, skipped")
                    .with_semester(semester)
                    .with_values(DataCategory::ALL.iter().map(DataCategory::to_string)),
            );
        }
    }

    let results: Vec<Result<SemesterOutput>> = thread::scope(|scope| {
        let handles: Vec<_> = present
            .iter()
            .map(|&semester| {
                let span = span.clone();
                scope.spawn(move || {
                    let _guard = span.enter();
                    run_semester(pipeline, acad_year, semester)
                })
            })
            .collect();
        handles.into_iter().map(join).collect()
    });
    let outputs = results.into_iter().collect::<Result<Vec<_>>>()?;

    for output in &outputs {
        ctx.absorb(output.report.issues.iter().cloned());
    }
    let by_semester: Vec<(Semester, Vec<SemesterModule>)> = outputs
        .iter()
        .map(|output| (output.semester, output.modules.clone()))
        .collect();
    let modules = aggregate_year(&by_semester, &mut ctx);

    let mut report = RunReport::new(acad_year, None);
    report.module_count = modules.len();
    report.venue_count = outputs
        .iter()
        .flat_map(|output| &output.venues)
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    report.issues = ctx.into_issues();

    info!(
        semesters = outputs.len(),
        modules = report.module_count,
        warnings = report.warning_count(),
        errors = report.error_count(),
        duration_ms = started.elapsed().as_millis(),
        "year run complete"
    );

    Ok(YearOutput {
        acad_year,
        semesters: outputs,
        modules,
        report,
    })
}
