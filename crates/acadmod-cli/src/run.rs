//! Semester and year invocations: pipeline, bundle, publish.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use acadmod_core::{PipelineContext, run_semester, run_year};
use acadmod_model::{AcadYear, Semester};
use acadmod_report::{OutputBundle, WriteSummary, semester_bundle, write_bundle, year_bundle};

use crate::config::Config;
use crate::types::RunSummary;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub config: Config,
    pub dry_run: bool,
}

impl RunOptions {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            config: Config::default(),
            dry_run: false,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    fn pipeline(&self) -> Result<PipelineContext> {
        let pipeline =
            PipelineContext::new(&self.input_dir).with_layout(self.config.sources.clone());
        let path = pipeline.lesson_types_path();
        pipeline
            .load_lesson_types()
            .with_context(|| format!("load lesson type table {}", path.display()))
    }

    fn publish(&self, bundle: &OutputBundle, target: &Path) -> Result<Option<WriteSummary>> {
        if self.dry_run {
            info!(path = %target.display(), files = bundle.len(), "dry run, output not written");
            return Ok(None);
        }
        let summary = write_bundle(bundle, target)
            .with_context(|| format!("write output {}", target.display()))?;
        Ok(Some(summary))
    }
}

pub fn run_semester_command(
    options: &RunOptions,
    acad_year: AcadYear,
    semester: Semester,
) -> Result<RunSummary> {
    let span = info_span!("semester_command", acad_year = %acad_year, semester = %semester);
    let _guard = span.enter();

    let pipeline = options.pipeline()?;
    let output = run_semester(&pipeline, acad_year, semester)
        .with_context(|| format!("consolidate {acad_year} semester {semester}"))?;
    let bundle =
        semester_bundle(&output, options.config.json_indent).context("serialize semester output")?;
    let target = options
        .output_dir
        .join(acad_year.dir_name())
        .join(semester.to_string());
    let written = options.publish(&bundle, &target)?;

    Ok(RunSummary {
        acad_year,
        semester: Some(semester),
        target,
        semesters: vec![semester],
        file_count: bundle.len(),
        written,
        report: output.report,
    })
}

pub fn run_year_command(options: &RunOptions, acad_year: AcadYear) -> Result<RunSummary> {
    let span = info_span!("year_command", acad_year = %acad_year);
    let _guard = span.enter();

    let pipeline = options.pipeline()?;
    let output = run_year(&pipeline, acad_year, &Semester::ALL)
        .with_context(|| format!("consolidate {acad_year}"))?;
    let bundle = year_bundle(&output, options.config.json_indent).context("serialize year output")?;
    let target = options.output_dir.join(acad_year.dir_name());
    let written = options.publish(&bundle, &target)?;

    Ok(RunSummary {
        acad_year,
        semester: None,
        target,
        semesters: output.semesters.iter().map(|run| run.semester).collect(),
        file_count: bundle.len(),
        written,
        report: output.report,
    })
}
