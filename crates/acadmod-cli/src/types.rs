use std::path::PathBuf;

use acadmod_model::{AcadYear, RunReport, Semester};
use acadmod_report::WriteSummary;

/// Outcome of one `semester` or `year` invocation.
#[derive(Debug)]
pub struct RunSummary {
    pub acad_year: AcadYear,
    pub semester: Option<Semester>,
    /// Directory the bundle is (or would be) published to.
    pub target: PathBuf,
    /// Semesters that contributed to a year run.
    pub semesters: Vec<Semester>,
    pub file_count: usize,
    /// `None` on a dry run.
    pub written: Option<WriteSummary>,
    pub report: RunReport,
}

impl RunSummary {
    pub fn dry_run(&self) -> bool {
        self.written.is_none()
    }
}
