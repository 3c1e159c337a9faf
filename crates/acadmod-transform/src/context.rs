//! Run context threaded through every pipeline stage.
//!
//! Holds the academic year and semester being processed and accumulates the
//! recoverable issues of the run. Each recorded issue is also emitted as a
//! `tracing` event at the level matching its severity.

use tracing::{error, info, warn};

use acadmod_model::{AcadYear, Issue, IssueKind, IssueSeverity, Semester};

#[derive(Debug, Clone)]
pub struct RunContext {
    acad_year: AcadYear,
    semester: Option<Semester>,
    issues: Vec<Issue>,
}

impl RunContext {
    /// Context for a year-level run (aggregation and splitting).
    pub fn for_year(acad_year: AcadYear) -> Self {
        Self {
            acad_year,
            semester: None,
            issues: Vec::new(),
        }
    }

    pub fn for_semester(acad_year: AcadYear, semester: Semester) -> Self {
        Self {
            acad_year,
            semester: Some(semester),
            issues: Vec::new(),
        }
    }

    pub fn acad_year(&self) -> AcadYear {
        self.acad_year
    }

    pub fn semester(&self) -> Option<Semester> {
        self.semester
    }

    /// Records an issue, tagging it with this run's semester when it has none.
    pub fn record(&mut self, mut issue: Issue) {
        if issue.semester.is_none() {
            issue.semester = self.semester;
        }
        let semester = issue
            .semester
            .map(|semester| semester.to_string())
            .unwrap_or_default();
        let module = issue.module_code.as_deref().unwrap_or("");
        let field = issue.field.as_deref().unwrap_or("");
        let kind = issue.kind.as_str();
        match issue.severity {
            IssueSeverity::Error => error!(
                acad_year = %self.acad_year, semester, kind, module, field,
                values = ?issue.values, "{}", issue.message
            ),
            IssueSeverity::Warning => warn!(
                acad_year = %self.acad_year, semester, kind, module, field,
                values = ?issue.values, "{}", issue.message
            ),
            IssueSeverity::Info => info!(
                acad_year = %self.acad_year, semester, kind, module, field,
                values = ?issue.values, "{}", issue.message
            ),
        }
        self.issues.push(issue);
    }

    /// Shorthand for a module-scoped issue.
    pub fn module_issue(
        &mut self,
        kind: IssueKind,
        module_code: &str,
        message: impl Into<String>,
        values: impl IntoIterator<Item = String>,
    ) {
        self.record(
            Issue::new(kind, message)
                .with_module(module_code)
                .with_values(values),
        );
    }

    /// Appends issues already recorded (and logged) by another run.
    pub fn absorb(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semester_is_attached_to_recorded_issues() {
        let semester = Semester::new(2).unwrap();
        let mut ctx = RunContext::for_semester(AcadYear::new(2016), semester);
        ctx.module_issue(
            IssueKind::UnknownRole,
            "CS1010",
            "role not recognised",
            ["Tutor".to_string()],
        );
        assert_eq!(ctx.issues()[0].semester, Some(semester));
        assert_eq!(ctx.issues()[0].values, vec!["Tutor".to_string()]);
    }

    #[test]
    fn absorb_preserves_order() {
        let year = AcadYear::new(2016);
        let mut year_ctx = RunContext::for_year(year);
        let mut first = RunContext::for_semester(year, Semester::new(1).unwrap());
        first.record(Issue::new(IssueKind::Orphan, "first"));
        let mut second = RunContext::for_semester(year, Semester::new(2).unwrap());
        second.record(Issue::new(IssueKind::Orphan, "second"));
        year_ctx.absorb(first.into_issues());
        year_ctx.absorb(second.into_issues());
        let messages: Vec<_> = year_ctx.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
