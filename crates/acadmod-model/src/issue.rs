use serde::{Deserialize, Serialize};

use crate::{AcadYear, Semester};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
    Info,
}

/// Recoverable anomalies collected during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    MissingSource,
    InvalidRecord,
    MissingCode,
    DuplicateRecord,
    Orphan,
    FieldConflict,
    InconsistentField,
    CrossListingChanged,
    UnknownLessonType,
    UnknownRole,
    UnknownTimeMarker,
    InvalidDuration,
    InvalidLesson,
}

impl IssueKind {
    pub fn severity(&self) -> IssueSeverity {
        match self {
            IssueKind::UnknownTimeMarker => IssueSeverity::Error,
            IssueKind::MissingSource | IssueKind::FieldConflict => IssueSeverity::Info,
            _ => IssueSeverity::Warning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingSource => "missing-source",
            IssueKind::InvalidRecord => "invalid-record",
            IssueKind::MissingCode => "missing-code",
            IssueKind::DuplicateRecord => "duplicate-record",
            IssueKind::Orphan => "orphan",
            IssueKind::FieldConflict => "field-conflict",
            IssueKind::InconsistentField => "inconsistent-field",
            IssueKind::CrossListingChanged => "cross-listing-changed",
            IssueKind::UnknownLessonType => "unknown-lesson-type",
            IssueKind::UnknownRole => "unknown-role",
            IssueKind::UnknownTimeMarker => "unknown-time-marker",
            IssueKind::InvalidDuration => "invalid-duration",
            IssueKind::InvalidLesson => "invalid-lesson",
        }
    }
}

/// A single recoverable issue found during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<Semester>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Offending or conflicting values, in the order they were seen.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            semester: None,
            module_code: None,
            field: None,
            values: Vec::new(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_module(mut self, module_code: impl Into<String>) -> Self {
        self.module_code = Some(module_code.into());
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_semester(mut self, semester: Semester) -> Self {
        self.semester = Some(semester);
        self
    }
}

/// Structured summary of one semester or year run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub acad_year: AcadYear,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<Semester>,
    pub module_count: usize,
    pub venue_count: usize,
    pub issues: Vec<Issue>,
}

impl RunReport {
    pub fn new(acad_year: AcadYear, semester: Option<Semester>) -> Self {
        Self {
            acad_year,
            semester,
            module_count: 0,
            venue_count: 0,
            issues: Vec::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.count_severity(IssueSeverity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(IssueSeverity::Warning)
    }

    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// Module codes excluded because only auxiliary categories mention them.
    pub fn orphans(&self) -> Vec<&str> {
        self.issues_of(IssueKind::Orphan)
            .filter_map(|issue| issue.module_code.as_deref())
            .collect()
    }

    /// Source categories that had no input file, as recorded per semester.
    pub fn missing_sources(&self) -> Vec<String> {
        self.issues_of(IssueKind::MissingSource)
            .flat_map(|issue| {
                let prefix = issue
                    .semester
                    .map(|semester| format!("semester {semester}: "))
                    .unwrap_or_default();
                issue
                    .values
                    .iter()
                    .map(move |value| format!("{prefix}{value}"))
            })
            .collect()
    }

    fn count_severity(&self, severity: IssueSeverity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}
