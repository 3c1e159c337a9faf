//! Module identity resolution.
//!
//! Expands cross-listed codes (`"CS1010 / CS1010E"`) into one logical module
//! per code, classifies bidding-system codes into general-education and
//! single-subject types, and drops auxiliary data whose code has no primary
//! (bulletin or bidding-system) record.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info_span};

use acadmod_ingest::SemesterSources;
use acadmod_model::{BiddingStat, DataCategory, ExamInfo, IssueKind, Lesson};

use crate::context::RunContext;
use crate::error::NormalizeError;
use crate::normalize::{
    normalize_bidding_stat, normalize_bulletin, normalize_cors, normalize_delta,
    normalize_enrollment, normalize_exam,
};
use crate::records::{CategoryRecords, Lecturer, ModuleFields};

static GEM_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^GE[KM]\d").expect("valid GEM code regex"));
static SSM_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SS[A-Z]\d").expect("valid SSM code regex"));

/// Splits a possibly cross-listed code on `/`, trimming each part.
///
/// Order is preserved and repeated codes are dropped.
pub fn split_module_codes(raw: &str) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for code in raw.split('/').map(str::trim).filter(|code| !code.is_empty()) {
        if !codes.iter().any(|seen| seen == code) {
            codes.push(code.to_string());
        }
    }
    codes
}

/// Classifies a single code, falling back to the source-reported type.
pub fn classify_code(code: &str, source_type: Option<&str>) -> Option<String> {
    if GEM_CODE.is_match(code) {
        Some("GEM".to_string())
    } else if SSM_CODE.is_match(code) {
        Some("SSM".to_string())
    } else {
        source_type.map(str::to_string)
    }
}

/// Normalized, identity-resolved records of one semester, keyed by module code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSemester {
    /// Codes with a bulletin or bidding-system record.
    pub primary: BTreeSet<String>,
    pub bulletin: BTreeMap<String, ModuleFields>,
    pub cors: BTreeMap<String, ModuleFields>,
    pub exams: BTreeMap<String, ExamInfo>,
    pub bidding_stats: BTreeMap<String, Vec<BiddingStat>>,
    pub timetable_delta: BTreeMap<String, Vec<Lesson>>,
    pub enrollment: BTreeMap<String, Vec<Lecturer>>,
    /// Codes that only auxiliary categories mention, ascending.
    pub orphans: Vec<String>,
}

impl ResolvedSemester {
    /// Every category's record for each primary module, for auditing.
    pub fn category_records(&self) -> BTreeMap<String, CategoryRecords> {
        self.primary
            .iter()
            .map(|code| {
                let records = CategoryRecords {
                    bulletin_modules: self.bulletin.get(code).cloned(),
                    cors: self.cors.get(code).cloned(),
                    cors_bidding_stats: self.bidding_stats.get(code).cloned().unwrap_or_default(),
                    exam_timetable: self.exams.get(code).cloned(),
                    module_timetable_delta: self
                        .timetable_delta
                        .get(code)
                        .cloned()
                        .unwrap_or_default(),
                    ivle: self.enrollment.get(code).cloned().unwrap_or_default(),
                };
                (code.clone(), records)
            })
            .collect()
    }

    fn auxiliary_categories(&self, code: &str) -> Vec<DataCategory> {
        let mut categories = Vec::new();
        if self.exams.contains_key(code) {
            categories.push(DataCategory::ExamTimetable);
        }
        if self.bidding_stats.contains_key(code) {
            categories.push(DataCategory::CorsBiddingStats);
        }
        if self.timetable_delta.contains_key(code) {
            categories.push(DataCategory::ModuleTimetableDelta);
        }
        if self.enrollment.contains_key(code) {
            categories.push(DataCategory::Ivle);
        }
        categories
    }

    fn remove_auxiliary(&mut self, code: &str) {
        self.exams.remove(code);
        self.bidding_stats.remove(code);
        self.timetable_delta.remove(code);
        self.enrollment.remove(code);
    }
}

/// Sorted union of a record's listed cross-modules and its split codes.
fn cross_listing(listed: &[String], own: &str, codes: &[String]) -> Vec<String> {
    let mut all: BTreeSet<String> = listed.iter().cloned().collect();
    if codes.len() > 1 {
        all.extend(codes.iter().cloned());
    }
    if !all.is_empty() {
        all.insert(own.to_string());
    }
    all.into_iter().collect()
}

/// Normalizes every category of a semester and resolves module identities.
///
/// Bidding-system records are expanded first: every code of a cross-listed
/// record receives the same fields, the first record seen for a code wins,
/// and `types` is the union of the classifications of all codes in all
/// records mapping to that code. Bulletin records follow unique-key
/// semantics. Auxiliary categories are then expanded the same way and
/// orphaned codes are reported and removed.
///
/// # Errors
///
/// Fails on the first malformed exam date in either exam source.
pub fn resolve_semester(
    sources: &SemesterSources,
    ctx: &mut RunContext,
) -> Result<ResolvedSemester, NormalizeError> {
    let span = info_span!("resolve_identity");
    let _guard = span.enter();

    let mut resolved = ResolvedSemester::default();

    let mut cors_types: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (raw_code, raw) in &sources.cors.records {
        let fields = normalize_cors(raw_code, raw, ctx)?;
        let codes = split_module_codes(raw_code);
        let source_type = fields.types.first().map(String::as_str);
        let record_types: BTreeSet<String> = codes
            .iter()
            .filter_map(|code| classify_code(code, source_type))
            .collect();
        for code in &codes {
            cors_types
                .entry(code.clone())
                .or_default()
                .extend(record_types.iter().cloned());
            resolved.cors.entry(code.clone()).or_insert_with(|| ModuleFields {
                cross_module: cross_listing(&fields.cross_module, code, &codes),
                ..fields.clone()
            });
        }
    }
    for (code, types) in cors_types {
        if let Some(fields) = resolved.cors.get_mut(&code) {
            fields.types = types.into_iter().collect();
        }
    }

    for (raw_code, raw) in &sources.bulletin.records {
        let fields = normalize_bulletin(raw_code, raw, ctx);
        let codes = split_module_codes(raw_code);
        for code in &codes {
            let entry = ModuleFields {
                cross_module: cross_listing(&fields.cross_module, code, &codes),
                ..fields.clone()
            };
            resolved.bulletin.insert(code.clone(), entry);
        }
    }

    resolved.primary = resolved
        .cors
        .keys()
        .chain(resolved.bulletin.keys())
        .cloned()
        .collect();

    for (raw_code, raw) in &sources.exams.records {
        let exam = normalize_exam(raw_code, raw, ctx)?;
        for code in split_module_codes(raw_code) {
            resolved.exams.insert(code, exam.clone());
        }
    }

    for (raw_code, raw_stats) in &sources.bidding_stats {
        let stats: Vec<BiddingStat> = raw_stats.iter().map(normalize_bidding_stat).collect();
        for code in split_module_codes(raw_code) {
            resolved
                .bidding_stats
                .entry(code)
                .or_default()
                .extend(stats.iter().cloned());
        }
    }

    for (raw_code, deltas) in &sources.timetable_delta {
        let lessons = normalize_delta(raw_code, deltas, ctx);
        for code in split_module_codes(raw_code) {
            resolved
                .timetable_delta
                .entry(code)
                .or_default()
                .extend(lessons.iter().cloned());
        }
    }

    for (raw_code, raw) in &sources.enrollment.records {
        let lecturers = normalize_enrollment(raw);
        for code in split_module_codes(raw_code) {
            resolved.enrollment.insert(code, lecturers.clone());
        }
    }

    let auxiliary: BTreeSet<String> = resolved
        .exams
        .keys()
        .chain(resolved.bidding_stats.keys())
        .chain(resolved.timetable_delta.keys())
        .chain(resolved.enrollment.keys())
        .cloned()
        .collect();
    for code in auxiliary.difference(&resolved.primary) {
        let categories = resolved.auxiliary_categories(code);
        ctx.module_issue(
            IssueKind::Orphan,
            code,
            "no bulletin or bidding-system record, excluded from output",
            categories.iter().map(|category| category.to_string()),
        );
        resolved.orphans.push(code.clone());
    }
    for code in resolved.orphans.clone() {
        resolved.remove_auxiliary(&code);
    }

    debug!(
        primary = resolved.primary.len(),
        orphans = resolved.orphans.len(),
        "identities resolved"
    );
    Ok(resolved)
}
