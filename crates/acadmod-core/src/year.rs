//! Year aggregation.
//!
//! Folds up to four semesters of merged modules into one [`YearModule`] per
//! module code. Semester-invariant fields are checked for agreement; the latest
//! semester that defines a field supplies its value.

use std::collections::BTreeMap;

use tracing::debug;

use acadmod_model::{
    InvariantField, Issue, IssueKind, Semester, SemesterHistory, SemesterModule, YearModule,
};
use acadmod_transform::RunContext;

/// Distinct values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

fn aggregate_module(
    module_code: &str,
    offerings: &[(Semester, &SemesterModule)],
    ctx: &mut RunContext,
) -> YearModule {
    let mut year = YearModule {
        module_code: module_code.to_string(),
        ..YearModule::default()
    };

    for field in InvariantField::ALL {
        let defined = || offerings.iter().filter_map(|(_, module)| module.invariant(field));
        let values = distinct(defined());
        if values.len() > 1 {
            ctx.record(
                Issue::new(
                    IssueKind::InconsistentField,
                    format!("{field} differs between semesters, latest semester kept"),
                )
                .with_module(module_code)
                .with_field(field.as_str())
                .with_values(values),
            );
        }
        year.set_invariant(field, defined().last().map(str::to_string));
    }

    let listings: Vec<String> = offerings
        .iter()
        .map(|(_, module)| module.cross_module.join(" / "))
        .collect();
    let distinct_listings = distinct(listings.iter().map(String::as_str));
    if distinct_listings.len() > 1 {
        ctx.record(
            Issue::new(
                IssueKind::CrossListingChanged,
                "cross-listed codes differ between semesters",
            )
            .with_module(module_code)
            .with_field("crossModule")
            .with_values(listings.iter().cloned()),
        );
    }
    if let Some((_, latest)) = offerings.last() {
        year.cross_module = latest.cross_module.clone();
    }

    year.history = offerings
        .iter()
        .map(|(semester, module)| SemesterHistory::from_module(*semester, module))
        .collect();
    year
}

/// Aggregates per-semester module sets into year records sorted by code.
///
/// Semesters may be given in any order; history entries are kept in semester
/// order. Issues are recorded in module-code order, then field order.
pub fn aggregate_year(
    semesters: &[(Semester, Vec<SemesterModule>)],
    ctx: &mut RunContext,
) -> Vec<YearModule> {
    let mut ordered: Vec<&(Semester, Vec<SemesterModule>)> = semesters.iter().collect();
    ordered.sort_by_key(|(semester, _)| *semester);

    let mut grouped: BTreeMap<&str, Vec<(Semester, &SemesterModule)>> = BTreeMap::new();
    for (semester, modules) in ordered {
        for module in modules {
            grouped
                .entry(module.module_code.as_str())
                .or_default()
                .push((*semester, module));
        }
    }

    let modules: Vec<YearModule> = grouped
        .into_iter()
        .map(|(code, offerings)| aggregate_module(code, &offerings, ctx))
        .collect();
    debug!(modules = modules.len(), "year aggregated");
    modules
}
