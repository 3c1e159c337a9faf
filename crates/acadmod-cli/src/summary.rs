use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use acadmod_cli::types::RunSummary;
use acadmod_model::{Issue, IssueSeverity};

pub fn print_summary(summary: &RunSummary) {
    match summary.semester {
        Some(semester) => println!("Academic year: {} semester {semester}", summary.acad_year),
        None => println!("Academic year: {}", summary.acad_year),
    }
    match &summary.written {
        Some(written) if written.replaced => {
            println!("Output: {} (replaced)", written.target.display());
        }
        Some(written) => println!("Output: {}", written.target.display()),
        None => println!(
            "Output: {} (dry run, nothing written)",
            summary.target.display()
        ),
    }

    let report = &summary.report;
    let info_count = report
        .issues
        .iter()
        .filter(|issue| issue.severity == IssueSeverity::Info)
        .count();
    let semesters = summary
        .semesters
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Semesters"),
        header_cell("Modules"),
        header_cell("Venues"),
        header_cell("Files"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..7 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(if semesters.is_empty() { "-".to_string() } else { semesters }),
        Cell::new(report.module_count).add_attribute(Attribute::Bold),
        Cell::new(report.venue_count),
        Cell::new(summary.file_count),
        count_cell(report.error_count(), Color::Red),
        count_cell(report.warning_count(), Color::Yellow),
        count_cell(info_count, Color::Blue),
    ]);
    println!("{table}");

    let orphans = report.orphans();
    if !orphans.is_empty() {
        println!("Orphans: {}", orphans.join(", "));
    }
    let missing = report.missing_sources();
    if !missing.is_empty() {
        println!("Missing sources: {}", missing.join(", "));
    }
    print_issue_table(&report.issues);
}

fn print_issue_table(issues: &[Issue]) {
    let mut ordered: Vec<&Issue> = issues
        .iter()
        .filter(|issue| issue.severity != IssueSeverity::Info)
        .collect();
    if ordered.is_empty() {
        return;
    }
    // Stable: issues of equal rank keep their run order.
    ordered.sort_by_key(|issue| issue.severity);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Sem"),
        header_cell("Kind"),
        header_cell("Module"),
        header_cell("Field"),
        header_cell("Message"),
        header_cell("Values"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    for issue in ordered {
        table.add_row(vec![
            severity_cell(issue.severity),
            optional_cell(issue.semester.map(|semester| semester.to_string())),
            Cell::new(issue.kind.as_str()),
            module_cell(issue.module_code.as_deref()),
            optional_cell(issue.field.clone()),
            Cell::new(&issue.message),
            values_cell(&issue.values),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(180);
    if table.column_count() >= 7 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Fixed(5)),
            ColumnConstraint::UpperBoundary(Width::Fixed(22)),
            ColumnConstraint::UpperBoundary(Width::Fixed(12)),
            ColumnConstraint::UpperBoundary(Width::Fixed(14)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        IssueSeverity::Warning => Cell::new("WARN").fg(Color::Yellow),
        IssueSeverity::Info => Cell::new("INFO").fg(Color::Blue),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn module_cell(code: Option<&str>) -> Cell {
    match code {
        Some(code) => Cell::new(code)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        None => dim_cell("-"),
    }
}

fn optional_cell(value: Option<String>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn values_cell(values: &[String]) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(values.join(", "))
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
