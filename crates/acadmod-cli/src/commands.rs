use anyhow::Result;
use comfy_table::Table;

use acadmod_cli::config::Config;
use acadmod_cli::run::{RunOptions, run_semester_command, run_year_command};
use acadmod_cli::types::RunSummary;
use acadmod_model::DataCategory;

use crate::cli::{CategoriesArgs, RunArgs, SemesterArgs, YearArgs};
use crate::summary::apply_table_style;

fn run_options(args: &RunArgs) -> Result<RunOptions> {
    let config = Config::load(args.config.as_deref())?;
    Ok(RunOptions::new(&args.input_dir, &args.output_dir)
        .with_config(config)
        .with_dry_run(args.dry_run))
}

pub fn run_semester(args: &SemesterArgs) -> Result<RunSummary> {
    let options = run_options(&args.run)?;
    run_semester_command(&options, args.year, args.semester)
}

pub fn run_year(args: &YearArgs) -> Result<RunSummary> {
    let options = run_options(&args.run)?;
    run_year_command(&options, args.year)
}

pub fn run_categories(args: &CategoriesArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let mut table = Table::new();
    table.set_header(vec!["Category", "Role", "File", "Description"]);
    apply_table_style(&mut table);
    for category in DataCategory::ALL {
        let role = if category.is_primary() {
            "primary"
        } else {
            "auxiliary"
        };
        table.add_row(vec![
            category.as_str(),
            role,
            config.sources.file_name(category),
            category.description(),
        ]);
    }
    println!("{table}");
    println!("Lesson types: {}", config.sources.lesson_types);
    Ok(())
}
