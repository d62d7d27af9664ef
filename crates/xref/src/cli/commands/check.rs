//! Implementation of `xref check`.

use std::{path::Path, process::ExitCode};

use xref_config::format_path_for_display;
use xref_search::select_columns;
use xref_table::{Table, load_table};

use super::shared::{display_table_path, print_hints};
use crate::cli::{
    context::CommandContext,
    output::{dim, error, header, subheader, success, warning},
};

/// Validates the configuration and loads each table to find problems before searching.
///
/// Exits with failure when there is any warning or error.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    println!("{}", header("Checking configuration"));
    println!();

    if config.files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!("Run {} to create a configuration file.", subheader("xref init"));
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config.files {
        println!("   {}", format_path_for_display(path, Some(ctx.cwd.as_path())));
    }
    println!();

    let mut problems = Vec::new();

    println!("{}", subheader("Tables:"));
    let dictionary = check_table(ctx, "dictionary", config.tables.dictionary.as_deref(), &mut problems);
    let descriptions = check_table(
        ctx,
        "descriptions",
        config.tables.descriptions.as_deref(),
        &mut problems,
    );
    println!();

    if let Some(dictionary) = &dictionary {
        if let Err(e) = select_columns(dictionary, &config.search.dictionary_columns, "dictionary") {
            problems.push(format!("search.dictionary_columns: {e}"));
        }
        if config.search.unit_column >= dictionary.column_count() {
            problems.push(format!(
                "search.unit_column {} is out of range (dictionary has {} columns)",
                config.search.unit_column,
                dictionary.column_count()
            ));
        }
    }
    if let Some(descriptions) = &descriptions {
        if let Err(e) =
            select_columns(descriptions, &config.search.description_columns, "descriptions")
        {
            problems.push(format!("search.description_columns: {e}"));
        }
        if let Err(e) = select_columns(descriptions, &config.display.columns, "descriptions") {
            problems.push(format!("display.columns: {e}"));
        }
    }

    let warnings = config.validate();
    if warnings.is_empty() && problems.is_empty() {
        println!("{}", success("No issues found."));
        return ExitCode::SUCCESS;
    }

    if !problems.is_empty() {
        println!("{}", subheader(&format!("Errors ({}):", problems.len())));
        for problem in &problems {
            println!("   {}", error(problem));
        }
        println!();
    }

    if !warnings.is_empty() {
        println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
        for w in &warnings {
            println!("   {}", warning(&w.to_string()));
        }
        println!();
        print_hints(&warnings);
    }

    ExitCode::FAILURE
}

/// Reports one table and loads it when the path points at a file.
///
/// Missing or misplaced files are left to configuration validation.
fn check_table(
    ctx: &CommandContext,
    label: &str,
    path: Option<&Path>,
    problems: &mut Vec<String>,
) -> Option<Table> {
    let Some(path) = path else {
        println!("   {label} {}", dim("(not configured)"));
        return None;
    };

    let display_path = display_table_path(&ctx.config, path);
    if !path.is_file() {
        println!("   {label} {} {}", dim(&format!("-> {display_path}")), warning("[missing]"));
        return None;
    }

    match load_table(path) {
        Ok(table) => {
            println!(
                "   {label} {} {}",
                dim(&format!("-> {display_path}")),
                dim(&format!(
                    "({} rows, {} columns)",
                    table.row_count(),
                    table.column_count()
                ))
            );
            Some(table)
        }
        Err(e) => {
            println!("   {label} {} {}", dim(&format!("-> {display_path}")), error("[error]"));
            problems.push(e.to_string());
            None
        }
    }
}
