//! Implementation of `xref status`.

use std::{path::Path, process::ExitCode};

use xref_config::{Config, discover_config_files, format_path_for_display};
use xref_search::SearchContext;
use xref_table::{Table, load_table};

use super::shared::{display_table_path, search_params};
use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, table statistics and the number of recognized units.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let cwd = &ctx.cwd;

    let config_files = discover_config_files(cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!("Run {} to create a configuration file.", subheader("xref init"));
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("   {}", format_path_for_display(path, Some(cwd.as_path())));
    }
    println!();

    let config = &ctx.config;

    println!("{}", subheader("Tables:"));
    let dictionary = show_table(config, "dictionary", config.tables.dictionary.as_deref());
    let descriptions = show_table(config, "descriptions", config.tables.descriptions.as_deref());
    println!();

    if let (Some(dictionary), Some(descriptions)) = (dictionary, descriptions) {
        let search = SearchContext::new(dictionary, descriptions, search_params(config));
        println!("{}", subheader("Units:"));
        println!(
            "   {} recognized {}",
            search.units().len(),
            dim(&format!("(dictionary column {})", config.search.unit_column))
        );
        println!();
    }

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
    } else {
        println!(
            "{}",
            warning(&format!(
                "{} configuration warning(s); run 'xref check' for details.",
                warnings.len()
            ))
        );
    }

    ExitCode::SUCCESS
}

/// Prints one table line and returns the table if it loads.
fn show_table(config: &Config, label: &str, path: Option<&Path>) -> Option<Table> {
    let Some(path) = path else {
        println!("   {label} {}", dim("(not configured)"));
        return None;
    };
    let display_path = dim(&format!("-> {}", display_table_path(config, path)));
    match load_table(path) {
        Ok(table) => {
            println!(
                "   {label} {display_path} {}",
                dim(&format!(
                    "({} rows, {} columns)",
                    table.row_count(),
                    table.column_count()
                ))
            );
            Some(table)
        }
        Err(e) => {
            println!("   {label} {display_path} {}", warning(&format!("[{e}]")));
            None
        }
    }
}
