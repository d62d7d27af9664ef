//! Shared helpers for command implementations.

use std::path::Path;

use xref_config::{Config, ConfigWarning, format_path_for_display};
use xref_search::SearchParams;

use crate::cli::output::dim;

/// Builds search parameters from the effective configuration.
pub fn search_params(config: &Config) -> SearchParams {
    let search = &config.search;
    SearchParams {
        dictionary_columns: search.dictionary_columns.clone(),
        description_columns: search.description_columns.clone(),
        unit_column: search.unit_column,
        unit_synonyms: config.units.clone(),
        min_term_length: search.min_term_length,
        epsilon: search.epsilon,
    }
}

/// Formats a table path relative to the config root, or `~`-relative when outside it.
pub fn display_table_path(config: &Config, path: &Path) -> String {
    format_path_for_display(path, config.config_root.as_deref())
}

/// Prints hints for resolving common warnings, once per kind.
pub fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints = Vec::new();

    for warning in warnings {
        let hint = match warning {
            ConfigWarning::NoTablesDefined | ConfigWarning::TableNotConfigured { .. } => {
                "add a [tables] section naming the dictionary and descriptions files"
            }
            ConfigWarning::TableMissing { .. } => {
                "create the missing file or fix its path (paths are relative to the config file)"
            }
            ConfigWarning::TableNotFile { .. } => "table paths must point to files, not directories",
            ConfigWarning::UnsupportedTableFormat { .. } => {
                "save the table as .csv, .tsv or .json"
            }
            ConfigWarning::InvalidColumnPattern { .. } => {
                "column patterns are globs such as \"*\", \"desc*\" or \"[ab]*\""
            }
            ConfigWarning::InvalidEpsilon { .. } => "use a small positive epsilon such as 1e-9",
        };
        hints.push(hint);
    }

    hints.sort_unstable();
    hints.dedup();

    for hint in hints {
        println!("{}", dim(&format!("Hint: {hint}")));
    }
}
