//! Implementation of `xref search`.

use std::{path::Path, process::ExitCode};

use tracing::info;
use xref_search::{SearchContext, SearchMode, SearchOutcome};
use xref_table::export_table;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{OutputOptions, output_invalid_query, output_outcome},
};

/// Runs a query and prints the matching description rows.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let query = cmd.query();

    let search = match ctx.open_search(&cmd.tables) {
        Ok(search) => search,
        Err(code) => return code,
    };

    let mode = if cmd.direct {
        SearchMode::Direct
    } else {
        SearchMode::ViaDictionary
    };

    let mut outcome = match submit(&search, &query, mode) {
        Ok(outcome) => outcome,
        Err(code) => return code,
    };

    if outcome.offers_fallback() {
        if cmd.fallback {
            info!(
                status = outcome.status(),
                "dictionary stage found nothing, searching descriptions directly"
            );
            outcome = match submit(&search, &query, SearchMode::Direct) {
                Ok(outcome) => outcome,
                Err(code) => return code,
            };
        } else if !cmd.output.json && !cmd.output.list {
            print_fallback_hint(&outcome);
        }
    }

    if let SearchOutcome::InvalidQuery { diagnostics } = &outcome {
        output_invalid_query(&query, diagnostics, cmd.output.json);
        return ExitCode::FAILURE;
    }

    if let Some(path) = &cmd.export {
        let path = ctx.cwd.join(path);
        if let Err(code) = export_rows(&search, outcome.rows(), &path) {
            return code;
        }
    }

    let options = OutputOptions {
        json: cmd.output.json,
        list: cmd.output.list,
        limit: cmd.output.limit.unwrap_or(ctx.config.display.limit),
        columns: &ctx.config.display.columns,
    };
    output_outcome(&search, &query, &outcome, &options)
}

/// Submits a query, exiting with a consistent error on failure.
fn submit(search: &SearchContext, query: &str, mode: SearchMode) -> Result<SearchOutcome, ExitCode> {
    search.submit(query, mode).map_err(|e| {
        eprintln!("error: search failed: {e}");
        if e.is_configuration() {
            eprintln!(
                "hint: check search.dictionary_columns and search.description_columns in .xref.toml"
            );
        }
        ExitCode::FAILURE
    })
}

/// Explains why nothing came out of the dictionary and how to search directly.
fn print_fallback_hint(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::NoTermsExtracted { dictionary_rows } => eprintln!(
            "{} dictionary row(s) matched but contain no usable terms.",
            dictionary_rows.len()
        ),
        _ => eprintln!("No dictionary entry matched."),
    }
    eprintln!("hint: rerun with --fallback or --direct to search the descriptions directly");
}

/// Writes the given description rows to `path`.
fn export_rows(search: &SearchContext, rows: &[usize], path: &Path) -> Result<(), ExitCode> {
    let selected = search.descriptions().select_rows(rows);
    export_table(&selected, path).map_err(|e| {
        eprintln!("error: export failed: {e}");
        ExitCode::FAILURE
    })?;
    eprintln!("Exported {} row(s) to {}", selected.row_count(), path.display());
    Ok(())
}
