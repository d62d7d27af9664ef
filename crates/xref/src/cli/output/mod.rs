//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table as Grid, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use tracing::warn;
pub use xref_highlight::{dim, error, header, subheader, success, warning};
use xref_highlight::highlight_terms;
use xref_query::{Predicate, QueryError, parse};
use xref_search::{SearchContext, SearchOutcome, select_columns};
use xref_table::Table;

/// Dictionary row indices listed before the rest are elided.
const MAX_LISTED_DICTIONARY_ROWS: usize = 20;

/// How search results are printed.
pub struct OutputOptions<'a> {
    /// Print JSON instead of a table.
    pub json: bool,
    /// Print row indices only.
    pub list: bool,
    /// Maximum rows rendered in the table (0 = all).
    pub limit: usize,
    /// Column-name globs shown in the table.
    pub columns: &'a [String],
}

/// JSON output for one search.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The query as submitted.
    query: &'a str,
    /// Terminal state of the search, e.g. `matched` or `dictionary_no_match`.
    status: &'static str,
    /// Candidate dictionary rows.
    dictionary_rows: &'a [usize],
    /// Terms extracted from the candidates.
    terms: &'a [String],
    /// Description column names, in order.
    columns: Vec<&'a str>,
    /// Matching description rows.
    rows: Vec<JsonRow<'a>>,
    /// Number of matching description rows.
    total_matches: usize,
    /// Parser diagnostics, for queries that could not be understood.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    diagnostics: Vec<String>,
}

/// One description row in JSON output.
#[derive(Serialize)]
struct JsonRow<'a> {
    /// Row index in the descriptions table.
    index: usize,
    /// Cells in column order.
    cells: Vec<&'a str>,
}

/// Prints a search outcome in the selected mode.
pub fn output_outcome(
    search: &SearchContext,
    query: &str,
    outcome: &SearchOutcome,
    options: &OutputOptions<'_>,
) -> ExitCode {
    if options.json {
        return output_json(search.descriptions(), query, outcome);
    }
    if options.list {
        for row in outcome.rows() {
            println!("{row}");
        }
        return ExitCode::SUCCESS;
    }
    output_text(search.descriptions(), query, outcome, options);
    ExitCode::SUCCESS
}

/// Reports a query that could not be understood.
pub fn output_invalid_query(query: &str, diagnostics: &[QueryError], json: bool) {
    if json {
        let output = JsonSearchOutput {
            query,
            status: "invalid_query",
            dictionary_rows: &[],
            terms: &[],
            columns: Vec::new(),
            rows: Vec::new(),
            total_matches: 0,
            diagnostics: diagnostics.iter().map(QueryError::message).collect(),
        };
        print_json(&output);
    }

    eprintln!("error: query could not be understood: {query}");
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
}

/// Prints the outcome as a JSON document.
fn output_json(descriptions: &Table, query: &str, outcome: &SearchOutcome) -> ExitCode {
    let rows = outcome
        .rows()
        .iter()
        .filter_map(|&index| {
            descriptions
                .row(index)
                .map(|cells| JsonRow { index, cells })
        })
        .collect();
    let output = JsonSearchOutput {
        query,
        status: outcome.status(),
        dictionary_rows: outcome.dictionary_rows(),
        terms: outcome.terms(),
        columns: descriptions.column_names().collect(),
        rows,
        total_matches: outcome.rows().len(),
        diagnostics: Vec::new(),
    };
    if print_json(&output) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Serializes `output` to stdout, returning false on failure.
fn print_json(output: &JsonSearchOutput<'_>) -> bool {
    match serde_json::to_string_pretty(output) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(e) => {
            eprintln!("error: failed to serialize results: {e}");
            false
        }
    }
}

/// Prints the dictionary stage summary and a table of matching rows.
fn output_text(
    descriptions: &Table,
    query: &str,
    outcome: &SearchOutcome,
    options: &OutputOptions<'_>,
) {
    if matches!(
        outcome,
        SearchOutcome::Matched { .. } | SearchOutcome::DescriptionNoMatch { .. }
    ) {
        print_dictionary_summary(outcome.dictionary_rows(), outcome.terms());
    }

    let rows = outcome.rows();
    if rows.is_empty() {
        println!("{}", dim(empty_message(outcome)));
        return;
    }

    let words = highlight_words(outcome, query);
    let columns = display_columns(descriptions, options.columns);
    let shown = match options.limit {
        0 => rows.len(),
        limit => rows.len().min(limit),
    };

    println!(
        "{}",
        render_rows(descriptions, &rows[..shown], &columns, &words)
    );

    if shown < rows.len() {
        println!(
            "{}",
            dim(&format!(
                "Showing {shown} of {} matching rows (use -n 0 to show all)",
                rows.len()
            ))
        );
    } else {
        println!("{}", dim(&format!("{} matching row(s)", rows.len())));
    }
}

/// Prints the candidate dictionary rows and the extracted terms.
fn print_dictionary_summary(dictionary_rows: &[usize], terms: &[String]) {
    let mut listed: Vec<String> = dictionary_rows
        .iter()
        .take(MAX_LISTED_DICTIONARY_ROWS)
        .map(usize::to_string)
        .collect();
    if dictionary_rows.len() > MAX_LISTED_DICTIONARY_ROWS {
        listed.push("...".to_string());
    }

    println!(
        "{} {}",
        subheader(&format!("Dictionary rows ({}):", dictionary_rows.len())),
        listed.join(", ")
    );
    println!(
        "{} {}",
        subheader(&format!("Terms ({}):", terms.len())),
        terms.join(", ")
    );
    println!();
}

/// Message shown when an outcome has no rows.
fn empty_message(outcome: &SearchOutcome) -> &'static str {
    match outcome {
        SearchOutcome::DescriptionNoMatch { .. } => {
            "No description contains any of the extracted terms."
        }
        SearchOutcome::DirectNoMatch => "No description matched the query.",
        SearchOutcome::ShowAll { .. } => "The descriptions table is empty.",
        _ => "No results found.",
    }
}

/// Words to mark in result cells: the extracted terms, or the query's own literals.
fn highlight_words(outcome: &SearchOutcome, query: &str) -> Vec<String> {
    if let SearchOutcome::Matched { terms, .. } = outcome {
        return terms.clone();
    }
    let mut words = Vec::new();
    if let Some(positive) = parse(query).positive {
        collect_literals(&positive, &mut words);
    }
    words
}

/// Collects the text of every literal leaf.
fn collect_literals(predicate: &Predicate, out: &mut Vec<String>) {
    match predicate {
        Predicate::Literal(text) => out.push(text.as_str().to_string()),
        Predicate::And(children) | Predicate::Or(children) => {
            for child in children {
                collect_literals(child, out);
            }
        }
        Predicate::Compare { .. } | Predicate::Range { .. } => {}
    }
}

/// Resolves the display column patterns, showing every column if none match.
fn display_columns(table: &Table, patterns: &[String]) -> Vec<usize> {
    select_columns(table, patterns, "descriptions").unwrap_or_else(|e| {
        warn!(error = %e, "display.columns selects nothing, showing all columns");
        (0..table.column_count()).collect()
    })
}

/// Renders rows as a table, with the row index first and matched words marked.
fn render_rows(table: &Table, rows: &[usize], columns: &[usize], words: &[String]) -> Grid {
    let mut grid = Grid::new();
    grid.load_preset(UTF8_FULL_CONDENSED);

    let mut header = vec![Cell::new("#")];
    header.extend(
        columns
            .iter()
            .filter_map(|&c| table.column_at(c))
            .map(|column| Cell::new(&column.name)),
    );
    grid.set_header(header);

    for &row in rows {
        let mut cells = vec![Cell::new(row)];
        cells.extend(columns.iter().map(|&c| {
            let text = table.cell(row, c).unwrap_or_default();
            Cell::new(highlight_terms(text, words))
        }));
        grid.add_row(cells);
    }

    grid
}

#[cfg(test)]
mod tests {
    use xref_query::normalize;

    use super::*;

    fn descriptions() -> Table {
        Table::from_rows(
            ["code", "description"],
            [
                vec!["R1", "Cisco Router 16 ports"],
                vec!["S1", "Managed Switch"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn literals_are_collected_in_order() {
        let mut words = Vec::new();
        collect_literals(
            &Predicate::Or(vec![
                Predicate::Literal(normalize("router")),
                Predicate::And(vec![
                    Predicate::Literal(normalize("switch")),
                    Predicate::range(1.0, 2.0, None),
                ]),
            ]),
            &mut words,
        );
        assert_eq!(words, vec!["ROUTER", "SWITCH"]);
    }

    #[test]
    fn matched_outcome_highlights_terms() {
        let outcome = SearchOutcome::Matched {
            dictionary_rows: vec![0],
            terms: vec!["ROUTER".into()],
            rows: vec![0],
        };
        assert_eq!(highlight_words(&outcome, "anything"), vec!["ROUTER"]);
    }

    #[test]
    fn direct_outcome_highlights_query_literals() {
        let outcome = SearchOutcome::DirectMatched { rows: vec![1] };
        assert_eq!(
            highlight_words(&outcome, "switch + >=2 #cisco"),
            vec!["SWITCH"]
        );
    }

    #[test]
    fn unmatched_display_patterns_show_all_columns() {
        let table = descriptions();
        assert_eq!(display_columns(&table, &["desc*".into()]), vec![1]);
        assert_eq!(display_columns(&table, &["nothing".into()]), vec![0, 1]);
    }

    #[test]
    fn rendered_table_has_index_column() {
        let table = descriptions();
        let rendered = render_rows(&table, &[1], &[1], &[]).to_string();
        assert!(rendered.contains('#'));
        assert!(rendered.contains("Managed Switch"));
        assert!(!rendered.contains("Cisco"));
    }

    #[test]
    fn empty_messages_distinguish_outcomes() {
        assert_ne!(
            empty_message(&SearchOutcome::DirectNoMatch),
            empty_message(&SearchOutcome::DictionaryNoMatch)
        );
    }
}
