//! Target-column selection.
//!
//! Columns are chosen by case-insensitive glob patterns over their names, so `desc*`
//! selects `Description` and `DESCRIPTION_2`. Column order in the table is preserved.

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use xref_table::Table;

use crate::SearchError;

/// Compiles column-name patterns into a single matcher.
fn compile(patterns: &[String]) -> Result<GlobSet, SearchError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .case_insensitive(true)
            .literal_separator(false)
            .build()
            .map_err(|source| SearchError::InvalidColumnPattern {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|source| SearchError::InvalidColumnPattern {
            pattern: patterns.join(", "),
            source,
        })
}

/// Resolves `patterns` to column indices of `table`.
///
/// An empty pattern list selects every column. Fails with
/// [`SearchError::NoTargetColumns`] when nothing matches.
pub fn select_columns(
    table: &Table,
    patterns: &[String],
    label: &'static str,
) -> Result<Vec<usize>, SearchError> {
    let selected: Vec<usize> = if patterns.is_empty() {
        (0..table.column_count()).collect()
    } else {
        let set = compile(patterns)?;
        table
            .column_names()
            .enumerate()
            .filter_map(|(i, name)| set.is_match(name).then_some(i))
            .collect()
    };

    if selected.is_empty() {
        return Err(SearchError::NoTargetColumns {
            table: label,
            patterns: patterns.to_vec(),
        });
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_rows(["Code", "Description", "Notes"], [vec!["1", "a", "b"]]).unwrap()
    }

    fn patterns(p: &[&str]) -> Vec<String> {
        p.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn star_selects_everything() {
        assert_eq!(
            select_columns(&table(), &patterns(&["*"]), "descriptions").unwrap(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn empty_patterns_select_everything() {
        assert_eq!(
            select_columns(&table(), &[], "descriptions").unwrap(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn patterns_are_case_insensitive_and_keep_table_order() {
        assert_eq!(
            select_columns(&table(), &patterns(&["notes", "desc*"]), "descriptions").unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn no_match_is_an_error() {
        let err = select_columns(&table(), &patterns(&["price"]), "dictionary").unwrap_err();
        assert!(matches!(
            err,
            SearchError::NoTargetColumns {
                table: "dictionary",
                ..
            }
        ));
        assert!(err.is_configuration());
    }

    #[test]
    fn invalid_glob_is_an_error() {
        let err = select_columns(&table(), &patterns(&["[desc"]), "dictionary").unwrap_err();
        assert!(matches!(err, SearchError::InvalidColumnPattern { .. }));
    }
}
