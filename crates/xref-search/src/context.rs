//! The cross-reference search session.
//!
//! A [`SearchContext`] owns the dictionary and description tables plus the unit resolver
//! derived from them, and runs the two-stage search:
//!
//! 1. **Dictionary stage**: evaluate the query against the dictionary. Negations remove
//!    candidate rows. A purely negative query starts from every dictionary row.
//! 2. **Term extraction**: collect the distinct words of every candidate row.
//! 3. **Description stage**: evaluate `TERM1|TERM2|...` against the descriptions, then
//!    re-apply the original negations unless the query was purely negative (in which case
//!    they were consumed by the dictionary stage).
//!
//! [`SearchContext::direct_search`] skips the dictionary and evaluates the query against the
//! descriptions as-is. Callers typically offer it when
//! [`SearchOutcome::offers_fallback`] is true.

use tracing::{debug, info};
use xref_query::{UnitResolver, or_query, parse};
use xref_table::Table;

use crate::{
    Evaluator, SearchError, SearchMode, SearchOutcome, SearchParams, columns::select_columns,
    extract::extract_terms,
};

/// Label used in errors about dictionary columns.
const DICTIONARY: &str = "dictionary";

/// Label used in errors about description columns.
const DESCRIPTIONS: &str = "descriptions";

/// Builds the unit resolver from the dictionary's unit column and configured synonyms.
fn build_units(dictionary: &Table, params: &SearchParams) -> UnitResolver {
    let mut units = match dictionary.column_at(params.unit_column) {
        Some(column) => UnitResolver::from_values(&column.cells),
        None => {
            debug!(
                column = params.unit_column,
                "unit column not present in dictionary"
            );
            UnitResolver::new()
        }
    };
    for (canonical, synonyms) in &params.unit_synonyms {
        units.add_synonyms(canonical, synonyms);
    }
    debug!(units = units.len(), "built unit resolver");
    units
}

/// A search session over one dictionary and one description table.
#[derive(Debug)]
pub struct SearchContext {
    /// The dictionary table.
    dictionary: Table,
    /// The description table.
    descriptions: Table,
    /// Units recognized in numeric atoms.
    units: UnitResolver,
    /// Search parameters.
    params: SearchParams,
}

impl SearchContext {
    /// Creates a session over two loaded tables.
    pub fn new(dictionary: Table, descriptions: Table, params: SearchParams) -> Self {
        let units = build_units(&dictionary, &params);
        Self {
            dictionary,
            descriptions,
            units,
            params,
        }
    }

    /// The dictionary table.
    pub fn dictionary(&self) -> &Table {
        &self.dictionary
    }

    /// The description table.
    pub fn descriptions(&self) -> &Table {
        &self.descriptions
    }

    /// The unit resolver built from the dictionary.
    pub fn units(&self) -> &UnitResolver {
        &self.units
    }

    /// The search parameters.
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Replaces the dictionary and rebuilds the unit resolver.
    pub fn replace_dictionary(&mut self, dictionary: Table) {
        self.units = build_units(&dictionary, &self.params);
        self.dictionary = dictionary;
    }

    /// Replaces the description table.
    pub fn replace_descriptions(&mut self, descriptions: Table) {
        self.descriptions = descriptions;
    }

    /// Runs a query along the chosen path.
    pub fn submit(&self, query: &str, mode: SearchMode) -> Result<SearchOutcome, SearchError> {
        match mode {
            SearchMode::ViaDictionary => self.search(query),
            SearchMode::Direct => self.direct_search(query),
        }
    }

    /// Every description row, for an empty query.
    fn show_all(&self) -> SearchOutcome {
        SearchOutcome::ShowAll {
            rows: (0..self.descriptions.row_count()).collect(),
        }
    }

    /// Creates an evaluator over the description table's target columns.
    fn description_evaluator(&self) -> Result<Evaluator<'_>, SearchError> {
        let columns = select_columns(
            &self.descriptions,
            &self.params.description_columns,
            DESCRIPTIONS,
        )?;
        Ok(Evaluator::new(
            &self.descriptions,
            columns,
            &self.units,
            self.params.epsilon,
        ))
    }

    /// Runs the dictionary-then-descriptions search.
    pub fn search(&self, raw: &str) -> Result<SearchOutcome, SearchError> {
        if raw.trim().is_empty() {
            return Ok(self.show_all());
        }

        let query = parse(raw);
        if query.is_invalid() {
            info!(query = raw, "query could not be understood");
            return Ok(SearchOutcome::InvalidQuery {
                diagnostics: query.diagnostics,
            });
        }

        let columns = select_columns(
            &self.dictionary,
            &self.params.dictionary_columns,
            DICTIONARY,
        )?;
        let dictionary = Evaluator::new(
            &self.dictionary,
            columns,
            &self.units,
            self.params.epsilon,
        );
        let dictionary_rows = dictionary.evaluate_query(&query)?.indices();
        debug!(
            candidates = dictionary_rows.len(),
            "dictionary stage complete"
        );
        if dictionary_rows.is_empty() {
            return Ok(SearchOutcome::DictionaryNoMatch);
        }

        let terms = extract_terms(
            &self.dictionary,
            &dictionary_rows,
            self.params.min_term_length,
        );
        if terms.is_empty() {
            return Ok(SearchOutcome::NoTermsExtracted { dictionary_rows });
        }
        let derived = parse(&or_query(&terms));
        if derived.is_invalid() {
            return Ok(SearchOutcome::NoTermsExtracted { dictionary_rows });
        }
        debug!(terms = terms.len(), derived = %derived.raw, "derived description query");

        let descriptions = self.description_evaluator()?;
        let mut mask = descriptions.evaluate_query(&derived)?;
        if !query.is_purely_negative() && !query.negations.is_empty() {
            mask.subtract(&descriptions.evaluate_any(&query.negations)?);
        }
        let rows = mask.indices();
        let terms: Vec<String> = terms.into_iter().collect();
        debug!(rows = rows.len(), "description stage complete");

        Ok(if rows.is_empty() {
            SearchOutcome::DescriptionNoMatch {
                dictionary_rows,
                terms,
            }
        } else {
            SearchOutcome::Matched {
                dictionary_rows,
                terms,
                rows,
            }
        })
    }

    /// Evaluates the query directly against the descriptions.
    pub fn direct_search(&self, raw: &str) -> Result<SearchOutcome, SearchError> {
        if raw.trim().is_empty() {
            return Ok(self.show_all());
        }

        let query = parse(raw);
        if query.is_invalid() {
            info!(query = raw, "query could not be understood");
            return Ok(SearchOutcome::InvalidQuery {
                diagnostics: query.diagnostics,
            });
        }

        let rows = self.description_evaluator()?.evaluate_query(&query)?.indices();
        debug!(rows = rows.len(), "direct search complete");
        Ok(if rows.is_empty() {
            SearchOutcome::DirectNoMatch
        } else {
            SearchOutcome::DirectMatched { rows }
        })
    }
}
