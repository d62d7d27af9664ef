//! End-to-end cross-reference scenarios.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use xref_query::{Predicate, classify, normalize};
use xref_search::{SearchContext, SearchMode, SearchOutcome, SearchParams};
use xref_table::Table;

/// One-column dictionary of product names.
fn dictionary() -> Table {
    Table::from_rows(["term"], [vec!["ROUTER"], vec!["SWITCH"]]).unwrap()
}

/// One-column description table.
fn descriptions() -> Table {
    Table::from_rows(
        ["description"],
        [
            vec!["Cisco Router 16 ports"],
            vec!["Managed Switch"],
            vec!["Cable"],
        ],
    )
    .unwrap()
}

fn context() -> SearchContext {
    SearchContext::new(dictionary(), descriptions(), SearchParams::default())
}

#[test]
fn router_finds_its_description() {
    let outcome = context().search("router").unwrap();
    assert_eq!(
        outcome,
        SearchOutcome::Matched {
            dictionary_rows: vec![0],
            terms: vec!["ROUTER".to_string()],
            rows: vec![0],
        }
    );
}

#[test]
fn negation_is_reapplied_to_descriptions() {
    let outcome = context().search("router + #cisco").unwrap();
    assert_eq!(outcome.dictionary_rows(), &[0]);
    assert!(matches!(outcome, SearchOutcome::DescriptionNoMatch { .. }));
    assert!(outcome.rows().is_empty());
    assert!(!outcome.offers_fallback());
}

#[test]
fn comparison_is_tried_before_range() {
    assert_eq!(
        classify(">=10-20"),
        Predicate::Literal(normalize("10-20"))
    );
}

#[test]
fn empty_query_returns_every_description() {
    let outcome = context().search("").unwrap();
    assert_eq!(outcome, SearchOutcome::ShowAll { rows: vec![0, 1, 2] });
}

#[test]
fn unknown_term_offers_direct_search() {
    let ctx = context();
    let outcome = ctx.search("cable").unwrap();
    assert_eq!(outcome, SearchOutcome::DictionaryNoMatch);
    assert!(outcome.offers_fallback());

    let direct = ctx.submit("cable", SearchMode::Direct).unwrap();
    assert_eq!(direct.rows(), &[2]);
}

#[test]
fn or_query_unites_dictionary_rows() {
    let outcome = context().search("router | switch").unwrap();
    assert_eq!(outcome.dictionary_rows(), &[0, 1]);
    assert_eq!(outcome.rows(), &[0, 1]);

    let slash = context().search("router/switch").unwrap();
    assert_eq!(slash, outcome);
}

#[test]
fn purely_negative_query() {
    let outcome = context().search("#router").unwrap();
    assert_eq!(outcome.dictionary_rows(), &[1]);
    assert_eq!(outcome.rows(), &[1]);
}

#[test]
fn search_is_case_and_accent_insensitive() {
    let ctx = context();
    let expected = ctx.search("router").unwrap();
    for query in ["ROUTER", "Router", "routér", "  router  "] {
        assert_eq!(ctx.search(query).unwrap(), expected, "{query}");
    }
}

#[test]
fn results_are_subsets_in_source_order() {
    let ctx = context();
    for query in ["router", "router | switch", "#cable", "switch + #managed"] {
        let outcome = ctx.search(query).unwrap();
        let rows = outcome.rows();
        assert!(rows.windows(2).all(|w| w[0] < w[1]), "{query}");
        assert!(rows.iter().all(|&r| r < 3), "{query}");
    }
}

#[test]
fn negation_never_adds_rows() {
    let ctx = context();
    let base = ctx.direct_search("router | switch | cable").unwrap();
    let negated = ctx.direct_search("router | switch | cable #switch").unwrap();
    assert!(negated.rows().iter().all(|r| base.rows().contains(r)));
    assert_eq!(negated.rows(), &[0, 2]);
}

#[test]
fn numeric_search_with_units() {
    let dictionary = Table::from_rows(
        ["unit", "term"],
        [vec!["A", "Disjuntor 48A"], vec!["V", "Fonte 12V"]],
    )
    .unwrap();
    let descriptions = Table::from_rows(
        ["description"],
        [
            vec!["Disjuntor bipolar 48 A"],
            vec!["Disjuntor 10A"],
            vec!["Fonte 12 V"],
        ],
    )
    .unwrap();
    let ctx = SearchContext::new(dictionary, descriptions, SearchParams::default());

    let outcome = ctx.search(">=40A").unwrap();
    assert_eq!(outcome.dictionary_rows(), &[0]);
    assert_eq!(outcome.rows(), &[0, 1]);

    let direct = ctx.direct_search("disjuntor + >=40 A").unwrap();
    assert_eq!(direct.rows(), &[0]);

    let range = ctx.direct_search("5-15").unwrap();
    assert_eq!(range.rows(), &[1, 2]);
}

#[test]
fn unparseable_query_is_reported() {
    assert!(matches!(
        context().search("+ |").unwrap(),
        SearchOutcome::InvalidQuery { .. }
    ));
    assert!(matches!(
        context().search("%%").unwrap(),
        SearchOutcome::InvalidQuery { .. }
    ));
}
