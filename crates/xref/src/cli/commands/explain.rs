//! Implementation of `xref explain`.

use std::process::ExitCode;

use xref_highlight::indent_content;
use xref_query::{Predicate, SplitMode, decompose, parse};

use crate::cli::{
    args::ExplainCommand,
    output::{dim, subheader, warning},
};

/// Prints how a query is decomposed and classified, without searching.
pub fn run(cmd: &ExplainCommand) -> ExitCode {
    let raw = cmd.query();

    println!("{}", subheader("Query:"));
    println!("   {raw}");
    println!();

    let query = parse(&raw);
    if query.is_empty() {
        println!("{}", dim("(empty query: every description row is shown)"));
        return ExitCode::SUCCESS;
    }
    let decomposition = decompose(&raw);

    println!("{}", subheader("Negations:"));
    if query.negations.is_empty() {
        println!("   {}", dim("(none)"));
    } else {
        for negation in &query.negations {
            println!("   #{}", negation.to_query_string());
        }
    }
    println!();

    let mode = match decomposition.mode {
        SplitMode::And => "AND",
        SplitMode::Or => "OR",
    };
    println!("{}", subheader(&format!("Segments ({mode}):")));
    if decomposition.segments.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for (index, atoms) in decomposition.segments.iter().enumerate() {
        let text = atoms.join(" + ");
        if query.invalid_segments.contains(&index) {
            println!("   [{index}] {text} {}", warning("[invalid]"));
        } else {
            println!("   [{index}] {text}");
        }
    }
    println!();

    println!("{}", subheader("Predicate tree:"));
    match &query.positive {
        Some(predicate) => println!("{}", indent_content(&predicate.to_string())),
        None => println!("   {}", dim("(none)")),
    }
    println!();

    println!("{}", subheader("Derived form:"));
    println!("   {}", derived_form(query.positive.as_ref(), &query.negations));
    println!();

    if query.is_purely_negative() {
        println!(
            "{}",
            dim("Purely negative: every dictionary row is a candidate before exclusions.")
        );
        println!();
    }

    if !query.diagnostics.is_empty() {
        println!(
            "{}",
            subheader(&format!("Diagnostics ({}):", query.diagnostics.len()))
        );
        for diagnostic in &query.diagnostics {
            println!("{}", indent_content(&diagnostic.to_string()));
        }
        println!();
    }

    if query.is_invalid() {
        eprintln!("error: query could not be understood");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Renders the parsed query back into canonical query syntax.
fn derived_form(positive: Option<&Predicate>, negations: &[Predicate]) -> String {
    positive
        .map(Predicate::to_query_string)
        .into_iter()
        .chain(negations.iter().map(|n| format!("#{}", n.to_query_string())))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_form_appends_negations() {
        let query = parse("router + >=16 #cisco #\"power supply\"");
        assert_eq!(
            derived_form(query.positive.as_ref(), &query.negations),
            "ROUTER + >=16 #CISCO #\"POWER SUPPLY\""
        );
    }

    #[test]
    fn derived_form_of_purely_negative_query() {
        let query = parse("#cisco");
        assert_eq!(derived_form(query.positive.as_ref(), &query.negations), "#CISCO");
    }
}
