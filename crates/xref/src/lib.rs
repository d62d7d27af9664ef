//! xref: cross-reference lexical search
//!
//! xref answers a query against two tables. A small dictionary table is searched first; the
//! words found in the matching dictionary rows are then searched for, with OR, in a larger
//! descriptions table. Queries are case- and accent-insensitive, combine terms with `+` (AND)
//! and `|` or `/` (OR), exclude rows with `#term`, and compare numbers with units (`>=48A`,
//! `10-20V`).
//!
//! The query language lives in `xref-query`, table loading in `xref-table` and the two-stage
//! search in `xref-search`. This crate provides the `xref` command-line tool on top of them.

#![warn(missing_docs)]

pub mod cli;
