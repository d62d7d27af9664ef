//! In-memory tables for xref.
//!
//! A [`Table`] is an ordered set of named text columns of equal length. Tables are loaded from
//! CSV, TSV or JSON files with [`load_table`] and written back with [`export_table`]. Cells are
//! kept as text; numeric interpretation happens at search time.

#![warn(missing_docs)]

mod error;
mod io;
mod table;

pub use error::TableError;
pub use io::{TableFormat, export_table, load_table};
pub use table::{Column, Table};
