//! Loading tables from and exporting tables to files.
//!
//! The format is chosen from the file extension: `.csv` (comma-separated), `.tsv`/`.tab`
//! (tab-separated) or `.json`. JSON tables are objects with a `columns` array of names and a
//! `rows` array of arrays; cells may be strings, numbers, booleans or null.

use std::{
    fs::{self, File},
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::{Table, TableError};

/// Supported table file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Tab-separated values with a header row.
    Tsv,
    /// JSON object with `columns` and `rows`.
    Json,
}

impl TableFormat {
    /// Detects the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "tsv" | "tab" => Some(Self::Tsv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Field delimiter for delimited formats.
    fn delimiter(self) -> u8 {
        match self {
            Self::Tsv => b'\t',
            Self::Csv | Self::Json => b',',
        }
    }
}

/// On-disk JSON shape.
#[derive(Deserialize)]
struct JsonTableIn {
    /// Column names.
    columns: Vec<String>,
    /// Row cells.
    #[serde(default)]
    rows: Vec<Vec<Value>>,
}

/// On-disk JSON shape for export.
#[derive(Serialize)]
struct JsonTableOut<'a> {
    /// Column names.
    columns: Vec<&'a str>,
    /// Row cells.
    rows: Vec<Vec<&'a str>>,
}

/// Renders a JSON scalar as cell text.
fn json_cell(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Gives unnamed columns a positional name (`column 3`).
fn fill_blank_headers(headers: Vec<String>) -> Vec<String> {
    headers
        .into_iter()
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim().to_string();
            if h.is_empty() {
                format!("column {}", i + 1)
            } else {
                h
            }
        })
        .collect()
}

/// Loads a table from a file.
///
/// Fails if the file is missing, unreadable, malformed, of an unsupported format, or has no
/// columns.
pub fn load_table(path: &Path) -> Result<Table, TableError> {
    let format = TableFormat::from_path(path).ok_or_else(|| TableError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    if !path.is_file() {
        return Err(TableError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let table = match format {
        TableFormat::Csv | TableFormat::Tsv => load_delimited(path, format)?,
        TableFormat::Json => load_json(path)?,
    };

    if table.column_count() == 0 {
        return Err(TableError::Empty {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );
    Ok(table)
}

/// Loads a CSV or TSV file with a header row.
fn load_delimited(path: &Path, format: TableFormat) -> Result<Table, TableError> {
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter())
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(TableError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    Table::from_rows(fill_blank_headers(headers), rows)
}

/// Loads a JSON table.
fn load_json(path: &Path) -> Result<Table, TableError> {
    let contents = fs::read_to_string(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Err(TableError::Empty {
            path: path.to_path_buf(),
        });
    }

    let parsed: JsonTableIn =
        serde_json::from_str(&contents).map_err(|source| TableError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let rows = parsed
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(json_cell).collect::<Vec<_>>());
    Table::from_rows(fill_blank_headers(parsed.columns), rows)
}

/// Writes a table to a file, preserving row and column order.
///
/// The format is chosen from the extension, as for [`load_table`].
pub fn export_table(table: &Table, path: &Path) -> Result<(), TableError> {
    let format = TableFormat::from_path(path).ok_or_else(|| TableError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    match format {
        TableFormat::Csv | TableFormat::Tsv => export_delimited(table, path, format)?,
        TableFormat::Json => export_json(table, path)?,
    }

    debug!(path = %path.display(), rows = table.row_count(), "exported table");
    Ok(())
}

/// Writes a CSV or TSV file with a header row.
fn export_delimited(table: &Table, path: &Path, format: TableFormat) -> Result<(), TableError> {
    let csv_err = |source| TableError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|source| TableError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(format.delimiter())
        .from_writer(file);

    writer
        .write_record(table.column_names())
        .map_err(csv_err)?;
    for row in table.rows() {
        writer.write_record(row).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| TableError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a JSON table.
fn export_json(table: &Table, path: &Path) -> Result<(), TableError> {
    let out = JsonTableOut {
        columns: table.column_names().collect(),
        rows: table.rows().collect(),
    };
    let json = serde_json::to_string_pretty(&out).map_err(|source| TableError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| TableError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_detection() {
        assert_eq!(TableFormat::from_path(Path::new("a.CSV")), Some(TableFormat::Csv));
        assert_eq!(TableFormat::from_path(Path::new("a.tsv")), Some(TableFormat::Tsv));
        assert_eq!(TableFormat::from_path(Path::new("a.tab")), Some(TableFormat::Tsv));
        assert_eq!(TableFormat::from_path(Path::new("a.json")), Some(TableFormat::Json));
        assert_eq!(TableFormat::from_path(Path::new("a.xlsx")), None);
        assert_eq!(TableFormat::from_path(Path::new("noext")), None);
    }

    #[test]
    fn json_cells_render_as_text() {
        assert_eq!(json_cell(Value::Null), "");
        assert_eq!(json_cell(Value::from("x")), "x");
        assert_eq!(json_cell(Value::from(48)), "48");
        assert_eq!(json_cell(Value::from(2.5)), "2.5");
        assert_eq!(json_cell(Value::from(true)), "true");
    }

    #[test]
    fn blank_headers_get_positions() {
        let filled = fill_blank_headers(vec!["a".into(), " ".into(), "c".into()]);
        assert_eq!(filled, vec!["a", "column 2", "c"]);
    }
}
