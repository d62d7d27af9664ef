//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::Path};

use globset::GlobBuilder;
use xref_table::TableFormat;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// Neither table is configured.
    NoTablesDefined,
    /// One of the two tables is not configured.
    TableNotConfigured {
        /// Which table ("dictionary" or "descriptions").
        table: &'static str,
    },
    /// A table path does not exist.
    TableMissing {
        /// Which table.
        table: &'static str,
        /// Path that doesn't exist.
        path: String,
    },
    /// A table path exists but is not a file.
    TableNotFile {
        /// Which table.
        table: &'static str,
        /// Path that is not a file.
        path: String,
    },
    /// A table path has an extension no loader understands.
    UnsupportedTableFormat {
        /// Which table.
        table: &'static str,
        /// Offending path.
        path: String,
    },
    /// A column pattern is not a valid glob.
    InvalidColumnPattern {
        /// Setting holding the pattern.
        setting: &'static str,
        /// The invalid pattern.
        pattern: String,
    },
    /// The numeric tolerance is negative or not finite.
    InvalidEpsilon {
        /// Configured value, as written.
        value: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTablesDefined => write!(f, "no tables are defined in configuration"),
            Self::TableNotConfigured { table } => {
                write!(f, "no {table} table is configured")
            }
            Self::TableMissing { table, path } => {
                write!(f, "{table} table does not exist: {path}")
            }
            Self::TableNotFile { table, path } => {
                write!(f, "{table} table is not a file: {path}")
            }
            Self::UnsupportedTableFormat { table, path } => {
                write!(
                    f,
                    "{table} table has an unsupported format (expected .csv, .tsv or .json): {path}"
                )
            }
            Self::InvalidColumnPattern { setting, pattern } => {
                write!(f, "invalid column pattern '{pattern}' in {setting}")
            }
            Self::InvalidEpsilon { value } => {
                write!(f, "search.epsilon must be a finite, non-negative number, got {value}")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - Tables that are not configured, missing, not files, or of an unsupported format
/// - Column patterns that are not valid globs
/// - A negative or non-finite epsilon
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let tables = [
        ("dictionary", config.tables.dictionary.as_deref()),
        ("descriptions", config.tables.descriptions.as_deref()),
    ];
    if tables.iter().all(|(_, path)| path.is_none()) {
        warnings.push(ConfigWarning::NoTablesDefined);
    } else {
        for (table, path) in tables {
            match path {
                Some(path) => warnings.extend(validate_table(table, path)),
                None => warnings.push(ConfigWarning::TableNotConfigured { table }),
            }
        }
    }

    let patterns = [
        ("search.dictionary_columns", &config.search.dictionary_columns),
        ("search.description_columns", &config.search.description_columns),
        ("display.columns", &config.display.columns),
    ];
    for (setting, list) in patterns {
        for pattern in list {
            if GlobBuilder::new(pattern).build().is_err() {
                warnings.push(ConfigWarning::InvalidColumnPattern {
                    setting,
                    pattern: pattern.clone(),
                });
            }
        }
    }

    let epsilon = config.search.epsilon;
    if !epsilon.is_finite() || epsilon < 0.0 {
        warnings.push(ConfigWarning::InvalidEpsilon {
            value: epsilon.to_string(),
        });
    }

    warnings
}

/// Validates one table path.
fn validate_table(table: &'static str, path: &Path) -> Option<ConfigWarning> {
    let shown = path.display().to_string();
    if TableFormat::from_path(path).is_none() {
        return Some(ConfigWarning::UnsupportedTableFormat { table, path: shown });
    }
    if !path.exists() {
        return Some(ConfigWarning::TableMissing { table, path: shown });
    }
    if !path.is_file() {
        return Some(ConfigWarning::TableNotFile { table, path: shown });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Scratch;

    fn config_with_tables(dictionary: Option<&Path>, descriptions: Option<&Path>) -> Config {
        let mut config = Config::default();
        config.tables.dictionary = dictionary.map(Path::to_path_buf);
        config.tables.descriptions = descriptions.map(Path::to_path_buf);
        config
    }

    #[test]
    fn empty_config_warns_once() {
        assert_eq!(
            validate_config(&Config::default()),
            vec![ConfigWarning::NoTablesDefined]
        );
    }

    #[test]
    fn valid_tables_are_clean() {
        let dir = Scratch::new();
        let dict = dir.file("dict.csv", "term\nROUTER\n");
        let desc = dir.file("desc.json", "{\"columns\": [\"d\"], \"rows\": []}");
        let config = config_with_tables(Some(&dict), Some(&desc));
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn table_problems() {
        let dir = Scratch::new();
        let folder = dir.dir("folder.csv");
        let missing = dir.path().join("missing.csv");

        let config = config_with_tables(Some(&folder), Some(&missing));
        let warnings = validate_config(&config);
        assert!(matches!(
            &warnings[0],
            ConfigWarning::TableNotFile {
                table: "dictionary",
                ..
            }
        ));
        assert!(matches!(
            &warnings[1],
            ConfigWarning::TableMissing {
                table: "descriptions",
                ..
            }
        ));
    }

    #[test]
    fn unsupported_format_and_unconfigured() {
        let dir = Scratch::new();
        let sheet = dir.file("dict.xlsx", "x");
        let config = config_with_tables(Some(&sheet), None);
        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 2);
        assert!(matches!(
            warnings[0],
            ConfigWarning::UnsupportedTableFormat { .. }
        ));
        assert_eq!(
            warnings[1],
            ConfigWarning::TableNotConfigured {
                table: "descriptions"
            }
        );
    }

    #[test]
    fn bad_patterns_and_epsilon() {
        let dir = Scratch::new();
        let dict = dir.file("dict.csv", "term\n");
        let desc = dir.file("desc.csv", "d\n");
        let mut config = config_with_tables(Some(&dict), Some(&desc));
        config.search.description_columns = vec!["[desc".into()];
        config.search.epsilon = -1.0;

        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].to_string().contains("[desc"));
        assert!(warnings[1].to_string().contains("epsilon"));
    }
}
