//! Configuration system for xref.
//!
//! xref uses TOML configuration files named `.xref.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.xref.toml` files
//! found, then loading `~/.xref.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawDisplaySettings, RawSearchSettings, RawTables, parse_config_file,
    parse_config_str,
};
pub use resolve::{format_path_for_display, resolve_table_path};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default maximum number of result rows rendered.
pub const DEFAULT_DISPLAY_LIMIT: usize = 50;

/// Top-level merged configuration for xref.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Resolved table locations.
    pub tables: TableSettings,
    /// Search settings.
    pub search: SearchSettings,
    /// Unit synonym groups: canonical unit -> synonyms.
    pub units: BTreeMap<String, Vec<String>>,
    /// Result display settings.
    pub display: DisplaySettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Config files that were merged, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.xref.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML, in the same layout as a `.xref.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            tables: SerializableTables {
                dictionary: self
                    .tables
                    .dictionary
                    .as_ref()
                    .map(|p| p.display().to_string()),
                descriptions: self
                    .tables
                    .descriptions
                    .as_ref()
                    .map(|p| p.display().to_string()),
            },
            search: &self.search,
            units: &self.units,
            display: &self.display,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Resolved table locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSettings {
    /// Dictionary table file.
    pub dictionary: Option<PathBuf>,
    /// Descriptions table file.
    pub descriptions: Option<PathBuf>,
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Column-name globs searched in the dictionary.
    pub dictionary_columns: Vec<String>,
    /// Column-name globs searched in the descriptions.
    pub description_columns: Vec<String>,
    /// Dictionary column whose values seed the unit resolver.
    pub unit_column: usize,
    /// Extracted terms shorter than this are discarded.
    pub min_term_length: usize,
    /// Numeric equality tolerance.
    pub epsilon: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            dictionary_columns: vec![String::from("*")],
            description_columns: vec![String::from("*")],
            unit_column: 0,
            min_term_length: 2,
            epsilon: 1e-9,
        }
    }
}

/// Result display settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Column-name globs shown in result tables.
    pub columns: Vec<String>,
    /// Maximum rows rendered (0 = all).
    pub limit: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            columns: vec![String::from("*")],
            limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Table locations.
    tables: SerializableTables,
    /// Search settings.
    search: &'a SearchSettings,
    /// Unit synonym groups.
    units: &'a BTreeMap<String, Vec<String>>,
    /// Display settings.
    display: &'a DisplaySettings,
}

/// Table locations rendered as strings.
#[derive(Serialize)]
struct SerializableTables {
    /// Dictionary table file.
    #[serde(skip_serializing_if = "Option::is_none")]
    dictionary: Option<String>,
    /// Descriptions table file.
    #[serde(skip_serializing_if = "Option::is_none")]
    descriptions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_settings_defaults() {
        let search = SearchSettings::default();
        assert_eq!(search.dictionary_columns, vec!["*"]);
        assert_eq!(search.description_columns, vec!["*"]);
        assert_eq!(search.unit_column, 0);
        assert_eq!(search.min_term_length, 2);
        assert!((search.epsilon - 1e-9).abs() < f64::EPSILON);
    }

    #[test]
    fn display_settings_defaults() {
        let display = DisplaySettings::default();
        assert_eq!(display.columns, vec!["*"]);
        assert_eq!(display.limit, 50);
    }

    #[test]
    fn config_default() {
        let config = Config::default();
        assert!(config.tables.dictionary.is_none());
        assert!(config.units.is_empty());
        assert!(config.files.is_empty());
    }

    #[test]
    fn settings_to_toml_round_trips() {
        let mut config = Config::default();
        config.tables.dictionary = Some(PathBuf::from("/data/dict.csv"));
        config
            .units
            .insert("V".into(), vec!["VOLT".into(), "VOLTS".into()]);

        let toml = config.settings_to_toml().unwrap();
        assert!(toml.contains("[tables]"));
        assert!(toml.contains("dictionary = \"/data/dict.csv\""));
        assert!(!toml.contains("descriptions ="));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("min_term_length = 2"));
        assert!(toml.contains("[units]"));
        assert!(toml.contains("[display]"));

        let parsed = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        assert_eq!(parsed.search.unwrap().unit_column, Some(0));
        assert_eq!(parsed.units.unwrap()["V"], vec!["VOLT", "VOLTS"]);
    }
}
