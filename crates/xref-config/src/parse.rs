//! Configuration file parsing.
//!
//! Parses individual `.xref.toml` files into intermediate `RawConfig` structures that keep
//! every field optional until files are merged.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Table file locations.
    pub tables: Option<RawTables>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
    /// Unit synonym groups: canonical unit -> synonyms.
    #[serde_as(as = "Option<BTreeMap<_, OneOrMany<_>>>")]
    pub units: Option<BTreeMap<String, Vec<String>>>,
    /// Display settings section.
    pub display: Option<RawDisplaySettings>,
}

/// Raw table locations, relative to the file that defines them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawTables {
    /// Dictionary table path.
    pub dictionary: Option<String>,
    /// Descriptions table path.
    pub descriptions: Option<String>,
}

/// Raw search settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Column-name glob(s) searched in the dictionary.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub dictionary_columns: Option<Vec<String>>,
    /// Column-name glob(s) searched in the descriptions.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub description_columns: Option<Vec<String>>,
    /// Dictionary column whose values seed the unit resolver.
    pub unit_column: Option<usize>,
    /// Minimum length of an extracted term.
    pub min_term_length: Option<usize>,
    /// Numeric equality tolerance.
    pub epsilon: Option<f64>,
}

/// Raw display settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDisplaySettings {
    /// Column-name glob(s) shown in result tables.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub columns: Option<Vec<String>>,
    /// Maximum result rows rendered (0 = all).
    pub limit: Option<usize>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
