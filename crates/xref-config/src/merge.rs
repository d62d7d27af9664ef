//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and resolving table paths.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    Config, ConfigError, DisplaySettings, SearchSettings, TableSettings,
    parse::{RawConfig, RawDisplaySettings, RawSearchSettings},
    resolve::resolve_table_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to the
/// working directory), lowest last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins
/// - Table paths: first definition of each table wins, resolved against its own file
/// - Unit groups: merged by canonical name, first definition wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let config = Config {
        tables: merge_tables(configs)?,
        search: merge_search_settings(configs),
        units: merge_units(configs),
        display: merge_display_settings(configs),
        config_root: configs.first().map(|c| c.dir().to_path_buf()),
        files: configs.iter().map(|c| c.path.clone()).collect(),
    };
    debug!(files = configs.len(), "merged configuration");
    Ok(config)
}

/// Merges table locations, resolving each against the file that defines it.
fn merge_tables(configs: &[ParsedConfig]) -> Result<TableSettings, ConfigError> {
    let mut result = TableSettings::default();

    for parsed in configs {
        let Some(ref tables) = parsed.config.tables else {
            continue;
        };
        if result.dictionary.is_none()
            && let Some(ref path) = tables.dictionary
        {
            result.dictionary = Some(resolve_table_path(path, parsed.dir())?);
        }
        if result.descriptions.is_none()
            && let Some(ref path) = tables.descriptions
        {
            result.descriptions = Some(resolve_table_path(path, parsed.dir())?);
        }
    }

    Ok(result)
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result, overwriting any present values.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(ref v) = raw.dictionary_columns {
        result.dictionary_columns = v.clone();
    }
    if let Some(ref v) = raw.description_columns {
        result.description_columns = v.clone();
    }
    if let Some(v) = raw.unit_column {
        result.unit_column = v;
    }
    if let Some(v) = raw.min_term_length {
        result.min_term_length = v;
    }
    if let Some(v) = raw.epsilon {
        result.epsilon = v;
    }
}

/// Merges unit synonym groups; the first definition of a canonical unit wins.
fn merge_units(configs: &[ParsedConfig]) -> BTreeMap<String, Vec<String>> {
    let mut result = BTreeMap::new();
    for parsed in configs {
        let Some(ref units) = parsed.config.units else {
            continue;
        };
        for (canonical, synonyms) in units {
            result
                .entry(canonical.clone())
                .or_insert_with(|| synonyms.clone());
        }
    }
    result
}

/// Merges display settings.
fn merge_display_settings(configs: &[ParsedConfig]) -> DisplaySettings {
    let mut result = DisplaySettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref display) = parsed.config.display {
            apply_raw_display(&mut result, display);
        }
    }

    result
}

/// Applies raw display settings to result.
fn apply_raw_display(result: &mut DisplaySettings, raw: &RawDisplaySettings) {
    if let Some(ref v) = raw.columns {
        result.columns = v.clone();
    }
    if let Some(v) = raw.limit {
        result.limit = v;
    }
}
