//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use xref_config::Config;
use xref_search::SearchContext;
use xref_table::{Table, load_table};

use super::{args::TableArgs, commands::shared::search_params};

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for commands like `init` or `explain` that should work even when an existing
    /// config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Resolves both table paths, command-line overrides first.
    ///
    /// Override paths are relative to the working directory; configured paths were already
    /// resolved against their config file.
    pub fn table_paths(&self, overrides: &TableArgs) -> Result<(PathBuf, PathBuf), ExitCode> {
        let dictionary = self.table_path(
            "dictionary",
            overrides.dictionary.as_deref(),
            self.config.tables.dictionary.as_deref(),
        )?;
        let descriptions = self.table_path(
            "descriptions",
            overrides.descriptions.as_deref(),
            self.config.tables.descriptions.as_deref(),
        )?;
        Ok((dictionary, descriptions))
    }

    /// Picks one table path or reports that none is configured.
    fn table_path(
        &self,
        table: &str,
        flag: Option<&Path>,
        configured: Option<&Path>,
    ) -> Result<PathBuf, ExitCode> {
        if let Some(path) = flag {
            return Ok(self.cwd.join(path));
        }
        if let Some(path) = configured {
            return Ok(path.to_path_buf());
        }
        eprintln!("error: no {table} table configured");
        eprintln!(
            "Run 'xref init' to create a configuration file, or pass --{table} PATH."
        );
        Err(ExitCode::FAILURE)
    }

    /// Loads both tables and opens a search session over them.
    pub fn open_search(&self, overrides: &TableArgs) -> Result<SearchContext, ExitCode> {
        let (dictionary_path, descriptions_path) = self.table_paths(overrides)?;
        let dictionary = load_table_or_failure(&dictionary_path)?;
        let descriptions = load_table_or_failure(&descriptions_path)?;
        Ok(SearchContext::new(
            dictionary,
            descriptions,
            search_params(&self.config),
        ))
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}

/// Loads a table or exits with an error.
fn load_table_or_failure(path: &Path) -> Result<Table, ExitCode> {
    load_table(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })
}
