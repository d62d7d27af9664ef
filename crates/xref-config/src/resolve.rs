//! Path resolution for table locations.
//!
//! Resolves relative and tilde-prefixed table paths against the config file that named them.
//! Paths are not required to exist; [`Config::validate`](crate::Config::validate) reports
//! missing files.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a table path to an absolute path.
///
/// - `~` and `~/data.csv` expand to the home directory
/// - relative paths are joined to `config_dir`
/// - absolute paths are returned unchanged
pub fn resolve_table_path(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    Ok(if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    })
}

/// Formats a path for display.
///
/// Paths under `base` are shown relative to it, paths under the home directory with a `~/`
/// prefix, anything else as-is.
pub fn format_path_for_display(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base
        && let Some(relative) = pathdiff::diff_paths(path, base)
        && !relative.starts_with("..")
        && relative.is_relative()
    {
        return if relative.as_os_str().is_empty() {
            String::from(".")
        } else {
            relative.display().to_string()
        };
    }

    if let Ok(home) = home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return format!("~/{}", rest.display());
    }

    path.display().to_string()
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_joins_config_dir() {
        let resolved = resolve_table_path("data/dict.csv", Path::new("/projects/a")).unwrap();
        assert_eq!(resolved, PathBuf::from("/projects/a/data/dict.csv"));
    }

    #[test]
    fn parent_relative_path() {
        let resolved = resolve_table_path("../shared/dict.csv", Path::new("/projects/a")).unwrap();
        assert_eq!(resolved, PathBuf::from("/projects/a/../shared/dict.csv"));
    }

    #[test]
    fn absolute_path_unchanged() {
        let resolved = resolve_table_path("/data/dict.csv", Path::new("/other")).unwrap();
        assert_eq!(resolved, PathBuf::from("/data/dict.csv"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = home_dir().unwrap();
        assert_eq!(resolve_table_path("~", Path::new("/x")).unwrap(), home);
        assert_eq!(
            resolve_table_path("~/tables/d.csv", Path::new("/x")).unwrap(),
            home.join("tables/d.csv")
        );
    }

    #[test]
    fn display_relative_to_base() {
        let shown = format_path_for_display(Path::new("/p/data/d.csv"), Some(Path::new("/p")));
        assert_eq!(shown, "data/d.csv");
        assert_eq!(
            format_path_for_display(Path::new("/p"), Some(Path::new("/p"))),
            "."
        );
    }

    #[test]
    fn display_outside_base() {
        let shown = format_path_for_display(Path::new("/q/d.csv"), Some(Path::new("/p")));
        assert_eq!(shown, "/q/d.csv");
        let home = home_dir().unwrap();
        assert_eq!(
            format_path_for_display(&home.join("d.csv"), None),
            "~/d.csv"
        );
    }

    #[test]
    fn tilde_in_middle_is_literal() {
        let resolved = resolve_table_path("a~/b.csv", Path::new("/x")).unwrap();
        assert_eq!(resolved, PathBuf::from("/x/a~/b.csv"));
    }
}
