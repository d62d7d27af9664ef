//! Diagnostic logging for the `xref` binary.
//!
//! Library crates emit `tracing` events; this module installs the subscriber that prints them
//! to stderr. User-facing errors and hints do not go through here.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding a full filter directive, e.g. `xref_search=debug`.
pub const LOG_ENV: &str = "XREF_LOG";

/// Maps the `-v` count to a default filter level.
pub fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber.
///
/// `XREF_LOG` wins over the `-v` flags when it parses.
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level(verbose)));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("warning: could not initialize logging: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(2), "debug");
        assert_eq!(default_level(3), "trace");
        assert_eq!(default_level(9), "trace");
    }
}
