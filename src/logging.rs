//! Log subscriber installation.
//!
//! Events go to stderr so that documents and solutions printed on stdout stay machine readable.
//! `RUST_LOG` overrides the default level.

use color_eyre::eyre::{eyre, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Returns the level used when `RUST_LOG` is unset.
#[must_use]
pub const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Builds the event filter from `RUST_LOG`-style `directives` on top of the default level.
///
/// Directives that fail to parse are ignored.
#[must_use]
pub fn filter(verbose: bool, directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level(verbose).into())
        .parse_lossy(directives)
}

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(verbose: bool) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose, &directives))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;

    fn enabled_levels(env_filter: EnvFilter) -> Vec<Level> {
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::sink)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut levels = Vec::new();
            if tracing::enabled!(Level::ERROR) {
                levels.push(Level::ERROR);
            }
            if tracing::enabled!(Level::WARN) {
                levels.push(Level::WARN);
            }
            if tracing::enabled!(Level::INFO) {
                levels.push(Level::INFO);
            }
            if tracing::enabled!(Level::DEBUG) {
                levels.push(Level::DEBUG);
            }
            levels
        })
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(false), LevelFilter::WARN);
        assert_eq!(default_level(true), LevelFilter::DEBUG);
    }

    #[test]
    fn test_filter_defaults_to_warn() {
        assert_eq!(
            enabled_levels(filter(false, "")),
            vec![Level::ERROR, Level::WARN]
        );
    }

    #[test]
    fn test_verbose_filter_enables_debug() {
        assert_eq!(
            enabled_levels(filter(true, "")),
            vec![Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG]
        );
    }

    #[test]
    fn test_directives_override_default() {
        assert_eq!(
            enabled_levels(filter(false, "mazewalls=info")),
            vec![Level::ERROR, Level::WARN, Level::INFO]
        );
        assert_eq!(
            enabled_levels(filter(true, "error,not a directive")),
            vec![Level::ERROR]
        );
    }
}
