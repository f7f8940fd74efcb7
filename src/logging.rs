//! File-backed `tracing` setup. The terminal belongs to the TUI, so logs never go to stdout.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Variable holding a `tracing` filter directive; wins over the configured level.
pub const LOG_FILTER_VAR: &str = "BOOTHFORM_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform does not provide a data directory.
    #[error("could not determine XDG data directory")]
    NoDataDir,

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber was already installed.
    #[error("could not install log subscriber: {0}")]
    Init(String),
}

/// Returns `<data_dir>/boothform/boothform.log`.
pub fn default_log_path() -> Result<PathBuf, LoggingError> {
    let dir = dirs::data_dir().ok_or(LoggingError::NoDataDir)?;
    Ok(dir.join("boothform").join("boothform.log"))
}

/// Picks the `BOOTHFORM_LOG` directive unless it is unset or blank.
pub fn filter_directive<'a>(env_directive: Option<&'a str>, default_directive: &'a str) -> &'a str {
    env_directive
        .filter(|d| !d.trim().is_empty())
        .unwrap_or(default_directive)
}

/// Builds the filter from `BOOTHFORM_LOG`, falling back to `default_directive`.
pub fn build_filter(
    env_directive: Option<&str>,
    default_directive: &str,
) -> Result<EnvFilter, LoggingError> {
    Ok(EnvFilter::try_new(filter_directive(
        env_directive,
        default_directive,
    ))?)
}

/// Installs the global subscriber, appending to the file at `path`.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn init(path: &Path, default_directive: &str) -> Result<(), LoggingError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let env_directive = std::env::var(LOG_FILTER_VAR).ok();
    let filter = build_filter(env_directive.as_deref(), default_directive)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directive_wins() {
        assert_eq!(filter_directive(Some("boothform=trace"), "info"), "boothform=trace");
    }

    #[test]
    fn blank_env_directive_falls_back() {
        assert_eq!(filter_directive(Some("  "), "warn"), "warn");
    }

    #[test]
    fn missing_env_directive_falls_back() {
        assert_eq!(filter_directive(None, "debug"), "debug");
    }

    #[test]
    fn valid_directives_build() {
        assert!(build_filter(Some("boothform=debug,hyper=warn"), "info").is_ok());
        assert!(build_filter(None, "info").is_ok());
    }

    #[test]
    fn invalid_directive_is_error() {
        assert!(matches!(
            build_filter(Some("boothform=loud"), "info"),
            Err(LoggingError::Filter(_))
        ));
    }

    #[test]
    fn default_log_path_ends_with_file_name() {
        if let Ok(path) = default_log_path() {
            assert!(path.ends_with("boothform/boothform.log"));
        }
    }
}
